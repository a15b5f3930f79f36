//! FreeCell rules: validation, execution, autoplay.
//!
//! - `validator`: pure legality predicates and supermove capacity
//! - `executor`: `apply_move` reducer, legal move enumeration, quick move
//! - `autoplay`: safe-to-foundation heuristic
//!
//! All functions take `&GameState` and never mutate it.

pub mod autoplay;
pub mod error;
pub mod executor;
pub mod validator;

pub use autoplay::{autoplay_step, can_autoplay, find_autoplay_move, is_safe_autoplay};
pub use error::InvalidMove;
pub use executor::{apply_move, legal_moves, quick_move};
pub use validator::{
    can_move_to_foundation, can_place_on_column, can_place_on_foundation, is_legal, is_movable_run,
    is_valid_run, max_move_size, pick_up, supermove_capacity, validate, Run,
};
