//! Session layer: the stateful shell around the pure rules.
//!
//! ## Key Types
//!
//! - `Controller`: Owns the current state, history, timers and statistics
//! - `History`: Undo stack of snapshots
//! - `Statistics`: Win/loss record, persisted through a `KeyValueStore`
//! - `DragSession`: Pointer-driven drag state machine
//! - `ScheduledTask`: Deferred, re-armable deadline on the host clock

pub mod clipboard;
pub mod controller;
pub mod drag;
pub mod error;
pub mod history;
pub mod scheduler;
pub mod stats;
pub mod storage;

pub use clipboard::{Clipboard, MemoryClipboard};
pub use controller::{format_time, Controller, DragOutcome, Focus, GameStatus, SyncOutcome};
pub use drag::{DragPhase, DragRelease, DragSession, DropTargets, Point, Rect};
pub use error::{ClipboardError, StoreError};
pub use history::History;
pub use scheduler::ScheduledTask;
pub use stats::{GameRecord, Outcome, Statistics};
pub use storage::{KeyValueStore, MemoryStore};
