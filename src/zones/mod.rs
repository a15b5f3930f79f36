//! Zone addressing for moves and drop targets.
//!
//! ## Key Types
//!
//! - `Zone`: Closed destination variant (freecell, column, foundation)
//! - `Source`: Pick-up point (freecell slot, or column suffix at a depth)
//! - `Move`: `Source` plus destination `Zone`
//! - `ZoneAddress`: Loose `(kind, index)` form for external addressing

pub mod address;

pub use address::{Move, Source, Zone, ZoneAddress, ZoneKind};
