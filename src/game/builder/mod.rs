//! Builder Module
//!
//! Cursor targeting, edit mode, block selection and the placement rules.

pub mod mode;
pub mod placement;
pub mod raycast;
pub mod tools;

pub use mode::{BlockSelector, CursorState, EditMode};
pub use placement::{InteractionOutcome, Mutation, Occupancy, decide_interaction, query_occupancy};
pub use raycast::resolve_target_cell;
pub use tools::{DEFAULT_CURSOR_CELL, DESTROY_TINT, OCCUPANCY_HALF_EXTENT, PLACE_TINT, ROTATION_STEP_DEGREES};
