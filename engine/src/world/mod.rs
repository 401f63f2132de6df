//! World Module
//!
//! The unit-cube lattice blocks are placed on.

pub mod grid;

pub use grid::{CELL_CENTER_HEIGHT, snap_to_ground_cell};
