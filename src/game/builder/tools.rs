//! Builder Tools
//!
//! Tuning constants shared by targeting and the placement rules.

use glam::Vec3;

/// Half extent of the occupancy probe around a target cell.
/// Less than half a cell so a neighbouring block is never reported.
pub const OCCUPANCY_HALF_EXTENT: f32 = 0.49;

/// Yaw change of one rotate command, in degrees
pub const ROTATION_STEP_DEGREES: f32 = 90.0;

/// Cursor target before the first raycast hit
pub const DEFAULT_CURSOR_CELL: Vec3 = Vec3::new(0.0, 0.5, 0.0);

/// Cursor colour while placing (RGBA)
pub const PLACE_TINT: [f32; 4] = [0.0, 1.0, 0.0, 0.5];

/// Cursor colour while destroying (RGBA)
pub const DESTROY_TINT: [f32; 4] = [1.0, 0.0, 0.0, 0.5];
