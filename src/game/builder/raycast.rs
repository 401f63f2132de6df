//! Cursor Targeting
//!
//! Turns a raycast hit into the cell the cursor points at.

use glam::Vec3;

use crate::camera::RaycastHit;
use crate::game::builder::mode::EditMode;
use crate::world::snap_to_ground_cell;

/// Resolve the target cell for a raycast hit.
///
/// Block hits use the block's own root position so repeated adjacent
/// placements never drift:
/// * destroying targets the hit block itself, whatever face was hit
/// * placing targets the neighbour on the hit face (`root + normal`)
///
/// Ground hits snap the hit point to the nearest ground-layer cell in
/// either mode.
pub fn resolve_target_cell(hit: &RaycastHit, mode: EditMode) -> Vec3 {
    if hit.object.is_block() {
        match mode {
            EditMode::Destroying => hit.object.root_position,
            EditMode::Placing => hit.object.root_position + hit.normal,
        }
    } else {
        snap_to_ground_cell(hit.point)
    }
}
