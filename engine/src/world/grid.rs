//! Grid Module
//!
//! Unit-cube lattice used by the level editor. Cells sit on integer X/Z
//! coordinates with their centre half a unit above the layer floor, so the
//! ground layer has centres at Y = 0.5, the next layer at Y = 1.5, and so on.

use glam::Vec3;

/// Height of a ground-layer cell centre.
pub const CELL_CENTER_HEIGHT: f32 = 0.5;

/// Snap an arbitrary ground point to the nearest ground-layer cell centre.
///
/// X and Z are rounded to the lattice with ties going to the even cell
/// (2.5 snaps to 2, 3.5 to 4). Y is replaced by the ground-layer centre height.
pub fn snap_to_ground_cell(pos: Vec3) -> Vec3 {
    Vec3::new(
        pos.x.round_ties_even(),
        CELL_CENTER_HEIGHT,
        pos.z.round_ties_even(),
    )
}
