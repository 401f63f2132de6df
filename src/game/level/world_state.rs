//! World State
//!
//! The authoritative set of placed blocks plus the player position. Blocks
//! are kept in insertion order so a saved level lists them the way they
//! were built.

use glam::Vec3;

use crate::game::level::catalog::BlockType;
use crate::physics::AABB;

/// Half edge of a placed unit cube.
pub const BLOCK_HALF_EXTENT: f32 = 0.5;

/// A block placed in the level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedBlock {
    /// Cell centre (integer X/Z, Y at a half unit)
    pub position: Vec3,
    /// Euler angles in degrees; only yaw (Y) is ever non-zero
    pub rotation: Vec3,
    pub block_type: BlockType,
}

impl PlacedBlock {
    pub fn new(position: Vec3, rotation: Vec3, block_type: BlockType) -> Self {
        Self {
            position,
            rotation,
            block_type,
        }
    }

    /// Collider of the block. Yaw in 90 degree steps leaves a unit cube's box unchanged.
    pub fn bounds(&self) -> AABB {
        AABB::from_center(self.position, Vec3::splat(BLOCK_HALF_EXTENT))
    }
}

/// Everything a level consists of.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorldState {
    pub player_position: Vec3,
    blocks: Vec<PlacedBlock>,
}

impl WorldState {
    pub fn new(player_position: Vec3) -> Self {
        Self {
            player_position,
            blocks: Vec::new(),
        }
    }

    /// Build a world from an existing block list (kept in the given order).
    pub fn from_blocks(player_position: Vec3, blocks: Vec<PlacedBlock>) -> Self {
        Self {
            player_position,
            blocks,
        }
    }

    pub fn blocks(&self) -> &[PlacedBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub(crate) fn insert(&mut self, block: PlacedBlock) {
        self.blocks.push(block);
    }

    /// Remove every block whose root is exactly `root`.
    pub(crate) fn remove_at_root(&mut self, root: Vec3) -> Vec<PlacedBlock> {
        let mut removed = Vec::new();
        self.blocks.retain(|b| {
            if b.position == root {
                removed.push(*b);
                false
            } else {
                true
            }
        });
        removed
    }

    /// Remove all blocks. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let count = self.blocks.len();
        self.blocks.clear();
        count
    }

    /// Discard the current blocks and take over another world's blocks and player position.
    pub fn replace_with(&mut self, other: WorldState) {
        *self = other;
    }
}
