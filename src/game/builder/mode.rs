//! Builder Mode
//!
//! Place/destroy mode, the block-type selector and the cursor state the
//! editor recomputes every tick.

use glam::Vec3;

use crate::game::builder::tools::{DEFAULT_CURSOR_CELL, DESTROY_TINT, PLACE_TINT};
use crate::game::level::{BlockCatalog, BlockType};

/// What a click does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Placing,
    Destroying,
}

impl EditMode {
    pub fn toggled(self) -> Self {
        match self {
            EditMode::Placing => EditMode::Destroying,
            EditMode::Destroying => EditMode::Placing,
        }
    }

    pub fn is_destroying(self) -> bool {
        self == EditMode::Destroying
    }
}

/// Cyclic index into the block catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockSelector {
    index: usize,
    catalog_len: usize,
}

impl BlockSelector {
    /// Selector starting at the first prototype. `catalog_len` is at least 1.
    pub fn new(catalog_len: usize) -> Self {
        Self {
            index: 0,
            catalog_len: catalog_len.max(1),
        }
    }

    pub fn for_catalog(catalog: &BlockCatalog) -> Self {
        Self::new(catalog.len())
    }

    pub fn selected(&self) -> BlockType {
        BlockType(self.index as u32)
    }

    pub fn catalog_len(&self) -> usize {
        self.catalog_len
    }

    /// Select the next prototype, wrapping from the last to the first.
    pub fn select_next(&mut self) -> BlockType {
        self.index = (self.index + 1) % self.catalog_len;
        self.selected()
    }

    /// Select the previous prototype, wrapping from the first to the last.
    pub fn select_prev(&mut self) -> BlockType {
        self.index = if self.index == 0 {
            self.catalog_len - 1
        } else {
            self.index - 1
        };
        self.selected()
    }

    pub fn selected_name<'a>(&self, catalog: &'a BlockCatalog) -> &'a str {
        catalog.name(self.selected())
    }
}

/// Per-tick cursor state. Not persisted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CursorState {
    /// Centre of the cell the cursor points at
    pub target_cell: Vec3,
    /// Rotation the next placed block gets (Euler degrees, yaw only)
    pub pending_rotation: Vec3,
    pub mode: EditMode,
    /// Whether the cursor should be drawn this tick
    pub visible: bool,
}

impl Default for CursorState {
    fn default() -> Self {
        Self {
            target_cell: DEFAULT_CURSOR_CELL,
            pending_rotation: Vec3::ZERO,
            mode: EditMode::Placing,
            visible: false,
        }
    }
}

impl CursorState {
    pub fn toggle_mode(&mut self) -> EditMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    /// Add `step_degrees` of yaw (negative turns counter-clockwise).
    /// Yaw is kept in [0, 360).
    pub fn rotate(&mut self, step_degrees: f32) -> Vec3 {
        let yaw = (self.pending_rotation.y + step_degrees).rem_euclid(360.0);
        self.pending_rotation = Vec3::new(0.0, yaw, 0.0);
        self.pending_rotation
    }

    /// Ghost-block colour for the current mode.
    pub fn tint(&self) -> [f32; 4] {
        match self.mode {
            EditMode::Placing => PLACE_TINT,
            EditMode::Destroying => DESTROY_TINT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_wraps_both_ways() {
        let mut selector = BlockSelector::new(3);
        assert_eq!(selector.select_prev(), BlockType(2));
        assert_eq!(selector.select_next(), BlockType(0));
        assert_eq!(selector.select_next(), BlockType(1));
        assert_eq!(selector.select_next(), BlockType(2));
        assert_eq!(selector.select_next(), BlockType(0));
    }

    #[test]
    fn test_single_entry_catalog_stays_at_zero() {
        let mut selector = BlockSelector::new(1);
        assert_eq!(selector.select_next(), BlockType(0));
        assert_eq!(selector.select_prev(), BlockType(0));
    }

    #[test]
    fn test_rotation_normalizes_to_full_turn() {
        let mut cursor = CursorState::default();
        assert_eq!(cursor.rotate(-90.0), Vec3::new(0.0, 270.0, 0.0));
        for _ in 0..4 {
            cursor.rotate(90.0);
        }
        assert_eq!(cursor.pending_rotation.y, 270.0);
    }

    #[test]
    fn test_mode_toggle_changes_tint() {
        let mut cursor = CursorState::default();
        assert_eq!(cursor.tint(), PLACE_TINT);
        assert_eq!(cursor.toggle_mode(), EditMode::Destroying);
        assert_eq!(cursor.tint(), DESTROY_TINT);
        assert_eq!(cursor.toggle_mode(), EditMode::Placing);
    }
}
