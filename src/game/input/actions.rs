//! Editor Commands
//!
//! Discrete session commands, decoupled from whatever device produced them.

use std::str::FromStr;

/// One discrete editor command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorCommand {
    /// Write the level file
    Save,
    /// Replace the level with the level file
    Load,
    /// Remove every block
    Clear,
    /// Switch between placing and destroying
    ToggleMode,
    /// Turn the pending rotation one step clockwise
    RotateCw,
    /// Turn the pending rotation one step counter-clockwise
    RotateCcw,
    /// Next block in the catalog (scroll up)
    SelectNextBlock,
    /// Previous block in the catalog (scroll down)
    SelectPrevBlock,
    /// Place or destroy at the cursor (primary click)
    Interact,
}

impl EditorCommand {
    /// Commands that only apply while placing.
    pub fn is_placement_modifier(self) -> bool {
        matches!(
            self,
            EditorCommand::RotateCw
                | EditorCommand::RotateCcw
                | EditorCommand::SelectNextBlock
                | EditorCommand::SelectPrevBlock
        )
    }

    /// Map a scroll-wheel delta to a selection command.
    pub fn from_scroll(delta: f32) -> Option<Self> {
        if delta > 0.0 {
            Some(EditorCommand::SelectNextBlock)
        } else if delta < 0.0 {
            Some(EditorCommand::SelectPrevBlock)
        } else {
            None
        }
    }
}

impl FromStr for EditorCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "save" => Ok(EditorCommand::Save),
            "load" => Ok(EditorCommand::Load),
            "clear" => Ok(EditorCommand::Clear),
            "toggle" | "mode" => Ok(EditorCommand::ToggleMode),
            "cw" | "rotate_cw" => Ok(EditorCommand::RotateCw),
            "ccw" | "rotate_ccw" => Ok(EditorCommand::RotateCcw),
            "next" => Ok(EditorCommand::SelectNextBlock),
            "prev" => Ok(EditorCommand::SelectPrevBlock),
            "click" | "interact" => Ok(EditorCommand::Interact),
            other => Err(format!("unknown command: {other}")),
        }
    }
}
