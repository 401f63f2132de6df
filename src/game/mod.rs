//! Game Module
//!
//! The level editor built on top of the engine: targeting, placement
//! rules, level state and persistence, and the per-tick session.

pub mod builder;
pub mod config;
pub mod input;
pub mod level;
pub mod session;

pub use builder::{BlockSelector, CursorState, EditMode, InteractionOutcome, resolve_target_cell};
pub use config::{ConfigError, EditorConfig};
pub use input::EditorCommand;
pub use level::{BlockCatalog, BlockType, LevelFileError, LevelScene, PlacedBlock, WorldState};
pub use session::{EditorSession, EditorState, TickContext, TickEffect, TickInput, tick};
