//! Level Module
//!
//! Placed blocks, the world they live in, the block catalog, and the level
//! file format.

pub mod catalog;
pub mod level_file;
pub mod scene;
pub mod world_state;

pub use catalog::{BlockCatalog, BlockPrototype, BlockType, CatalogError};
pub use level_file::{
    BlockRecord, LevelFileError, LevelMetadata, PersistedLevel, load_level, save_level,
};
pub use scene::{GROUND_HEIGHT, LevelScene};
pub use world_state::{BLOCK_HALF_EXTENT, PlacedBlock, WorldState};
