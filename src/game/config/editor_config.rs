//! Editor Configuration
//!
//! Level naming, storage location and the tuning values used by targeting
//! and the placement rules. `Default` returns the values the editor ships
//! with; a JSON file can override any subset of them.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::builder::tools::{OCCUPANCY_HALF_EXTENT, ROTATION_STEP_DEGREES};

/// Errors reading an editor configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Central configuration for an editing session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// File stem of the level file
    pub level_name: String,
    /// File extension of the level file (without the dot)
    pub extension: String,
    /// Directory level files are saved to and loaded from
    pub storage_dir: PathBuf,
    /// Half extent of the cube probed around the target cell.
    /// Kept below 0.5 so exactly-adjacent cells never count as occupied.
    pub occupancy_half_extent: f32,
    /// Half extents of the player-exclusion volume, centred on the player
    pub player_half_extents: Vec3,
    /// Raycast range
    pub max_ray_distance: f32,
    /// Yaw added or removed by one rotate command (degrees)
    pub rotation_step_degrees: f32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            level_name: "Untitled".to_string(),
            extension: "map".to_string(),
            storage_dir: PathBuf::from("assets/levels"),
            occupancy_half_extent: OCCUPANCY_HALF_EXTENT,
            player_half_extents: Vec3::new(0.5, 1.0, 0.5),
            max_ray_distance: 100.0,
            rotation_step_degrees: ROTATION_STEP_DEGREES,
        }
    }
}

impl EditorConfig {
    /// Read a JSON config file. A missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(data) => Ok(serde_json::from_str(&data)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!(
                    "[Config] {} not found, using defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Full path of the level file: `storage_dir/level_name.extension`.
    pub fn level_path(&self) -> PathBuf {
        self.storage_dir
            .join(format!("{}.{}", self.level_name, self.extension))
    }
}
