//! Level File Save/Load
//!
//! Binary file format for persisting a level to disk.
//! Layout: fixed 32-byte header | block records | metadata JSON.
//!
//! The header carries magic bytes, version, the player position and the
//! section sizes, so a reader can validate the whole file before touching
//! any world state. Block records are raw little-endian `Pod` structs for
//! exact float round-trips. Metadata is JSON for human-inspectability.
//!
//! Saving writes to a sibling `.tmp` file and renames it over the target,
//! so a failed save never leaves a truncated level behind.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::level::catalog::{BlockCatalog, BlockType};
use crate::game::level::world_state::{PlacedBlock, WorldState};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes identifying a level file.
pub const LEVEL_MAGIC: [u8; 4] = *b"GLVL";

/// Current file format version.
pub const LEVEL_VERSION: u32 = 1;

/// Size of the header in bytes.
const HEADER_SIZE: usize = 32;

/// Size of one block record in bytes.
const RECORD_SIZE: usize = 28;

// ============================================================================
// HEADER / RECORDS
// ============================================================================

/// Fixed-size binary header.
///
/// `magic` (4) + `version` (4) + `player_position` (12) + `block_count` (4)
/// + `metadata_len` (4) + `_reserved` (4) = 32.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct LevelHeader {
    pub magic: [u8; 4],
    pub version: u32,
    pub player_position: [f32; 3],
    pub block_count: u32,
    /// Length in bytes of the trailing metadata JSON
    pub metadata_len: u32,
    pub _reserved: [u8; 4],
}

static_assertions::assert_eq_size!(LevelHeader, [u8; HEADER_SIZE]);

/// On-disk form of one placed block.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct BlockRecord {
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    pub block_type: u32,
}

static_assertions::assert_eq_size!(BlockRecord, [u8; RECORD_SIZE]);

impl From<&PlacedBlock> for BlockRecord {
    fn from(block: &PlacedBlock) -> Self {
        Self {
            position: block.position.to_array(),
            rotation: block.rotation.to_array(),
            block_type: block.block_type.0,
        }
    }
}

impl From<BlockRecord> for PlacedBlock {
    fn from(record: BlockRecord) -> Self {
        PlacedBlock::new(
            Vec3::from_array(record.position),
            Vec3::from_array(record.rotation),
            BlockType(record.block_type),
        )
    }
}

// ============================================================================
// METADATA
// ============================================================================

/// Human-readable metadata stored as JSON at the end of the file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelMetadata {
    pub level_name: String,
    /// Seconds since the Unix epoch at save time
    pub saved_at: u64,
    /// Catalog identifiers in index order at save time
    pub catalog: Vec<String>,
}

// ============================================================================
// PERSISTED LEVEL
// ============================================================================

/// The on-disk projection of a [`WorldState`].
#[derive(Clone, Debug, PartialEq)]
pub struct PersistedLevel {
    pub player_position: Vec3,
    /// Blocks in world iteration order
    pub blocks: Vec<BlockRecord>,
    pub metadata: LevelMetadata,
}

impl PersistedLevel {
    pub fn from_world(world: &WorldState, metadata: LevelMetadata) -> Self {
        Self {
            player_position: world.player_position,
            blocks: world.blocks().iter().map(BlockRecord::from).collect(),
            metadata,
        }
    }

    pub fn into_world(self) -> WorldState {
        WorldState::from_blocks(
            self.player_position,
            self.blocks.into_iter().map(PlacedBlock::from).collect(),
        )
    }
}

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Errors that can occur during level save/load.
#[derive(Debug, Error)]
pub enum LevelFileError {
    #[error("level file {} does not exist", .path.display())]
    NotFound { path: PathBuf },
    #[error("file too short for level header")]
    FileTooShort,
    #[error("invalid magic bytes (expected GLVL)")]
    InvalidMagic,
    #[error("unsupported level version: {0}")]
    UnsupportedVersion(u32),
    #[error("level file length mismatch: expected {expected} bytes, found {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("level file contains a non-finite coordinate")]
    NonFiniteValue,
    #[error("block type {index} is outside the catalog ({catalog_len} entries)")]
    UnknownBlockType { index: u32, catalog_len: usize },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LevelFileError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, LevelFileError::NotFound { .. })
    }

    /// The file exists but its contents cannot be turned into a level.
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            LevelFileError::FileTooShort
                | LevelFileError::InvalidMagic
                | LevelFileError::UnsupportedVersion(_)
                | LevelFileError::Truncated { .. }
                | LevelFileError::NonFiniteValue
                | LevelFileError::UnknownBlockType { .. }
                | LevelFileError::Json(_)
        )
    }
}

// ============================================================================
// ENCODE / DECODE
// ============================================================================

/// Serialize a level into the file layout.
pub fn encode_level(level: &PersistedLevel) -> Result<Vec<u8>, LevelFileError> {
    let metadata_json = serde_json::to_vec(&level.metadata)?;

    let header = LevelHeader {
        magic: LEVEL_MAGIC,
        version: LEVEL_VERSION,
        player_position: level.player_position.to_array(),
        block_count: level.blocks.len() as u32,
        metadata_len: metadata_json.len() as u32,
        _reserved: [0u8; 4],
    };

    let mut bytes =
        Vec::with_capacity(HEADER_SIZE + level.blocks.len() * RECORD_SIZE + metadata_json.len());
    bytes.extend_from_slice(bytemuck::bytes_of(&header));
    bytes.extend_from_slice(bytemuck::cast_slice::<BlockRecord, u8>(&level.blocks));
    bytes.extend_from_slice(&metadata_json);
    Ok(bytes)
}

/// Parse and validate the file layout. Nothing is returned unless the whole buffer is valid.
pub fn decode_level(data: &[u8]) -> Result<PersistedLevel, LevelFileError> {
    if data.len() < HEADER_SIZE {
        return Err(LevelFileError::FileTooShort);
    }

    // Read unaligned: the buffer carries no alignment guarantee.
    let header: LevelHeader = bytemuck::pod_read_unaligned(&data[..HEADER_SIZE]);

    if header.magic != LEVEL_MAGIC {
        return Err(LevelFileError::InvalidMagic);
    }
    if header.version != LEVEL_VERSION {
        return Err(LevelFileError::UnsupportedVersion(header.version));
    }

    let records_len = (header.block_count as usize)
        .checked_mul(RECORD_SIZE)
        .ok_or(LevelFileError::Truncated {
            expected: usize::MAX,
            actual: data.len(),
        })?;
    let records_end = HEADER_SIZE + records_len;
    let expected = records_end + header.metadata_len as usize;
    if data.len() != expected {
        return Err(LevelFileError::Truncated {
            expected,
            actual: data.len(),
        });
    }

    let player_position = Vec3::from_array(header.player_position);
    if !player_position.is_finite() {
        return Err(LevelFileError::NonFiniteValue);
    }

    let blocks: Vec<BlockRecord> = data[HEADER_SIZE..records_end]
        .chunks_exact(RECORD_SIZE)
        .map(bytemuck::pod_read_unaligned::<BlockRecord>)
        .collect();
    if blocks
        .iter()
        .any(|r| r.position.iter().chain(r.rotation.iter()).any(|v| !v.is_finite()))
    {
        return Err(LevelFileError::NonFiniteValue);
    }

    let metadata = if header.metadata_len == 0 {
        LevelMetadata::default()
    } else {
        serde_json::from_slice(&data[records_end..])?
    };

    Ok(PersistedLevel {
        player_position,
        blocks,
        metadata,
    })
}

// ============================================================================
// SAVE
// ============================================================================

/// Write a level file to disk, replacing any existing file atomically.
///
/// File layout:
/// ```text
/// [LevelHeader 32 bytes]
/// [block records: block_count * 28 bytes]
/// [metadata JSON: metadata_len bytes]
/// ```
pub fn save_level(
    path: &Path,
    world: &WorldState,
    level_name: &str,
    catalog: &BlockCatalog,
) -> Result<(), LevelFileError> {
    use std::io::Write;

    let metadata = LevelMetadata {
        level_name: level_name.to_string(),
        saved_at: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0),
        catalog: catalog.ids(),
    };
    let bytes = encode_level(&PersistedLevel::from_world(world, metadata))?;

    // Ensure parent directories exist.
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = temp_path_for(path);
    let write_result = (|| -> std::io::Result<()> {
        let mut file = std::fs::File::create(&tmp_path)?;
        file.write_all(&bytes)?;
        file.sync_all()?;
        std::fs::rename(&tmp_path, path)
    })();

    if let Err(e) = write_result {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e.into());
    }
    Ok(())
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

// ============================================================================
// LOAD
// ============================================================================

/// Read a level file and rebuild the world it describes.
///
/// Every record must name a block type present in `catalog`. The current
/// world is not touched here; callers replace it only on success.
pub fn load_level(path: &Path, catalog: &BlockCatalog) -> Result<WorldState, LevelFileError> {
    let data = match std::fs::read(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(LevelFileError::NotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let level = decode_level(&data)?;

    if let Some(bad) = level
        .blocks
        .iter()
        .find(|r| !catalog.contains(BlockType(r.block_type)))
    {
        return Err(LevelFileError::UnknownBlockType {
            index: bad.block_type,
            catalog_len: catalog.len(),
        });
    }

    if !level.metadata.catalog.is_empty() && level.metadata.catalog != catalog.ids() {
        log::warn!(
            "[Level File] {} was saved with catalog {:?}, current catalog is {:?}",
            path.display(),
            level.metadata.catalog,
            catalog.ids()
        );
    }

    Ok(level.into_world())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_catalog() -> BlockCatalog {
        BlockCatalog::new(vec!["stone".into(), "wood".into(), "glass".into()]).unwrap()
    }

    fn test_world() -> WorldState {
        WorldState::from_blocks(
            Vec3::new(0.0, 1.0, 0.0),
            vec![
                PlacedBlock::new(Vec3::new(1.0, 0.5, 2.0), Vec3::new(0.0, 90.0, 0.0), BlockType(0)),
                PlacedBlock::new(Vec3::new(-3.0, 0.5, 0.0), Vec3::ZERO, BlockType(2)),
            ],
        )
    }

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("level_file_test_{name}_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_dirs_are_private_to_this_process() {
        let dir = test_dir("naming");
        let name = dir.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.ends_with(&format!("_{}", std::process::id())));
    }

    #[test]
    fn test_header_size() {
        assert_eq!(std::mem::size_of::<LevelHeader>(), 32);
        assert_eq!(std::mem::size_of::<BlockRecord>(), 28);
    }

    #[test]
    fn test_round_trip_preserves_order_and_player() {
        let dir = test_dir("round_trip");
        let path = dir.join("Untitled.map");
        let world = test_world();

        save_level(&path, &world, "Untitled", &test_catalog()).unwrap();
        let loaded = load_level(&path, &test_catalog()).unwrap();

        assert_eq!(loaded, world);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_save_overwrites_and_leaves_no_temp_file() {
        let dir = test_dir("overwrite");
        let path = dir.join("level.map");

        save_level(&path, &test_world(), "level", &test_catalog()).unwrap();
        let empty = WorldState::new(Vec3::new(4.0, 1.0, 4.0));
        save_level(&path, &empty, "level", &test_catalog()).unwrap();

        let loaded = load_level(&path, &test_catalog()).unwrap();
        assert!(loaded.is_empty());
        assert_eq!(loaded.player_position, Vec3::new(4.0, 1.0, 4.0));
        assert!(!dir.join("level.map.tmp").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_failed_save_keeps_previous_file() {
        let dir = test_dir("failed_save");
        let path = dir.join("level.map");
        save_level(&path, &test_world(), "level", &test_catalog()).unwrap();

        // A directory squatting on the temp path makes the write fail.
        std::fs::create_dir_all(dir.join("level.map.tmp")).unwrap();
        let result = save_level(&path, &WorldState::default(), "level", &test_catalog());
        assert!(matches!(result, Err(LevelFileError::Io(_))));

        let loaded = load_level(&path, &test_catalog()).unwrap();
        assert_eq!(loaded, test_world());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = test_dir("missing");
        match load_level(&dir.join("nothing.map"), &test_catalog()) {
            Err(e) => assert!(e.is_not_found() && !e.is_corrupt()),
            Ok(_) => panic!("expected NotFound"),
        }
    }

    #[test]
    fn test_invalid_magic() {
        let mut bad = [0u8; 32];
        bad[0..4].copy_from_slice(b"NOPE");
        match decode_level(&bad) {
            Err(LevelFileError::InvalidMagic) => {}
            other => panic!("expected InvalidMagic, got {other:?}"),
        }
    }

    #[test]
    fn test_file_too_short() {
        match decode_level(&[0u8; 10]) {
            Err(LevelFileError::FileTooShort) => {}
            other => panic!("expected FileTooShort, got {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_version() {
        let mut header = LevelHeader::zeroed();
        header.magic = LEVEL_MAGIC;
        header.version = 99;
        match decode_level(bytemuck::bytes_of(&header)) {
            Err(LevelFileError::UnsupportedVersion(99)) => {}
            other => panic!("expected UnsupportedVersion(99), got {other:?}"),
        }
    }

    #[test]
    fn test_truncated_records_are_corrupt() {
        let level = PersistedLevel::from_world(&test_world(), LevelMetadata::default());
        let bytes = encode_level(&level).unwrap();
        let err = decode_level(&bytes[..bytes.len() - 5]).unwrap_err();
        assert!(matches!(err, LevelFileError::Truncated { .. }));
        assert!(err.is_corrupt());
    }

    #[test]
    fn test_non_finite_position_is_corrupt() {
        let mut world = test_world();
        world.player_position = Vec3::new(f32::NAN, 0.0, 0.0);
        let bytes = encode_level(&PersistedLevel::from_world(&world, LevelMetadata::default())).unwrap();
        assert!(matches!(decode_level(&bytes), Err(LevelFileError::NonFiniteValue)));
    }

    #[test]
    fn test_unknown_block_type_is_corrupt() {
        let dir = test_dir("unknown_type");
        let path = dir.join("level.map");
        save_level(&path, &test_world(), "level", &test_catalog()).unwrap();

        let small = BlockCatalog::new(vec!["stone".into()]).unwrap();
        match load_level(&path, &small) {
            Err(LevelFileError::UnknownBlockType { index: 2, catalog_len: 1 }) => {}
            other => panic!("expected UnknownBlockType, got {other:?}"),
        }

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_metadata_round_trips() {
        let metadata = LevelMetadata {
            level_name: "castle".to_string(),
            saved_at: 1_700_000_000,
            catalog: vec!["stone".to_string()],
        };
        let level = PersistedLevel::from_world(&test_world(), metadata.clone());
        let decoded = decode_level(&encode_level(&level).unwrap()).unwrap();
        assert_eq!(decoded.metadata, metadata);
        assert_eq!(decoded.blocks, level.blocks);
    }
}
