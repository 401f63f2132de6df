//! Level Editor Engine Library
//!
//! Core of a first-person, grid-based level editor: aim a cursor at a
//! unit-cube lattice, place or destroy blocks, and persist the layout.
//! Rendering, input devices and the physics world are collaborators; this
//! library only consumes a raycast result and an overlap query.
//!
//! # Modules
//!
//! - [`camera`] - First-person view and the `Raycaster` interface
//! - [`physics`] - AABBs and the `SpatialIndex` overlap-query interface
//! - [`world`] - Ground-cell snapping on the unit lattice
//! - [`game`] - The editor itself: targeting, placement rules, level state,
//!   the level file codec and the per-tick session
//!
//! # Example
//!
//! ```ignore
//! use level_editor_engine::game::{EditorConfig, EditorSession, BlockCatalog, TickInput};
//!
//! let catalog = BlockCatalog::new(vec!["stone".into(), "wood".into()])?;
//! let mut session = EditorSession::new(EditorConfig::default(), catalog);
//!
//! // Each frame: cast the eye ray, then step the session
//! let hit = scene.cast(eye, forward, session.config().max_ray_distance);
//! let effects = session.step(TickInput::new(player_position, hit));
//! ```

pub mod camera;
pub mod physics;
pub mod world;

// Editor modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

pub use camera::{FirstPersonView, HitKind, HitObject, RaycastHit, Raycaster};
pub use physics::{AABB, ColliderTag, OverlapHit, SpatialIndex};
pub use world::snap_to_ground_cell;
