//! Camera Module
//!
//! First-person view state and the raycast interface used for aiming.
//! This module is window-system agnostic - it only deals with view state and math.

pub mod fps_controller;
pub mod raycast;

pub use fps_controller::FirstPersonView;
pub use raycast::{HitKind, HitObject, RaycastHit, Raycaster, ray_plane_distance};
