//! Physics module
//!
//! Collision primitives for the level editor. There is no physics library
//! behind this: boxes, rays and the overlap-query trait are all the editor
//! needs from a physics world.
//!
//! # Unit System
//!
//! **1 unit = 1 block edge**. Placed blocks are unit cubes.

pub mod collision;

pub use collision::{AABB, ColliderTag, OverlapHit, SpatialIndex, aabb_surface_normal, ray_aabb_intersect};
