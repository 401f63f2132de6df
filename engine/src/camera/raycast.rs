//! Raycast Module
//!
//! The raycast interface the editor consumes, plus the plane intersection
//! helper scene raycasters are built from.

use glam::Vec3;

/// What a ray hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitKind {
    /// The static ground plane
    Ground,
    /// A block placed by the editor
    Block,
}

/// The object a ray hit, reduced to what the editor needs from it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitObject {
    pub kind: HitKind,
    /// Root position of the object (the block centre for placed blocks)
    pub root_position: Vec3,
}

impl HitObject {
    pub fn ground() -> Self {
        Self {
            kind: HitKind::Ground,
            root_position: Vec3::ZERO,
        }
    }

    pub fn block(root_position: Vec3) -> Self {
        Self {
            kind: HitKind::Block,
            root_position,
        }
    }

    pub fn is_block(&self) -> bool {
        self.kind == HitKind::Block
    }
}

/// Nearest surface hit along a ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaycastHit {
    /// World-space hit point
    pub point: Vec3,
    /// Outward surface normal at the hit point
    pub normal: Vec3,
    /// Distance from the ray origin
    pub distance: f32,
    pub object: HitObject,
}

/// Casts rays into a scene.
pub trait Raycaster {
    /// Nearest hit along `direction` from `origin` within `max_distance`.
    fn cast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RaycastHit>;
}

/// Intersect a ray with the horizontal plane `y = plane_height`.
///
/// # Returns
/// * `Some(t)` - distance along the (normalized) ray to the plane
/// * `None` - ray is parallel to the plane or the plane is behind the origin
pub fn ray_plane_distance(ray_origin: Vec3, ray_dir: Vec3, plane_height: f32) -> Option<f32> {
    if ray_dir.y.abs() < 0.0001 {
        return None;
    }

    let t = (plane_height - ray_origin.y) / ray_dir.y;
    if t < 0.0 {
        return None;
    }
    Some(t)
}
