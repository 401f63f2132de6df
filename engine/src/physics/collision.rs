//! Collision Detection
//!
//! Axis-aligned boxes, ray/box intersection and the overlap-query interface
//! the editor uses to decide whether a cell is free.

use glam::Vec3;

// =============================================================================
// AABB
// =============================================================================

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centred on `center` extending `half_extents` along each axis.
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Strict overlap test. Boxes that only touch on a face do not overlap.
    pub fn overlaps(&self, other: &AABB) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }
}

// =============================================================================
// Ray / AABB
// =============================================================================

/// Slab-method ray/AABB intersection.
///
/// Returns the distance along `ray_dir` to the nearest intersection, or the
/// exit distance when the ray starts inside the box.
pub fn ray_aabb_intersect(ray_origin: Vec3, ray_dir: Vec3, aabb: &AABB) -> Option<f32> {
    // Near-zero components become huge so the slab never limits the range
    let inv_dir = Vec3::new(
        if ray_dir.x.abs() > 1e-10 { 1.0 / ray_dir.x } else { f32::MAX * ray_dir.x.signum() },
        if ray_dir.y.abs() > 1e-10 { 1.0 / ray_dir.y } else { f32::MAX * ray_dir.y.signum() },
        if ray_dir.z.abs() > 1e-10 { 1.0 / ray_dir.z } else { f32::MAX * ray_dir.z.signum() },
    );

    let t1 = (aabb.min - ray_origin) * inv_dir;
    let t2 = (aabb.max - ray_origin) * inv_dir;

    let t_min = t1.min(t2).max_element();
    let t_max = t1.max(t2).min_element();

    if t_max >= t_min && t_max >= 0.0 {
        if t_min >= 0.0 { Some(t_min) } else { Some(t_max) }
    } else {
        None
    }
}

/// Outward normal of the AABB face closest to `point`.
pub fn aabb_surface_normal(point: Vec3, aabb: &AABB) -> Vec3 {
    let local = point - aabb.center();
    let normalized = local / aabb.half_extents();
    let abs_normalized = normalized.abs();

    if abs_normalized.x >= abs_normalized.y && abs_normalized.x >= abs_normalized.z {
        Vec3::new(normalized.x.signum(), 0.0, 0.0)
    } else if abs_normalized.y >= abs_normalized.z {
        Vec3::new(0.0, normalized.y.signum(), 0.0)
    } else {
        Vec3::new(0.0, 0.0, normalized.z.signum())
    }
}

// =============================================================================
// Overlap queries
// =============================================================================

/// What kind of collider an overlap query found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColliderTag {
    /// A placed block
    Block,
    /// The player's exclusion volume
    Player,
}

/// One collider returned by [`SpatialIndex::query_overlap`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapHit {
    pub tag: ColliderTag,
    /// Root position of the object owning the collider
    pub root: Vec3,
    pub bounds: AABB,
}

/// Box-overlap query over everything that can occupy space in the scene.
pub trait SpatialIndex {
    /// All colliders whose bounds overlap the box at `center` with `half_extents`.
    fn query_overlap(&self, center: Vec3, half_extents: Vec3) -> Vec<OverlapHit>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box(center: Vec3) -> AABB {
        AABB::from_center(center, Vec3::splat(0.5))
    }

    #[test]
    fn test_adjacent_cells_do_not_overlap_shrunk_query() {
        let block = unit_box(Vec3::new(1.0, 0.5, 0.0));
        let query = AABB::from_center(Vec3::new(0.0, 0.5, 0.0), Vec3::splat(0.49));
        assert!(!block.overlaps(&query));

        let same_cell = AABB::from_center(Vec3::new(1.0, 0.5, 0.0), Vec3::splat(0.49));
        assert!(block.overlaps(&same_cell));
    }

    #[test]
    fn test_touching_faces_do_not_overlap() {
        let a = unit_box(Vec3::ZERO);
        let b = unit_box(Vec3::new(1.0, 0.0, 0.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_ray_hits_box_front_face() {
        let aabb = unit_box(Vec3::new(0.0, 0.5, 0.0));
        let t = ray_aabb_intersect(Vec3::new(0.0, 0.5, 5.0), Vec3::new(0.0, 0.0, -1.0), &aabb)
            .expect("ray should hit");
        assert!((t - 4.5).abs() < 1e-5);

        let point = Vec3::new(0.0, 0.5, 5.0) + Vec3::new(0.0, 0.0, -1.0) * t;
        assert_eq!(aabb_surface_normal(point, &aabb), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_ray_misses_box_behind_origin() {
        let aabb = unit_box(Vec3::new(0.0, 0.5, 0.0));
        assert!(ray_aabb_intersect(Vec3::new(0.0, 0.5, 5.0), Vec3::Z, &aabb).is_none());
    }

    #[test]
    fn test_surface_normal_top_face() {
        let aabb = unit_box(Vec3::new(2.0, 0.5, 2.0));
        assert_eq!(
            aabb_surface_normal(Vec3::new(2.1, 1.0, 1.8), &aabb),
            Vec3::new(0.0, 1.0, 0.0)
        );
    }
}
