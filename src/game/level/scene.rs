//! Level Scene
//!
//! Read-only view of a [`WorldState`] that answers the two questions the
//! editor asks of a physics world: what does this ray hit, and what overlaps
//! this box. The ground is the infinite plane `y = 0`.

use glam::Vec3;

use crate::camera::{HitObject, RaycastHit, Raycaster, ray_plane_distance};
use crate::game::level::world_state::WorldState;
use crate::physics::{AABB, ColliderTag, OverlapHit, SpatialIndex, aabb_surface_normal, ray_aabb_intersect};

/// Height of the ground plane.
pub const GROUND_HEIGHT: f32 = 0.0;

pub struct LevelScene<'a> {
    world: &'a WorldState,
    /// Player-exclusion volume. Seen by overlap queries, never by rays.
    player_volume: Option<AABB>,
}

impl<'a> LevelScene<'a> {
    /// Scene without a player volume.
    pub fn new(world: &'a WorldState) -> Self {
        Self {
            world,
            player_volume: None,
        }
    }

    /// Scene with the player-exclusion volume centred on the world's player position.
    pub fn with_player(world: &'a WorldState, player_half_extents: Vec3) -> Self {
        Self {
            world,
            player_volume: Some(AABB::from_center(world.player_position, player_half_extents)),
        }
    }
}

impl Raycaster for LevelScene<'_> {
    fn cast(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RaycastHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec3::ZERO {
            return None;
        }

        let mut best: Option<RaycastHit> = None;

        if let Some(t) = ray_plane_distance(origin, dir, GROUND_HEIGHT) {
            if t <= max_distance {
                best = Some(RaycastHit {
                    point: origin + dir * t,
                    normal: if origin.y >= GROUND_HEIGHT { Vec3::Y } else { Vec3::NEG_Y },
                    distance: t,
                    object: HitObject::ground(),
                });
            }
        }

        for block in self.world.blocks() {
            let bounds = block.bounds();
            let Some(t) = ray_aabb_intersect(origin, dir, &bounds) else {
                continue;
            };
            if t > max_distance || best.as_ref().is_some_and(|b| b.distance <= t) {
                continue;
            }
            let point = origin + dir * t;
            best = Some(RaycastHit {
                point,
                normal: aabb_surface_normal(point, &bounds),
                distance: t,
                object: HitObject::block(block.position),
            });
        }

        best
    }
}

impl SpatialIndex for LevelScene<'_> {
    fn query_overlap(&self, center: Vec3, half_extents: Vec3) -> Vec<OverlapHit> {
        let probe = AABB::from_center(center, half_extents);

        let mut hits: Vec<OverlapHit> = self
            .world
            .blocks()
            .iter()
            .filter(|b| b.bounds().overlaps(&probe))
            .map(|b| OverlapHit {
                tag: ColliderTag::Block,
                root: b.position,
                bounds: b.bounds(),
            })
            .collect();

        if let Some(player) = self.player_volume {
            if player.overlaps(&probe) {
                hits.push(OverlapHit {
                    tag: ColliderTag::Player,
                    root: self.world.player_position,
                    bounds: player,
                });
            }
        }

        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::HitKind;
    use crate::game::level::catalog::BlockType;
    use crate::game::level::world_state::PlacedBlock;

    fn world_with_block_at_origin() -> WorldState {
        WorldState::from_blocks(
            Vec3::new(0.0, 1.0, 5.0),
            vec![PlacedBlock::new(Vec3::new(0.0, 0.5, 0.0), Vec3::ZERO, BlockType(0))],
        )
    }

    #[test]
    fn test_ray_hits_ground_when_nothing_in_the_way() {
        let world = WorldState::new(Vec3::ZERO);
        let scene = LevelScene::new(&world);
        let hit = scene
            .cast(Vec3::new(2.3, 2.0, 4.7), Vec3::NEG_Y, 100.0)
            .expect("should hit ground");
        assert_eq!(hit.object.kind, HitKind::Ground);
        assert!((hit.point - Vec3::new(2.3, 0.0, 4.7)).length() < 1e-5);
        assert_eq!(hit.normal, Vec3::Y);
    }

    #[test]
    fn test_ray_prefers_nearer_block_over_ground() {
        let world = world_with_block_at_origin();
        let scene = LevelScene::new(&world);
        let hit = scene
            .cast(Vec3::new(0.0, 0.5, 5.0), Vec3::new(0.0, -0.05, -1.0), 100.0)
            .expect("should hit block");
        assert_eq!(hit.object.kind, HitKind::Block);
        assert_eq!(hit.object.root_position, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(hit.normal, Vec3::Z);
    }

    #[test]
    fn test_ray_out_of_range_misses() {
        let world = WorldState::new(Vec3::ZERO);
        let scene = LevelScene::new(&world);
        assert!(scene.cast(Vec3::new(0.0, 50.0, 0.0), Vec3::NEG_Y, 10.0).is_none());
        assert!(scene.cast(Vec3::new(0.0, 2.0, 0.0), Vec3::Y, 100.0).is_none());
    }

    #[test]
    fn test_ray_ignores_player_volume() {
        let world = WorldState::new(Vec3::new(0.0, 1.0, 0.0));
        let scene = LevelScene::with_player(&world, Vec3::new(0.5, 1.0, 0.5));
        let hit = scene.cast(Vec3::new(0.0, 1.8, 0.0), Vec3::NEG_Y, 100.0).unwrap();
        assert_eq!(hit.object.kind, HitKind::Ground);
    }

    #[test]
    fn test_overlap_reports_blocks_and_player() {
        let mut world = world_with_block_at_origin();
        world.player_position = Vec3::new(1.0, 1.0, 0.0);
        let scene = LevelScene::with_player(&world, Vec3::new(0.5, 1.0, 0.5));

        let at_block = scene.query_overlap(Vec3::new(0.0, 0.5, 0.0), Vec3::splat(0.49));
        assert_eq!(at_block.len(), 1);
        assert_eq!(at_block[0].tag, ColliderTag::Block);

        let at_player = scene.query_overlap(Vec3::new(1.0, 0.5, 0.0), Vec3::splat(0.49));
        assert_eq!(at_player.len(), 1);
        assert_eq!(at_player[0].tag, ColliderTag::Player);

        let empty = scene.query_overlap(Vec3::new(3.0, 0.5, 3.0), Vec3::splat(0.49));
        assert!(empty.is_empty());
    }
}
