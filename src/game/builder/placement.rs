//! Block Placement
//!
//! Occupancy checks and the place/destroy rules. Deciding what to do only
//! reads the scene; applying the decision is a separate step so the scene
//! borrow ends before the world is mutated.

use glam::Vec3;

use crate::game::builder::mode::EditMode;
use crate::game::level::{BlockType, PlacedBlock, WorldState};
use crate::physics::{ColliderTag, OverlapHit, SpatialIndex};

/// Everything overlapping the probe cube around a target cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Occupancy {
    pub hits: Vec<OverlapHit>,
}

impl Occupancy {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Whether the player-exclusion volume is in the cell.
    /// The cursor is hidden when this is true.
    pub fn player_present(&self) -> bool {
        self.hits.iter().any(|h| h.tag == ColliderTag::Player)
    }

    /// Root positions of the blocks in the cell.
    pub fn block_roots(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.hits
            .iter()
            .filter(|h| h.tag == ColliderTag::Block)
            .map(|h| h.root)
    }
}

/// Probe the cube of `half_extent` around `target`.
pub fn query_occupancy<S: SpatialIndex + ?Sized>(index: &S, target: Vec3, half_extent: f32) -> Occupancy {
    Occupancy {
        hits: index.query_overlap(target, Vec3::splat(half_extent)),
    }
}

/// A decided change to the world.
#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    /// Insert a new block
    Place(PlacedBlock),
    /// Remove every block rooted at these positions
    Destroy(Vec<Vec3>),
    /// Cell occupied while placing
    Rejected { cell: Vec3 },
    /// Destroying an empty cell
    Nothing,
}

/// What applying a [`Mutation`] did.
#[derive(Clone, Debug, PartialEq)]
pub enum InteractionOutcome {
    Placed(PlacedBlock),
    Destroyed(Vec<PlacedBlock>),
    Rejected { cell: Vec3 },
    Nothing,
}

/// Decide what a click at `target` does.
///
/// * Destroying removes every block in the cell; the player volume is never removed.
/// * Placing inserts a block only when nothing at all (block or player) is in the cell.
pub fn decide_interaction(
    target: Vec3,
    mode: EditMode,
    occupancy: &Occupancy,
    rotation: Vec3,
    block_type: BlockType,
) -> Mutation {
    match mode {
        EditMode::Destroying => {
            let mut roots: Vec<Vec3> = Vec::new();
            for root in occupancy.block_roots() {
                if !roots.contains(&root) {
                    roots.push(root);
                }
            }
            if roots.is_empty() {
                Mutation::Nothing
            } else {
                Mutation::Destroy(roots)
            }
        }
        EditMode::Placing => {
            if occupancy.is_empty() {
                Mutation::Place(PlacedBlock::new(target, rotation, block_type))
            } else {
                Mutation::Rejected { cell: target }
            }
        }
    }
}

impl Mutation {
    pub fn apply(self, world: &mut WorldState) -> InteractionOutcome {
        match self {
            Mutation::Place(block) => {
                world.insert(block);
                InteractionOutcome::Placed(block)
            }
            Mutation::Destroy(roots) => {
                let removed: Vec<PlacedBlock> = roots
                    .into_iter()
                    .flat_map(|root| world.remove_at_root(root))
                    .collect();
                if removed.is_empty() {
                    InteractionOutcome::Nothing
                } else {
                    InteractionOutcome::Destroyed(removed)
                }
            }
            Mutation::Rejected { cell } => InteractionOutcome::Rejected { cell },
            Mutation::Nothing => InteractionOutcome::Nothing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::level::LevelScene;

    const HALF: f32 = 0.49;
    const PLAYER: Vec3 = Vec3::new(0.5, 1.0, 0.5);

    fn block_at(x: f32, z: f32) -> PlacedBlock {
        PlacedBlock::new(Vec3::new(x, 0.5, z), Vec3::ZERO, BlockType(0))
    }

    fn click(world: &mut WorldState, target: Vec3, mode: EditMode) -> InteractionOutcome {
        let mutation = {
            let scene = LevelScene::with_player(world, PLAYER);
            let occupancy = query_occupancy(&scene, target, HALF);
            decide_interaction(target, mode, &occupancy, Vec3::ZERO, BlockType(1))
        };
        mutation.apply(world)
    }

    #[test]
    fn test_place_in_free_cell() {
        let mut world = WorldState::new(Vec3::new(10.0, 1.0, 10.0));
        let target = Vec3::new(2.0, 0.5, 5.0);
        match click(&mut world, target, EditMode::Placing) {
            InteractionOutcome::Placed(b) => {
                assert_eq!(b.position, target);
                assert_eq!(b.block_type, BlockType(1));
            }
            other => panic!("expected Placed, got {other:?}"),
        }
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_place_twice_is_rejected() {
        let mut world = WorldState::new(Vec3::new(10.0, 1.0, 10.0));
        let target = Vec3::new(2.0, 0.5, 5.0);
        click(&mut world, target, EditMode::Placing);
        assert_eq!(
            click(&mut world, target, EditMode::Placing),
            InteractionOutcome::Rejected { cell: target }
        );
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_place_next_to_block_is_allowed() {
        let mut world = WorldState::from_blocks(Vec3::new(10.0, 1.0, 10.0), vec![block_at(0.0, 0.0)]);
        let outcome = click(&mut world, Vec3::new(0.0, 0.5, 1.0), EditMode::Placing);
        assert!(matches!(outcome, InteractionOutcome::Placed(_)));
        assert_eq!(world.len(), 2);
    }

    #[test]
    fn test_place_inside_player_volume_is_rejected() {
        let mut world = WorldState::new(Vec3::new(0.0, 1.0, 0.0));
        let outcome = click(&mut world, Vec3::new(0.0, 0.5, 0.0), EditMode::Placing);
        assert!(matches!(outcome, InteractionOutcome::Rejected { .. }));
        assert!(world.is_empty());
    }

    #[test]
    fn test_destroy_removes_block_but_never_player() {
        let mut world = WorldState::from_blocks(Vec3::new(0.0, 1.0, 1.0), vec![block_at(0.0, 1.0), block_at(4.0, 4.0)]);
        let outcome = click(&mut world, Vec3::new(0.0, 0.5, 1.0), EditMode::Destroying);
        match outcome {
            InteractionOutcome::Destroyed(removed) => assert_eq!(removed, vec![block_at(0.0, 1.0)]),
            other => panic!("expected Destroyed, got {other:?}"),
        }
        assert_eq!(world.blocks(), &[block_at(4.0, 4.0)]);
    }

    #[test]
    fn test_destroy_empty_cell_is_noop() {
        let mut world = WorldState::from_blocks(Vec3::new(10.0, 1.0, 10.0), vec![block_at(1.0, 0.0)]);
        let outcome = click(&mut world, Vec3::new(0.0, 0.5, 0.0), EditMode::Destroying);
        assert_eq!(outcome, InteractionOutcome::Nothing);
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_destroy_removes_overlapping_duplicates() {
        let mut world = WorldState::from_blocks(
            Vec3::new(10.0, 1.0, 10.0),
            vec![block_at(2.0, 2.0), block_at(2.0, 2.0)],
        );
        match click(&mut world, Vec3::new(2.0, 0.5, 2.0), EditMode::Destroying) {
            InteractionOutcome::Destroyed(removed) => assert_eq!(removed.len(), 2),
            other => panic!("expected Destroyed, got {other:?}"),
        }
        assert!(world.is_empty());
    }

    #[test]
    fn test_player_presence_reported() {
        let world = WorldState::new(Vec3::new(0.0, 1.0, 0.0));
        let scene = LevelScene::with_player(&world, PLAYER);
        assert!(query_occupancy(&scene, Vec3::new(0.0, 0.5, 0.0), HALF).player_present());
        assert!(!query_occupancy(&scene, Vec3::new(1.0, 0.5, 0.0), HALF).player_present());
    }
}
