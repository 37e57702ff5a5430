use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::{Direction, Vector2};
use crate::constants::{GHOST_COLLIDE_RADIUS, GHOST_SPEED, TILE_WIDTH};
use crate::entity::Entity;
use crate::modes::{Mode, ModeController};
use crate::nodes::{NodeGraph, NodeId};

/// Scatter retreats to the maze origin.
pub const SCATTER_GOAL: Vector2 = Vector2::ZERO;

#[derive(Debug, Clone)]
pub struct Ghost {
    pub entity: Entity,
    pub goal: Vector2,
    pub mode: ModeController,
}

impl Ghost {
    pub fn new(graph: &NodeGraph, node: NodeId) -> Self {
        Self {
            entity: Entity::new(graph, node, GHOST_SPEED, GHOST_COLLIDE_RADIUS),
            goal: SCATTER_GOAL,
            mode: ModeController::new(),
        }
    }

    pub fn position(&self) -> Vector2 {
        self.entity.position()
    }

    pub fn update(
        &mut self,
        dt: f32,
        graph: &NodeGraph,
        pacman_position: Vector2,
        rng: &mut impl Rng,
    ) {
        self.mode.advance(dt);
        self.goal = match self.mode.current() {
            Mode::Scatter => SCATTER_GOAL,
            Mode::Chase => pacman_position,
        };
        let goal = self.goal;
        self.entity.update(graph, dt, |entity, graph| {
            let options = entity.valid_directions(graph);
            goal_direction(graph, entity.node(), &options, goal, rng)
        });
    }
}

/// Picks the direction whose next tile lands closest to `goal`; ties are
/// broken at random.
pub fn goal_direction(
    graph: &NodeGraph,
    node: NodeId,
    options: &[Direction],
    goal: Vector2,
    rng: &mut impl Rng,
) -> Option<Direction> {
    let origin = graph.position(node);
    let mut best = Vec::new();
    let mut best_distance = f32::INFINITY;
    for &dir in options {
        let step = origin + dir.vector() * TILE_WIDTH as f32;
        let distance = (step - goal).magnitude_squared();
        if distance < best_distance {
            best_distance = distance;
            best.clear();
            best.push(dir);
        } else if distance == best_distance {
            best.push(dir);
        }
    }
    best.choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Grid;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // Plus-shaped junction with the hub at tile (2, 2).
    const CROSS: &str = "X X + X X\nX X . X X\n+ . + . +\nX X . X X\nX X + X X";

    fn cross() -> (NodeGraph, NodeId) {
        let graph = NodeGraph::from_grid(&Grid::parse(CROSS).unwrap());
        let hub = graph.get_node_from_tiles(2, 2).unwrap();
        (graph, hub)
    }

    #[test]
    fn test_goal_direction_prefers_closest() {
        let (graph, hub) = cross();
        let mut rng = StdRng::seed_from_u64(7);
        let all = Direction::CARDINAL;
        // Up and Left are equally close to the origin.
        for _ in 0..8 {
            let dir = goal_direction(&graph, hub, &all, Vector2::ZERO, &mut rng);
            assert!(matches!(dir, Some(Direction::Up | Direction::Left)));
        }
        let far_right = Vector2::new(400.0, 32.0);
        assert_eq!(
            goal_direction(&graph, hub, &all, far_right, &mut rng),
            Some(Direction::Right)
        );
        let below = Vector2::new(32.0, 400.0);
        assert_eq!(
            goal_direction(&graph, hub, &all, below, &mut rng),
            Some(Direction::Down)
        );
        assert_eq!(goal_direction(&graph, hub, &[], below, &mut rng), None);
    }

    #[test]
    fn test_goal_follows_mode() {
        let (graph, hub) = cross();
        let mut rng = StdRng::seed_from_u64(1);
        let mut ghost = Ghost::new(&graph, hub);
        let pacman = Vector2::new(64.0, 32.0);

        ghost.update(1.0, &graph, pacman, &mut rng);
        assert_eq!(ghost.mode.current(), Mode::Scatter);
        assert_eq!(ghost.goal, SCATTER_GOAL);

        ghost.update(6.0, &graph, pacman, &mut rng);
        assert_eq!(ghost.mode.current(), Mode::Chase);
        assert_eq!(ghost.goal, pacman);
    }

    #[test]
    fn test_chase_heads_for_pacman() {
        let (graph, hub) = cross();
        let mut rng = StdRng::seed_from_u64(3);
        let mut ghost = Ghost::new(&graph, hub);
        ghost.mode.advance(7.0);
        assert_eq!(ghost.mode.current(), Mode::Chase);

        let pacman = graph.position(graph.get_node_from_tiles(2, 4).unwrap());
        ghost.update(0.0, &graph, pacman, &mut rng);
        assert_eq!(ghost.entity.direction(), Some(Direction::Down));
        assert_eq!(ghost.goal, pacman);
    }
}
