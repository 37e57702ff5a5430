use crate::components::{Direction, Vector2};
use crate::nodes::{NodeGraph, NodeId};

/// Something that travels along the node graph, one edge at a time.
///
/// An entity is always on the edge from `node` to `target`; when it is
/// stopped the two are the same node.
#[derive(Debug, Clone)]
pub struct Entity {
    node: NodeId,
    target: NodeId,
    position: Vector2,
    direction: Option<Direction>,
    pub speed: f32,
    pub collide_radius: f32,
}

impl Entity {
    pub fn new(graph: &NodeGraph, node: NodeId, speed: f32, collide_radius: f32) -> Self {
        Self {
            node,
            target: node,
            position: graph.position(node),
            direction: None,
            speed,
            collide_radius,
        }
    }

    pub fn reset(&mut self, graph: &NodeGraph, node: NodeId) {
        self.node = node;
        self.target = node;
        self.position = graph.position(node);
        self.direction = None;
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn position(&self) -> Vector2 {
        self.position
    }

    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub fn can_move(&self, graph: &NodeGraph, dir: Direction) -> bool {
        dir != Direction::Portal && graph.neighbor(self.node, dir).is_some()
    }

    /// Open directions from the current node, not counting a reversal
    /// unless reversing is the only way out.
    pub fn valid_directions(&self, graph: &NodeGraph) -> Vec<Direction> {
        let reverse = self.direction.map(Direction::opposite);
        let mut options: Vec<Direction> = Direction::CARDINAL
            .into_iter()
            .filter(|&dir| self.can_move(graph, dir) && Some(dir) != reverse)
            .collect();
        if options.is_empty() {
            if let Some(back) = reverse.filter(|&dir| self.can_move(graph, dir)) {
                options.push(back);
            }
        }
        options
    }

    pub fn overshot_target(&self, graph: &NodeGraph) -> bool {
        let origin = graph.position(self.node);
        let edge = graph.position(self.target) - origin;
        let travelled = self.position - origin;
        travelled.magnitude_squared() >= edge.magnitude_squared()
    }

    pub fn reverse_direction(&mut self) {
        if let Some(dir) = self.direction {
            self.direction = Some(dir.opposite());
            std::mem::swap(&mut self.node, &mut self.target);
        }
    }

    /// Moves along the current edge. On reaching the target, `choose` picks
    /// the next direction; an invalid or missing choice stops the entity.
    pub fn update<F>(&mut self, graph: &NodeGraph, dt: f32, choose: F)
    where
        F: FnOnce(&Entity, &NodeGraph) -> Option<Direction>,
    {
        if let Some(dir) = self.direction {
            self.position += dir.vector() * (self.speed * dt);
        }
        if !self.overshot_target(graph) {
            return;
        }

        let was_moving = self.direction.is_some();
        self.node = self.target;
        if was_moving {
            if let Some(portal) = graph.neighbor(self.node, Direction::Portal) {
                self.node = portal;
            }
        }
        self.position = graph.position(self.node);

        let next = choose(self, graph)
            .filter(|&dir| self.can_move(graph, dir))
            .and_then(|dir| graph.neighbor(self.node, dir).map(|target| (dir, target)));
        match next {
            Some((dir, target)) => {
                self.direction = Some(dir);
                self.target = target;
            }
            None => {
                self.direction = None;
                self.target = self.node;
            }
        }
    }
}
