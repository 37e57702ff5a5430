use crate::components::{Direction, Vector2};
use crate::constants::{PACMAN_COLLIDE_RADIUS, PACMAN_SPEED};
use crate::entity::Entity;
use crate::ghost::Ghost;
use crate::level::PelletGroup;
use crate::nodes::{NodeGraph, NodeId};

#[derive(Debug, Clone)]
pub struct Pacman {
    pub entity: Entity,
}

impl Pacman {
    pub fn new(graph: &NodeGraph, node: NodeId) -> Self {
        Self {
            entity: Entity::new(graph, node, PACMAN_SPEED, PACMAN_COLLIDE_RADIUS),
        }
    }

    pub fn position(&self) -> Vector2 {
        self.entity.position()
    }

    /// Reversal takes effect immediately; any other turn waits for the next
    /// node. With no usable request pacman keeps going until blocked.
    pub fn update(&mut self, dt: f32, graph: &NodeGraph, requested: Option<Direction>) {
        if let (Some(want), Some(heading)) = (requested, self.entity.direction()) {
            if want == heading.opposite() {
                self.entity.reverse_direction();
            }
        }
        self.entity.update(graph, dt, |entity, graph| {
            requested
                .filter(|&dir| entity.can_move(graph, dir))
                .or_else(|| entity.direction().filter(|&dir| entity.can_move(graph, dir)))
        });
    }

    /// Index of the first pellet within reach, if any.
    pub fn eat_pellets(&self, pellets: &PelletGroup) -> Option<usize> {
        pellets.iter().position(|pellet| {
            let reach = pellet.radius + self.entity.collide_radius;
            (pellet.position - self.position()).magnitude_squared() <= reach * reach
        })
    }

    pub fn collide_ghost(&self, ghost: &Ghost) -> bool {
        let reach = self.entity.collide_radius + ghost.entity.collide_radius;
        (ghost.position() - self.position()).magnitude_squared() <= reach * reach
    }
}
