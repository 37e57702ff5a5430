use std::path::Path;

use rand::Rng;
use tracing::{info, warn};

use crate::components::{Direction, PelletKind};
use crate::constants::START_LIVES;
use crate::error::{MazeError, Result};
use crate::ghost::Ghost;
use crate::level::PelletGroup;
use crate::maze::Grid;
use crate::nodes::{MazeSymbols, NodeGraph, NodeId, PixelKey};
use crate::player::Pacman;
use crate::render::{Glyph, Surface};

pub type PortalPair = ((i32, i32), (i32, i32));

pub struct Game {
    grid: Grid,
    symbols: MazeSymbols,
    pub nodes: NodeGraph,
    pub pacman: Pacman,
    pub pellets: PelletGroup,
    pub ghost: Ghost,
    pub score: u32,
    pub lives: u32,
    pacman_start: NodeId,
    ghost_start: NodeId,
}

impl Game {
    pub fn from_file(path: impl AsRef<Path>, portals: &[PortalPair]) -> Result<Game> {
        Game::new(Grid::from_file(path)?, portals)
    }

    pub fn new(grid: Grid, portals: &[PortalPair]) -> Result<Game> {
        let symbols = MazeSymbols::default();
        let mut nodes = NodeGraph::with_symbols(&grid, &symbols);
        for &(a, b) in portals {
            nodes.set_portal_pair(a, b)?;
        }
        if nodes.len() < 2 {
            return Err(MazeError::TooFewNodes { found: nodes.len() });
        }
        let pacman_start = nodes
            .start_node()
            .ok_or(MazeError::TooFewNodes { found: 0 })?;
        let ghost_start = farthest_from(&nodes, pacman_start);
        let pellets = PelletGroup::from_grid(&grid);
        info!(
            nodes = nodes.len(),
            pellets = pellets.len(),
            portals = portals.len(),
            "game ready"
        );

        Ok(Game {
            pacman: Pacman::new(&nodes, pacman_start),
            ghost: Ghost::new(&nodes, ghost_start),
            grid,
            symbols,
            nodes,
            pellets,
            score: 0,
            lives: START_LIVES,
            pacman_start,
            ghost_start,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn is_over(&self) -> bool {
        self.lives == 0
    }

    pub fn is_cleared(&self) -> bool {
        self.pellets.is_empty()
    }

    pub fn tick(&mut self, dt: f32, requested: Option<Direction>, rng: &mut impl Rng) {
        if self.is_over() {
            return;
        }
        self.pacman.update(dt, &self.nodes, requested);
        self.pellets.update(dt);
        self.ghost
            .update(dt, &self.nodes, self.pacman.position(), rng);
        self.check_pellet_events();
        self.check_ghost_events();
    }

    fn check_pellet_events(&mut self) {
        if let Some(idx) = self.pacman.eat_pellets(&self.pellets) {
            let pellet = self.pellets.remove(idx);
            self.score += pellet.points;
            if pellet.kind == PelletKind::Power {
                info!(score = self.score, "power pellet eaten");
            }
        }
    }

    fn check_ghost_events(&mut self) {
        if !self.pacman.collide_ghost(&self.ghost) {
            return;
        }
        self.lives = self.lives.saturating_sub(1);
        warn!(lives = self.lives, score = self.score, "pacman caught");
        self.pacman.entity.reset(&self.nodes, self.pacman_start);
        self.ghost.entity.reset(&self.nodes, self.ghost_start);
    }

    pub fn hud(&self) -> String {
        format!(
            "Score: {}  Lives: {}  Pellets: {}  Mode: {:?}  (q to quit)",
            self.score,
            self.lives,
            self.pellets.len(),
            self.ghost.mode.current()
        )
    }

    pub fn render<S: Surface>(&self, surface: &mut S) {
        for (col, row, token) in self.grid.cells() {
            if self.symbols.is_node(token) || self.symbols.is_path(token) {
                continue;
            }
            let key = i32::try_from(col)
                .ok()
                .zip(i32::try_from(row).ok())
                .and_then(|(c, r)| PixelKey::from_tiles(c, r));
            if let Some(key) = key {
                surface.draw_glyph(key.position(), Glyph::Wall);
            }
        }
        self.nodes.render(surface);
        for pellet in self.pellets.iter().filter(|p| p.visible) {
            let glyph = match pellet.kind {
                PelletKind::Normal => Glyph::Pellet,
                PelletKind::Power => Glyph::PowerPellet,
            };
            surface.draw_glyph(pellet.position, glyph);
        }
        surface.draw_glyph(self.ghost.position(), Glyph::Ghost);
        surface.draw_glyph(self.pacman.position(), Glyph::Pacman);
    }
}

// Keeps the ghost from spawning on top of pacman.
fn farthest_from(nodes: &NodeGraph, origin: NodeId) -> NodeId {
    let from = nodes.position(origin);
    let mut best = origin;
    let mut best_distance = 0.0;
    for (id, node) in nodes.iter() {
        let distance = (node.position() - from).magnitude_squared();
        if distance > best_distance {
            best = id;
            best_distance = distance;
        }
    }
    best
}
