use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info};

use crate::components::{Direction, Vector2};
use crate::constants::{NODE_SYMBOLS, PATH_SYMBOLS, TILE_HEIGHT, TILE_WIDTH};
use crate::error::{MazeError, Result};
use crate::maze::Grid;
use crate::render::Surface;

/// Handle into a [`NodeGraph`]'s node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Pixel position of a node, used as its lookup key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelKey {
    pub x: i32,
    pub y: i32,
}

impl PixelKey {
    pub fn from_tiles(col: i32, row: i32) -> Option<PixelKey> {
        Some(PixelKey {
            x: col.checked_mul(TILE_WIDTH)?,
            y: row.checked_mul(TILE_HEIGHT)?,
        })
    }

    pub fn position(self) -> Vector2 {
        Vector2::new(self.x as f32, self.y as f32)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    key: PixelKey,
    neighbors: [Option<NodeId>; 5],
}

impl Node {
    fn new(key: PixelKey) -> Self {
        Self {
            key,
            neighbors: [None; 5],
        }
    }

    pub fn key(&self) -> PixelKey {
        self.key
    }

    pub fn position(&self) -> Vector2 {
        self.key.position()
    }

    pub fn neighbor(&self, dir: Direction) -> Option<NodeId> {
        self.neighbors[dir.index()]
    }

    pub fn neighbors(&self) -> impl Iterator<Item = (Direction, NodeId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| self.neighbor(dir).map(|id| (dir, id)))
    }
}

/// Which maze tokens are intersections and which are open corridor.
/// Every other token is a wall.
#[derive(Debug, Clone)]
pub struct MazeSymbols {
    pub nodes: Vec<char>,
    pub paths: Vec<char>,
}

impl Default for MazeSymbols {
    fn default() -> Self {
        Self {
            nodes: NODE_SYMBOLS.to_vec(),
            paths: PATH_SYMBOLS.to_vec(),
        }
    }
}

impl MazeSymbols {
    pub fn is_node(&self, token: char) -> bool {
        self.nodes.contains(&token)
    }

    pub fn is_path(&self, token: char) -> bool {
        self.paths.contains(&token)
    }
}

/// Navigation graph of maze intersections.
///
/// Owns every node; links between nodes are [`NodeId`] handles, so the
/// bidirectional neighbor structure never forms ownership cycles. The graph is
/// fixed once built apart from [`NodeGraph::set_portal_pair`].
#[derive(Debug, Clone)]
pub struct NodeGraph {
    nodes: Vec<Node>,
    lut: HashMap<PixelKey, NodeId>,
}

impl NodeGraph {
    pub fn from_file(path: impl AsRef<Path>) -> Result<NodeGraph> {
        let grid = Grid::from_file(path)?;
        Ok(NodeGraph::from_grid(&grid))
    }

    pub fn from_grid(grid: &Grid) -> NodeGraph {
        NodeGraph::with_symbols(grid, &MazeSymbols::default())
    }

    pub fn with_symbols(grid: &Grid, symbols: &MazeSymbols) -> NodeGraph {
        let mut graph = NodeGraph {
            nodes: Vec::new(),
            lut: HashMap::new(),
        };
        let table = graph.create_node_table(grid, symbols);

        for row in 0..grid.rows() {
            let run = (0..grid.cols()).map(|col| (col, row));
            graph.connect_run(grid, symbols, &table, run, Direction::Right);
        }
        for col in 0..grid.cols() {
            let run = (0..grid.rows()).map(|row| (col, row));
            graph.connect_run(grid, symbols, &table, run, Direction::Down);
        }

        info!(
            nodes = graph.nodes.len(),
            rows = grid.rows(),
            cols = grid.cols(),
            "built node graph"
        );
        graph
    }

    // Returns the node created for each cell, indexed `row * cols + col`.
    fn create_node_table(&mut self, grid: &Grid, symbols: &MazeSymbols) -> Vec<Option<NodeId>> {
        let mut table = vec![None; grid.rows() * grid.cols()];
        for (col, row, token) in grid.cells() {
            if !symbols.is_node(token) {
                continue;
            }
            let key = match tile_key(col, row) {
                Some(key) => key,
                None => continue,
            };
            let id = NodeId(self.nodes.len());
            self.nodes.push(Node::new(key));
            self.lut.insert(key, id);
            table[row * grid.cols() + col] = Some(id);
        }
        table
    }

    // A run of cells is scanned in `forward` order; consecutive nodes are
    // linked unless a wall sits between them.
    fn connect_run(
        &mut self,
        grid: &Grid,
        symbols: &MazeSymbols,
        table: &[Option<NodeId>],
        run: impl Iterator<Item = (usize, usize)>,
        forward: Direction,
    ) {
        let mut previous: Option<NodeId> = None;
        for (col, row) in run {
            let Some(token) = grid.get(col, row) else {
                continue;
            };
            if let Some(current) = table[row * grid.cols() + col] {
                if let Some(prev) = previous {
                    self.link(prev, forward, current);
                }
                previous = Some(current);
            } else if !symbols.is_node(token) && !symbols.is_path(token) {
                previous = None;
            }
        }
    }

    fn link(&mut self, from: NodeId, dir: Direction, to: NodeId) {
        self.nodes[from.0].neighbors[dir.index()] = Some(to);
        self.nodes[to.0].neighbors[dir.opposite().index()] = Some(from);
    }

    /// Links the nodes at two tile coordinates through their portal slots.
    /// Fails without touching the graph if either tile has no node. A node
    /// has at most one portal; an earlier partner of either end is unlinked.
    pub fn set_portal_pair(&mut self, a: (i32, i32), b: (i32, i32)) -> Result<()> {
        let first = self
            .get_node_from_tiles(a.0, a.1)
            .ok_or(MazeError::LookupMiss { col: a.0, row: a.1 })?;
        let second = self
            .get_node_from_tiles(b.0, b.1)
            .ok_or(MazeError::LookupMiss { col: b.0, row: b.1 })?;
        for id in [first, second] {
            if let Some(old) = self.nodes[id.0].neighbors[Direction::Portal.index()].take() {
                self.nodes[old.0].neighbors[Direction::Portal.index()] = None;
                debug!(node = id.0, old_partner = old.0, "replacing portal");
            }
        }
        self.link(first, Direction::Portal, second);
        debug!(?a, ?b, "registered portal pair");
        Ok(())
    }

    pub fn get_node_from_pixels(&self, x: i32, y: i32) -> Option<NodeId> {
        self.lut.get(&PixelKey { x, y }).copied()
    }

    pub fn get_node_from_tiles(&self, col: i32, row: i32) -> Option<NodeId> {
        let key = PixelKey::from_tiles(col, row)?;
        self.lut.get(&key).copied()
    }

    /// First node created, scanning the maze row by row.
    pub fn start_node(&self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(NodeId(0))
        }
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn neighbor(&self, id: NodeId, dir: Direction) -> Option<NodeId> {
        self.nodes[id.0].neighbor(dir)
    }

    pub fn position(&self, id: NodeId) -> Vector2 {
        self.nodes[id.0].position()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn render<S: Surface>(&self, surface: &mut S) {
        for node in &self.nodes {
            for (dir, other) in node.neighbors() {
                if dir == Direction::Portal {
                    surface.draw_portal(node.position(), self.position(other));
                } else {
                    surface.draw_line(node.position(), self.position(other));
                }
            }
            surface.draw_point(node.position());
        }
    }
}

fn tile_key(col: usize, row: usize) -> Option<PixelKey> {
    PixelKey::from_tiles(i32::try_from(col).ok()?, i32::try_from(row).ok()?)
}
