//! Maze navigation core for a Pac-Man style game: a text maze is parsed into
//! a graph of intersections, entities travel along its edges, and the ghost
//! alternates between scatter and chase on a timer.

pub mod components;
pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod game;
pub mod ghost;
pub mod level;
pub mod maze;
pub mod modes;
pub mod nodes;
pub mod player;
pub mod render;

pub use components::{Direction, PelletKind, Vector2};
pub use error::{MazeError, Result};
pub use game::Game;
pub use maze::Grid;
pub use modes::{Mode, ModeController};
pub use nodes::{MazeSymbols, NodeGraph, NodeId, PixelKey};
