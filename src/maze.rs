use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::error::{MazeError, Result};

/// Rectangular grid of maze tokens, indexed `[row][col]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Vec<char>>,
    cols: usize,
}

impl Grid {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Grid> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::InvalidData => MazeError::InvalidEncoding {
                path: path.to_path_buf(),
            },
            _ => MazeError::FileAccess {
                path: path.to_path_buf(),
                source,
            },
        })?;
        let grid = Grid::parse(&text)?;
        debug!(
            path = %path.display(),
            rows = grid.rows(),
            cols = grid.cols(),
            "read maze file"
        );
        Ok(grid)
    }

    /// Blank lines are skipped; every other line is one row of
    /// whitespace-separated single-character tokens.
    pub fn parse(text: &str) -> Result<Grid> {
        let mut cells: Vec<Vec<char>> = Vec::new();
        for line in text.lines().filter(|l| !l.trim().is_empty()) {
            let row = cells.len();
            let mut tokens = Vec::new();
            for (col, token) in line.split_whitespace().enumerate() {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => tokens.push(c),
                    _ => {
                        return Err(MazeError::InvalidToken {
                            token: token.to_string(),
                            row,
                            col,
                        })
                    }
                }
            }
            if let Some(first) = cells.first() {
                if tokens.len() != first.len() {
                    return Err(MazeError::RaggedRow {
                        row,
                        expected: first.len(),
                        found: tokens.len(),
                    });
                }
            }
            cells.push(tokens);
        }

        let cols = match cells.first() {
            Some(first) => first.len(),
            None => return Err(MazeError::EmptyMaze),
        };
        Ok(Grid { cells, cols })
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, col: usize, row: usize) -> Option<char> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn row(&self, row: usize) -> Option<&[char]> {
        self.cells.get(row).map(Vec::as_slice)
    }

    /// Yields `(col, row, token)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(|(row, r)| r.iter().enumerate().map(move |(col, &c)| (col, row, c)))
    }
}
