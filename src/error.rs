use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MazeError {
    #[error("cannot read maze file {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed maze: row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("malformed maze: token {token:?} at row {row}, column {col} is not a single character")]
    InvalidToken { token: String, row: usize, col: usize },

    #[error("malformed maze: no rows")]
    EmptyMaze,

    #[error("malformed maze: {} is not valid UTF-8", path.display())]
    InvalidEncoding { path: PathBuf },

    #[error("no node at tile ({col}, {row})")]
    LookupMiss { col: i32, row: i32 },

    #[error("maze needs at least 2 intersections to start pacman and the ghost apart, found {found}")]
    TooFewNodes { found: usize },
}

impl MazeError {
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            MazeError::RaggedRow { .. }
                | MazeError::InvalidToken { .. }
                | MazeError::EmptyMaze
                | MazeError::InvalidEncoding { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MazeError>;
