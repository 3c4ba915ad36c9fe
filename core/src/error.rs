use thiserror::Error;

use crate::{CellCount, Coord};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board dimensions must be at least 1x1, got {width}x{height}")]
    ZeroDimension { width: Coord, height: Coord },
    #[error("Too many mines: {mines} requested but the board only has {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Cannot place {mines} mines, only {eligible} cells avoid the first opened row and column")]
    MinesDoNotFit { mines: CellCount, eligible: CellCount },
    #[error("Preset layout has {actual} mines but the configuration expects {expected}")]
    MineCountMismatch { expected: CellCount, actual: CellCount },
    #[error("Invalid position key, expected \"row-column\"")]
    InvalidPositionKey,
}

pub type Result<T> = core::result::Result<T, GameError>;
