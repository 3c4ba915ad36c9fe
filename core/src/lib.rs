#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use controller::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod controller;
mod engine;
mod error;
mod generator;
mod types;

/// Validated board parameters: `width >= 1`, `height >= 1` and `mines < width * height`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    width: Coord,
    height: Coord,
    mines: CellCount,
}

#[derive(Deserialize)]
struct RawGameConfig {
    width: Coord,
    height: Coord,
    mines: CellCount,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GameError;

    fn try_from(raw: RawGameConfig) -> Result<Self> {
        Self::new(raw.width, raw.height, raw.mines)
    }
}

impl GameConfig {
    pub fn new(width: Coord, height: Coord, mines: CellCount) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GameError::ZeroDimension { width, height });
        }

        let cells = mult(width, height);
        if mines >= cells {
            return Err(GameError::TooManyMines { mines, cells });
        }

        Ok(Self {
            width,
            height,
            mines,
        })
    }

    pub const fn width(&self) -> Coord {
        self.width
    }

    pub const fn height(&self) -> Coord {
        self.height
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub const fn contains(&self, pos: Position) -> bool {
        pos.row() < self.height && pos.column() < self.width
    }

    /// Every position on the board in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let (height, width) = (self.height, self.width);
        (0..height).flat_map(move |row| (0..width).map(move |column| Position::new(row, column)))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}
