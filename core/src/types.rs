use alloc::string::String;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::{GameError, Result};

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Immutable `(row, column)` coordinate of a cell.
///
/// The canonical key used for external lookup is `"{row}-{column}"`, which is also what `Display` prints and what
/// `FromStr` accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    row: Coord,
    column: Coord,
}

impl Position {
    pub const fn new(row: Coord, column: Coord) -> Self {
        Self { row, column }
    }

    pub const fn row(self) -> Coord {
        self.row
    }

    pub const fn column(self) -> Coord {
        self.column
    }

    /// Canonical string key, e.g. `"3-7"` for row 3, column 7.
    pub fn key(self) -> String {
        alloc::format!("{self}")
    }

    pub(crate) fn to_nd_index(self) -> [usize; 2] {
        [self.row.into(), self.column.into()]
    }
}

impl From<(Coord, Coord)> for Position {
    fn from((row, column): (Coord, Coord)) -> Self {
        Self::new(row, column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.row, self.column)
    }
}

impl FromStr for Position {
    type Err = GameError;

    fn from_str(key: &str) -> Result<Self> {
        let (row, column) = key.split_once('-').ok_or(GameError::InvalidPositionKey)?;
        let row = row.trim().parse().map_err(|_| GameError::InvalidPositionKey)?;
        let column = column.trim().parse().map_err(|_| GameError::InvalidPositionKey)?;
        Ok(Self::new(row, column))
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// Applies `delta` to `pos`, returning a value only when it remains inside `bounds` (rows, columns).
fn apply_delta(pos: Position, delta: (i8, i8), bounds: (Coord, Coord)) -> Option<Position> {
    let (d_row, d_column) = delta;
    let (rows, columns) = bounds;

    let row = pos.row.checked_add_signed(d_row)?;
    if row >= rows {
        return None;
    }

    let column = pos.column.checked_add_signed(d_column)?;
    if column >= columns {
        return None;
    }

    Some(Position::new(row, column))
}

/// Iterates the up-to-8 in-bounds neighbors of a position.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Position,
    bounds: (Coord, Coord),
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Position, bounds: (Coord, Coord)) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Position;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn neighbors(pos: (Coord, Coord), bounds: (Coord, Coord)) -> Vec<Position> {
        NeighborIter::new(pos.into(), bounds).collect()
    }

    #[test]
    fn key_is_row_then_column() {
        let pos = Position::new(3, 7);

        assert_eq!(pos.key(), "3-7");
        assert_eq!("3-7".parse::<Position>().unwrap(), pos);
    }

    #[test]
    fn malformed_keys_are_rejected() {
        assert_eq!("3".parse::<Position>(), Err(GameError::InvalidPositionKey));
        assert_eq!("a-1".parse::<Position>(), Err(GameError::InvalidPositionKey));
        assert_eq!("1-300".parse::<Position>(), Err(GameError::InvalidPositionKey));
    }

    #[test]
    fn corner_has_three_neighbors() {
        let found = neighbors((0, 0), (3, 3));

        assert_eq!(found.len(), 3);
        assert!(found.contains(&Position::new(0, 1)));
        assert!(found.contains(&Position::new(1, 0)));
        assert!(found.contains(&Position::new(1, 1)));
    }

    #[test]
    fn center_has_eight_neighbors() {
        let found = neighbors((1, 1), (3, 3));

        assert_eq!(found.len(), 8);
        assert!(!found.contains(&Position::new(1, 1)));
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert!(neighbors((0, 0), (1, 1)).is_empty());
    }

    #[test]
    fn neighbors_respect_non_square_bounds() {
        let found = neighbors((0, 4), (1, 5));

        assert_eq!(found, [Position::new(0, 3)]);
    }
}
