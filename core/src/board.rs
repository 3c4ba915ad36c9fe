use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular grid of cells, indexed by row then column.
///
/// Alongside the cells it keeps a same-shaped visited grid that only flood reveal reads or writes. It is cleared
/// whenever the board is rebuilt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    visited: Array2<bool>,
}

impl Board {
    pub fn new(config: &GameConfig) -> Self {
        let shape = (config.height().into(), config.width().into());
        Self {
            cells: Array2::from_shape_fn(shape, |(row, column)| {
                Cell::new(Position::new(row as Coord, column as Coord))
            }),
            visited: Array2::default(shape),
        }
    }

    pub fn height(&self) -> Coord {
        self.cells.nrows() as Coord
    }

    pub fn width(&self) -> Coord {
        self.cells.ncols() as Coord
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row() < self.height() && pos.column() < self.width()
    }

    pub fn validate(&self, pos: Position) -> Result<Position> {
        if self.contains(pos) {
            Ok(pos)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// Cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn iter_neighbors(&self, pos: Position) -> NeighborIter {
        NeighborIter::new(pos, (self.height(), self.width()))
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_cells(|cell| cell.is_mine())
    }

    pub fn flag_count(&self) -> CellCount {
        self.count_cells(|cell| cell.visibility() == Visibility::Flagged)
    }

    /// Non-mine cells that have been revealed, counted from scratch.
    pub fn revealed_safe_count(&self) -> CellCount {
        self.count_cells(|cell| !cell.is_mine() && cell.visibility() == Visibility::Revealed)
    }

    fn count_cells(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        self.cells.iter().filter(|cell| predicate(cell)).count() as CellCount
    }

    /// Turns `pos` into a mine and counts it on every non-mine neighbor.
    pub(crate) fn plant_mine(&mut self, pos: Position) {
        if self[pos].is_mine() {
            log::warn!("Mine already planted at {pos}, skipped");
            return;
        }

        self[pos].arm();
        for neighbor in self.iter_neighbors(pos) {
            self[neighbor].count_adjacent_mine();
        }
        log::trace!("Planted mine at {pos}");
    }

    /// Reveals the connected region of empty cells around `start` plus its numbered border. Mines are never touched.
    pub(crate) fn flood_reveal(&mut self, start: Position) {
        let mut pending = Vec::from([start]);
        log::trace!("Starting flood reveal from {start}");

        while let Some(pos) = pending.pop() {
            if self.visited[pos.to_nd_index()] {
                continue;
            }
            self.visited[pos.to_nd_index()] = true;
            self[pos].open();

            for neighbor in self.iter_neighbors(pos) {
                match self[neighbor].content() {
                    CellContent::Mine => {}
                    CellContent::Empty if !self.visited[neighbor.to_nd_index()] => {
                        pending.push(neighbor);
                    }
                    _ => {
                        self[neighbor].open();
                        log::trace!("Flood revealed border cell at {neighbor}");
                    }
                }
            }
        }
    }

    /// Discloses the whole board: mines detonate, everything else is revealed.
    pub(crate) fn reveal_all(&mut self) {
        self.cells.iter_mut().for_each(Cell::open);
    }
}

impl Index<Position> for Board {
    type Output = Cell;

    fn index(&self, pos: Position) -> &Self::Output {
        &self.cells[pos.to_nd_index()]
    }
}

impl IndexMut<Position> for Board {
    fn index_mut(&mut self, pos: Position) -> &mut Self::Output {
        &mut self.cells[pos.to_nd_index()]
    }
}
