use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Uniformly random placement that keeps every cell sharing a row or a column with the first opened cell free of
/// mines.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator {
    rng: SmallRng,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Whether a mine may be placed at `pos` when the game starts at `first`.
    pub const fn is_eligible(first: Position, pos: Position) -> bool {
        pos.row() != first.row() && pos.column() != first.column()
    }

    /// How many cells can hold a mine when the game starts anywhere on a board of this size.
    pub const fn eligible_cells(config: &GameConfig) -> CellCount {
        mult(config.width() - 1, config.height() - 1)
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(&mut self, config: &GameConfig, first: Position) -> Result<Vec<Position>> {
        let mines = config.mines();
        let eligible = Self::eligible_cells(config);
        if mines > eligible {
            log::warn!(
                "Cannot place {} mines avoiding row {} and column {}, only {} cells are eligible",
                mines,
                first.row(),
                first.column(),
                eligible
            );
            return Err(GameError::MinesDoNotFit { mines, eligible });
        }

        let mut free_cells: Vec<Position> = config
            .positions()
            .filter(|&pos| Self::is_eligible(first, pos))
            .collect();
        let mut placed = Vec::with_capacity(mines.into());

        while placed.len() < usize::from(mines) {
            let index = self.rng.random_range(0..free_cells.len());
            let pos = free_cells.swap_remove(index);
            log::trace!("Chose mine position {pos}");
            placed.push(pos);
        }

        Ok(placed)
    }
}
