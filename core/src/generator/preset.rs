use alloc::collections::BTreeSet;

use super::*;

/// Fixed layout, handed out unchanged for every game. The first opened position is ignored.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetMineGenerator {
    mines: BTreeSet<Position>,
}

impl PresetMineGenerator {
    pub fn new(mines: impl IntoIterator<Item = Position>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }

    pub fn from_coords(mines: &[(Coord, Coord)]) -> Self {
        Self::new(mines.iter().copied().map(Position::from))
    }
}

impl MineGenerator for PresetMineGenerator {
    fn generate(&mut self, config: &GameConfig, _first: Position) -> Result<Vec<Position>> {
        if self.mines.iter().any(|&pos| !config.contains(pos)) {
            return Err(GameError::InvalidCoords);
        }

        let actual = self.mines.len() as CellCount;
        if actual != config.mines() {
            return Err(GameError::MineCountMismatch {
                expected: config.mines(),
                actual,
            });
        }

        Ok(self.mines.iter().copied().collect())
    }
}
