use alloc::vec::Vec;

use crate::*;
pub use preset::*;
pub use random::*;

mod preset;
mod random;

/// Chooses where the mines of a fresh game go.
///
/// `first` is the position the player is about to open. Implementations return exactly `config.mines()` distinct
/// in-bounds positions, or an error when they cannot.
pub trait MineGenerator {
    fn generate(&mut self, config: &GameConfig, first: Position) -> Result<Vec<Position>>;
}
