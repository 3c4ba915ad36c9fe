use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Overall game progress.
///
/// Valid transitions:
/// - NotStarted -> InProgress, once the mines are generated
/// - InProgress -> Over
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    NotStarted,
    InProgress,
    Over,
}

impl Phase {
    pub const fn is_not_started(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    pub const fn is_over(self) -> bool {
        matches!(self, Self::Over)
    }
}

/// How the game ended. Only decided once the phase is [`Phase::Over`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    Undecided,
    Won,
    Lost,
}

/// Everything a renderer needs to redraw the board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub width: Coord,
    pub height: Coord,
    pub phase: Phase,
    pub outcome: Outcome,
    pub cells: Vec<CellView>,
}

/// Represents a game from reset to finish.
#[derive(Clone, Debug)]
pub struct Game<G = RandomMineGenerator> {
    config: GameConfig,
    board: Board,
    phase: Phase,
    outcome: Outcome,
    generator: G,
}

impl Game<RandomMineGenerator> {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self::with_generator(config, RandomMineGenerator::new(seed))
    }
}

impl<G: MineGenerator> Game<G> {
    pub fn with_generator(config: GameConfig, generator: G) -> Self {
        Self {
            board: Board::new(&config),
            config,
            phase: Default::default(),
            outcome: Default::default(),
            generator,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn width(&self) -> Coord {
        self.config.width()
    }

    pub fn height(&self) -> Coord {
        self.config.height()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell_at(&self, pos: Position) -> Result<&Cell> {
        let pos = self.board.validate(pos)?;
        Ok(&self.board[pos])
    }

    /// Views of every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellView> + '_ {
        self.board.iter().map(Cell::view)
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            width: self.width(),
            height: self.height(),
            phase: self.phase,
            outcome: self.outcome,
            cells: self.cells().collect(),
        }
    }

    pub fn flag_count(&self) -> CellCount {
        self.board.flag_count()
    }

    /// How many mines have not been flagged yet, negative when there are more flags than mines.
    pub fn mines_left(&self) -> isize {
        (self.config.mines() as isize) - (self.board.flag_count() as isize)
    }

    /// Throws away the board and starts over with fresh hidden, empty cells.
    pub fn reset(&mut self) {
        self.board = Board::new(&self.config);
        self.phase = Phase::NotStarted;
        self.outcome = Outcome::Undecided;
        log::debug!(
            "Reset {}x{} board with {} mines",
            self.width(),
            self.height(),
            self.config.mines()
        );
    }

    /// Places the mines for a game that is about to open `first`. Does nothing once the game has started.
    pub fn generate(&mut self, first: Position) -> Result<()> {
        let first = self.board.validate(first)?;
        if !self.phase.is_not_started() {
            log::debug!("Mines already generated, ignoring request from {first}");
            return Ok(());
        }

        let mines = self.checked_layout(first)?;
        for pos in mines {
            self.board.plant_mine(pos);
        }
        self.phase = Phase::InProgress;
        log::debug!("Generated {} mines, first open at {first}", self.board.mine_count());
        Ok(())
    }

    /// Opens a cell, flood revealing empty regions. Generates the mines first if the game has not started.
    pub fn open(&mut self, pos: Position) -> Result<RevealOutcome> {
        let pos = self.board.validate(pos)?;

        if self.phase.is_over() || self.board[pos].visibility() == Visibility::Revealed {
            return Ok(RevealOutcome::NoChange);
        }

        if self.phase.is_not_started() {
            self.generate(pos)?;
        }

        match self.board[pos].content() {
            CellContent::Empty => self.board.flood_reveal(pos),
            CellContent::Numbered(_) | CellContent::Mine => self.board[pos].open(),
        }
        log::debug!("Opened cell at {pos}");

        Ok(if self.board[pos].is_mine() {
            self.finish(Outcome::Lost);
            RevealOutcome::HitMine
        } else if self.is_cleared() {
            self.finish(Outcome::Won);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        })
    }

    /// Toggles a flag on a closed cell. Revealed or detonated cells and finished games are left alone.
    pub fn tag(&mut self, pos: Position) -> Result<MarkOutcome> {
        let pos = self.board.validate(pos)?;

        if self.phase.is_over() {
            return Ok(MarkOutcome::NoChange);
        }

        Ok(self.board[pos].toggle_flag())
    }

    /// Discloses every cell, flags included. Phase and outcome are not affected.
    pub fn reveal_all(&mut self) {
        self.board.reveal_all();
    }

    /// Asks the generator for a layout and only accepts distinct in-bounds positions, exactly as many as configured.
    fn checked_layout(&mut self, first: Position) -> Result<BTreeSet<Position>> {
        let placed = self.generator.generate(&self.config, first)?;
        let actual = placed.len();

        let mut mines = BTreeSet::new();
        for pos in placed {
            mines.insert(self.board.validate(pos)?);
        }

        let expected = self.config.mines();
        if actual != usize::from(expected) || mines.len() != actual {
            log::warn!("Generator returned {actual} positions, {} distinct, expected {expected}", mines.len());
            return Err(GameError::MineCountMismatch {
                expected,
                actual: mines.len() as CellCount,
            });
        }

        Ok(mines)
    }

    fn is_cleared(&self) -> bool {
        self.config.total_cells() - self.board.revealed_safe_count() == self.config.mines()
    }

    fn finish(&mut self, outcome: Outcome) {
        self.phase = Phase::Over;
        self.outcome = outcome;
        log::debug!("Game over: {outcome:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn preset(width: Coord, height: Coord, mines: &[(Coord, Coord)]) -> Game<PresetMineGenerator> {
        let config = GameConfig::new(width, height, mines.len() as CellCount).unwrap();
        Game::with_generator(config, PresetMineGenerator::from_coords(mines))
    }

    fn pos(row: Coord, column: Coord) -> Position {
        Position::new(row, column)
    }

    fn visibility<G: MineGenerator>(game: &Game<G>, row: Coord, column: Coord) -> Visibility {
        game.cell_at(pos(row, column)).unwrap().visibility()
    }

    #[test]
    fn new_game_is_hidden_empty_and_not_started() {
        let game = Game::new(GameConfig::new(4, 3, 2).unwrap(), 1);

        assert_eq!(game.cells().count(), 12);
        assert!(game.cells().all(|cell| cell.visibility == Visibility::Hidden));
        assert!(game.cells().all(|cell| cell.display == DisplayCategory::Blank));
        assert_eq!(game.phase(), Phase::NotStarted);
        assert_eq!(game.outcome(), Outcome::Undecided);
    }

    #[test]
    fn reset_discards_progress_and_is_idempotent() {
        let mut game = Game::new(GameConfig::new(6, 6, 4).unwrap(), 3);
        game.tag(pos(5, 5)).unwrap();
        game.open(pos(0, 0)).unwrap();

        game.reset();
        let once = game.snapshot();
        game.reset();

        assert_eq!(game.snapshot(), once);
        assert_eq!(game.board().mine_count(), 0);
        assert!(once.cells.iter().all(|cell| cell.visibility == Visibility::Hidden));
        assert_eq!(once.phase, Phase::NotStarted);
        assert_eq!(once.outcome, Outcome::Undecided);
    }

    #[test]
    fn generate_places_mines_away_from_first_row_and_column() {
        let mut game = Game::new(GameConfig::new(8, 8, 10).unwrap(), 99);
        let first = pos(3, 4);

        game.generate(first).unwrap();

        let mines: Vec<_> = game.board().iter().filter(|cell| cell.is_mine()).collect();
        assert_eq!(mines.len(), 10);
        assert!(mines.iter().all(|cell| cell.position().row() != 3));
        assert!(mines.iter().all(|cell| cell.position().column() != 4));
        assert_eq!(game.phase(), Phase::InProgress);
    }

    #[test]
    fn generated_counts_match_adjacent_mines() {
        let mut game = Game::new(GameConfig::new(10, 7, 20).unwrap(), 5);
        game.generate(pos(0, 0)).unwrap();
        let board = game.board();

        for cell in board.iter().filter(|cell| !cell.is_mine()) {
            let expected = board
                .iter_neighbors(cell.position())
                .filter(|&neighbor| board[neighbor].is_mine())
                .count() as u8;
            assert_eq!(cell.adjacent_count(), expected);
            assert_eq!(matches!(cell.content(), CellContent::Numbered(_)), expected > 0);
        }
    }

    #[test]
    fn generate_only_runs_once() {
        let mut game = preset(3, 3, &[(2, 2)]);

        game.generate(pos(0, 0)).unwrap();
        game.generate(pos(0, 0)).unwrap();

        assert_eq!(game.board().mine_count(), 1);
        assert_eq!(game.cell_at(pos(1, 1)).unwrap().adjacent_count(), 1);
    }

    struct FixedLayout(Vec<Position>);

    impl MineGenerator for FixedLayout {
        fn generate(&mut self, _config: &GameConfig, _first: Position) -> Result<Vec<Position>> {
            Ok(self.0.clone())
        }
    }

    fn fixed(mines: CellCount, layout: &[(Coord, Coord)]) -> Game<FixedLayout> {
        let config = GameConfig::new(3, 3, mines).unwrap();
        Game::with_generator(config, FixedLayout(layout.iter().copied().map(Position::from).collect()))
    }

    #[test]
    fn out_of_range_layout_leaves_board_untouched() {
        let mut game = fixed(2, &[(2, 2), (9, 9)]);

        assert_eq!(game.open(pos(0, 0)), Err(GameError::InvalidCoords));
        assert_eq!(game.phase(), Phase::NotStarted);
        assert_eq!(game.board().mine_count(), 0);
        assert!(game.cells().all(|cell| cell.display == DisplayCategory::Blank));
    }

    #[test]
    fn short_or_duplicated_layouts_are_rejected() {
        let mut short = fixed(2, &[(2, 2)]);
        let mut duplicated = fixed(2, &[(2, 2), (2, 2)]);

        assert_eq!(
            short.open(pos(0, 0)),
            Err(GameError::MineCountMismatch { expected: 2, actual: 1 })
        );
        assert_eq!(
            duplicated.generate(pos(0, 0)),
            Err(GameError::MineCountMismatch { expected: 2, actual: 1 })
        );
        assert_eq!(short.board().mine_count(), 0);
        assert_eq!(duplicated.board().mine_count(), 0);
        assert_eq!(duplicated.phase(), Phase::NotStarted);
    }

    #[test]
    fn infeasible_generation_leaves_game_untouched() {
        let mut game = Game::new(GameConfig::new(2, 2, 2).unwrap(), 0);

        assert_eq!(
            game.open(pos(0, 0)),
            Err(GameError::MinesDoNotFit { mines: 2, eligible: 1 })
        );
        assert_eq!(game.phase(), Phase::NotStarted);
        assert_eq!(game.board().mine_count(), 0);
    }

    #[test]
    fn opening_empty_corner_clears_three_by_three() {
        let mut game = preset(3, 3, &[(2, 2)]);

        let outcome = game.open(pos(0, 0)).unwrap();

        assert_eq!(outcome, RevealOutcome::Won);
        assert_eq!(game.phase(), Phase::Over);
        assert_eq!(game.outcome(), Outcome::Won);
        assert_eq!(visibility(&game, 2, 2), Visibility::Hidden);
        assert_eq!(game.board().revealed_safe_count(), 8);
    }

    #[test]
    fn single_cell_without_mines_wins_immediately() {
        let mut game = Game::new(GameConfig::new(1, 1, 0).unwrap(), 0);

        assert_eq!(game.open(pos(0, 0)).unwrap(), RevealOutcome::Won);
        assert_eq!(game.outcome(), Outcome::Won);
        assert_eq!(visibility(&game, 0, 0), Visibility::Revealed);
    }

    #[test]
    fn flood_stops_at_border_around_mine() {
        // (1, 4) is a safe pocket walled in by mines
        let mut game = preset(5, 5, &[(0, 4), (1, 3), (2, 4)]);

        assert_eq!(game.open(pos(4, 0)).unwrap(), RevealOutcome::Revealed);

        // numbered cells with no empty neighbor lie beyond the border
        assert_eq!(visibility(&game, 1, 4), Visibility::Hidden);
        assert_eq!(visibility(&game, 0, 3), Visibility::Hidden);
        assert_eq!(visibility(&game, 0, 2), Visibility::Revealed);
        assert_eq!(visibility(&game, 1, 2), Visibility::Revealed);
        assert_eq!(visibility(&game, 2, 3), Visibility::Revealed);
        assert_eq!(visibility(&game, 3, 4), Visibility::Revealed);
        assert_eq!(visibility(&game, 4, 4), Visibility::Revealed);
        for (row, column) in [(0, 4), (1, 3), (2, 4)] {
            assert_eq!(visibility(&game, row, column), Visibility::Hidden);
        }
        assert_eq!(game.phase(), Phase::InProgress);
        assert_eq!(game.outcome(), Outcome::Undecided);
    }

    #[test]
    fn opening_numbered_cell_reveals_only_that_cell() {
        let mut game = preset(3, 3, &[(0, 0)]);

        assert_eq!(game.open(pos(1, 1)).unwrap(), RevealOutcome::Revealed);

        let revealed = game
            .cells()
            .filter(|cell| cell.visibility == Visibility::Revealed)
            .count();
        assert_eq!(revealed, 1);
        assert_eq!(game.phase(), Phase::InProgress);
    }

    #[test]
    fn opening_mine_loses_and_reveal_all_discloses_everything() {
        let mut game = preset(3, 3, &[(0, 0), (2, 2)]);
        game.open(pos(1, 1)).unwrap();
        game.tag(pos(0, 2)).unwrap();

        assert_eq!(game.open(pos(0, 0)).unwrap(), RevealOutcome::HitMine);
        assert_eq!(game.phase(), Phase::Over);
        assert_eq!(game.outcome(), Outcome::Lost);

        game.reveal_all();

        for cell in game.board().iter() {
            let expected = if cell.is_mine() {
                Visibility::Detonated
            } else {
                Visibility::Revealed
            };
            assert_eq!(cell.visibility(), expected);
        }
        assert_eq!(game.outcome(), Outcome::Lost);
    }

    #[test]
    fn finished_game_ignores_further_moves() {
        let mut game = preset(2, 2, &[(0, 0)]);
        game.open(pos(0, 0)).unwrap();
        let before = game.snapshot();

        assert_eq!(game.open(pos(1, 1)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(game.tag(pos(0, 1)).unwrap(), MarkOutcome::NoChange);
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn win_does_not_depend_on_open_order() {
        // every safe cell touches the mine, so each open reveals exactly one cell
        let mines = [(1, 1)];
        let safe = [(0, 0), (0, 1), (0, 2), (1, 2), (2, 2), (2, 1), (2, 0), (1, 0)];

        for order in [safe.to_vec(), safe.iter().rev().copied().collect()] {
            let mut game = preset(3, 3, &mines);
            let (last, rest) = order.split_last().unwrap();
            for &(row, column) in rest {
                game.open(pos(row, column)).unwrap();
                assert_eq!(game.phase(), Phase::InProgress);
            }

            assert_eq!(game.open(pos(last.0, last.1)).unwrap(), RevealOutcome::Won);
            assert_eq!(game.outcome(), Outcome::Won);
        }
    }

    #[test]
    fn opening_revealed_cell_is_a_no_op() {
        let mut game = preset(3, 3, &[(0, 0), (2, 2)]);
        game.open(pos(1, 1)).unwrap();

        assert_eq!(game.open(pos(1, 1)).unwrap(), RevealOutcome::NoChange);
        assert_eq!(game.phase(), Phase::InProgress);
    }

    #[test]
    fn opening_flagged_cell_still_reveals_it() {
        let mut game = preset(3, 3, &[(0, 0)]);
        game.tag(pos(1, 1)).unwrap();

        assert_eq!(game.open(pos(1, 1)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(visibility(&game, 1, 1), Visibility::Revealed);
    }

    #[test]
    fn tag_toggles_and_ignores_revealed_cells() {
        let mut game = preset(3, 3, &[(0, 0)]);

        assert_eq!(game.tag(pos(2, 2)).unwrap(), MarkOutcome::Changed);
        assert_eq!(game.flag_count(), 1);
        assert_eq!(game.mines_left(), 0);
        assert_eq!(game.tag(pos(2, 2)).unwrap(), MarkOutcome::Changed);
        assert_eq!(visibility(&game, 2, 2), Visibility::Hidden);
        assert_eq!(game.phase(), Phase::NotStarted);

        game.open(pos(1, 1)).unwrap();
        assert_eq!(game.tag(pos(1, 1)).unwrap(), MarkOutcome::NoChange);
        assert_eq!(visibility(&game, 1, 1), Visibility::Revealed);
    }

    #[test]
    fn tag_does_not_touch_content_or_phase() {
        let mut game = preset(3, 3, &[(0, 0), (2, 2)]);
        game.open(pos(0, 2)).unwrap();
        let before = *game.cell_at(pos(0, 1)).unwrap();

        game.tag(pos(0, 1)).unwrap();
        game.tag(pos(0, 0)).unwrap();

        let after = game.cell_at(pos(0, 1)).unwrap();
        assert_eq!(after.content(), before.content());
        assert_eq!(game.cell_at(pos(0, 0)).unwrap().visibility(), Visibility::Flagged);
        assert!(game.cell_at(pos(0, 0)).unwrap().is_mine());
        assert_eq!(game.phase(), Phase::InProgress);
        assert_eq!(game.outcome(), Outcome::Undecided);
    }

    #[test]
    fn out_of_range_positions_fail_fast() {
        let mut game = preset(3, 3, &[(0, 0)]);

        assert_eq!(game.open(pos(3, 0)), Err(GameError::InvalidCoords));
        assert_eq!(game.tag(pos(0, 3)), Err(GameError::InvalidCoords));
        assert_eq!(game.generate(pos(9, 9)), Err(GameError::InvalidCoords));
        assert!(game.cell_at(pos(3, 3)).is_err());
        assert_eq!(game.phase(), Phase::NotStarted);
    }

    #[test]
    fn snapshot_lists_every_cell_in_row_major_order() {
        let mut game = preset(2, 2, &[(1, 1)]);
        game.open(pos(0, 0)).unwrap();

        let snapshot = game.snapshot();

        assert_eq!(snapshot.width, 2);
        assert_eq!(snapshot.height, 2);
        assert_eq!(
            snapshot.cells.iter().map(|cell| cell.position).collect::<Vec<_>>(),
            vec![pos(0, 0), pos(0, 1), pos(1, 0), pos(1, 1)]
        );
        assert_eq!(snapshot.cells[0].display, DisplayCategory::Number(1));
        assert_eq!(snapshot.cells[3].display, DisplayCategory::Mine);
        assert_eq!(snapshot.cells[3].visibility, Visibility::Hidden);
    }
}
