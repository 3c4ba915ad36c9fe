use crate::*;

/// Draws the board somewhere. Called by [`Controller`] after every accepted action.
pub trait Renderer {
    fn render(&mut self, snapshot: &BoardSnapshot);

    /// Called after a render once the game has been decided.
    fn announce(&mut self, outcome: Outcome);
}

/// Sequences engine calls for player input and keeps the renderer up to date.
#[derive(Debug)]
pub struct Controller<R, G = RandomMineGenerator> {
    game: Game<G>,
    renderer: R,
}

impl<R: Renderer, G: MineGenerator> Controller<R, G> {
    pub fn new(game: Game<G>, renderer: R) -> Self {
        Self { game, renderer }
    }

    pub fn game(&self) -> &Game<G> {
        &self.game
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_parts(self) -> (Game<G>, R) {
        (self.game, self.renderer)
    }

    /// Starts a fresh game and draws it.
    pub fn play(&mut self) {
        self.game.reset();
        self.redraw();
    }

    /// Primary action on a cell. Ignored once the game is over.
    pub fn open(&mut self, pos: Position) -> Result<()> {
        if self.game.phase().is_over() {
            log::debug!("Game is over, ignoring open at {pos}");
            return Ok(());
        }

        if self.game.phase().is_not_started() {
            self.game.generate(pos)?;
        }

        self.game.open(pos)?;
        if self.game.phase().is_over() {
            self.game.reveal_all();
        }
        self.redraw();
        Ok(())
    }

    /// Secondary action on a cell. Ignored once the game is over.
    pub fn tag(&mut self, pos: Position) -> Result<()> {
        if self.game.phase().is_over() {
            log::debug!("Game is over, ignoring tag at {pos}");
            return Ok(());
        }

        self.game.tag(pos)?;
        self.redraw();
        Ok(())
    }

    fn redraw(&mut self) {
        self.renderer.render(&self.game.snapshot());

        let outcome = self.game.outcome();
        if outcome != Outcome::Undecided {
            self.renderer.announce(outcome);
        }
    }
}
