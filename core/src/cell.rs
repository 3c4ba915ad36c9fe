use serde::{Deserialize, Serialize};

use crate::*;

/// What a cell holds. Fixed once mine generation completes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellContent {
    #[default]
    Empty,
    /// Number of adjacent mines, always in `1..=8`.
    Numbered(u8),
    Mine,
}

/// Player-visible state of a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visibility {
    #[default]
    Hidden,
    Flagged,
    Revealed,
    Detonated,
}

impl Visibility {
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

/// Content-derived category a renderer draws for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayCategory {
    Blank,
    Number(u8),
    Mine,
}

/// Read-only view of one cell, enough to redraw it without touching the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub position: Position,
    pub display: DisplayCategory,
    pub visibility: Visibility,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    position: Position,
    content: CellContent,
    visibility: Visibility,
}

impl Cell {
    pub const fn new(position: Position) -> Self {
        Self {
            position,
            content: CellContent::Empty,
            visibility: Visibility::Hidden,
        }
    }

    pub const fn position(&self) -> Position {
        self.position
    }

    pub const fn content(&self) -> CellContent {
        self.content
    }

    pub const fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub const fn is_mine(&self) -> bool {
        matches!(self.content, CellContent::Mine)
    }

    /// Adjacent mine count, zero unless the cell is numbered.
    pub const fn adjacent_count(&self) -> u8 {
        match self.content {
            CellContent::Numbered(count) => count,
            _ => 0,
        }
    }

    pub const fn display(&self) -> DisplayCategory {
        match self.content {
            CellContent::Empty => DisplayCategory::Blank,
            CellContent::Numbered(count) => DisplayCategory::Number(count),
            CellContent::Mine => DisplayCategory::Mine,
        }
    }

    pub const fn view(&self) -> CellView {
        CellView {
            position: self.position,
            display: self.display(),
            visibility: self.visibility,
        }
    }

    pub(crate) fn arm(&mut self) {
        self.content = CellContent::Mine;
    }

    /// Counts one more adjacent mine, promoting an empty cell to a numbered one. Mines are left untouched.
    pub(crate) fn count_adjacent_mine(&mut self) {
        self.content = match self.content {
            CellContent::Empty => CellContent::Numbered(1),
            CellContent::Numbered(count) => CellContent::Numbered(count + 1),
            CellContent::Mine => CellContent::Mine,
        };
    }

    /// Opens this single cell: a mine detonates, anything else is revealed.
    pub(crate) fn open(&mut self) {
        self.visibility = match self.content {
            CellContent::Mine => Visibility::Detonated,
            CellContent::Empty | CellContent::Numbered(_) => Visibility::Revealed,
        };
    }

    pub(crate) fn toggle_flag(&mut self) -> MarkOutcome {
        use Visibility::*;

        match self.visibility {
            Hidden => {
                self.visibility = Flagged;
                MarkOutcome::Changed
            }
            Flagged => {
                self.visibility = Hidden;
                MarkOutcome::Changed
            }
            Revealed | Detonated => MarkOutcome::NoChange,
        }
    }
}
