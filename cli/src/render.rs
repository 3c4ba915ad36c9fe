use std::fmt::Write;

use mineclear_core::{BoardSnapshot, DisplayCategory, Outcome, Renderer, Visibility};

/// Prints the board to stdout, either as a text grid or as one JSON document per frame.
#[derive(Debug)]
pub struct TerminalRenderer {
    json: bool,
}

impl TerminalRenderer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

impl Renderer for TerminalRenderer {
    fn render(&mut self, snapshot: &BoardSnapshot) {
        if self.json {
            match serde_json::to_string(snapshot) {
                Ok(json) => println!("{json}"),
                Err(err) => log::error!("Failed to serialize board: {err}"),
            }
        } else {
            print!("{}", draw(snapshot));
        }
    }

    fn announce(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Won => println!("Victory!"),
            Outcome::Lost => println!("Defeat!"),
            Outcome::Undecided => {}
        }
    }
}

fn symbol(visibility: Visibility, display: DisplayCategory) -> char {
    match (visibility, display) {
        (Visibility::Hidden, _) => '#',
        (Visibility::Flagged, _) => 'F',
        (Visibility::Detonated, _) => '*',
        (Visibility::Revealed, DisplayCategory::Blank) => '.',
        (Visibility::Revealed, DisplayCategory::Number(count)) => char::from(b'0' + count),
        (Visibility::Revealed, DisplayCategory::Mine) => '*',
    }
}

/// Text grid with column indices on top and row indices on the left.
pub fn draw(snapshot: &BoardSnapshot) -> String {
    let mut out = String::from("    ");
    for column in 0..snapshot.width {
        let _ = write!(out, "{:>3}", column);
    }
    out.push('\n');

    for row in snapshot.cells.chunks(snapshot.width.into()) {
        let Some(first) = row.first() else {
            continue;
        };
        let _ = write!(out, "{:>3} ", first.position.row());
        for cell in row {
            let _ = write!(out, "{:>3}", symbol(cell.visibility, cell.display));
        }
        out.push('\n');
    }
    out
}
