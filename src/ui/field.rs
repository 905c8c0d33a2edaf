use crate::simulation::agent::Explorer;
use crate::simulation::environment::{Cave, World};
use crate::simulation::memory::BeliefGrid;
use crate::simulation::spatial::Location;
use rayon::prelude::*;

/// Width of one rendered cell, brackets included.
pub const CELL_WIDTH: usize = 5;

fn bracket(content: &str) -> String {
    format!("[{content:^width$}]", width = CELL_WIDTH - 2)
}

/// One row of text per grid row, north at the top.
///
/// Rows are independent, so they are built in parallel.
#[allow(clippy::cast_sign_loss)]
fn render_rows<F>(size: i32, explorer: &Explorer, cell_text: F) -> Vec<String>
where
    F: Fn(Location) -> String + Sync,
{
    if size <= 0 {
        return Vec::new();
    }
    let at = explorer.location;
    let glyph = explorer.direction.glyph();

    (1..=size)
        .into_par_iter()
        .map(|row| {
            let mut line = String::with_capacity(size as usize * CELL_WIDTH);
            for col in 1..=size {
                let location = Location::new(row, col);
                if location == at {
                    line.push_str(&bracket(&glyph.to_string()));
                } else {
                    line.push_str(&bracket(&cell_text(location)));
                }
            }
            line
        })
        .collect()
}

/// The explorer's view: each cell's belief summary
/// (`W` wall, `X` lethal, `V` visited, `S` safe, a risk count, `?` unknown).
#[must_use]
pub fn belief_rows(beliefs: &BeliefGrid, explorer: &Explorer) -> Vec<String> {
    render_rows(beliefs.size(), explorer, |location| {
        beliefs
            .cell(location)
            .map_or_else(String::new, |cell| cell.summary().to_string())
    })
}

/// The hidden truth: `W` wumpus, `P` pit, `G` gold.
#[must_use]
pub fn cave_rows(cave: &Cave, explorer: &Explorer) -> Vec<String> {
    render_rows(cave.size(), explorer, |location| {
        cave.cell(location).map_or_else(String::new, |cell| cell.label())
    })
}
