use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::{
    CascadeError, CascadeLimitError, GeneratorExhaustedError,
    core::{grid::Grid, matching::detect},
};

use super::{
    event::{BoardEvent, EventEmitter},
    generator::TileGenerator,
};

/// Summary of one cascade resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CascadeReport {
    passes: usize,
    matches: usize,
    cleared_cells: usize,
}

impl CascadeReport {
    /// Number of clear/compact/refill passes, equal to the number of `Refill` events.
    #[must_use]
    pub const fn passes(&self) -> usize {
        self.passes
    }

    /// Number of matches cleared, equal to the number of `Match` events.
    #[must_use]
    pub const fn matches(&self) -> usize {
        self.matches
    }

    /// Number of distinct cells emptied, summed over passes.
    #[must_use]
    pub const fn cleared_cells(&self) -> usize {
        self.cleared_cells
    }
}

/// Resolves matches on `grid` until none remain.
///
/// Each pass:
///
/// 1. Detects all matches; stops if there are none
/// 2. Emits one `Match` event per match, before any cell is touched
/// 3. Empties every matched cell (overlapping cells once)
/// 4. Compacts each column downward
/// 5. Refills the empty cells from `generator`
/// 6. Emits a single `Refill` event
///
/// When `max_passes` is set and the grid still has matches after that many
/// passes, resolution stops with [`CascadeError::Limit`]; the grid is full but
/// unsettled. If the generator runs dry, resolution stops with
/// [`CascadeError::Generator`] and the cells it could not refill stay empty.
pub fn resolve<G>(
    grid: &mut Grid<G::Tile>,
    generator: &mut G,
    emitter: &mut EventEmitter<G::Tile>,
    max_passes: Option<usize>,
) -> Result<CascadeReport, CascadeError>
where
    G: TileGenerator + ?Sized,
    G::Tile: Clone + PartialEq,
{
    let mut report = CascadeReport::default();
    loop {
        let matches = detect(grid);
        if matches.is_empty() {
            debug!(passes = report.passes, "board settled");
            return Ok(report);
        }
        if max_passes.is_some_and(|max| report.passes >= max) {
            warn!(passes = report.passes, "cascade limit reached");
            return Err(CascadeLimitError {
                passes: report.passes,
            }
            .into());
        }

        for m in &matches {
            trace!(line = %m.line(), len = m.len(), start = ?m.positions().first(), "match");
            emitter.emit(|| BoardEvent::Match(m.clone()));
        }

        let cleared = matches
            .iter()
            .flat_map(|m| m.positions())
            .filter(|&&pos| grid.clear(pos))
            .count();
        let moved = grid.apply_gravity();
        let refilled = grid.fill_empty(|| generator.next_tile().ok_or(GeneratorExhaustedError))?;
        emitter.emit(|| BoardEvent::Refill);

        report.passes += 1;
        report.matches += matches.len();
        report.cleared_cells += cleared;
        debug!(
            pass = report.passes,
            matches = matches.len(),
            cleared,
            moved,
            refilled,
            "cascade pass complete"
        );
    }
}
