use serde::{Deserialize, Serialize};

use super::{cell::Cell, grid::Grid, position::Position};

/// Minimum number of equal tiles in a line that form a match.
pub const MIN_MATCH_LEN: usize = 3;

/// Orientation of a match.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
pub enum Line {
    #[display("horizontal")]
    Horizontal,
    #[display("vertical")]
    Vertical,
}

/// A contiguous run of at least [`MIN_MATCH_LEN`] equal tiles in one row or column.
///
/// Positions are listed in scan order: left to right for horizontal matches,
/// top to bottom for vertical ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match<T> {
    tile: T,
    positions: Vec<Position>,
    line: Line,
}

impl<T> Match<T> {
    #[must_use]
    pub fn tile(&self) -> &T {
        &self.tile
    }

    #[must_use]
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    #[must_use]
    pub fn line(&self) -> Line {
        self.line
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Matches produced by [`detect`] are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.positions.contains(&pos)
    }
}

/// Accumulates the current run of equal adjacent tiles during a scan.
struct Run<T> {
    line: Line,
    tile: Option<T>,
    positions: Vec<Position>,
}

impl<T> Run<T>
where
    T: Clone,
{
    fn new(line: Line) -> Self {
        Self {
            line,
            tile: None,
            positions: Vec::new(),
        }
    }

    /// Records an equal pair `(from, to)` where `to` follows `from` in scan order.
    fn extend(&mut self, from: Position, to: Position, tile: &T) {
        if self.positions.last() != Some(&from) {
            self.positions.push(from);
        }
        self.positions.push(to);
        if self.tile.is_none() {
            self.tile = Some(tile.clone());
        }
    }

    /// Closes the run, emitting it if long enough, and resets for the next one.
    fn flush(&mut self, matches: &mut Vec<Match<T>>) {
        let positions = std::mem::take(&mut self.positions);
        let Some(tile) = self.tile.take() else {
            return;
        };
        if positions.len() >= MIN_MATCH_LEN {
            matches.push(Match {
                tile,
                positions,
                line: self.line,
            });
        }
    }

    fn scan_pair(
        &mut self,
        grid: &Grid<T>,
        from: Position,
        to: Position,
        matches: &mut Vec<Match<T>>,
    ) where
        T: PartialEq,
    {
        let shared = grid
            .cell(from)
            .zip(grid.cell(to))
            .and_then(|(a, b)| a.matching(b));
        match shared {
            Some(tile) => self.extend(from, to, tile),
            None => self.flush(matches),
        }
    }
}

/// Finds every match on the grid.
///
/// Rows are scanned top to bottom first, then columns from the rightmost to
/// the leftmost. Horizontal matches come first in the result, each group in
/// scan order. A cell belonging to both a horizontal and a vertical run (L, T
/// or plus shapes) appears in both matches.
///
/// Empty cells never match, so they always break a run.
///
/// # Example
///
/// ```
/// use match3_engine::{Grid, Line, Position, detect};
///
/// let grid = Grid::from_ascii(
///     "
///     A A A
///     B C A
///     C B A
///     ",
/// );
/// let matches = detect(&grid);
/// assert_eq!(matches.len(), 2);
/// assert_eq!(matches[0].line(), Line::Horizontal);
/// assert_eq!(matches[1].positions()[0], Position::new(0, 2));
/// ```
#[must_use]
pub fn detect<T>(grid: &Grid<T>) -> Vec<Match<T>>
where
    T: Clone + PartialEq,
{
    let mut matches = Vec::new();

    let mut run = Run::new(Line::Horizontal);
    for row in 0..grid.height() {
        for col in 1..grid.width() {
            let from = Position::new(row, col - 1);
            run.scan_pair(grid, from, Position::new(row, col), &mut matches);
        }
        run.flush(&mut matches);
    }

    let mut run = Run::new(Line::Vertical);
    for col in (0..grid.width()).rev() {
        for row in 1..grid.height() {
            let from = Position::new(row - 1, col);
            run.scan_pair(grid, from, Position::new(row, col), &mut matches);
        }
        run.flush(&mut matches);
    }

    matches
}

/// Returns `true` if the grid contains at least one match.
///
/// Equivalent to `!detect(grid).is_empty()`, but stops at the first run of
/// [`MIN_MATCH_LEN`] equal tiles without building any [`Match`].
#[must_use]
pub fn has_match<T>(grid: &Grid<T>) -> bool
where
    T: PartialEq,
{
    grid.rows().any(|row| has_run(row.iter()))
        || (0..grid.width()).any(|col| {
            has_run((0..grid.height()).filter_map(|row| grid.cell(Position::new(row, col))))
        })
}

fn has_run<'a, T, I>(cells: I) -> bool
where
    T: PartialEq + 'a,
    I: IntoIterator<Item = &'a Cell<T>>,
{
    let mut prev: Option<&Cell<T>> = None;
    let mut len = 0;
    for cell in cells {
        len = match prev {
            Some(prev) if prev.matching(cell).is_some() => len + 1,
            _ => 1,
        };
        if len >= MIN_MATCH_LEN {
            return true;
        }
        prev = Some(cell);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> Position {
        Position::new(row, col)
    }

    fn assert_well_formed(matches: &[Match<char>], grid: &Grid<char>) {
        for m in matches {
            assert!(m.len() >= MIN_MATCH_LEN, "short match: {m:?}");
            for p in m.positions() {
                assert_eq!(grid.tile(*p), Some(m.tile()), "tile mismatch at {p}");
            }
            for pair in m.positions().windows(2) {
                let (a, b) = (pair[0], pair[1]);
                match m.line() {
                    Line::Horizontal => assert_eq!((b.row(), b.col()), (a.row(), a.col() + 1)),
                    Line::Vertical => assert_eq!((b.row(), b.col()), (a.row() + 1, a.col())),
                }
            }
        }
    }

    #[test]
    fn test_no_matches() {
        let grid = Grid::from_ascii(
            "
            A B A
            B A B
            A B A
            ",
        );
        assert!(detect(&grid).is_empty());
        assert!(!has_match(&grid));
    }

    #[test]
    fn test_pairs_are_not_matches() {
        let grid = Grid::from_ascii(
            "
            A A B B
            C D C D
            C D E E
            ",
        );
        assert!(detect(&grid).is_empty());
    }

    #[test]
    fn test_horizontal_match() {
        let grid = Grid::from_ascii(
            "
            B A A A C
            C B C B A
            ",
        );
        let matches = detect(&grid);
        assert_eq!(matches.len(), 1);
        assert_eq!(*matches[0].tile(), 'A');
        assert_eq!(matches[0].line(), Line::Horizontal);
        assert_eq!(matches[0].positions(), [pos(0, 1), pos(0, 2), pos(0, 3)]);
    }

    #[test]
    fn test_long_run_is_single_match() {
        let grid = Grid::from_ascii("A A A A A");
        let matches = detect(&grid);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].len(), 5);
        assert_well_formed(&matches, &grid);
    }

    #[test]
    fn test_two_runs_in_one_row() {
        let grid = Grid::from_ascii("A A A B B B");
        let matches = detect(&grid);
        assert_eq!(matches.len(), 2);
        assert_eq!(*matches[0].tile(), 'A');
        assert_eq!(*matches[1].tile(), 'B');
        assert_eq!(matches[1].positions(), [pos(0, 3), pos(0, 4), pos(0, 5)]);
    }

    #[test]
    fn test_run_ends_at_row_end() {
        // The run on row 0 must not continue into row 1.
        let grid = Grid::from_ascii(
            "
            B A A
            A A C
            ",
        );
        assert!(detect(&grid).is_empty());
    }

    #[test]
    fn test_vertical_match() {
        let grid = Grid::from_ascii(
            "
            A B
            C B
            A B
            C A
            ",
        );
        let matches = detect(&grid);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].line(), Line::Vertical);
        assert_eq!(matches[0].positions(), [pos(0, 1), pos(1, 1), pos(2, 1)]);
    }

    #[test]
    fn test_vertical_columns_scanned_right_to_left() {
        let grid = Grid::from_ascii(
            "
            A B C
            A B C
            A B C
            ",
        );
        let matches = detect(&grid);
        let tiles: Vec<char> = matches.iter().map(|m| *m.tile()).collect();
        assert_eq!(tiles, ['C', 'B', 'A']);
        assert!(matches.iter().all(|m| m.line().is_vertical()));
    }

    #[test]
    fn test_horizontal_before_vertical() {
        let grid = Grid::from_ascii(
            "
            B C D
            B E F
            B G H
            G G G
            ",
        );
        let matches = detect(&grid);
        assert_eq!(matches.len(), 2);
        assert!(matches[0].line().is_horizontal());
        assert_eq!(matches[0].positions(), [pos(3, 0), pos(3, 1), pos(3, 2)]);
        assert!(matches[1].line().is_vertical());
        assert_eq!(matches[1].positions(), [pos(0, 0), pos(1, 0), pos(2, 0)]);
    }

    #[test]
    fn test_l_shape_yields_overlapping_matches() {
        let grid = Grid::from_ascii(
            "
            A B C
            A C B
            A A A
            ",
        );
        let matches = detect(&grid);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].positions(), [pos(2, 0), pos(2, 1), pos(2, 2)]);
        assert_eq!(matches[1].positions(), [pos(0, 0), pos(1, 0), pos(2, 0)]);
        assert!(matches[0].contains(pos(2, 0)) && matches[1].contains(pos(2, 0)));
        assert_well_formed(&matches, &grid);
    }

    #[test]
    fn test_plus_shape_yields_overlapping_matches() {
        let grid = Grid::from_ascii(
            "
            B A C
            A A A
            C A B
            ",
        );
        let matches = detect(&grid);
        assert_eq!(matches.len(), 2);
        assert!(matches.iter().all(|m| m.contains(pos(1, 1))));
        assert_well_formed(&matches, &grid);
    }

    #[test]
    fn test_empty_cells_break_runs() {
        let grid = Grid::from_ascii(
            "
            A . A A
            . . . B
            . C . B
            ",
        );
        assert!(detect(&grid).is_empty());
    }

    #[test]
    fn test_single_row_and_column_grids() {
        assert_eq!(detect(&Grid::from_ascii("A")).len(), 0);
        assert_eq!(detect(&Grid::from_ascii("A\nA\nA")).len(), 1);
        assert_eq!(detect(&Grid::from_ascii("A A A")).len(), 1);
    }

    #[test]
    fn test_matches_are_well_formed() {
        let grid = Grid::from_ascii(
            "
            A A A B C
            B C A B C
            B C A B A
            A A B C C
            C C C C B
            ",
        );
        let matches = detect(&grid);
        assert_well_formed(&matches, &grid);
        assert_eq!(matches.len(), 4);
    }

    #[test]
    fn test_has_match_agrees_with_detect() {
        let grids = [
            "A B A\nB A B\nA B A",
            "A A A\nB C D",
            "A B\nA C\nA D",
            "A A . A A",
            ". . .\n. . .",
            "A\nA\n.\nA",
            "B C D\nB E F\nB G H\nG G G",
            "A A B B\nC D C D",
        ];
        for art in grids {
            let grid = Grid::from_ascii(art);
            assert_eq!(has_match(&grid), !detect(&grid).is_empty(), "grid:\n{grid}");
        }
    }

    #[test]
    fn test_has_match_stops_at_empty_cells() {
        assert!(!has_match(&Grid::from_ascii("A A . A")));
        assert!(!has_match(&Grid::from_ascii("A\n.\nA\nA")));
        assert!(has_match(&Grid::from_ascii(". A A A")));
    }
}
