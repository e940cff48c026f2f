use std::fmt;

use super::{cell::Cell, position::Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridShapeError {
    #[display("grid must have at least one row and one column")]
    Empty,
    #[display("row {row} has {actual} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        actual: usize,
    },
}

/// Fixed-size rectangular grid of cells, stored row-major.
///
/// The dimensions never change after construction. `Clone` is a plain
/// structural copy, which is what hypothetical swaps are evaluated on.
///
/// # Example
///
/// ```
/// use match3_engine::{Grid, Position};
///
/// let grid = Grid::from_rows([['A', 'B'], ['C', 'D']]).unwrap();
/// assert_eq!(grid.width(), 2);
/// assert_eq!(grid.tile(Position::new(1, 0)), Some(&'C'));
/// assert_eq!(grid.tile(Position::new(2, 0)), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    width: usize,
    height: usize,
    cells: Vec<Cell<T>>,
}

impl<T> Grid<T> {
    /// Builds a grid by calling `f` once per cell in row-major order.
    ///
    /// Stops at the first error.
    pub fn try_from_fn<E, F>(width: usize, height: usize, mut f: F) -> Result<Self, E>
    where
        F: FnMut(Position) -> Result<T, E>,
    {
        let mut cells = Vec::with_capacity(width.checked_mul(height).unwrap_or(0));
        for row in 0..height {
            for col in 0..width {
                cells.push(Cell::Tile(f(Position::new(row, col))?));
            }
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Builds a grid from rows given top to bottom.
    pub fn from_rows<I, R>(rows: I) -> Result<Self, GridShapeError>
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = T>,
    {
        let mut cells = Vec::new();
        let mut width = 0;
        let mut height = 0;
        for (row, tiles) in rows.into_iter().enumerate() {
            let before = cells.len();
            cells.extend(tiles.into_iter().map(Cell::Tile));
            let actual = cells.len() - before;
            if row == 0 {
                width = actual;
            } else if actual != width {
                return Err(GridShapeError::Ragged {
                    row,
                    expected: width,
                    actual,
                });
            }
            height += 1;
        }
        if width == 0 || height == 0 {
            return Err(GridShapeError::Empty);
        }
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        pos.row() < self.height && pos.col() < self.width
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos)
            .then(|| pos.row() * self.width + pos.col())
    }

    /// Returns the cell at `pos`, or `None` if it lies outside the grid.
    #[must_use]
    pub fn cell(&self, pos: Position) -> Option<&Cell<T>> {
        self.index(pos).map(|i| &self.cells[i])
    }

    /// Returns the tile at `pos`, or `None` if it is outside the grid or empty.
    #[must_use]
    pub fn tile(&self, pos: Position) -> Option<&T> {
        self.cell(pos).and_then(Cell::tile)
    }

    /// Exchanges the contents of two cells.
    ///
    /// Returns `false` and leaves the grid untouched if either position is out of range.
    pub fn swap(&mut self, a: Position, b: Position) -> bool {
        match (self.index(a), self.index(b)) {
            (Some(a), Some(b)) => {
                self.cells.swap(a, b);
                true
            }
            _ => false,
        }
    }

    /// Empties the cell at `pos`, returning `true` if it held a tile.
    pub(crate) fn clear(&mut self, pos: Position) -> bool {
        self.index(pos)
            .is_some_and(|i| std::mem::take(&mut self.cells[i]).is_tile())
    }

    /// Compacts every column downward, keeping the vertical order of tiles.
    ///
    /// Returns the number of tiles that moved.
    pub(crate) fn apply_gravity(&mut self) -> usize {
        let mut moved = 0;
        for col in 0..self.width {
            // Rows in (row, slot) are empty once `row` has been visited.
            let mut slot = self.height;
            for row in (0..self.height).rev() {
                let i = row * self.width + col;
                if self.cells[i].is_empty() {
                    continue;
                }
                slot -= 1;
                if slot != row {
                    self.cells.swap(i, slot * self.width + col);
                    moved += 1;
                }
            }
        }
        moved
    }

    /// Fills every empty cell with a tile from `f`.
    ///
    /// Cells are visited from the bottom row upward, left to right within a row.
    /// Returns the number of cells filled, or the first error from `f`.
    pub(crate) fn fill_empty<E, F>(&mut self, mut f: F) -> Result<usize, E>
    where
        F: FnMut() -> Result<T, E>,
    {
        let mut filled = 0;
        for row in self.cells.chunks_mut(self.width.max(1)).rev() {
            for cell in row.iter_mut().filter(|cell| cell.is_empty()) {
                *cell = Cell::Tile(f()?);
                filled += 1;
            }
        }
        Ok(filled)
    }

    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_empty()).count()
    }

    /// Returns every position of the grid in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<T> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |row| (0..width).map(move |col| Position::new(row, col)))
    }

    /// Returns the rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell<T>]> {
        self.cells.chunks(self.width.max(1))
    }
}

impl Grid<char> {
    /// Creates a grid from ASCII art, one character per tile.
    ///
    /// Rows are given top to bottom. Whitespace is ignored and `.` denotes an
    /// empty cell. Blank lines are skipped.
    ///
    /// # Panics
    ///
    /// Panics if the rows do not all have the same number of cells.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<Vec<char>> = art
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect())
            .filter(|line: &Vec<char>| !line.is_empty())
            .collect();
        let width = lines.first().map_or(0, Vec::len);
        for (row, line) in lines.iter().enumerate() {
            assert_eq!(
                line.len(),
                width,
                "Each row must have exactly {width} cells, got {} at row {row}",
                line.len()
            );
        }
        let cells = lines
            .iter()
            .flatten()
            .map(|&c| if c == '.' { Cell::Empty } else { Cell::Tile(c) })
            .collect();
        Self {
            width,
            height: lines.len(),
            cells,
        }
    }
}

impl<T> fmt::Display for Grid<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for (col, cell) in row.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                match cell {
                    Cell::Empty => f.write_str(".")?,
                    Cell::Tile(tile) => write!(f, "{tile}")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
