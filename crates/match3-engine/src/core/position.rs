use serde::{Deserialize, Serialize};

/// A cell coordinate on the board.
///
/// Rows grow downward and columns grow rightward, both starting at 0.
/// Ordering is row-major, so sorting positions yields reading order.
///
/// # Example
///
/// ```
/// use match3_engine::Position;
///
/// let pos = Position::new(2, 3);
/// assert_eq!(pos.up(), Some(Position::new(1, 3)));
/// assert_eq!(Position::new(0, 3).up(), None);
/// assert!(pos.shares_line(Position::new(2, 7)));
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("({row}, {col})")]
pub struct Position {
    row: usize,
    col: usize,
}

impl Position {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn row(self) -> usize {
        self.row
    }

    #[must_use]
    pub const fn col(self) -> usize {
        self.col
    }

    /// Returns the position one row above, or `None` on the top row.
    #[must_use]
    pub fn up(self) -> Option<Self> {
        Some(Self::new(self.row.checked_sub(1)?, self.col))
    }

    /// Returns the position one row below.
    ///
    /// The result may lie outside the board; bounds are only known to the grid.
    #[must_use]
    pub fn down(self) -> Option<Self> {
        Some(Self::new(self.row.checked_add(1)?, self.col))
    }

    #[must_use]
    pub fn left(self) -> Option<Self> {
        Some(Self::new(self.row, self.col.checked_sub(1)?))
    }

    #[must_use]
    pub fn right(self) -> Option<Self> {
        Some(Self::new(self.row, self.col.checked_add(1)?))
    }

    /// Returns `true` if both positions lie in the same row or the same column.
    #[must_use]
    pub fn shares_line(self, other: Self) -> bool {
        self.row == other.row || self.col == other.col
    }
}
