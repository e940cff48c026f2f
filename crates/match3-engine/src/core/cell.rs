/// A single cell of the grid.
///
/// `Empty` is the transient state a cell is in between being cleared and being
/// refilled during cascade resolution. It is a distinct variant rather than a
/// reserved tile value, so no tile a generator produces can be mistaken for it.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum Cell<T> {
    Empty,
    Tile(T),
}

impl<T> Default for Cell<T> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T> Cell<T> {
    #[must_use]
    pub fn tile(&self) -> Option<&T> {
        match self {
            Self::Empty => None,
            Self::Tile(tile) => Some(tile),
        }
    }

    /// Returns the shared tile if both cells hold equal tiles.
    ///
    /// An empty cell never matches anything, including another empty cell.
    #[must_use]
    pub fn matching<'a>(&'a self, other: &Self) -> Option<&'a T>
    where
        T: PartialEq,
    {
        match (self, other) {
            (Self::Tile(a), Self::Tile(b)) if a == b => Some(a),
            _ => None,
        }
    }
}

impl<T> From<T> for Cell<T> {
    fn from(tile: T) -> Self {
        Self::Tile(tile)
    }
}
