use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    BoardError, CascadeError, GeneratorExhaustedError,
    core::{
        grid::Grid,
        matching::{Match, detect, has_match},
        position::Position,
    },
};

use super::{
    cascade::{self, CascadeReport},
    config::BoardConfig,
    event::{BoardListener, EventEmitter},
    generator::TileGenerator,
};

/// Result of [`Board::move_tiles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
pub enum MoveOutcome {
    /// The swap would not create a match; the board was left untouched.
    Rejected,
    /// The swap was applied and the resulting cascade settled.
    Resolved(CascadeReport),
}

/// Match-3 board: owns the grid, the tile generator and the listener slot.
///
/// Between public calls every cell holds a tile. Cells only become empty
/// inside [`Self::move_tiles`] while a cascade is being resolved.
///
/// # Example
///
/// ```
/// use match3_engine::{Board, BoardEvent, Position, SequenceGenerator};
///
/// let tiles = "BCA AAB CBC".chars().filter(|c| !c.is_whitespace());
/// let refill = "DED".chars();
/// let mut board = Board::new(SequenceGenerator::new(tiles.chain(refill)), 3, 3).unwrap();
/// board.add_listener(|event: &BoardEvent<char>| println!("{event:?}"));
///
/// let (a, b) = (Position::new(0, 2), Position::new(1, 2));
/// assert!(board.can_move(a, b));
/// let outcome = board.move_tiles(a, b).unwrap();
/// assert!(outcome.is_resolved());
/// assert!(board.matches().is_empty());
/// ```
pub struct Board<G>
where
    G: TileGenerator,
{
    grid: Grid<G::Tile>,
    generator: G,
    emitter: EventEmitter<G::Tile>,
    config: BoardConfig,
}

impl<G> fmt::Debug for Board<G>
where
    G: TileGenerator + fmt::Debug,
    G::Tile: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("grid", &self.grid)
            .field("generator", &self.generator)
            .field("emitter", &self.emitter)
            .field("config", &self.config)
            .finish()
    }
}

impl<G> Board<G>
where
    G: TileGenerator,
    G::Tile: Clone + PartialEq,
{
    /// Creates a `width × height` board with the default configuration.
    ///
    /// Every cell is filled by one generator call, in row-major order.
    pub fn new(generator: G, width: usize, height: usize) -> Result<Self, BoardError> {
        Self::with_config(generator, width, height, BoardConfig::default())
    }

    /// Like [`Self::new`], with explicit configuration.
    ///
    /// With [`BoardConfig::resolve_initial`] set, matches present after the
    /// fill are resolved before returning. No events are emitted for them
    /// since no listener can be registered yet.
    pub fn with_config(
        mut generator: G,
        width: usize,
        height: usize,
        config: BoardConfig,
    ) -> Result<Self, BoardError> {
        if width == 0 || height == 0 || width.checked_mul(height).is_none() {
            return Err(BoardError::InvalidDimensions { width, height });
        }
        let grid = Grid::try_from_fn(width, height, |_| {
            generator.next_tile().ok_or(GeneratorExhaustedError)
        })?;
        let mut board = Self {
            grid,
            generator,
            emitter: EventEmitter::new(),
            config,
        };
        if config.resolve_initial {
            let report = board.resolve()?;
            debug!(passes = report.passes(), "resolved initial matches");
        }
        Ok(board)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    #[must_use]
    pub fn grid(&self) -> &Grid<G::Tile> {
        &self.grid
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Returns the tile at `pos`, or `None` if `pos` is off the board.
    #[must_use]
    pub fn piece(&self, pos: Position) -> Option<&G::Tile> {
        self.grid.tile(pos)
    }

    /// Registers the listener for board events, replacing any previous one.
    pub fn add_listener<L>(&mut self, listener: L)
    where
        L: BoardListener<G::Tile> + 'static,
    {
        self.emitter.set(listener);
    }

    /// Returns `true` if swapping `first` and `second` would leave at least one
    /// match anywhere on the board.
    ///
    /// Both positions must be on the board and share a row or a column. They
    /// need not be adjacent. The swap is tried on a copy; the board itself is
    /// never modified.
    #[must_use]
    pub fn can_move(&self, first: Position, second: Position) -> bool {
        if self.piece(first).is_none() || self.piece(second).is_none() {
            return false;
        }
        if !first.shares_line(second) {
            return false;
        }
        let mut hypothetical = self.grid.clone();
        hypothetical.swap(first, second);
        has_match(&hypothetical)
    }

    /// Swaps `first` and `second` and resolves the resulting cascade.
    ///
    /// Does nothing and returns [`MoveOutcome::Rejected`] when
    /// [`Self::can_move`] is false. Otherwise every event of the cascade has
    /// been delivered to the listener by the time this returns.
    ///
    /// # Errors
    ///
    /// Fails when the cascade exceeds [`BoardConfig::max_cascade_passes`] or
    /// the generator stops producing tiles. After a generator failure the
    /// board holds empty cells and should be discarded.
    #[instrument(level = "debug", skip(self))]
    pub fn move_tiles(
        &mut self,
        first: Position,
        second: Position,
    ) -> Result<MoveOutcome, CascadeError> {
        if !self.can_move(first, second) {
            debug!("move rejected");
            return Ok(MoveOutcome::Rejected);
        }
        self.grid.swap(first, second);
        let report = self.resolve()?;
        debug!(
            passes = report.passes(),
            matches = report.matches(),
            "move resolved"
        );
        Ok(MoveOutcome::Resolved(report))
    }

    /// Returns the matches currently on the board.
    ///
    /// Always empty after a successful move.
    #[must_use]
    pub fn matches(&self) -> Vec<Match<G::Tile>> {
        detect(&self.grid)
    }

    /// Returns every pair `(a, b)` with `a < b` for which [`Self::can_move`] holds.
    #[must_use]
    pub fn valid_moves(&self) -> Vec<(Position, Position)> {
        let positions: Vec<Position> = self.grid.positions().collect();
        positions
            .iter()
            .enumerate()
            .flat_map(|(i, &a)| positions[i + 1..].iter().map(move |&b| (a, b)))
            .filter(|&(a, b)| self.can_move(a, b))
            .collect()
    }

    fn resolve(&mut self) -> Result<CascadeReport, CascadeError> {
        cascade::resolve(
            &mut self.grid,
            &mut self.generator,
            &mut self.emitter,
            self.config.max_cascade_passes,
        )
    }
}
