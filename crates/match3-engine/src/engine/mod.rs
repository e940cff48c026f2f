//! Board state and move resolution.
//!
//! This module builds the match-3 rules on top of the core data structures:
//!
//! - [`Board`] - Owns the grid, validates swaps and drives moves
//! - [`cascade::resolve`] - Clear, compact and refill loop run after each move
//! - [`BoardEvent`] / [`BoardListener`] - Synchronous notifications to the host
//! - [`TileGenerator`] - Supplies new tiles ([`RandomTileGenerator`] for play,
//!   [`SequenceGenerator`] for scripted boards)
//! - [`BoardConfig`] - Cascade bound and initial-board policy
//!
//! # Move Flow
//!
//! 1. The host asks [`Board::can_move`] or calls [`Board::move_tiles`] directly
//! 2. A swap that creates no match is rejected without side effects
//! 3. Otherwise the tiles are swapped and the cascade runs:
//!    matches are announced, cleared, the columns settle and the gaps refill
//! 4. The cascade repeats until no match is left, one `Refill` event per pass
//!
//! # Example
//!
//! ```
//! use match3_engine::{Board, BoardConfig, Position, RandomTileGenerator};
//!
//! let generator = RandomTileGenerator::new(vec!['R', 'G', 'B', 'Y']).unwrap();
//! let config = BoardConfig::default().with_resolve_initial(true);
//! let mut board = Board::with_config(generator, 8, 8, config).unwrap();
//!
//! if let Some(&(a, b)) = board.valid_moves().first() {
//!     board.move_tiles(a, b).unwrap();
//! }
//! assert!(board.matches().is_empty());
//! assert_eq!(board.piece(Position::new(8, 0)), None);
//! ```

pub use self::{board::*, cascade::CascadeReport, config::*, event::*, generator::*};

mod board;
pub mod cascade;
mod config;
mod event;
mod generator;
