use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::IndexedRandom as _,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Source of fresh tile values.
///
/// The board asks for one tile per cell when it is created and one per
/// emptied cell during each cascade pass. Returning `None` reports that the
/// generator cannot produce any more tiles; the board surfaces this as an
/// error instead of leaving cells empty.
pub trait TileGenerator {
    type Tile;

    fn next_tile(&mut self) -> Option<Self::Tile>;
}

impl<G> TileGenerator for &mut G
where
    G: TileGenerator + ?Sized,
{
    type Tile = G::Tile;

    fn next_tile(&mut self) -> Option<Self::Tile> {
        (**self).next_tile()
    }
}

impl<G> TileGenerator for Box<G>
where
    G: TileGenerator + ?Sized,
{
    type Tile = G::Tile;

    fn next_tile(&mut self) -> Option<Self::Tile> {
        (**self).next_tile()
    }
}

/// Seed for deterministic tile generation.
///
/// A 128-bit seed, written as a 32-character hex string both in its
/// `Display`/`FromStr` form and when serialized. The same seed and palette
/// always produce the same tile sequence.
///
/// # Example
///
/// ```
/// use match3_engine::{RandomTileGenerator, TileGenerator as _, TileSeed};
/// use rand::Rng as _;
///
/// let seed: TileSeed = rand::rng().random();
/// let mut a = RandomTileGenerator::with_seed(vec!['A', 'B', 'C'], seed).unwrap();
/// let mut b = RandomTileGenerator::with_seed(vec!['A', 'B', 'C'], seed).unwrap();
/// assert_eq!(a.next_tile(), b.next_tile());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileSeed([u8; 16]);

impl TileSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed '{input}': expected 32 hex characters")]
pub struct ParseTileSeedError {
    input: String,
}

impl fmt::Display for TileSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for TileSeed {
    type Err = ParseTileSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let error = || ParseTileSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 {
            return Err(error());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| error())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for TileSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TileSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Distribution<TileSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> TileSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        TileSeed(seed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("tile palette must not be empty")]
pub struct EmptyPaletteError;

/// Draws tiles uniformly at random from a fixed palette.
///
/// Never exhausts.
#[derive(Debug, Clone)]
pub struct RandomTileGenerator<T> {
    rng: Pcg32,
    palette: Vec<T>,
}

impl<T> RandomTileGenerator<T> {
    /// Creates a generator with a random seed.
    pub fn new(palette: Vec<T>) -> Result<Self, EmptyPaletteError> {
        Self::with_seed(palette, rand::rng().random())
    }

    /// Like [`Self::new`], but reproducible from `seed`.
    pub fn with_seed(palette: Vec<T>, seed: TileSeed) -> Result<Self, EmptyPaletteError> {
        if palette.is_empty() {
            return Err(EmptyPaletteError);
        }
        Ok(Self {
            rng: Pcg32::from_seed(seed.0),
            palette,
        })
    }

    #[must_use]
    pub fn palette(&self) -> &[T] {
        &self.palette
    }
}

impl<T> TileGenerator for RandomTileGenerator<T>
where
    T: Clone,
{
    type Tile = T;

    fn next_tile(&mut self) -> Option<T> {
        self.palette.choose(&mut self.rng).cloned()
    }
}

/// Replays a fixed sequence of tiles, then reports exhaustion.
///
/// Useful for scripted boards where every generated tile must be known.
#[derive(Debug, Clone)]
pub struct SequenceGenerator<I> {
    tiles: I,
}

impl<I> SequenceGenerator<I>
where
    I: Iterator,
{
    pub fn new<S>(tiles: S) -> Self
    where
        S: IntoIterator<IntoIter = I>,
    {
        Self {
            tiles: tiles.into_iter(),
        }
    }
}

impl<I> TileGenerator for SequenceGenerator<I>
where
    I: Iterator,
{
    type Tile = I::Item;

    fn next_tile(&mut self) -> Option<I::Item> {
        self.tiles.next()
    }
}

/// Adapts an infallible closure into a [`TileGenerator`].
#[derive(Debug, Clone)]
pub struct FnGenerator<F> {
    f: F,
}

pub fn from_fn<T, F>(f: F) -> FnGenerator<F>
where
    F: FnMut() -> T,
{
    FnGenerator { f }
}

impl<T, F> TileGenerator for FnGenerator<F>
where
    F: FnMut() -> T,
{
    type Tile = T;

    fn next_tile(&mut self) -> Option<T> {
        Some((self.f)())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod tile_seed {
        use super::*;

        #[test]
        fn test_display_is_32_char_hex() {
            let seed: TileSeed = rand::rng().random();
            let s = seed.to_string();
            assert_eq!(s.len(), 32);
            assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
            assert_eq!(s.parse::<TileSeed>().unwrap(), seed);
        }

        #[test]
        fn test_known_value_is_big_endian() {
            let seed = TileSeed::from_bytes([
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
                0x32, 0x10,
            ]);
            let json = serde_json::to_string(&seed).unwrap();
            assert_eq!(json, "\"0123456789abcdeffedcba9876543210\"");
            let parsed: TileSeed = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, seed);
        }

        #[test]
        fn test_uppercase_hex_is_accepted() {
            let seed: TileSeed = "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF".parse().unwrap();
            assert_eq!(seed, TileSeed::from_bytes([0xFF; 16]));
        }

        #[test]
        fn test_invalid_input_is_rejected() {
            for input in [
                "",
                "0123456789abcdef0123456789abcde",
                "0123456789abcdef0123456789abcdef0",
                "ghijklmnopqrstuvwxyzghijklmnopqr",
            ] {
                let err = input.parse::<TileSeed>().unwrap_err();
                assert!(err.to_string().contains("invalid seed"), "{input}");
            }
            let result: Result<TileSeed, _> = serde_json::from_str("\"xyz\"");
            assert!(result.is_err());
        }
    }

    #[test]
    fn test_random_generator_is_deterministic() {
        let seed = TileSeed::from_bytes([7; 16]);
        let mut a = RandomTileGenerator::with_seed(vec![1, 2, 3, 4], seed).unwrap();
        let mut b = RandomTileGenerator::with_seed(vec![1, 2, 3, 4], seed).unwrap();
        for _ in 0..50 {
            assert_eq!(a.next_tile(), b.next_tile());
        }
    }

    #[test]
    fn test_random_generator_stays_in_palette() {
        let mut generator = RandomTileGenerator::new(vec!['X', 'Y']).unwrap();
        for _ in 0..100 {
            let tile = generator.next_tile().unwrap();
            assert!(generator.palette().contains(&tile));
        }
    }

    #[test]
    fn test_empty_palette_is_rejected() {
        assert!(RandomTileGenerator::<char>::new(Vec::new()).is_err());
    }

    #[test]
    fn test_sequence_generator_exhausts() {
        let mut generator = SequenceGenerator::new(['A', 'B']);
        assert_eq!(generator.next_tile(), Some('A'));
        assert_eq!(generator.next_tile(), Some('B'));
        assert_eq!(generator.next_tile(), None);
    }

    #[test]
    fn test_fn_generator_and_boxing() {
        let mut counter = 0;
        let mut generator: Box<dyn TileGenerator<Tile = i32>> = Box::new(from_fn(move || {
            counter += 1;
            counter
        }));
        assert_eq!(generator.next_tile(), Some(1));
        assert_eq!(generator.next_tile(), Some(2));
    }
}
