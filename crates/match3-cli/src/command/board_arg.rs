use std::path::PathBuf;

use anyhow::Context as _;
use match3_engine::{Board, BoardConfig, RandomTileGenerator, TileSeed};
use rand::Rng as _;
use tracing::info;

use crate::util;

pub(crate) type CliBoard = Board<RandomTileGenerator<char>>;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BoardArg {
    /// Number of columns
    #[arg(long, default_value_t = 8)]
    width: usize,
    /// Number of rows
    #[arg(long, default_value_t = 8)]
    height: usize,
    /// Number of distinct tile kinds, drawn as the letters A, B, C, ...
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=26))]
    kinds: u8,
    /// Seed for tile generation (32 hex characters); random if omitted
    #[arg(long)]
    seed: Option<TileSeed>,
    /// Board configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Clear matches left by the initial fill
    #[arg(long)]
    resolve_initial: bool,
}

impl BoardArg {
    /// Builds the board described by the arguments, returning it with the seed used.
    pub(crate) fn build(&self) -> anyhow::Result<(CliBoard, TileSeed)> {
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        let mut config = match &self.config {
            Some(path) => util::read_config_file(path)?,
            None => BoardConfig::default(),
        };
        if self.resolve_initial {
            config.resolve_initial = true;
        }

        let generator = RandomTileGenerator::with_seed(palette(self.kinds), seed)?;
        let board = Board::with_config(generator, self.width, self.height, config)
            .with_context(|| format!("Failed to create {}x{} board", self.width, self.height))?;
        info!(%seed, width = self.width, height = self.height, "board created");
        Ok((board, seed))
    }
}

fn palette(kinds: u8) -> Vec<char> {
    (b'A'..b'A' + kinds).map(char::from).collect()
}
