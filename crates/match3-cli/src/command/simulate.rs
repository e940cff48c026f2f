use std::{cell::RefCell, path::PathBuf, rc::Rc};

use anyhow::Context as _;
use match3_engine::{
    BoardConfig, BoardEvent, CascadeReport, Grid, MoveOutcome, Position, TileSeed,
};
use rand::{SeedableRng as _, seq::IndexedRandom as _};
use rand_pcg::Pcg32;
use serde::Serialize;
use tracing::info;

use crate::util;

use super::board_arg::BoardArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    board: BoardArg,
    /// Number of moves to play
    #[arg(long, default_value_t = 20)]
    moves: usize,
    /// Seed for choosing among valid moves
    #[arg(long, default_value_t = 0)]
    move_seed: u64,
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SimulationLog {
    seed: TileSeed,
    move_seed: u64,
    width: usize,
    height: usize,
    config: BoardConfig,
    initial_board: Vec<String>,
    moves: Vec<MoveRecord>,
    final_board: Vec<String>,
}

#[derive(Debug, Serialize)]
struct MoveRecord {
    first: Position,
    second: Position,
    report: CascadeReport,
    events: Vec<BoardEvent<char>>,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let (mut board, seed) = arg.board.build()?;

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    board.add_listener(move |e: &BoardEvent<char>| sink.borrow_mut().push(e.clone()));

    let mut rng = Pcg32::seed_from_u64(arg.move_seed);
    let initial_board = render_rows(board.grid());
    let mut moves = Vec::with_capacity(arg.moves);
    for turn in 0..arg.moves {
        let candidates = board.valid_moves();
        let Some(&(first, second)) = candidates.choose(&mut rng) else {
            info!(turn, "no valid moves left");
            break;
        };
        let outcome = board
            .move_tiles(first, second)
            .with_context(|| format!("Failed to resolve move {first} <-> {second}"))?;
        let MoveOutcome::Resolved(report) = outcome else {
            anyhow::bail!("valid move {first} <-> {second} was rejected");
        };
        info!(turn, %first, %second, passes = report.passes(), "move played");
        moves.push(MoveRecord {
            first,
            second,
            report,
            events: std::mem::take(&mut *events.borrow_mut()),
        });
    }

    let log = SimulationLog {
        seed,
        move_seed: arg.move_seed,
        width: board.width(),
        height: board.height(),
        config: *board.config(),
        initial_board,
        final_board: render_rows(board.grid()),
        moves,
    };
    eprintln!("Played {} moves", log.moves.len());
    util::save_json(&log, arg.output.as_deref())
}

fn render_rows(grid: &Grid<char>) -> Vec<String> {
    grid.to_string().lines().map(str::to_owned).collect()
}
