use super::board_arg::BoardArg;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ShowArg {
    #[clap(flatten)]
    board: BoardArg,
}

pub(crate) fn run(arg: &ShowArg) -> anyhow::Result<()> {
    let (board, seed) = arg.board.build()?;

    println!("seed: {seed}");
    print!("{}", board.grid());
    println!("matches: {}", board.matches().len());
    println!("valid moves: {}", board.valid_moves().len());
    Ok(())
}
