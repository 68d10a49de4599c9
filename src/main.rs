use clap::Parser;
use twenty_fourty_eight_console::{game::Game, tui};

/// Sliding-tile merge puzzle for the terminal.
#[derive(Parser)]
struct Args {
    /// Number of grid rows.
    #[arg(long, default_value_t = 4)]
    rows: usize,

    /// Number of grid columns.
    #[arg(long, default_value_t = 4)]
    cols: usize,

    /// Seed the tile spawner for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Render the plain uncolored grid.
    #[arg(long)]
    plain: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let game = match args.seed {
        Some(seed) => Game::seeded(args.rows, args.cols, seed)?,
        None => Game::new(args.rows, args.cols)?,
    };

    tui::run(game, args.plain)?;

    Ok(())
}
