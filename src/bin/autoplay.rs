use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::info;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tile_merge::{Direction, EngineConfig, Game, GameRng};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Play headless games with uniformly random moves and report the results"
)]
struct Cli {
    /// Base seed; game i uses seed + i (random if omitted)
    #[arg(long, value_name = "N")]
    seed: Option<u64>,

    /// Number of games to play
    #[arg(long, value_name = "N", default_value_t = 1)]
    games: u64,

    /// Stop a game after this many moves even if it is not lost
    #[arg(long, value_name = "N", default_value_t = 10_000)]
    max_moves: u64,

    /// Engine configuration (TOML); defaults apply when omitted
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the final board of every game
    #[arg(long)]
    show_boards: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = match &cli.config {
        Some(path) => EngineConfig::from_toml(path)?,
        None => EngineConfig::default(),
    };
    let base_seed = cli.seed.unwrap_or_else(rand::random);
    info!("Playing {} game(s) from seed {base_seed}", cli.games);

    let mut best = 0;
    for i in 0..cli.games {
        let seed = base_seed.wrapping_add(i);
        let mut game = Game::new(config.clone(), GameRng::new(seed))?;
        // Move choice gets its own stream so spawns replay from the seed alone.
        let mut chooser = ChaCha8Rng::seed_from_u64(seed ^ 0x9E37_79B9_7F4A_7C15);

        while game.moves() < cli.max_moves && !game.outcome().is_lost() {
            let direction = *Direction::ALL
                .choose(&mut chooser)
                .expect("direction table is not empty");
            game.apply_move(direction);
        }

        let board = game.board();
        info!(
            "Game {i} (seed {seed}): {} after {} moves, highest tile {}, tile sum {}",
            game.outcome(),
            game.moves(),
            board.highest_value(),
            board.value_sum()
        );
        if cli.show_boards {
            println!("{board}");
        }
        best = best.max(board.highest_value());
    }

    info!("Completed {} game(s), best tile {best}", cli.games);
    Ok(())
}
