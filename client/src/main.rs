mod config;
mod terminal;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use common::games::SessionRng;
use common::games::tictactoe::{Difficulty, TicTacToeGameState};
use common::log;
use common::logger;

use config::{ClientConfig, get_config_manager};
use terminal::TerminalGame;

#[derive(Parser)]
#[command(name = "tictactoe_client")]
struct Args {
    /// Computer difficulty: easy, medium or hard
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Two humans share the keyboard; `--two-player false` brings the computer back
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    two_player: Option<bool>,

    /// Seed for the easy and medium computer levels
    #[arg(long)]
    seed: Option<u64>,

    /// Config file to use instead of the one next to the executable
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective settings back to the config file
    #[arg(long)]
    save_config: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

fn effective_config(args: &Args, stored: ClientConfig) -> ClientConfig {
    ClientConfig {
        difficulty: args.difficulty.unwrap_or(stored.difficulty),
        two_player: args.two_player.unwrap_or(stored.two_player),
        ..stored
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager = get_config_manager(args.config.as_deref());
    let config = effective_config(&args, config_manager.get_config()?);

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix, config.log_level);

    if args.save_config {
        config_manager.set_config(&config)?;
        log!("Saved settings");
    }

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!(
        "Starting game: difficulty {}, two player {}, seed {}",
        config.difficulty,
        config.two_player,
        rng.seed()
    );

    let state = TicTacToeGameState::new(config.game_settings());
    let stdin = io::stdin();
    let mut game = TerminalGame::new(stdin.lock(), io::stdout(), state, rng);
    game.run()?;

    Ok(())
}
