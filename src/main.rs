//! Cylinder checkers: checkers on a board whose columns wrap around.
//!
//! ## Usage
//!
//! - `cylinder-checkers` - Show a demo
//! - `cylinder-checkers play` - Play on the console (human vs engine by default)
//! - `cylinder-checkers selfplay` - Let the engine play itself and report results

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use cylinder_checkers::console::{Console, Mode};
use cylinder_checkers::constants::MAX_GAME_PLIES;
use cylinder_checkers::game::Game;
use cylinder_checkers::selfplay::run_series;

/// Cylinder checkers: rules engine and one-ply heuristic opponent
#[derive(Parser)]
#[command(name = "cylinder-checkers")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// More log output (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game on the console
    Play {
        #[arg(long, value_enum, default_value_t = PlayMode::HumanVsAi)]
        mode: PlayMode,
        /// Seed for the engine's tie-breaks
        #[arg(long)]
        seed: Option<u64>,
        /// Pause before each engine move, in milliseconds
        #[arg(long, default_value_t = 0)]
        ai_delay_ms: u64,
    },
    /// Let the engine play against itself
    Selfplay {
        #[arg(long, default_value_t = 10)]
        games: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = MAX_GAME_PLIES)]
        max_plies: u32,
    },
    /// Run a short demo
    Demo,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PlayMode {
    Human,
    HumanVsAi,
    AiVsAi,
}

impl From<PlayMode> for Mode {
    fn from(mode: PlayMode) -> Self {
        match mode {
            PlayMode::Human => Mode::HumanVsHuman,
            PlayMode::HumanVsAi => Mode::HumanVsAi,
            PlayMode::AiVsAi => Mode::AiVsAi,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args()))
    .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Play {
            mode,
            seed,
            ai_delay_ms,
        }) => {
            let game = match seed {
                Some(seed) => Game::with_seed(seed),
                None => Game::new(),
            };
            let mut console =
                Console::new(game, mode.into()).with_ai_delay(Duration::from_millis(ai_delay_ms));
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            console
                .run(stdin.lock(), &mut stdout)
                .context("console I/O failed")?;
        }
        Some(Commands::Selfplay {
            games,
            seed,
            max_plies,
        }) => {
            info!("self-play: {games} games, seed {seed}, cap {max_plies} plies");
            let summary = run_series(games, seed, max_plies)
                .context("engine proposed an illegal move")?;
            println!("games:       {}", summary.games);
            println!("white wins:  {}", summary.white_wins);
            println!("black wins:  {}", summary.black_wins);
            println!("unfinished:  {}", summary.unfinished);
            println!("avg plies:   {:.1}", summary.average_plies());
        }
        Some(Commands::Demo) | None => run_demo()?,
    }
    Ok(())
}

fn run_demo() -> Result<()> {
    println!("Cylinder checkers: columns wrap, rows do not\n");

    let mut game = Game::with_seed(0);
    println!("{}", game.board());

    let side = game.current_side();
    match game.play_ai_turn()? {
        Some(mv) => println!("{side} (AI) plays {mv}\n"),
        None => println!("{side} has no legal move\n"),
    }
    println!("{}", game.board());
    println!("{}", game.check_game_status());
    Ok(())
}
