use std::io;
use std::process::ExitCode;

use bitboard_chess::fen;
use bitboard_chess::game_logic::{GameEngine, GameOutcome, RandomSelector};
use bitboard_chess::render;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Plays random pseudo-legal pawn and knight moves from a position until one side is stuck.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Starting position record
    #[arg(long, default_value = fen::STARTING_FEN)]
    fen: String,

    /// Seed for the move selector; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many half-moves
    #[arg(long, default_value_t = 300)]
    max_plies: usize,

    /// Do not draw the final board
    #[arg(long)]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let position = match fen::parse(&args.fen) {
        Ok(position) => position,
        Err(e) => {
            log::error!("invalid position record '{}': {e}", args.fen);
            return ExitCode::FAILURE;
        }
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("starting from {position} with seed {seed}");

    let selector = RandomSelector::new(StdRng::seed_from_u64(seed));
    let mut engine = GameEngine::from_position(position, selector);
    let outcome = match engine.run(args.max_plies) {
        Ok(outcome) => outcome,
        Err(e) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if !args.quiet
        && let Err(e) = render::render(&mut io::stdout(), engine.position())
    {
        log::error!("failed to draw board: {e}");
        return ExitCode::FAILURE;
    }

    let moves: Vec<String> = engine.history().iter().map(ToString::to_string).collect();
    println!("{}", moves.join(" "));
    match outcome {
        GameOutcome::NoMoves { side, plies } => {
            println!("{side:?} has no moves after {plies} plies")
        }
        GameOutcome::PlyLimit { plies } => println!("stopped after {plies} plies"),
    }
    ExitCode::SUCCESS
}
