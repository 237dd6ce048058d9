//! Random move engine - a UCI engine that plays a random legal move.
//!
//! stdout carries the protocol, so diagnostics go to a log file.

mod handler;
mod search;

use anyhow::Context;
use chess_rules::{perft_divide, Position};
use clap::{Parser, Subcommand};
use handler::UciHandler;
use search::RandomMoveFinder;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;

/// UCI chess engine that plays uniformly random legal moves.
#[derive(Parser)]
#[command(name = "random-engine")]
#[command(about = "UCI chess engine that plays random legal moves")]
struct Args {
    /// Log file, truncated at startup
    #[arg(long, default_value = "engine.log")]
    log_file: PathBuf,

    /// Most verbose level written to the log (error, warn, info, debug, trace)
    #[arg(long, default_value = "debug")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Count leaf nodes per root move and exit
    Perft {
        depth: u32,

        /// Position to count from instead of the start position
        #[arg(long)]
        fen: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_file = File::create(&args.log_file)
        .with_context(|| format!("cannot create log file {:?}", args.log_file))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .with_max_level(args.log_level)
        .init();

    tracing::info!("Starting random-engine");
    tracing::info!("Log level: {}", args.log_level);

    match args.command {
        Some(Command::Perft { depth, fen }) => run_perft(depth, fen.as_deref()),
        None => {
            let mut engine = uci::stdio_engine();
            let mut handler = UciHandler::new(RandomMoveFinder::from_thread_rng());
            handler.run(&mut engine)?;
            Ok(())
        }
    }
}

fn run_perft(depth: u32, fen: Option<&str>) -> anyhow::Result<()> {
    let mut position = match fen {
        Some(fen) => Position::from_fen(fen).with_context(|| format!("invalid FEN {:?}", fen))?,
        None => Position::startpos(),
    };

    let start = Instant::now();
    let divide = perft_divide(&mut position, depth);
    let total: u64 = divide.iter().map(|(_, n)| n).sum();
    let elapsed = start.elapsed();

    for (mv, nodes) in &divide {
        println!("{}: {}", mv, nodes);
    }
    println!();
    println!("Nodes searched: {}", total);
    tracing::info!("perft {} = {} in {:?}", depth, total, elapsed);
    Ok(())
}
