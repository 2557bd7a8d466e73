//! Gomoku MCTS engine binary
//!
//! Starts the UCI-style command loop by default; `--demo` plays the engine
//! against itself with a configurable think time.

mod demo;

use clap::Parser;

use gomoku_mcts::uci::UciEngine;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Play a self-play demo game instead of starting the UCI loop
    #[clap(long)]
    demo: bool,

    /// Think time per move in milliseconds (demo mode)
    #[clap(long, default_value_t = 1000)]
    movetime: u64,
}

fn main() -> std::io::Result<()> {
    env_logger::init();

    let args = Args::parse();
    if args.demo {
        demo::run(args.movetime)?;
    } else {
        UciEngine::new().run();
    }
    Ok(())
}
