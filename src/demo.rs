//! Interactive self-play demo
//!
//! Plays the engine against itself until the game ends, redrawing the
//! board after every move and appending the game to a log file in the
//! working directory.

use std::fs::File;
use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use gomoku_mcts::board::{Board, GameResult, Stone};
use gomoku_mcts::search::{Mcts, MctsConfig};

/// Pause between moves so the game stays watchable
const MOVE_PAUSE: Duration = Duration::from_millis(500);

pub fn run(movetime_ms: u64) -> io::Result<()> {
    let mut board = Board::new();
    let mut mcts = Mcts::new(MctsConfig {
        max_time_ms: movetime_ms,
        max_iterations: 100_000,
        ..MctsConfig::default()
    });

    let filename = format!("game_{}.txt", unix_timestamp());
    let mut log_file = File::create(&filename)?;

    println!("=== Gomoku Demo Game ===");
    println!("Search time: {movetime_ms}ms per move");
    println!("Game log: {filename}");
    println!("Press Ctrl+C to stop");
    println!();

    writeln!(log_file, "========================================")?;
    writeln!(log_file, "         GOMOKU GAME LOG")?;
    writeln!(log_file, "========================================")?;
    writeln!(log_file, "Search time: {movetime_ms}ms per move")?;
    writeln!(log_file, "----------------------------------------")?;
    writeln!(log_file)?;

    let mut move_num = 0;
    let mut move_list: Vec<String> = Vec::new();

    while !board.is_terminal() {
        move_num += 1;

        let start = Instant::now();
        let Some(best) = mcts.search(&board) else {
            break;
        };
        let elapsed = start.elapsed();

        let player_name = player_name(board.current_player());
        let move_text = best.to_string();
        move_list.push(move_text.clone());

        board.apply(best);

        clear_screen();
        println!("=== Gomoku Demo Game ===");
        println!();
        print!("{}", board.render());
        println!();
        println!(
            "Move {move_num}: {player_name} plays {move_text} ({}ms, {} iterations)",
            elapsed.as_millis(),
            mcts.iterations()
        );
        println!();
        println!("Moves: {}", numbered_moves(&move_list));

        log::info!(
            "move {move_num}: {player_name} -> {move_text} ({}ms, {} iterations)",
            elapsed.as_millis(),
            mcts.iterations()
        );
        writeln!(
            log_file,
            "Move {move_num:>3}: {player_name:>10} -> {move_text} ({}ms)",
            elapsed.as_millis()
        )?;

        thread::sleep(MOVE_PAUSE);
    }

    let result_text = match board.result() {
        GameResult::BlackWin => "BLACK (X) WINS!",
        GameResult::WhiteWin => "WHITE (O) WINS!",
        GameResult::Draw => "DRAW!",
        GameResult::Ongoing => "Unfinished",
    };

    println!();
    println!("========================================");
    println!("GAME OVER: {result_text}");
    println!("Total moves: {move_num}");
    println!("========================================");

    writeln!(log_file)?;
    writeln!(log_file, "----------------------------------------")?;
    writeln!(log_file, "RESULT: {result_text}")?;
    writeln!(log_file, "Total moves: {move_num}")?;
    writeln!(log_file, "----------------------------------------")?;
    writeln!(log_file)?;
    writeln!(log_file, "Final position:")?;
    write!(log_file, "{}", board.render())?;
    writeln!(log_file)?;
    writeln!(log_file, "Move list: {}", numbered_moves(&move_list))?;

    println!();
    println!("Game saved to: {filename}");
    Ok(())
}

fn player_name(player: Stone) -> &'static str {
    match player {
        Stone::White => "WHITE (O)",
        _ => "BLACK (X)",
    }
}

/// Format moves as "1.h8 i9 2.g7 ..." with a number before each black move
fn numbered_moves(moves: &[String]) -> String {
    let mut out = String::new();
    for (i, mv) in moves.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        if i % 2 == 0 {
            out.push_str(&format!("{}.", i / 2 + 1));
        }
        out.push_str(mv);
    }
    out
}

fn clear_screen() {
    // ANSI: clear screen and move the cursor home
    print!("\x1b[2J\x1b[H");
}

fn unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
