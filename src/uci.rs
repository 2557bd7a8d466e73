//! UCI-style text front-end
//!
//! A line-oriented dialogue in the spirit of the chess UCI protocol,
//! reduced to what a Gomoku engine needs. Moves travel as letter-number
//! text (`h8`), with column letters A..O and 1-based rows.
//!
//! ## Supported Commands
//!
//! - `uci` - Identify the engine and answer `uciok`
//! - `isready` - Answer `readyok`
//! - `ucinewgame` - Reset the board
//! - `position startpos [moves ...]` - Set up a position by move list
//! - `go [movetime <ms>] [nodes <n>] [depth <d>]` - Search and answer
//!   `bestmove <move>`
//! - `stop` - No-op; the search is synchronous
//! - `d` / `display` - Render the board and game state
//! - `perft <depth>` - Count leaf positions via apply/undo
//! - `quit` / `exit` - Leave the command loop
//!
//! Unknown commands and unparsable moves are dropped silently; an
//! unavailable best move is reported as `bestmove none`.

use std::io::{self, BufRead, Write};
use std::str::SplitWhitespace;

use crate::board::{Board, GameResult, Move, Stone};
use crate::search::{Mcts, MctsConfig};

/// Engine state driven by the command loop
pub struct UciEngine {
    board: Board,
    mcts: Mcts,
    running: bool,
}

impl UciEngine {
    pub fn new() -> Self {
        Self::with_config(MctsConfig::default())
    }

    pub fn with_config(config: MctsConfig) -> Self {
        Self {
            board: Board::new(),
            mcts: Mcts::new(config),
            running: false,
        }
    }

    /// Run the command loop, reading from stdin and writing to stdout
    pub fn run(&mut self) {
        self.running = true;
        let stdin = io::stdin();
        let mut stdout = io::stdout();

        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };

            let response = self.process_command(&line);
            if !response.is_empty() {
                writeln!(stdout, "{response}").ok();
                stdout.flush().ok();
            }

            if !self.running {
                break;
            }
        }
    }

    /// Execute one command line and return the response text (possibly empty)
    pub fn process_command(&mut self, input: &str) -> String {
        let mut tokens = input.split_whitespace();
        let Some(cmd) = tokens.next() else {
            return String::new();
        };

        match cmd.to_ascii_lowercase().as_str() {
            "uci" => format!(
                "id name {} {}\nid author {}\nuciok",
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_AUTHORS"),
            ),
            "isready" => "readyok".to_string(),
            "ucinewgame" => {
                self.board.reset();
                String::new()
            }
            "position" => self.cmd_position(&mut tokens),
            "go" => self.cmd_go(&mut tokens),
            "stop" => String::new(),
            "d" | "display" => self.cmd_display(),
            "perft" => self.cmd_perft(&mut tokens),
            "quit" | "exit" => {
                self.running = false;
                String::new()
            }
            _ => String::new(),
        }
    }

    fn cmd_position(&mut self, tokens: &mut SplitWhitespace) -> String {
        let mut token = tokens.next();

        match token {
            Some("startpos") => {
                self.board.reset();
                token = tokens.next();
            }
            Some("fen") => {
                // No position serialization format for Gomoku; reset and
                // skip ahead to the move list.
                self.board.reset();
                token = tokens.next();
                while let Some(t) = token {
                    if t == "moves" {
                        break;
                    }
                    token = tokens.next();
                }
            }
            _ => {}
        }

        if token == Some("moves") {
            for text in tokens {
                if let Ok(mv) = text.parse::<Move>() {
                    if self.board.is_legal(mv) {
                        self.board.apply(mv);
                    }
                }
            }
        }

        String::new()
    }

    fn cmd_go(&mut self, tokens: &mut SplitWhitespace) -> String {
        let mut time_ms: u64 = 1_000;

        while let Some(token) = tokens.next() {
            match token {
                "movetime" => {
                    if let Some(Ok(ms)) = tokens.next().map(str::parse) {
                        time_ms = ms;
                    }
                }
                "depth" => {
                    if let Some(Ok(depth)) = tokens.next().map(str::parse::<u32>) {
                        self.mcts.config_mut().max_iterations = depth.saturating_mul(1_000);
                    }
                }
                "nodes" => {
                    if let Some(Ok(nodes)) = tokens.next().map(str::parse) {
                        self.mcts.config_mut().max_iterations = nodes;
                    }
                }
                _ => {}
            }
        }

        match self.mcts.search_with_limit(&self.board, time_ms) {
            Some(mv) => format!("bestmove {mv}"),
            None => "bestmove none".to_string(),
        }
    }

    fn cmd_display(&self) -> String {
        let mut out = self.board.render();
        out.push_str("\nCurrent player: ");
        out.push_str(match self.board.current_player() {
            Stone::White => "WHITE (O)",
            _ => "BLACK (X)",
        });
        out.push_str(&format!("\nMove count: {}", self.board.move_count()));
        if self.board.is_terminal() {
            out.push_str("\nGame over: ");
            out.push_str(match self.board.result() {
                GameResult::BlackWin => "BLACK wins",
                GameResult::WhiteWin => "WHITE wins",
                GameResult::Draw => "Draw",
                GameResult::Ongoing => "",
            });
        }
        out
    }

    fn cmd_perft(&self, tokens: &mut SplitWhitespace) -> String {
        let depth = tokens
            .next()
            .and_then(|t| t.parse::<u32>().ok())
            .unwrap_or(1);

        let mut board = self.board.clone();
        let nodes = perft(&mut board, depth);
        format!("perft {depth}: {nodes}")
    }
}

impl Default for UciEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Count leaf positions reachable in exactly `depth` plies
fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    if board.is_terminal() {
        return 0;
    }

    let mut nodes = 0;
    for mv in board.legal_moves() {
        board.apply(mv);
        nodes += perft(board, depth - 1);
        board.undo(mv);
    }
    nodes
}
