//! End-to-end scenarios in letter-number notation
//!
//! Positions are driven the way the front-end drives the core: parse move
//! text, apply in order, then query the board or run a search.

use gomoku_mcts::board::{Board, GameResult, Move, Stone};
use gomoku_mcts::eval;
use gomoku_mcts::search::{Mcts, MctsConfig};
use gomoku_mcts::uci::UciEngine;

/// Apply a whitespace-separated move list to a fresh board.
///
/// Moves are applied directly (not legality-gated) so scenarios can start
/// away from the forced center opening.
fn setup(moves: &str) -> Board {
    let mut board = Board::new();
    for text in moves.split_whitespace() {
        let mv: Move = text.parse().unwrap_or_else(|e| panic!("bad move {text:?}: {e}"));
        board.apply(mv);
    }
    board
}

fn fixed_mcts() -> Mcts {
    Mcts::new(MctsConfig {
        max_iterations: 200,
        seed: 42,
        ..MctsConfig::default()
    })
}

#[test]
fn horizontal_win() {
    let board = setup("D8 D9 E8 E9 F8 F9 G8 G9 H8");
    assert!(board.is_terminal());
    assert_eq!(board.winner(), Stone::Black);
    assert_eq!(board.result(), GameResult::BlackWin);
}

#[test]
fn vertical_win() {
    let board = setup("H4 I4 H5 I5 H6 I6 H7 I7 H8");
    assert!(board.is_terminal());
    assert_eq!(board.winner(), Stone::Black);
}

#[test]
fn diagonal_win() {
    let board = setup("D4 D5 E5 E6 F6 F7 G7 G8 H8");
    assert!(board.is_terminal());
    assert_eq!(board.winner(), Stone::Black);
}

#[test]
fn legal_radius_after_center() {
    let board = setup("H8");

    assert!(board.is_legal("F6".parse().unwrap()));
    assert!(board.is_legal("J10".parse().unwrap()));
    assert!(board.is_legal("G7".parse().unwrap()));
    assert!(!board.is_legal("K8".parse().unwrap()));
    assert!(!board.is_legal("E8".parse().unwrap()));

    // The 5x5 window minus the occupied center
    assert_eq!(board.legal_moves().len(), 24);
}

#[test]
fn forced_block_detection() {
    // Black stops one short of five; white to move has no win of its own
    // and must block the open four at either end
    let board = setup("D8 D9 E8 E9 F8 F9 G8");
    assert_eq!(board.current_player(), Stone::White);

    assert_eq!(eval::find_winning_move(&board), None);

    let block = eval::find_blocking_move(&board).expect("open four must be blocked");
    let c8: Move = "C8".parse().unwrap();
    let h8: Move = "H8".parse().unwrap();
    assert!(block == c8 || block == h8);
}

#[test]
fn mcts_mate_in_one() {
    // Black four-in-a-row on row 8; the search must complete it
    let board = setup("F8 F9 G8 G9 H8 H9 I8 I9");
    assert_eq!(board.current_player(), Stone::Black);

    let best = fixed_mcts()
        .search_with_limit(&board, 500)
        .expect("a move must be found");
    let e8: Move = "E8".parse().unwrap();
    let j8: Move = "J8".parse().unwrap();
    assert!(best == e8 || best == j8, "expected E8 or J8, got {best}");
}

#[test]
fn mcts_must_block() {
    // White has four-in-a-row D8..G8 and black has no win of its own;
    // H8 is occupied, so C8 is the only block
    let board = setup("H8 D8 H9 E8 H10 F8 K11 G8");
    assert_eq!(board.current_player(), Stone::Black);
    assert_eq!(eval::find_winning_move(&board), None);

    let best = fixed_mcts()
        .search_with_limit(&board, 500)
        .expect("a move must be found");
    assert_eq!(best, "C8".parse().unwrap());
}

#[test]
fn mcts_takes_own_win_before_blocking() {
    // Both sides threaten five: white on row 8, black on the H8..K11
    // diagonal. The side to move wins outright instead of blocking.
    let mut board = setup("H8 D8 I9 E8 J10 F8 K11 G8");
    assert_eq!(board.current_player(), Stone::Black);

    let best = fixed_mcts()
        .search_with_limit(&board, 500)
        .expect("a move must be found");
    board.apply(best);
    assert!(board.is_terminal());
    assert_eq!(board.winner(), Stone::Black);
}

#[test]
fn search_never_mutates_callers_board() {
    let board = setup("H8 I9 G7");
    let snapshot = board.clone();
    fixed_mcts().search_with_limit(&board, 50);
    assert_eq!(board, snapshot);
}

#[test]
fn uci_dialogue_roundtrip() {
    let mut engine = UciEngine::with_config(MctsConfig {
        max_iterations: 50,
        seed: 42,
        ..MctsConfig::default()
    });

    assert!(engine.process_command("uci").ends_with("uciok"));
    assert_eq!(engine.process_command("isready"), "readyok");

    engine.process_command("position startpos moves h8 i9 g7");
    let response = engine.process_command("go movetime 50");
    assert!(response.starts_with("bestmove "));
    assert_ne!(response, "bestmove none");

    let display = engine.process_command("d");
    assert!(display.contains("Move count: 3"));
}

#[test]
fn uci_perft_counts() {
    let mut engine = UciEngine::new();
    assert_eq!(engine.process_command("perft 1"), "perft 1: 1");
    assert_eq!(engine.process_command("perft 2"), "perft 2: 24");
}

#[test]
fn round_trip_restores_position() {
    let moves = "H8 I9 G7 J10 F6";
    let mut board = setup(moves);

    let history: Vec<Move> = board.history().to_vec();
    for &mv in history.iter().rev() {
        board.undo(mv);
    }
    assert_eq!(board, Board::new());
}
