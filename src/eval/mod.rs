//! Move evaluation for Gomoku
//!
//! Contains:
//! - Pattern score constants (fives, fours, threes, twos)
//! - Local line-pattern evaluation of candidate moves
//! - Forced-move queries (immediate wins and forced blocks)

pub mod heuristic;
pub mod patterns;

// Re-exports for convenient access
pub use heuristic::{
    evaluate_move, find_blocking_move, find_winning_move, score_move, scored_moves, ScoredMove,
};
pub use patterns::PatternScore;
