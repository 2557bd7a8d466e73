//! Search for the best move
//!
//! Contains:
//! - Monte-Carlo Tree Search with UCT selection and heuristic-guided
//!   expansion and rollouts
//! - Forced-move shortcuts (immediate wins and blocks) before any tree is
//!   grown

pub mod mcts;

pub use mcts::{Mcts, MctsConfig};
