//! Monte-Carlo Tree Search over the Gomoku board
//!
//! The search grows an in-memory tree by repeated
//! select-expand-simulate-backpropagate iterations under a combined
//! time and iteration budget. Before any tree is grown it consults the
//! heuristic for forced tactical moves, so an immediate win is never
//! missed and an opponent's immediate win is always blocked.
//!
//! Nodes live in a per-search arena (`Vec<Node>`) addressed by indices;
//! parent and child links are indices into the same arena. The whole tree
//! is released when the search returns.
//!
//! # Example
//!
//! ```
//! use gomoku_mcts::board::{Board, Move};
//! use gomoku_mcts::search::{Mcts, MctsConfig};
//!
//! let mut board = Board::new();
//! board.apply(Move::CENTER);
//!
//! let config = MctsConfig {
//!     max_iterations: 50,
//!     max_time_ms: 0, // iteration-bounded only
//!     seed: 42,
//!     ..MctsConfig::default()
//! };
//! let mut mcts = Mcts::new(config);
//! let best = mcts.search(&board);
//! assert!(best.is_some());
//! ```

use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Move, Stone};
use crate::eval;

/// Ply cap for a single rollout
const ROLLOUT_PLY_CAP: u32 = 50;
/// How many untried moves the expansion step scores before picking one
const EXPANSION_SAMPLE: usize = 5;
/// Expansion falls back to a uniform pick at or below this many untried moves
const EXPANSION_SAMPLE_THRESHOLD: usize = 3;
/// Top slice of the sorted move list a heuristic rollout picks from
const ROLLOUT_TOP_MOVES: usize = 3;

/// Search configuration
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Exploration constant `c` in the UCT formula
    pub exploration_constant: f64,
    /// Iteration budget per search
    pub max_iterations: u32,
    /// Default wall-clock budget in milliseconds; 0 disables the time cap
    pub max_time_ms: u64,
    /// RNG seed; 0 derives a seed from the clock
    pub seed: u64,
    /// Enable the heuristic rollout policy
    pub use_heuristic_rollouts: bool,
    /// Enable the uniform random rollout policy
    pub use_random_rollouts: bool,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration_constant: 1.2,
            max_iterations: 10_000,
            max_time_ms: 1_000,
            seed: 0,
            use_heuristic_rollouts: true,
            use_random_rollouts: true,
        }
    }
}

/// Tree node addressed by its index in the per-search arena
struct Node {
    /// Move that produced this node; `None` only for the root
    mv: Option<Move>,
    parent: Option<usize>,
    children: Vec<usize>,
    /// Legal moves captured at creation time and not yet expanded
    untried: Vec<Move>,
    visits: u32,
    value: f64,
    /// Side to move at this node
    to_move: Stone,
}

impl Node {
    fn new(mv: Option<Move>, parent: Option<usize>, to_move: Stone, untried: Vec<Move>) -> Self {
        Self {
            mv,
            parent,
            children: Vec::new(),
            untried,
            visits: 0,
            value: 0.0,
            to_move,
        }
    }

    #[inline]
    fn q(&self) -> f64 {
        if self.visits > 0 {
            self.value / f64::from(self.visits)
        } else {
            0.0
        }
    }

    #[inline]
    fn fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    #[inline]
    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Monte-Carlo Tree Search engine.
///
/// Owns its random number generator; searches on the same instance with a
/// fixed nonzero seed are deterministic when the time cap is disabled. The
/// board passed to `search` is never mutated - every iteration works on a
/// private copy.
pub struct Mcts {
    config: MctsConfig,
    rng: StdRng,
    iterations: u32,
}

impl Mcts {
    pub fn new(config: MctsConfig) -> Self {
        let seed = if config.seed == 0 {
            clock_seed()
        } else {
            config.seed
        };
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            iterations: 0,
        }
    }

    /// Search under the configured default time budget
    pub fn search(&mut self, board: &Board) -> Option<Move> {
        self.search_with_limit(board, self.config.max_time_ms)
    }

    /// Search for the best move under an explicit wall-clock budget.
    ///
    /// A `time_limit_ms` of 0 disables the time cap so the search runs to
    /// the iteration budget alone. Returns `None` only when the position
    /// has no legal moves at all.
    pub fn search_with_limit(&mut self, board: &Board, time_limit_ms: u64) -> Option<Move> {
        // Forced tactical moves short-circuit the tree search entirely
        if let Some(winning) = eval::find_winning_move(board) {
            return Some(winning);
        }
        if let Some(blocking) = eval::find_blocking_move(board) {
            return Some(blocking);
        }

        let root_player = board.current_player();
        let mut arena = vec![Node::new(None, None, root_player, board.legal_moves())];

        if arena[0].untried.len() == 1 {
            return Some(arena[0].untried[0]);
        }

        let start = Instant::now();
        self.iterations = 0;

        while self.iterations < self.config.max_iterations {
            if time_limit_ms > 0 && start.elapsed().as_millis() as u64 >= time_limit_ms {
                break;
            }

            let mut sim = board.clone();

            // Selection
            let mut node = self.select(&arena, &mut sim);

            // Expansion
            if !arena[node].untried.is_empty() && !sim.is_terminal() {
                node = self.expand(&mut arena, node, &mut sim);
            }

            // Simulation
            let value = self.rollout(&sim);

            // Backpropagation
            backpropagate(&mut arena, node, value, root_player);

            self.iterations += 1;
        }

        log::debug!(
            "mcts: {} iterations, {} nodes in {:?}",
            self.iterations,
            arena.len(),
            start.elapsed()
        );

        best_move(&arena)
    }

    /// Iterations spent by the most recent search
    #[inline]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut MctsConfig {
        &mut self.config
    }

    /// Descend from the root along maximal-UCT children while nodes are
    /// fully expanded, applying each move to the simulation board.
    fn select(&self, arena: &[Node], board: &mut Board) -> usize {
        let mut id = 0;
        while !arena[id].is_leaf() && arena[id].fully_expanded() {
            let mut best = None;
            let mut best_uct = f64::NEG_INFINITY;

            for &child in &arena[id].children {
                let uct = self.uct(&arena[child], arena[id].visits);
                if uct > best_uct {
                    best_uct = uct;
                    best = Some(child);
                }
            }

            let Some(child) = best else { break };
            if let Some(mv) = arena[child].mv {
                board.apply(mv);
            }
            id = child;
        }
        id
    }

    /// Expand one untried move of `id` into a new child.
    ///
    /// With more than a handful of untried moves, a shuffled sample is
    /// scored by the heuristic and the best candidate taken; otherwise the
    /// pick is uniform.
    fn expand(&mut self, arena: &mut Vec<Node>, id: usize, board: &mut Board) -> usize {
        if arena[id].untried.is_empty() {
            return id;
        }

        let mv = if arena[id].untried.len() > EXPANSION_SAMPLE_THRESHOLD {
            arena[id].untried.shuffle(&mut self.rng);
            let sample = EXPANSION_SAMPLE.min(arena[id].untried.len());

            let mut best_idx = 0;
            let mut best_score = i32::MIN;
            for i in 0..sample {
                let scored = eval::score_move(board, arena[id].untried[i]);
                if scored.score > best_score {
                    best_score = scored.score;
                    best_idx = i;
                }
            }
            arena[id].untried.remove(best_idx)
        } else {
            let idx = self.rng.gen_range(0..arena[id].untried.len());
            arena[id].untried.remove(idx)
        };

        board.apply(mv);

        let child = Node::new(Some(mv), Some(id), board.current_player(), board.legal_moves());
        arena.push(child);
        let child_id = arena.len() - 1;
        arena[id].children.push(child_id);
        child_id
    }

    /// Estimate the value of the simulation board for its side to move.
    ///
    /// An already-terminal board scores 0 on a draw and -1 whenever a
    /// winner exists: the winning move flipped the side, so the player to
    /// move here never matches the winner. Otherwise the enabled rollout
    /// policies each run on their own copy and the results are averaged.
    fn rollout(&mut self, board: &Board) -> f64 {
        if board.is_terminal() {
            let winner = board.winner();
            if winner == Stone::Empty {
                return 0.0;
            }
            return if winner == board.current_player() {
                1.0
            } else {
                -1.0
            };
        }

        let mut total = 0.0;
        let mut count = 0;

        if self.config.use_heuristic_rollouts {
            total += self.heuristic_rollout(board.clone());
            count += 1;
        }
        if self.config.use_random_rollouts {
            total += self.random_rollout(board.clone());
            count += 1;
        }

        if count > 0 {
            total / f64::from(count)
        } else {
            0.0
        }
    }

    /// Play out up to the ply cap picking uniformly among the top scored
    /// moves each turn. Returns +1/-1 for a win/loss of the side to move at
    /// the start, 0 on a draw or truncation.
    fn heuristic_rollout(&mut self, mut board: Board) -> f64 {
        let start_player = board.current_player();
        let mut plies = ROLLOUT_PLY_CAP;

        while !board.is_terminal() && plies > 0 {
            plies -= 1;
            let scored = eval::scored_moves(&board);
            if scored.is_empty() {
                break;
            }
            let top = ROLLOUT_TOP_MOVES.min(scored.len());
            let pick = self.rng.gen_range(0..top);
            board.apply(scored[pick].mv);
        }

        match board.winner() {
            Stone::Empty => 0.0,
            winner if winner == start_player => 1.0,
            _ => -1.0,
        }
    }

    /// Same playout structure with uniform random move selection
    fn random_rollout(&mut self, mut board: Board) -> f64 {
        let start_player = board.current_player();
        let mut plies = ROLLOUT_PLY_CAP;

        while !board.is_terminal() && plies > 0 {
            plies -= 1;
            let moves = board.legal_moves();
            if moves.is_empty() {
                break;
            }
            let pick = self.rng.gen_range(0..moves.len());
            board.apply(moves[pick]);
        }

        match board.winner() {
            Stone::Empty => 0.0,
            winner if winner == start_player => 1.0,
            _ => -1.0,
        }
    }

    /// UCT value of a child from its parent's point of view.
    ///
    /// The mean value is negated because each node accumulates value from
    /// the perspective of its own side to move, which is the opposite of
    /// the parent's. Unvisited children rank infinitely high.
    fn uct(&self, child: &Node, parent_visits: u32) -> f64 {
        if child.visits == 0 {
            return f64::INFINITY;
        }
        let exploration = self.config.exploration_constant
            * (f64::from(parent_visits).ln() / f64::from(child.visits)).sqrt();
        -child.q() + exploration
    }
}

impl Default for Mcts {
    fn default() -> Self {
        Self::new(MctsConfig::default())
    }
}

/// Walk parent links from the new node to the root, counting the visit and
/// accumulating the rollout value signed by each node's side to move.
fn backpropagate(arena: &mut [Node], leaf: usize, value: f64, root_player: Stone) {
    let mut current = Some(leaf);
    while let Some(id) = current {
        let node = &mut arena[id];
        node.visits += 1;
        node.value += if node.to_move == root_player {
            value
        } else {
            -value
        };
        current = node.parent;
    }
}

/// Most-visited root child, first-encountered on ties. An unexpanded root
/// falls back to its first untried move.
fn best_move(arena: &[Node]) -> Option<Move> {
    let root = &arena[0];
    if root.children.is_empty() {
        return root.untried.first().copied();
    }

    let mut best = None;
    let mut best_visits: i64 = -1;
    for &child in &root.children {
        let visits = i64::from(arena[child].visits);
        if visits > best_visits {
            best_visits = visits;
            best = arena[child].mv;
        }
    }
    best
}

fn clock_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}
