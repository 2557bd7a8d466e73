//! Board state with incremental win detection

use super::bitboard::Bitboard;
use super::{GameResult, Move, Stone, BOARD_SIZE, DIRECTIONS, LEGAL_RADIUS, TOTAL_CELLS};

/// Game board for 15x15 Gomoku.
///
/// The cell array is the source of truth for rendering; the occupancy
/// bitboards mirror it for O(1) population and membership queries. The
/// legal mask holds every empty cell within Chebyshev distance 2 of a
/// played stone; on an empty board it is empty and the center is the only
/// accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Stone; TOTAL_CELLS],
    occupied: Bitboard,
    black: Bitboard,
    white: Bitboard,
    legal: Bitboard,
    current: Stone,
    terminal: bool,
    result: GameResult,
    history: Vec<Move>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Stone::Empty; TOTAL_CELLS],
            occupied: Bitboard::new(),
            black: Bitboard::new(),
            white: Bitboard::new(),
            legal: Bitboard::new(),
            current: Stone::Black,
            terminal: false,
            result: GameResult::Ongoing,
            history: Vec::with_capacity(TOTAL_CELLS),
        }
    }

    /// Re-initialize to the empty-board state
    pub fn reset(&mut self) {
        self.cells = [Stone::Empty; TOTAL_CELLS];
        self.occupied = Bitboard::new();
        self.black = Bitboard::new();
        self.white = Bitboard::new();
        self.legal = Bitboard::new();
        self.current = Stone::Black;
        self.terminal = false;
        self.result = GameResult::Ongoing;
        self.history.clear();
    }

    /// Place the current side's stone at `mv`.
    ///
    /// The target must be in bounds and empty; callers are expected to have
    /// checked `is_legal` first, but applying to a merely non-radius-legal
    /// empty cell is still well-defined and preserves all invariants.
    pub fn apply(&mut self, mv: Move) {
        let idx = mv.to_index();
        debug_assert_eq!(self.cells[idx], Stone::Empty);

        self.cells[idx] = self.current;
        self.occupied.set(mv);
        match self.current {
            Stone::Black => self.black.set(mv),
            Stone::White => self.white.set(mv),
            Stone::Empty => {}
        }

        self.dilate_legal(mv);
        self.legal.clear(mv);

        self.history.push(mv);

        if self.check_win(mv) {
            self.terminal = true;
            self.result = if self.current == Stone::Black {
                GameResult::BlackWin
            } else {
                GameResult::WhiteWin
            };
        } else if self.legal.is_empty() {
            // No cell left to play on
            self.terminal = true;
            self.result = GameResult::Draw;
        }

        // Flip even on a terminal move so "whose turn would be next" stays
        // well-defined.
        self.current = self.current.opponent();
    }

    /// Retract the last move, which must equal `mv`.
    ///
    /// The legal mask cannot be cheaply rewound, so it is rebuilt from the
    /// remaining history. Search copies boards instead of undoing inside the
    /// tree, so this stays off the hot path.
    pub fn undo(&mut self, mv: Move) {
        if self.history.is_empty() {
            return;
        }
        debug_assert_eq!(self.history.last(), Some(&mv));

        self.current = self.current.opponent();

        let idx = mv.to_index();
        self.cells[idx] = Stone::Empty;
        self.occupied.clear(mv);
        self.black.clear(mv);
        self.white.clear(mv);

        self.terminal = false;
        self.result = GameResult::Ongoing;

        self.history.pop();

        self.rebuild_legal();
    }

    /// Add every empty in-bounds cell within the legal radius of `mv`
    fn dilate_legal(&mut self, mv: Move) {
        for dy in -LEGAL_RADIUS..=LEGAL_RADIUS {
            for dx in -LEGAL_RADIUS..=LEGAL_RADIUS {
                let nx = mv.x as i32 + dx;
                let ny = mv.y as i32 + dy;
                if Move::in_bounds(nx, ny) {
                    let n = Move::new(nx as u8, ny as u8);
                    if !self.occupied.get(n) {
                        self.legal.set(n);
                    }
                }
            }
        }
    }

    fn rebuild_legal(&mut self) {
        // Replaying the dilation from an empty history leaves the mask empty,
        // matching the fresh-board state; the center-only first-move rule is
        // enforced by `legal` and `legal_moves` directly.
        self.legal = Bitboard::new();
        for i in 0..self.history.len() {
            let m = self.history[i];
            self.dilate_legal(m);
        }
    }

    /// True iff placing at (x, y) is allowed right now.
    ///
    /// On an empty board only the center qualifies; afterwards the cell must
    /// be empty and inside the legal radius of some played stone.
    pub fn legal(&self, x: i32, y: i32) -> bool {
        if !Move::in_bounds(x, y) {
            return false;
        }
        let mv = Move::new(x as u8, y as u8);
        if self.history.is_empty() {
            return mv == Move::CENTER;
        }
        self.legal.get(mv) && self.cells[mv.to_index()] == Stone::Empty
    }

    #[inline]
    pub fn is_legal(&self, mv: Move) -> bool {
        self.legal(mv.x as i32, mv.y as i32)
    }

    /// Enumerate all legal moves in index order
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.history.is_empty() {
            return vec![Move::CENTER];
        }
        self.legal.iter_ones().collect()
    }

    pub fn count_legal_moves(&self) -> usize {
        if self.history.is_empty() {
            return 1;
        }
        self.legal.count() as usize
    }

    #[inline]
    pub fn get_cell(&self, x: usize, y: usize) -> Stone {
        self.cells[y * BOARD_SIZE + x]
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    #[inline]
    pub fn result(&self) -> GameResult {
        self.result
    }

    /// Winning side, or `Stone::Empty` while ongoing or drawn
    #[inline]
    pub fn winner(&self) -> Stone {
        match self.result {
            GameResult::BlackWin => Stone::Black,
            GameResult::WhiteWin => Stone::White,
            _ => Stone::Empty,
        }
    }

    #[inline]
    pub fn current_player(&self) -> Stone {
        self.current
    }

    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    #[inline]
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Did the just-placed stone complete a run of five?
    ///
    /// Scans the four principal directions from the placed stone, summing
    /// consecutive same-colored stones forward and backward. Examines at
    /// most 32 neighboring cells.
    fn check_win(&self, mv: Move) -> bool {
        let player = self.cells[mv.to_index()];
        let (x, y) = (mv.x as i32, mv.y as i32);

        for &(dx, dy) in &DIRECTIONS {
            let count = 1
                + self.count_direction(x, y, dx, dy, player)
                + self.count_direction(x, y, -dx, -dy, player);
            if count >= 5 {
                return true;
            }
        }
        false
    }

    fn count_direction(&self, x: i32, y: i32, dx: i32, dy: i32, player: Stone) -> i32 {
        let mut count = 0;
        let mut nx = x + dx;
        let mut ny = y + dy;
        while Move::in_bounds(nx, ny) && self.get_cell(nx as usize, ny as usize) == player {
            count += 1;
            nx += dx;
            ny += dy;
        }
        count
    }

    /// Text rendering with column letters A..O and 1-indexed rows
    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str("   ");
        for x in 0..BOARD_SIZE {
            out.push((b'A' + x as u8) as char);
            out.push(' ');
        }
        out.push('\n');

        for y in 0..BOARD_SIZE {
            if y < 9 {
                out.push(' ');
            }
            out.push_str(&(y + 1).to_string());
            out.push(' ');

            for x in 0..BOARD_SIZE {
                out.push(match self.get_cell(x, y) {
                    Stone::Black => 'X',
                    Stone::White => 'O',
                    Stone::Empty => '.',
                });
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
