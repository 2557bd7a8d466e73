//! Pattern scores for move evaluation

/// Scoring weights for line patterns around a candidate move
pub struct PatternScore;

impl PatternScore {
    /// Completes five in a row - immediate win
    pub const WIN: i32 = 1_000_000;

    /// Open four: _OOOO_ (two winning continuations)
    pub const OPEN_FOUR: i32 = 100_000;
    /// Closed four: XOOOO_ (one winning continuation)
    pub const CLOSED_FOUR: i32 = 10_000;

    /// Open three: _OOO_ or a gapped three with an open end
    pub const OPEN_THREE: i32 = 5_000;
    /// Closed three: XOOO_
    pub const CLOSED_THREE: i32 = 500;

    /// Open two: _OO_
    pub const OPEN_TWO: i32 = 200;
    /// Closed two: XOO_
    pub const CLOSED_TWO: i32 = 20;

    /// Per empty cell within the Chebyshev-2 neighborhood
    pub const SPACE: i32 = 10;
    /// Per neighboring stone, weighted by (3 - chebyshev distance)
    pub const CLUSTER: i32 = 10;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_score_hierarchy() {
        assert!(PatternScore::WIN > PatternScore::OPEN_FOUR);
        assert!(PatternScore::OPEN_FOUR > PatternScore::CLOSED_FOUR);
        assert!(PatternScore::CLOSED_FOUR > PatternScore::OPEN_THREE);
        assert!(PatternScore::OPEN_THREE > PatternScore::CLOSED_THREE);
        assert!(PatternScore::CLOSED_THREE > PatternScore::OPEN_TWO);
        assert!(PatternScore::OPEN_TWO > PatternScore::CLOSED_TWO);
        assert!(PatternScore::CLOSED_TWO > PatternScore::SPACE);
    }
}
