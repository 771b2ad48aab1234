//! Search score types.

/// Sentinel magnitude for mate scores, in centipawns.
///
/// A mate in N resolves to `MATE_SCORE - N`, a mated-in-N to
/// `-MATE_SCORE - N`, keeping downstream loss/delta arithmetic finite and
/// ordered (closer mates score higher).
pub const MATE_SCORE: i32 = 10_000;

/// A position score as reported by the engine, from the perspective of the
/// side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    /// Centipawn evaluation.
    Cp(i32),
    /// Mate in N moves; negative means the side to move gets mated.
    Mate(i32),
}

impl Score {
    /// Resolves the score to finite centipawns using the mate sentinel.
    pub fn to_centipawns(self) -> i32 {
        match self {
            Score::Cp(cp) => cp,
            Score::Mate(n) if n > 0 => MATE_SCORE - n,
            Score::Mate(n) => -MATE_SCORE - n,
        }
    }

    /// Negates the score, converting between the two players' perspectives.
    pub fn flip(self) -> Self {
        match self {
            Score::Cp(cp) => Score::Cp(-cp),
            Score::Mate(n) => Score::Mate(-n),
        }
    }

    /// True for mate scores.
    pub fn is_mate(self) -> bool {
        matches!(self, Score::Mate(_))
    }
}
