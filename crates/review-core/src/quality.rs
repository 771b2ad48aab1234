//! Move quality classification.

use serde::{Deserialize, Serialize};

/// Classification of a single move.
///
/// `Book` and `Brilliant` are overrides assigned outside the loss scale:
/// `Book` short-circuits classification entirely, and `Brilliant` is only
/// reachable as an upgrade from `Best`. The remaining five tags form a
/// total order driven purely by evaluation loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MoveQuality {
    /// Known opening theory, skipped by the evaluation pipeline.
    Book,
    /// A best move that also passed every brilliancy gate.
    Brilliant,
    /// The engine-best move (or indistinguishable from it).
    Best,
    /// Small evaluation loss.
    Good,
    /// Noticeable evaluation loss.
    Inaccuracy,
    /// Significant evaluation loss.
    Mistake,
    /// Major evaluation loss.
    Blunder,
}

impl MoveQuality {
    /// Classifies a move from its evaluation loss in pawns.
    ///
    /// Boundary values land on the lower-severity side: a loss of exactly
    /// 0.5 is still `Good`, exactly 3.0 still `Mistake`.
    pub fn from_eval_loss(eval_loss: f64) -> Self {
        if eval_loss <= 0.1 {
            MoveQuality::Best
        } else if eval_loss <= 0.5 {
            MoveQuality::Good
        } else if eval_loss <= 1.5 {
            MoveQuality::Inaccuracy
        } else if eval_loss <= 3.0 {
            MoveQuality::Mistake
        } else {
            MoveQuality::Blunder
        }
    }

    /// Weight used by the accuracy metric.
    ///
    /// Book moves are excluded from accuracy before weighting; the zero here
    /// is never summed.
    pub fn accuracy_weight(self) -> f64 {
        match self {
            MoveQuality::Book => 0.0,
            MoveQuality::Brilliant => 1.0,
            MoveQuality::Best => 1.0,
            MoveQuality::Good => 0.9,
            MoveQuality::Inaccuracy => 0.7,
            MoveQuality::Mistake => 0.4,
            MoveQuality::Blunder => 0.0,
        }
    }

    /// Severity rank on the loss scale: 0 for `Best` through 4 for
    /// `Blunder`. `Book` and `Brilliant` rank as 0.
    pub fn severity(self) -> u8 {
        match self {
            MoveQuality::Book | MoveQuality::Brilliant | MoveQuality::Best => 0,
            MoveQuality::Good => 1,
            MoveQuality::Inaccuracy => 2,
            MoveQuality::Mistake => 3,
            MoveQuality::Blunder => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn boundaries_classify_to_lower_severity() {
        assert_eq!(MoveQuality::from_eval_loss(0.0), MoveQuality::Best);
        assert_eq!(MoveQuality::from_eval_loss(0.1), MoveQuality::Best);
        assert_eq!(MoveQuality::from_eval_loss(0.5), MoveQuality::Good);
        assert_eq!(MoveQuality::from_eval_loss(1.5), MoveQuality::Inaccuracy);
        assert_eq!(MoveQuality::from_eval_loss(3.0), MoveQuality::Mistake);
        assert_eq!(MoveQuality::from_eval_loss(3.01), MoveQuality::Blunder);
    }

    #[test]
    fn interior_values() {
        assert_eq!(MoveQuality::from_eval_loss(0.2), MoveQuality::Good);
        assert_eq!(MoveQuality::from_eval_loss(1.0), MoveQuality::Inaccuracy);
        assert_eq!(MoveQuality::from_eval_loss(2.0), MoveQuality::Mistake);
        assert_eq!(MoveQuality::from_eval_loss(6.0), MoveQuality::Blunder);
    }

    #[test]
    fn serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&MoveQuality::Brilliant).unwrap(),
            "\"BRILLIANT\""
        );
        assert_eq!(
            serde_json::to_string(&MoveQuality::Inaccuracy).unwrap(),
            "\"INACCURACY\""
        );
        let back: MoveQuality = serde_json::from_str("\"BOOK\"").unwrap();
        assert_eq!(back, MoveQuality::Book);
    }

    proptest! {
        #[test]
        fn classification_is_monotonic(a in 0.0f64..20.0, b in 0.0f64..20.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(
                MoveQuality::from_eval_loss(lo).severity()
                    <= MoveQuality::from_eval_loss(hi).severity()
            );
        }

        #[test]
        fn classification_is_deterministic(loss in 0.0f64..20.0) {
            prop_assert_eq!(
                MoveQuality::from_eval_loss(loss),
                MoveQuality::from_eval_loss(loss)
            );
        }
    }
}
