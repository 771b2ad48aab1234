//! Opening-name detection by position.

use serde::{Deserialize, Serialize};

use crate::book::normalize_fen;

/// A named opening with its ECO code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opening {
    /// The ECO code, e.g. "B20", "C60".
    pub eco: String,
    /// The opening's name.
    pub name: String,
}

impl Opening {
    /// Creates a new opening with the given ECO code and name.
    #[must_use]
    pub fn new(eco: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            eco: eco.into(),
            name: name.into(),
        }
    }
}

/// Name table keyed by normalized FEN. Extend over time.
const OPENINGS: &[(&str, &str, &str)] = &[
    // --- King's pawn ---
    (
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq",
        "B00",
        "King's Pawn Opening",
    ),
    (
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq",
        "C20",
        "King's Pawn Game",
    ),
    (
        "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq",
        "B20",
        "Sicilian Defense",
    ),
    (
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq",
        "C40",
        "King's Knight Opening",
    ),
    // --- Queen's pawn ---
    (
        "rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b KQkq",
        "D00",
        "Queen's Pawn Opening",
    ),
    (
        "rnbqkbnr/pppppppp/8/8/3P4/5N2/PPP1PPPP/RNBQKB1R b KQkq",
        "D02",
        "Queen's Pawn Game",
    ),
    // --- Ruy Lopez ---
    (
        "r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R b KQkq",
        "C60",
        "Ruy Lopez",
    ),
    (
        "r1bqkbnr/1ppp1ppp/p1n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R w KQkq",
        "C60",
        "Ruy Lopez, Morphy Defense",
    ),
];

/// Returns the opening this position belongs to, if it is in the table.
pub fn detect_opening(fen: &str) -> Option<Opening> {
    let key = normalize_fen(fen);
    OPENINGS
        .iter()
        .find(|(position, _, _)| *position == key)
        .map(|(_, eco, name)| Opening::new(*eco, *name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_sicilian() {
        let opening =
            detect_opening("rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2")
                .expect("known position");
        assert_eq!(opening.eco, "B20");
        assert_eq!(opening.name, "Sicilian Defense");
    }

    #[test]
    fn detects_ruy_lopez_regardless_of_counters() {
        let opening = detect_opening(
            "r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3",
        )
        .expect("known position");
        assert_eq!(opening.eco, "C60");
        assert_eq!(opening.name, "Ruy Lopez");
    }

    #[test]
    fn unknown_position_has_no_name() {
        assert!(detect_opening("8/8/8/4k3/8/4K3/8/8 w - - 0 50").is_none());
    }

    #[test]
    fn serializes_to_response_shape() {
        let opening = Opening::new("C60", "Ruy Lopez");
        let json = serde_json::to_string(&opening).unwrap();
        assert_eq!(json, "{\"eco\":\"C60\",\"name\":\"Ruy Lopez\"}");
    }
}
