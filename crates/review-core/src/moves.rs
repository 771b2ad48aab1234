//! Per-move analysis records.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::quality::MoveQuality;

/// Result of analyzing a single move.
///
/// Evaluations are in pawns from White's perspective. Book moves carry no
/// engine evaluation until a running value exists, so `eval_before` and
/// `eval_after` are optional; `eval_loss` is always defined (0 for book
/// moves). Constructed once by the pipeline and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedMove {
    /// Full-move number (1, 2, 3, ...); shared by a White/Black pair.
    pub move_number: u32,
    /// Side that played the move.
    pub color: Color,
    /// The move in engine (UCI) notation, e.g. "e2e4".
    pub uci: String,
    /// The move in human (SAN) notation, e.g. "e4".
    pub san: String,
    /// Evaluation before the move, if known.
    pub eval_before: Option<f64>,
    /// Evaluation after the move, if known.
    pub eval_after: Option<f64>,
    /// Evaluation lost by the mover, always non-negative.
    pub eval_loss: f64,
    /// Quality classification.
    pub quality: MoveQuality,
    /// Whether the move gives check.
    pub is_check: bool,
    /// Whether the move delivers checkmate.
    pub is_checkmate: bool,
    /// Whether the move captures material.
    pub is_capture: bool,
    /// Remaining clock time in seconds, when the record carries it.
    pub clock: Option<f64>,
    /// Engine-preferred move in UCI notation, when a principal line was
    /// available at evaluation time.
    pub best_move_uci: Option<String>,
    /// Engine-preferred move in SAN notation.
    pub best_move_san: Option<String>,
}

impl EvaluatedMove {
    /// True when the record carries a numeric evaluation on both sides of
    /// the move.
    pub fn has_evaluation(&self) -> bool {
        self.eval_before.is_some() && self.eval_after.is_some()
    }
}
