//! Analysis-based strength estimation.
//!
//! This is not real Elo: it is a pure function of one game's quality
//! metrics, with no opponent context and no result term.

use serde::{Deserialize, Serialize};

/// Floor returned when a player has no qualifying moves.
pub const RATING_FLOOR: i32 = 400;

/// Rating span mapped by the logistic curve above the floor.
const RATING_SPAN: f64 = 2600.0;

/// Number of qualifying moves at which confidence saturates.
const FULL_CONFIDENCE_MOVES: f64 = 40.0;

/// An Elo-like strength estimate with confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingEstimate {
    pub elo: i32,
    /// In `[0, 1]`, driven by sample size.
    pub confidence: f64,
}

/// Estimates a player's strength from one game's aggregate statistics.
///
/// ACPL dominates (exponential decay), accuracy supports linearly, and
/// blunders/mistakes apply a non-linear penalty. The blended performance
/// index in `[0, 1]` maps through a logistic curve onto 400-3000.
///
/// With `total_moves == 0` the estimate is undefined and the floor is
/// returned with zero confidence.
pub fn estimate_rating(
    acpl: f64,
    accuracy: f64,
    blunders: u32,
    mistakes: u32,
    total_moves: usize,
) -> RatingEstimate {
    if total_moves == 0 {
        return RatingEstimate {
            elo: RATING_FLOOR,
            confidence: 0.0,
        };
    }

    let acpl_score = (-acpl / 45.0).exp();
    let accuracy_score = accuracy / 100.0;
    let error_penalty =
        (-(2.0 * f64::from(blunders) + 0.8 * f64::from(mistakes)) / total_moves as f64).exp();

    let performance_index = 0.55 * acpl_score + 0.30 * accuracy_score + 0.15 * error_penalty;

    let sigmoid = 1.0 / (1.0 + (-6.0 * (performance_index - 0.5)).exp());
    let elo = (f64::from(RATING_FLOOR) + RATING_SPAN * sigmoid).round() as i32;

    let confidence = ((total_moves as f64 / FULL_CONFIDENCE_MOVES).min(1.0) * 100.0).round() / 100.0;

    RatingEstimate { elo, confidence }
}
