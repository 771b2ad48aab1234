//! Key moment detection: blunders, turning points, missed wins.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::moves::EvaluatedMove;
use crate::quality::MoveQuality;

/// Evaluation swing (pawns) that marks a turning point.
const TURNING_POINT_SWING: f64 = 2.0;
/// A position at or beyond this advantage counts as winning.
const WINNING_THRESHOLD: f64 = 3.0;
/// Dropping below this advantage counts as having let the win slip.
const SLIPPED_THRESHOLD: f64 = 2.0;

/// Why a move was flagged as a key moment. Exactly one reason per move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MomentReason {
    #[serde(rename = "Blunder")]
    Blunder,
    #[serde(rename = "Turning point")]
    TurningPoint,
    #[serde(rename = "Missed win")]
    MissedWin,
}

impl std::fmt::Display for MomentReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MomentReason::Blunder => write!(f, "Blunder"),
            MomentReason::TurningPoint => write!(f, "Turning point"),
            MomentReason::MissedWin => write!(f, "Missed win"),
        }
    }
}

/// A critical moment in the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMoment {
    pub move_number: u32,
    pub color: Color,
    pub uci: String,
    pub san: String,
    pub reason: MomentReason,
    pub eval_before: f64,
    pub eval_after: f64,
}

/// Scans classified moves in game order and returns at most `max_items`
/// key moments, chronologically. The first matching rule wins per move;
/// book moves and moves without engine evaluations are skipped.
pub fn find_key_moments(moves: &[EvaluatedMove], max_items: usize) -> Vec<KeyMoment> {
    detect(moves).into_iter().take(max_items).collect()
}

fn detect(moves: &[EvaluatedMove]) -> Vec<KeyMoment> {
    let mut moments = Vec::new();

    for mv in moves {
        if mv.quality == MoveQuality::Book {
            continue;
        }
        let (eval_before, eval_after) = match (mv.eval_before, mv.eval_after) {
            (Some(before), Some(after)) => (before, after),
            _ => continue,
        };

        let reason = if mv.quality == MoveQuality::Blunder {
            MomentReason::Blunder
        } else if (eval_after - eval_before).abs() >= TURNING_POINT_SWING {
            MomentReason::TurningPoint
        } else if missed_win(mv.color, eval_before, eval_after) {
            MomentReason::MissedWin
        } else {
            continue;
        };

        moments.push(KeyMoment {
            move_number: mv.move_number,
            color: mv.color,
            uci: mv.uci.clone(),
            san: mv.san.clone(),
            reason,
            eval_before,
            eval_after,
        });
    }

    moments
}

fn missed_win(color: Color, eval_before: f64, eval_after: f64) -> bool {
    match color {
        Color::White => eval_before >= WINNING_THRESHOLD && eval_after < SLIPPED_THRESHOLD,
        Color::Black => eval_before <= -WINNING_THRESHOLD && eval_after > -SLIPPED_THRESHOLD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(
        move_number: u32,
        color: Color,
        quality: MoveQuality,
        eval_before: Option<f64>,
        eval_after: Option<f64>,
    ) -> EvaluatedMove {
        EvaluatedMove {
            move_number,
            color,
            uci: "e2e4".to_string(),
            san: "e4".to_string(),
            eval_before,
            eval_after,
            eval_loss: 0.0,
            quality,
            is_check: false,
            is_checkmate: false,
            is_capture: false,
            clock: None,
            best_move_uci: None,
            best_move_san: None,
        }
    }

    #[test]
    fn skips_book_and_unevaluated_moves() {
        let moves = vec![
            mv(1, Color::White, MoveQuality::Book, None, None),
            mv(1, Color::Black, MoveQuality::Blunder, None, Some(3.0)),
        ];
        assert!(find_key_moments(&moves, 5).is_empty());
    }

    #[test]
    fn blunder_wins_over_turning_point() {
        // A blunder with a 5-pawn swing reports as a blunder, not a swing.
        let moves = vec![mv(
            10,
            Color::White,
            MoveQuality::Blunder,
            Some(1.0),
            Some(-4.0),
        )];
        let moments = find_key_moments(&moves, 5);
        assert_eq!(moments.len(), 1);
        assert_eq!(moments[0].reason, MomentReason::Blunder);
    }

    #[test]
    fn detects_turning_point() {
        let moves = vec![mv(
            12,
            Color::Black,
            MoveQuality::Mistake,
            Some(-0.5),
            Some(1.5),
        )];
        let moments = find_key_moments(&moves, 5);
        assert_eq!(moments.len(), 1);
        assert_eq!(moments[0].reason, MomentReason::TurningPoint);
    }

    #[test]
    fn detects_missed_win_for_white() {
        let moves = vec![mv(
            20,
            Color::White,
            MoveQuality::Inaccuracy,
            Some(3.2),
            Some(1.8),
        )];
        let moments = find_key_moments(&moves, 5);
        assert_eq!(moments.len(), 1);
        assert_eq!(moments[0].reason, MomentReason::MissedWin);
    }

    #[test]
    fn detects_missed_win_for_black_with_mirrored_signs() {
        let moves = vec![mv(
            20,
            Color::Black,
            MoveQuality::Inaccuracy,
            Some(-3.2),
            Some(-1.8),
        )];
        let moments = find_key_moments(&moves, 5);
        assert_eq!(moments.len(), 1);
        assert_eq!(moments[0].reason, MomentReason::MissedWin);

        // The White thresholds must not fire for Black.
        let white_shaped = vec![mv(
            21,
            Color::Black,
            MoveQuality::Inaccuracy,
            Some(3.2),
            Some(1.8),
        )];
        assert!(find_key_moments(&white_shaped, 5).is_empty());
    }

    #[test]
    fn preserves_order_and_truncates() {
        let moves = vec![
            mv(5, Color::White, MoveQuality::Blunder, Some(0.0), Some(-3.5)),
            mv(5, Color::Black, MoveQuality::Good, Some(-3.5), Some(-3.4)),
            mv(8, Color::White, MoveQuality::Mistake, Some(-1.0), Some(-3.1)),
            mv(9, Color::White, MoveQuality::Blunder, Some(-3.0), Some(-7.0)),
        ];
        let moments = find_key_moments(&moves, 2);
        assert_eq!(moments.len(), 2);
        assert_eq!(moments[0].move_number, 5);
        assert_eq!(moments[1].move_number, 8);
    }

    #[test]
    fn reason_serializes_to_display_strings() {
        assert_eq!(
            serde_json::to_string(&MomentReason::TurningPoint).unwrap(),
            "\"Turning point\""
        );
        assert_eq!(MomentReason::MissedWin.to_string(), "Missed win");
    }
}
