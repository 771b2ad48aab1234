//! Cheap heuristics steering the per-move search budget.

use shakmaty::{Chess, Position};

/// Evaluation swing (pawns) that makes a move worth a deeper look.
const INTERESTING_SWING: f64 = 1.0;

/// Decides whether a move deserves the more expensive time-bounded
/// re-evaluation: a big swing, a capture, or a check.
pub fn is_interesting_move(
    eval_before: f64,
    eval_after: f64,
    is_capture: bool,
    pos_after: &Chess,
) -> bool {
    if (eval_after - eval_before).abs() >= INTERESTING_SWING {
        return true;
    }

    if is_capture {
        return true;
    }

    if pos_after.is_check() {
        return true;
    }

    false
}
