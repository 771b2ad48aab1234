//! Brilliancy gating.
//!
//! A brilliancy is a best move that is also voluntary, costly, non-obvious,
//! and validated as sound under further engine scrutiny. Every gate must
//! pass; the gates are order-independent.

use serde::{Deserialize, Serialize};

/// Everything the brilliance evaluator needs to judge one candidate move.
///
/// Evaluations are centipawns from the mover's perspective; `material_delta`
/// is likewise signed for the mover, so a sacrifice is negative regardless
/// of color. Assembled once per candidate by the pipeline and consumed once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrilliantContext {
    /// Evaluation before the move.
    pub eval_before_cp: i32,
    /// Evaluation after the move.
    pub eval_after_cp: i32,
    /// Evaluation after the opponent's best shallow reply.
    pub eval_after_reply_cp: i32,
    /// Material change for the mover; negative means a sacrifice.
    pub material_delta: i32,
    /// Material went down without compensation on the same move.
    pub piece_sacrificed: bool,
    /// The sacrificed piece was already attacked and underdefended before
    /// the move.
    pub was_piece_hanging_before: bool,
    /// The move was the only reasonable continuation.
    pub was_forced_move: bool,
    /// Number of alternative moves of comparable strength.
    pub alternative_good_moves: u32,
    /// The move delivers checkmate on the spot.
    pub move_gives_immediate_mate: bool,
    /// The move captures material.
    pub move_is_capture: bool,
    /// Rated strength of the player being judged.
    pub player_elo: u32,
}

/// Initiative loss tolerated after the opponent's reply, by rating band.
/// Stronger players get stricter scrutiny.
fn allowed_eval_drop(player_elo: u32) -> i32 {
    if player_elo < 1000 {
        -30
    } else if player_elo < 1400 {
        -20
    } else if player_elo < 1800 {
        -10
    } else {
        0
    }
}

/// Strict brilliancy classifier. Returns true only when every gate passes.
pub fn is_brilliant(ctx: &BrilliantContext) -> bool {
    // Sacrifice requirement: material given up, at least a minor piece or
    // the exchange. Pawn sacs don't qualify.
    if !ctx.piece_sacrificed {
        return false;
    }
    if ctx.material_delta > -2 {
        return false;
    }

    // Voluntariness: a capture, a piece that was already lost, or the only
    // playable move is not a choice.
    if ctx.move_is_capture {
        return false;
    }
    if ctx.was_piece_hanging_before {
        return false;
    }
    if ctx.was_forced_move {
        return false;
    }

    // Game context: no desperation sacs, no finishing blows.
    if ctx.eval_before_cp < -200 {
        return false;
    }
    if ctx.move_gives_immediate_mate {
        return false;
    }

    // Non-obviousness: with several equally good options the move wasn't
    // special.
    if ctx.alternative_good_moves >= 3 {
        return false;
    }

    // Engine validation: the position must hold up after the opponent's
    // best reply, within the rating-scaled tolerance.
    let eval_drop = ctx.eval_after_reply_cp - ctx.eval_before_cp;
    if eval_drop < allowed_eval_drop(ctx.player_elo) {
        return false;
    }

    true
}
