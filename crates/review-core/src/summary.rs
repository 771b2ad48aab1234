//! Game summary: per-player metrics, rating estimates, and verdict.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::moves::EvaluatedMove;
use crate::rating::{estimate_rating, RatingEstimate};
use crate::stats::{accuracy_percentage, acpl, count_by_quality, player_move_count};

/// Accuracy lead (percentage points) at which a rating inversion gets
/// corrected.
const ACC_DOMINANCE_THRESHOLD: f64 = 4.0;
/// Blend factor pulling inverted ratings toward their midpoint. Softens,
/// never clamps.
const ELO_SOFTEN_FACTOR: f64 = 0.5;

/// One player's aggregate performance in a game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub acpl: f64,
    pub accuracy: f64,
    pub blunders: u32,
    pub mistakes: u32,
    pub inaccuracies: u32,
    pub estimated_elo: RatingEstimate,
}

/// Summary of a fully analyzed game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub white: PlayerSummary,
    pub black: PlayerSummary,
    pub verdict: String,
}

fn player_summary(moves: &[EvaluatedMove], color: Color) -> PlayerSummary {
    let acpl = acpl(moves, color);
    let accuracy = accuracy_percentage(moves, color);
    let counts = count_by_quality(moves, color);
    let move_count = player_move_count(moves, color);

    let estimated_elo = estimate_rating(
        acpl,
        accuracy,
        counts.blunders,
        counts.mistakes,
        move_count,
    );

    PlayerSummary {
        acpl,
        accuracy,
        blunders: counts.blunders,
        mistakes: counts.mistakes,
        inaccuracies: counts.inaccuracies,
        estimated_elo,
    }
}

/// Blends two inverted ratings toward each other. `leader` is the more
/// accurate player whose raw rating came out lower; after the blend the
/// leader is never left strictly below the trailer.
fn soften(leader: i32, trailer: i32) -> (i32, i32) {
    let (leader, trailer) = (f64::from(leader), f64::from(trailer));
    let corrected_leader = leader + (trailer - leader) * ELO_SOFTEN_FACTOR;
    let corrected_trailer = trailer + (leader - trailer) * ELO_SOFTEN_FACTOR;
    (corrected_leader as i32, corrected_trailer as i32)
}

/// Computes both players' summaries plus a verdict.
///
/// A sanity correction prevents accuracy inversion: when one player is
/// clearly more accurate (>= 4 points) yet estimated lower, both ratings
/// are blended toward their midpoint, symmetrically for either color.
pub fn summarize(moves: &[EvaluatedMove]) -> GameSummary {
    let mut white = player_summary(moves, Color::White);
    let mut black = player_summary(moves, Color::Black);

    let acc_diff = white.accuracy - black.accuracy;

    if acc_diff >= ACC_DOMINANCE_THRESHOLD && white.estimated_elo.elo < black.estimated_elo.elo {
        let (w, b) = soften(white.estimated_elo.elo, black.estimated_elo.elo);
        white.estimated_elo.elo = w;
        black.estimated_elo.elo = b;
    } else if acc_diff <= -ACC_DOMINANCE_THRESHOLD
        && black.estimated_elo.elo < white.estimated_elo.elo
    {
        let (b, w) = soften(black.estimated_elo.elo, white.estimated_elo.elo);
        black.estimated_elo.elo = b;
        white.estimated_elo.elo = w;
    }

    let verdict = if white.accuracy > black.accuracy {
        "White played better"
    } else if black.accuracy > white.accuracy {
        "Black played better"
    } else {
        "Game was evenly played"
    };

    GameSummary {
        white,
        black,
        verdict: verdict.to_string(),
    }
}
