//! Human-likeness move selection.
//!
//! Emulates bounded human attention at a target rating: tunnel vision over
//! a board region or a tactical concept, rating-scaled awareness of mate
//! threats, and a priority scoring that values threats and defense over
//! material grabbing. Every filter stage is non-destructive: if it would
//! empty the candidate set, the unfiltered set survives.

use rand::Rng;
use shakmaty::{Chess, Move, Position, Square};

use crate::board::{
    averts_mate, creates_threat, is_attacking_move, is_defensive_move, opponent_has_mate_threat,
    piece_value,
};

/// Probability that spatial tunnel vision is drawn at all.
const SPATIAL_TUNNEL_PROB: f64 = 0.7;
/// Rating below which the spatial restriction actually sticks.
const SPATIAL_TUNNEL_MAX_ELO: u32 = 1200;
/// Rating up to which the conceptual tunnel applies.
const CONCEPTUAL_TUNNEL_MAX_ELO: u32 = 1600;
/// Rating below which the final pick is randomized between the top two.
const TOP_TWO_MAX_ELO: u32 = 1400;

/// Which tactical idea the mover is fixated on this turn.
#[derive(Debug, Clone, Copy)]
enum Concept {
    Attack,
    Defend,
}

/// The board region the mover is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Queenside,
    Kingside,
    Center,
}

impl Region {
    fn contains(self, square: Square) -> bool {
        let file = u32::from(square.file());
        match self {
            Region::Queenside => file <= 2,
            Region::Kingside => file >= 5,
            Region::Center => {
                matches!(square, Square::D4 | Square::E4 | Square::D5 | Square::E5)
            }
        }
    }
}

/// Average file of the mover's own pieces decides the focus region.
fn focus_region(pos: &Chess) -> Region {
    let own = pos.board().by_color(pos.turn());
    let mut sum = 0u32;
    let mut count = 0u32;
    for square in own {
        sum += u32::from(square.file());
        count += 1;
    }
    if count == 0 {
        return Region::Center;
    }

    let avg = f64::from(sum) / f64::from(count);
    if avg <= 2.0 {
        Region::Queenside
    } else if avg >= 5.0 {
        Region::Kingside
    } else {
        Region::Center
    }
}

/// Probability of noticing an opponent's mate threat, by rating band.
fn mate_awareness(elo: u32) -> f64 {
    if elo >= 2000 {
        0.95
    } else if elo >= 1500 {
        0.75
    } else if elo >= 1000 {
        0.4
    } else if elo >= 600 {
        0.15
    } else {
        0.05
    }
}

/// Weight given to defensive moves, by rating band.
fn defense_weight(elo: u32) -> f64 {
    if elo >= 1800 {
        3.0
    } else if elo >= 1400 {
        2.0
    } else if elo >= 1000 {
        1.0
    } else if elo >= 600 {
        0.3
    } else {
        0.0
    }
}

/// Capture attractiveness. Strong players get a mild reward for good
/// trades; as the rating falls the bias inverts and bad trades start to
/// look appealing.
fn capture_bias(mv: &Move, elo: u32) -> f64 {
    let victim = match mv.capture() {
        Some(role) => role,
        None => return 0.0,
    };
    let diff = f64::from(piece_value(victim) - piece_value(mv.role()));

    if elo >= 1800 {
        if diff > 0.0 {
            1.0
        } else {
            -0.5
        }
    } else if elo >= 1400 {
        if diff > 0.0 {
            0.3
        } else {
            -0.3
        }
    } else if elo >= 1000 {
        -0.5 * diff
    } else if elo >= 600 {
        -1.2 * diff
    } else {
        -2.0 * diff
    }
}

/// Scores one candidate: threats first, then defense, then captures.
pub fn priority_score(pos: &Chess, mv: &Move, elo: u32) -> f64 {
    let mut score = 0.0;

    if creates_threat(pos, mv) {
        score += 4.0;
    }

    if is_defensive_move(pos, mv) {
        score += defense_weight(elo);
    }

    if mv.is_capture() {
        score += capture_bias(mv, elo);
    }

    score
}

/// Picks one move from oracle-proposed candidates the way a human of the
/// given rating might. Candidate scores are from the side to move's
/// perspective; they steer nothing directly, attention does.
///
/// Returns `None` only for an empty candidate list.
pub fn select_human_move<R: Rng>(
    pos: &Chess,
    candidates: &[(Move, i32)],
    elo: u32,
    rng: &mut R,
) -> Option<Move> {
    if candidates.is_empty() {
        return None;
    }

    // Both tunnel draws happen up front so a fixed seed replays the whole
    // selection identically regardless of which stages end up applying.
    let spatial = rng.gen::<f64>() < SPATIAL_TUNNEL_PROB;
    let concept = if rng.gen_bool(0.5) {
        Concept::Attack
    } else {
        Concept::Defend
    };

    let mut visible: Vec<&(Move, i32)> = candidates.iter().collect();

    if spatial && elo < SPATIAL_TUNNEL_MAX_ELO {
        let region = focus_region(pos);
        let filtered: Vec<_> = visible
            .iter()
            .copied()
            .filter(|(mv, _)| region.contains(mv.to()))
            .collect();
        if !filtered.is_empty() {
            visible = filtered;
        }
    }

    if elo <= CONCEPTUAL_TUNNEL_MAX_ELO {
        let filtered: Vec<_> = visible
            .iter()
            .copied()
            .filter(|(mv, _)| match concept {
                Concept::Attack => is_attacking_move(pos, mv),
                Concept::Defend => is_defensive_move(pos, mv),
            })
            .collect();
        if !filtered.is_empty() {
            visible = filtered;
        }
    }

    if opponent_has_mate_threat(pos) && rng.gen::<f64>() < mate_awareness(elo) {
        let safe: Vec<_> = visible
            .iter()
            .copied()
            .filter(|(mv, _)| averts_mate(pos, mv))
            .collect();
        if !safe.is_empty() {
            visible = safe;
        }
    }

    let mut scored: Vec<(f64, &Move)> = visible
        .iter()
        .map(|(mv, _)| (priority_score(pos, mv, elo), mv))
        .collect();
    // Stable sort: ties keep the oracle's candidate order.
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let pick = if elo < TOP_TWO_MAX_ELO && scored.len() > 1 {
        rng.gen_range(0..2)
    } else {
        0
    };

    Some(scored[pick].1.clone())
}
