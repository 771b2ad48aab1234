//! Thematic blunders for low-rating play.
//!
//! Rather than playing uniformly random bad moves, a weak bot is more
//! convincing when its mistakes follow the patterns humans actually
//! produce: hanging a piece, grabbing material greedily, walking into a
//! simple fork.

use rand::seq::SliceRandom;
use rand::Rng;
use shakmaty::{attacks, Chess, Move, Position, Role};

/// The moved piece ends up attacked more often than defended.
fn hangs_piece(pos: &Chess, mv: &Move) -> bool {
    let after = match pos.clone().play(mv) {
        Ok(after) => after,
        Err(_) => return false,
    };
    let to = mv.to();
    let piece = match after.board().piece_at(to) {
        Some(piece) => piece,
        None => return false,
    };

    let board = after.board();
    let attackers = board.attacks_to(to, piece.color.other(), board.occupied());
    let defenders = board.attacks_to(to, piece.color, board.occupied());
    attackers.count() > defenders.count()
}

/// A capture with anything heavier than a pawn, regardless of soundness.
fn greedy_capture(_pos: &Chess, mv: &Move) -> bool {
    mv.is_capture() && mv.role() != Role::Pawn
}

/// After the move, an enemy knight forks two of the mover's heavy pieces.
fn walks_into_fork(pos: &Chess, mv: &Move) -> bool {
    let us = pos.turn();
    let after = match pos.clone().play(mv) {
        Ok(after) => after,
        Err(_) => return false,
    };

    let board = after.board();
    for knight in board.by_color(us.other()) & board.by_role(Role::Knight) {
        let mut heavy_targets = 0;
        for square in attacks::knight_attacks(knight) {
            if let Some(piece) = board.piece_at(square) {
                if piece.color == us && matches!(piece.role, Role::Queen | Role::Rook) {
                    heavy_targets += 1;
                }
            }
        }
        if heavy_targets >= 2 {
            return true;
        }
    }
    false
}

/// Tries to pick a move matching a common low-rating blunder theme.
///
/// Themes unlock as the rating falls (hanging pieces at 800 and below,
/// greed at 1000, overlooked forks at 1200) and are tried in shuffled
/// order; the pick within a theme is uniform. Returns `None` when no
/// candidate fits any active theme.
pub fn thematic_blunder<R: Rng>(
    pos: &Chess,
    moves: &[Move],
    elo: u32,
    rng: &mut R,
) -> Option<Move> {
    let mut themes: Vec<fn(&Chess, &Move) -> bool> = Vec::new();
    if elo <= 800 {
        themes.push(hangs_piece);
    }
    if elo <= 1000 {
        themes.push(greedy_capture);
    }
    if elo <= 1200 {
        themes.push(walks_into_fork);
    }

    themes.shuffle(rng);

    for theme in themes {
        let themed: Vec<&Move> = moves.iter().filter(|mv| theme(pos, mv)).collect();
        if let Some(choice) = themed.choose(rng) {
            return Some((*choice).clone());
        }
    }

    None
}
