//! Board queries shared by the selector and the blunder themes.

use shakmaty::{
    attacks, Board, CastlingMode, Chess, Color, EnPassantMode, FromSetup, Move, Position, Role,
    Square,
};

/// Piece values for threat and trade judgments. The king is huge so
/// threats against it always dominate.
pub(crate) fn piece_value(role: Role) -> i32 {
    match role {
        Role::Pawn => 1,
        Role::Knight | Role::Bishop => 3,
        Role::Rook => 5,
        Role::Queen => 9,
        Role::King => 100,
    }
}

pub(crate) fn is_attacked_by(board: &Board, attacker: Color, square: Square) -> bool {
    !board.attacks_to(square, attacker, board.occupied()).is_empty()
}

/// After `mv`, does the moved piece attack a more valuable enemy piece?
/// The first enemy piece in square order decides.
pub(crate) fn creates_threat(pos: &Chess, mv: &Move) -> bool {
    let after = match pos.clone().play(mv) {
        Ok(after) => after,
        Err(_) => return false,
    };
    let to = mv.to();
    let piece = match after.board().piece_at(to) {
        Some(piece) => piece,
        None => return false,
    };

    for square in attacks::attacks(to, piece, after.board().occupied()) {
        if let Some(target) = after.board().piece_at(square) {
            if target.color != piece.color {
                return piece_value(target.role) > piece_value(piece.role);
            }
        }
    }
    false
}

/// Does `mv` remove an existing attack on the mover's material?
pub(crate) fn is_defensive_move(pos: &Chess, mv: &Move) -> bool {
    let us = pos.turn();
    let them = us.other();
    let after = match pos.clone().play(mv) {
        Ok(after) => after,
        Err(_) => return false,
    };

    for square in pos.board().by_color(us) {
        if is_attacked_by(pos.board(), them, square) && !is_attacked_by(after.board(), them, square)
        {
            return true;
        }
    }
    false
}

pub(crate) fn is_attacking_move(pos: &Chess, mv: &Move) -> bool {
    mv.is_capture() || creates_threat(pos, mv)
}

/// Whether the side to move can deliver checkmate on this move.
pub(crate) fn has_mate_in_one(pos: &Chess) -> bool {
    pos.legal_moves().iter().any(|mv| {
        pos.clone()
            .play(mv)
            .map(|after| after.is_checkmate())
            .unwrap_or(false)
    })
}

/// Whether the opponent, were it their move, could mate immediately.
///
/// Built on a null-move turn flip; undetectable while the mover is in
/// check (the flipped position is illegal), where check evasion takes over
/// anyway.
pub(crate) fn opponent_has_mate_threat(pos: &Chess) -> bool {
    let mut setup = pos.clone().into_setup(EnPassantMode::Legal);
    setup.turn = setup.turn.other();
    setup.ep_square = None;
    match Chess::from_setup(setup, CastlingMode::Standard) {
        Ok(flipped) => has_mate_in_one(&flipped),
        Err(_) => false,
    }
}

/// Whether playing `mv` leaves the opponent without an immediate mate.
pub(crate) fn averts_mate(pos: &Chess, mv: &Move) -> bool {
    pos.clone()
        .play(mv)
        .map(|after| !has_mate_in_one(&after))
        .unwrap_or(false)
}

#[cfg(test)]
pub(crate) fn position(fen: &str) -> Chess {
    use shakmaty::fen::Fen;
    fen.parse::<Fen>()
        .unwrap()
        .into_position(CastlingMode::Standard)
        .unwrap()
}

#[cfg(test)]
pub(crate) fn mv(pos: &Chess, uci: &str) -> Move {
    use shakmaty::uci::Uci;
    uci.parse::<Uci>().unwrap().to_move(pos).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// White to move; Black's rook on e8 threatens back-rank mate Re1#.
    const BACK_RANK_FEN: &str = "4r1k1/8/8/8/8/8/1R3PPP/6K1 w - - 0 1";

    #[test]
    fn detects_mate_in_one_for_side_to_move() {
        // Black to move mates with Re1#.
        let pos = position("4r1k1/8/8/8/8/8/1R3PPP/6K1 b - - 0 1");
        assert!(has_mate_in_one(&pos));

        assert!(!has_mate_in_one(&Chess::default()));
    }

    #[test]
    fn detects_opponent_mate_threat_via_turn_flip() {
        let pos = position(BACK_RANK_FEN);
        assert!(opponent_has_mate_threat(&pos));
        assert!(!opponent_has_mate_threat(&Chess::default()));
    }

    #[test]
    fn blocking_rook_averts_the_mate() {
        let pos = position(BACK_RANK_FEN);
        assert!(averts_mate(&pos, &mv(&pos, "b2e2")));
        assert!(!averts_mate(&pos, &mv(&pos, "b2b7")));
    }

    #[test]
    fn attacking_a_queen_with_a_knight_is_a_threat() {
        let pos = position("4k3/4q3/8/8/8/2N5/8/3K4 w - - 0 1");
        // Nd5 attacks the queen on e7 (value 9 > 3).
        assert!(creates_threat(&pos, &mv(&pos, "c3d5")));
        // Nb5 attacks nothing valuable.
        assert!(!creates_threat(&pos, &mv(&pos, "c3b5")));
    }

    #[test]
    fn blocking_an_attack_is_defensive() {
        // The a1 rook is attacked along the file; interposing the knight
        // on a5 shuts the attack off, a knight move elsewhere does not.
        let pos = position("r3k3/8/8/8/8/1N6/8/R3K3 w - - 0 1");
        assert!(is_defensive_move(&pos, &mv(&pos, "b3a5")));
        assert!(!is_defensive_move(&pos, &mv(&pos, "b3c5")));
    }
}
