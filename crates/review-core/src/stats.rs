//! Aggregate per-player statistics over evaluated moves.
//!
//! Book moves never count toward any metric here; every function filters
//! them out the same way so ACPL, accuracy, and move counts stay in sync.

use crate::color::Color;
use crate::moves::EvaluatedMove;
use crate::quality::MoveQuality;

/// Error counts used for rating penalties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QualityCounts {
    pub blunders: u32,
    pub mistakes: u32,
    pub inaccuracies: u32,
}

fn player_moves<'a>(
    moves: &'a [EvaluatedMove],
    color: Color,
) -> impl Iterator<Item = &'a EvaluatedMove> {
    moves
        .iter()
        .filter(move |m| m.color == color && m.quality != MoveQuality::Book)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Average centipawn loss for one player, over moves that actually lost
/// evaluation. 0.0 when no move lost anything.
pub fn acpl(moves: &[EvaluatedMove], color: Color) -> f64 {
    let losses: Vec<f64> = player_moves(moves, color)
        .filter(|m| m.eval_loss > 0.0)
        .map(|m| m.eval_loss * 100.0)
        .collect();

    if losses.is_empty() {
        return 0.0;
    }
    round2(losses.iter().sum::<f64>() / losses.len() as f64)
}

/// Quality-weighted accuracy percentage, capped at 100.
///
/// Brilliancies weigh the same as best moves; they never push accuracy
/// beyond 100.
pub fn accuracy_percentage(moves: &[EvaluatedMove], color: Color) -> f64 {
    let mut count = 0usize;
    let mut score = 0.0;
    for m in player_moves(moves, color) {
        count += 1;
        score += m.quality.accuracy_weight();
    }

    if count == 0 {
        return 0.0;
    }
    round2((score / count as f64 * 100.0).min(100.0))
}

/// Counts a player's meaningful errors.
pub fn count_by_quality(moves: &[EvaluatedMove], color: Color) -> QualityCounts {
    let mut counts = QualityCounts::default();
    for m in player_moves(moves, color) {
        match m.quality {
            MoveQuality::Blunder => counts.blunders += 1,
            MoveQuality::Mistake => counts.mistakes += 1,
            MoveQuality::Inaccuracy => counts.inaccuracies += 1,
            MoveQuality::Book
            | MoveQuality::Brilliant
            | MoveQuality::Best
            | MoveQuality::Good => {}
        }
    }
    counts
}

/// Number of moves that count toward rating estimation. Must match the
/// filtering used by [`acpl`] and [`accuracy_percentage`].
pub fn player_move_count(moves: &[EvaluatedMove], color: Color) -> usize {
    player_moves(moves, color).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mv(color: Color, quality: MoveQuality, eval_loss: f64) -> EvaluatedMove {
        EvaluatedMove {
            move_number: 1,
            color,
            uci: "e2e4".to_string(),
            san: "e4".to_string(),
            eval_before: Some(0.0),
            eval_after: Some(0.0),
            eval_loss,
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
    fn acpl_ignores_zero_loss_and_book_moves() {
        let moves = vec![
            mv(Color::White, MoveQuality::Book, 0.0),
            mv(Color::White, MoveQuality::Best, 0.0),
            mv(Color::White, MoveQuality::Good, 0.3),
            mv(Color::White, MoveQuality::Mistake, 1.7),
            mv(Color::Black, MoveQuality::Blunder, 5.0),
        ];
        // Mean of 30 and 170.
        assert_eq!(acpl(&moves, Color::White), 100.0);
        assert_eq!(acpl(&moves, Color::Black), 500.0);
    }

    #[test]
    fn acpl_is_zero_without_losses() {
        let moves = vec![mv(Color::White, MoveQuality::Best, 0.0)];
        assert_eq!(acpl(&moves, Color::White), 0.0);
        assert_eq!(acpl(&moves, Color::Black), 0.0);
    }

    #[test]
    fn accuracy_weights_qualities() {
        let moves = vec![
            mv(Color::White, MoveQuality::Best, 0.0),
            mv(Color::White, MoveQuality::Good, 0.3),
            mv(Color::White, MoveQuality::Blunder, 4.0),
        ];
        // (1.0 + 0.9 + 0.0) / 3 * 100
        assert_eq!(accuracy_percentage(&moves, Color::White), 63.33);
    }

    #[test]
    fn accuracy_caps_at_100() {
        let moves = vec![
            mv(Color::White, MoveQuality::Brilliant, 0.0),
            mv(Color::White, MoveQuality::Best, 0.0),
        ];
        assert_eq!(accuracy_percentage(&moves, Color::White), 100.0);
    }

    #[test]
    fn accuracy_is_zero_without_moves() {
        let moves = vec![mv(Color::White, MoveQuality::Book, 0.0)];
        assert_eq!(accuracy_percentage(&moves, Color::White), 0.0);
    }

    #[test]
    fn counts_errors_per_player() {
        let moves = vec![
            mv(Color::White, MoveQuality::Blunder, 4.0),
            mv(Color::White, MoveQuality::Mistake, 2.0),
            mv(Color::White, MoveQuality::Mistake, 2.5),
            mv(Color::White, MoveQuality::Inaccuracy, 1.0),
            mv(Color::Black, MoveQuality::Blunder, 6.0),
        ];
        let white = count_by_quality(&moves, Color::White);
        assert_eq!(white.blunders, 1);
        assert_eq!(white.mistakes, 2);
        assert_eq!(white.inaccuracies, 1);
        let black = count_by_quality(&moves, Color::Black);
        assert_eq!(black.blunders, 1);
        assert_eq!(black.mistakes, 0);
    }

    #[test]
    fn move_count_excludes_book() {
        let moves = vec![
            mv(Color::White, MoveQuality::Book, 0.0),
            mv(Color::White, MoveQuality::Best, 0.0),
            mv(Color::Black, MoveQuality::Good, 0.2),
        ];
        assert_eq!(player_move_count(&moves, Color::White), 1);
        assert_eq!(player_move_count(&moves, Color::Black), 1);
    }
}
