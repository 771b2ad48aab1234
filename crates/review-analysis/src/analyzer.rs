//! Full-game analysis with move quality classification.

use shakmaty::{Chess, Color as StmColor, Move, Position};
use tracing::{debug, info};

use review_core::{
    is_brilliant, is_piece_hanging, material_count, BrilliantContext, Color, EvaluatedMove,
    MoveQuality,
};
use review_engine::{EvaluationOracle, Score, SearchLimit};
use review_openings::{detect_opening, is_book_position, Opening};

use crate::config::AnalysisConfig;
use crate::error::AnalyzerError;
use crate::heuristics::is_interesting_move;
use crate::parse::{fen_of, mainline_sans, san_of, san_to_move, uci_of, uci_to_move};

/// Scores within this margin of the played move count as comparably good
/// alternatives.
const ALTERNATIVE_MARGIN_CP: i32 = 30;
/// A move is considered forced when every alternative is at least this much
/// worse.
const FORCED_MARGIN_CP: i32 = 200;

/// Analyzes complete games, classifying each move's quality.
///
/// The analyzer holds only configuration; the engine session is borrowed
/// per call so it returns to its owner on every exit path, including
/// failure.
pub struct GameAnalyzer {
    config: AnalysisConfig,
}

impl GameAnalyzer {
    /// Creates an analyzer with the given configuration.
    #[must_use]
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Analyzes a game record, producing one [`EvaluatedMove`] per mainline
    /// move plus the detected opening, if any.
    ///
    /// Carries a running White-perspective evaluation forward move by move.
    /// Book positions inside the book window skip the engine entirely;
    /// tactically interesting moves get a second, time-bounded evaluation;
    /// best moves outside the opening window are screened for brilliance.
    ///
    /// # Errors
    ///
    /// [`AnalyzerError::InvalidGame`] for a bad record, or
    /// [`AnalyzerError::Engine`] if the oracle fails mid-game. Either way
    /// no partial analysis is returned.
    pub fn analyze_pgn<E: EvaluationOracle>(
        &self,
        engine: &mut E,
        pgn: &str,
        depth: Option<u32>,
        player_elo: u32,
    ) -> Result<(Vec<EvaluatedMove>, Option<Opening>), AnalyzerError> {
        let sans = mainline_sans(pgn)?;

        engine.new_game()?;

        let mut pos = Chess::default();
        let mut moves: Vec<EvaluatedMove> = Vec::with_capacity(sans.len());
        let mut opening: Option<Opening> = None;
        let mut move_number = 1u32;
        let mut running_eval: Option<f64> = None;

        for san in &sans {
            let mv = san_to_move(&pos, san)?;
            let color = Color::from(pos.turn());
            let uci = uci_of(&mv);
            let san_text = san_of(&pos, &mv);
            let is_capture = mv.is_capture();
            let fen_before = fen_of(&pos);

            // ---------------- Opening book shortcut ----------------
            if move_number <= self.config.book_max_full_moves && is_book_position(&fen_before) {
                let pos_after = play(pos, &mv, san)?;

                if opening.is_none() {
                    opening = detect_opening(&fen_of(&pos_after));
                }

                moves.push(EvaluatedMove {
                    move_number,
                    color,
                    uci,
                    san: san_text,
                    eval_before: running_eval,
                    eval_after: running_eval,
                    eval_loss: 0.0,
                    quality: MoveQuality::Book,
                    is_check: pos_after.is_check(),
                    is_checkmate: pos_after.is_checkmate(),
                    is_capture,
                    clock: None,
                    best_move_uci: None,
                    best_move_san: None,
                });

                if color == Color::Black {
                    move_number += 1;
                }
                pos = pos_after;
                continue;
            }

            // ---------------- Engine evaluation ----------------
            let mut best_move_uci = None;
            let mut best_move_san = None;

            // The game's first full evaluation seeds the running value and
            // is the only one whose principal move is recorded.
            let eval_before = match running_eval {
                Some(value) => value,
                None => {
                    let analysis = engine.analyze(
                        &fen_before,
                        SearchLimit::Depth(depth.unwrap_or(self.config.base_depth)),
                    )?;
                    if let Some(best) = uci_to_move(&pos, &analysis.best_move) {
                        best_move_san = Some(san_of(&pos, &best));
                        best_move_uci = Some(analysis.best_move.clone());
                    }
                    white_eval(analysis.score, pos.turn())
                }
            };

            let material_before = material_count(pos.board());
            let was_hanging = mv
                .from()
                .map(|square| is_piece_hanging(&pos, square))
                .unwrap_or(false);

            let pos_before = pos.clone();
            let pos_after = play(pos, &mv, san)?;

            if opening.is_none() {
                opening = detect_opening(&fen_of(&pos_after));
            }

            let in_opening = move_number <= self.config.opening_max_full_moves;
            let eval_depth = if in_opening {
                self.config.opening_depth
            } else {
                depth.unwrap_or(self.config.base_depth)
            };

            let fen_after = fen_of(&pos_after);
            let mut eval_after = white_eval(
                engine
                    .analyze(&fen_after, SearchLimit::Depth(eval_depth))?
                    .score,
                pos_after.turn(),
            );

            if is_interesting_move(eval_before, eval_after, is_capture, &pos_after) {
                eval_after = white_eval(
                    engine
                        .analyze(&fen_after, SearchLimit::MoveTime(self.config.deep_time_ms))?
                        .score,
                    pos_after.turn(),
                );
            }

            let eval_loss = if color.is_white() {
                (eval_before - eval_after).max(0.0)
            } else {
                (eval_after - eval_before).max(0.0)
            };

            let mut quality = MoveQuality::from_eval_loss(eval_loss);

            if quality == MoveQuality::Best && !in_opening {
                quality = self.screen_brilliance(
                    engine,
                    &pos_before,
                    &pos_after,
                    &mv,
                    eval_before,
                    eval_after,
                    material_before,
                    was_hanging,
                    player_elo,
                )?;
            }

            debug!(move_number, %san_text, ?quality, eval_loss, "move classified");

            moves.push(EvaluatedMove {
                move_number,
                color,
                uci,
                san: san_text,
                eval_before: Some(eval_before),
                eval_after: Some(eval_after),
                eval_loss,
                quality,
                is_check: pos_after.is_check(),
                is_checkmate: pos_after.is_checkmate(),
                is_capture,
                clock: None,
                best_move_uci,
                best_move_san,
            });

            running_eval = Some(eval_after);
            if color == Color::Black {
                move_number += 1;
            }
            pos = pos_after;
        }

        info!(
            moves = moves.len(),
            opening = opening.as_ref().map(|o| o.name.as_str()),
            "game analyzed"
        );

        Ok((moves, opening))
    }

    /// Assembles a [`BrilliantContext`] for a best move played outside the
    /// opening window and attempts the upgrade.
    ///
    /// The material delta is settled over the opponent's best shallow
    /// reply, so a piece left en prise registers as a sacrifice; forcedness
    /// and the alternative count come from a multi-line probe of the
    /// pre-move position.
    #[allow(clippy::too_many_arguments)]
    fn screen_brilliance<E: EvaluationOracle>(
        &self,
        engine: &mut E,
        pos_before: &Chess,
        pos_after: &Chess,
        mv: &Move,
        eval_before: f64,
        eval_after: f64,
        material_before: i32,
        was_hanging: bool,
        player_elo: u32,
    ) -> Result<MoveQuality, AnalyzerError> {
        let sign = if pos_before.turn() == StmColor::White {
            1
        } else {
            -1
        };
        let is_capture = mv.is_capture();

        let fen_after = fen_of(pos_after);
        let reply = engine.analyze(
            &fen_after,
            SearchLimit::MoveTime(self.config.reply_time_ms),
        )?;
        let reply_eval = white_eval(reply.score, pos_after.turn());

        let settled = uci_to_move(pos_after, &reply.best_move)
            .and_then(|reply_mv| pos_after.clone().play(&reply_mv).ok());
        let settled_material = match &settled {
            Some(settled_pos) => material_count(settled_pos.board()),
            None => material_count(pos_after.board()),
        };
        let material_delta = (settled_material - material_before) * sign;
        let piece_sacrificed = material_delta < 0 && !is_capture;

        let (was_forced, alternatives) = self.probe_alternatives(engine, pos_before, mv)?;

        let mover_cp = |white_pawns: f64| (white_pawns * 100.0) as i32 * sign;

        let ctx = BrilliantContext {
            eval_before_cp: mover_cp(eval_before),
            eval_after_cp: mover_cp(eval_after),
            eval_after_reply_cp: mover_cp(reply_eval),
            material_delta,
            piece_sacrificed,
            was_piece_hanging_before: was_hanging,
            was_forced_move: was_forced,
            alternative_good_moves: alternatives,
            move_gives_immediate_mate: pos_after.is_checkmate(),
            move_is_capture: is_capture,
            player_elo,
        };

        Ok(if is_brilliant(&ctx) {
            MoveQuality::Brilliant
        } else {
            MoveQuality::Best
        })
    }

    /// Counts comparably good alternatives to the played move and decides
    /// whether it was forced, from a shallow multi-line probe of the
    /// pre-move position.
    fn probe_alternatives<E: EvaluationOracle>(
        &self,
        engine: &mut E,
        pos_before: &Chess,
        played: &Move,
    ) -> Result<(bool, u32), AnalyzerError> {
        if pos_before.legal_moves().len() <= 1 {
            return Ok((true, 0));
        }

        let lines = engine.analyze_lines(
            &fen_of(pos_before),
            SearchLimit::Depth(self.config.opening_depth),
            self.config.brilliance_lines,
        )?;
        if lines.is_empty() {
            return Ok((false, 0));
        }

        let played_uci = uci_of(played);
        let best_cp = lines
            .iter()
            .map(|line| line.score.to_centipawns())
            .max()
            .unwrap_or(0);
        let reference = lines
            .iter()
            .find(|line| line.uci == played_uci)
            .map(|line| line.score.to_centipawns())
            .unwrap_or(best_cp);

        let mut alternatives = 0u32;
        let mut has_alternative = false;
        let mut all_far_worse = true;
        for line in lines.iter().filter(|line| line.uci != played_uci) {
            has_alternative = true;
            let gap = reference - line.score.to_centipawns();
            if gap <= ALTERNATIVE_MARGIN_CP {
                alternatives += 1;
            }
            if gap < FORCED_MARGIN_CP {
                all_far_worse = false;
            }
        }

        Ok((has_alternative && all_far_worse, alternatives))
    }
}

/// Converts a side-to-move score into White-perspective pawns, resolving
/// mate scores to the finite sentinel.
fn white_eval(score: Score, side_to_move: StmColor) -> f64 {
    let cp = score.to_centipawns();
    let signed = if side_to_move == StmColor::White {
        cp
    } else {
        -cp
    };
    f64::from(signed) / 100.0
}

/// Plays a legality-checked move; failure means the record lied about it.
fn play(pos: Chess, mv: &Move, san: &str) -> Result<Chess, AnalyzerError> {
    pos.play(mv)
        .map_err(|_| AnalyzerError::InvalidGame(format!("illegal move: {san}")))
}
