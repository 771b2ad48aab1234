//! Live-play service: one engine move at a calibrated strength.

use rand::Rng;
use serde::{Deserialize, Serialize};
use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::uci::Uci;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Move, Position};
use thiserror::Error;
use tracing::{debug, warn};

use review_engine::{EngineError, EvaluationOracle, SearchLimit};

use crate::humanize::select_human_move;

/// Errors from the play service.
#[derive(Error, Debug)]
pub enum PlayError {
    /// The position string is not a valid, reachable position.
    #[error("Invalid position: {0}")]
    InvalidPosition(String),
    /// The game is already decided; rejected before any engine call.
    #[error("Game is already over")]
    GameOver,
    /// The engine failed or answered nonsense.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Configuration for live play.
#[derive(Debug, Clone)]
pub struct PlayConfig {
    /// Search depth when no rating-based depth applies.
    pub default_depth: u32,
    /// Candidate lines requested for the human-likeness selector.
    pub multipv: u32,
    /// Rating at or above which the engine's native strength limiting is
    /// used instead of the selector.
    pub native_elo_floor: u32,
    /// Lowest emulated rating accepted.
    pub min_elo: u32,
    /// Highest emulated rating accepted.
    pub max_elo: u32,
}

impl Default for PlayConfig {
    fn default() -> Self {
        Self {
            default_depth: 14,
            multipv: 5,
            native_elo_floor: 1320,
            min_elo: 400,
            max_elo: 3000,
        }
    }
}

/// The move the engine played, with the resulting position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayedMove {
    pub uci: String,
    pub san: String,
    pub fen_after: String,
    /// Evaluation in pawns from White's perspective after the move.
    pub eval: f64,
    pub is_check: bool,
    pub is_checkmate: bool,
    /// The rating the engine emulated, when one was requested.
    pub effective_elo: Option<u32>,
}

/// Stateless play orchestration over a borrowed engine session.
pub struct PlayService {
    config: PlayConfig,
}

impl PlayService {
    /// Creates a play service with the given configuration.
    #[must_use]
    pub fn new(config: PlayConfig) -> Self {
        Self { config }
    }

    /// Search depth scaled to the emulated rating.
    fn depth_for_elo(&self, elo: Option<u32>) -> u32 {
        match elo {
            None => self.config.default_depth,
            Some(elo) if elo < 800 => 4,
            Some(elo) if elo < 1100 => 6,
            Some(elo) if elo < 1500 => 8,
            Some(elo) if elo < 1800 => 10,
            Some(_) => self.config.default_depth,
        }
    }

    /// Plays one engine move from the given position.
    ///
    /// Ratings at or above the native floor are delegated to the engine's
    /// own strength limiting; below it, the human-likeness selector picks
    /// from a multi-line probe (falling back to the engine's choice when
    /// no candidate line is usable).
    ///
    /// # Errors
    ///
    /// - [`PlayError::InvalidPosition`] for an unparseable FEN
    /// - [`PlayError::GameOver`] for a finished position, before any
    ///   engine call
    /// - [`PlayError::Engine`] if the oracle fails
    pub fn play_move<E: EvaluationOracle, R: Rng>(
        &self,
        engine: &mut E,
        fen: &str,
        depth: Option<u32>,
        elo: Option<u32>,
        rng: &mut R,
    ) -> Result<PlayedMove, PlayError> {
        let pos: Chess = fen
            .parse::<Fen>()
            .map_err(|e| PlayError::InvalidPosition(e.to_string()))?
            .into_position(CastlingMode::Standard)
            .map_err(|e| PlayError::InvalidPosition(e.to_string()))?;

        if pos.is_game_over() {
            return Err(PlayError::GameOver);
        }

        let effective_depth = depth.unwrap_or_else(|| self.depth_for_elo(elo));
        let limit = SearchLimit::Depth(effective_depth);

        // Native strength limiting only reaches down to the engine's
        // floor; below that the selector emulates the rating instead.
        let emulated = match elo {
            Some(rating) if rating >= self.config.native_elo_floor => {
                engine.set_strength(Some(rating))?;
                None
            }
            Some(rating) => {
                engine.set_strength(None)?;
                Some(rating)
            }
            None => {
                engine.set_strength(None)?;
                None
            }
        };

        let mv = match emulated {
            Some(rating) => {
                let lines = engine.analyze_lines(fen, limit, self.config.multipv)?;
                let mut candidates: Vec<(Move, i32)> = Vec::with_capacity(lines.len());
                for line in &lines {
                    if let Some(candidate) = uci_to_move(&pos, &line.uci) {
                        candidates.push((candidate, line.score.to_centipawns()));
                    }
                }

                match select_human_move(&pos, &candidates, rating, rng) {
                    Some(choice) => choice,
                    None => {
                        warn!(rating, "no usable candidate lines, falling back to engine move");
                        self.engine_move(engine, &pos, fen, limit)?
                    }
                }
            }
            None => self.engine_move(engine, &pos, fen, limit)?,
        };

        let san = SanPlus::from_move(pos.clone(), &mv).to_string();
        let uci = mv.to_uci(CastlingMode::Standard).to_string();
        let after = pos.play(&mv).map_err(|_| {
            PlayError::Engine(EngineError::InvalidResponse(
                "engine produced an illegal move".to_string(),
            ))
        })?;
        let fen_after = Fen::from_position(after.clone(), EnPassantMode::Legal).to_string();

        let analysis = engine.analyze(&fen_after, SearchLimit::Depth(effective_depth))?;
        let cp = analysis.score.to_centipawns();
        let eval = f64::from(if after.turn() == Color::White { cp } else { -cp }) / 100.0;

        debug!(%uci, %san, eval, ?elo, "engine move played");

        Ok(PlayedMove {
            uci,
            san,
            fen_after,
            eval,
            is_check: after.is_check(),
            is_checkmate: after.is_checkmate(),
            effective_elo: elo,
        })
    }

    fn engine_move<E: EvaluationOracle>(
        &self,
        engine: &mut E,
        pos: &Chess,
        fen: &str,
        limit: SearchLimit,
    ) -> Result<Move, PlayError> {
        let best = engine.bestmove(fen, limit)?;
        uci_to_move(pos, &best).ok_or_else(|| {
            PlayError::Engine(EngineError::InvalidResponse(format!(
                "illegal engine move: {best}"
            )))
        })
    }
}

fn uci_to_move(pos: &Chess, uci: &str) -> Option<Move> {
    uci.parse::<Uci>().ok()?.to_move(pos).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use review_engine::{CandidateLine, PositionAnalysis, Score};

    const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Records calls; answers from fixed responses.
    #[derive(Default)]
    struct RecordingOracle {
        strength: Vec<Option<u32>>,
        analyze_calls: Vec<(String, SearchLimit)>,
        line_calls: Vec<(String, SearchLimit, u32)>,
        bestmove_calls: Vec<(String, SearchLimit)>,
        lines: Vec<CandidateLine>,
        best: String,
    }

    impl RecordingOracle {
        fn with_best(best: &str) -> Self {
            Self {
                best: best.to_string(),
                ..Self::default()
            }
        }

        fn with_lines(mut self, lines: Vec<CandidateLine>) -> Self {
            self.lines = lines;
            self
        }
    }

    impl EvaluationOracle for RecordingOracle {
        fn new_game(&mut self) -> Result<(), EngineError> {
            Ok(())
        }

        fn analyze(
            &mut self,
            fen: &str,
            limit: SearchLimit,
        ) -> Result<PositionAnalysis, EngineError> {
            self.analyze_calls.push((fen.to_string(), limit));
            Ok(PositionAnalysis {
                best_move: self.best.clone(),
                score: Score::Cp(25),
                depth: 10,
                nodes: 1000,
                pv: vec![self.best.clone()],
            })
        }

        fn analyze_lines(
            &mut self,
            fen: &str,
            limit: SearchLimit,
            lines: u32,
        ) -> Result<Vec<CandidateLine>, EngineError> {
            self.line_calls.push((fen.to_string(), limit, lines));
            Ok(self.lines.clone())
        }

        fn bestmove(&mut self, fen: &str, limit: SearchLimit) -> Result<String, EngineError> {
            self.bestmove_calls.push((fen.to_string(), limit));
            Ok(self.best.clone())
        }

        fn set_strength(&mut self, elo: Option<u32>) -> Result<(), EngineError> {
            self.strength.push(elo);
            Ok(())
        }
    }

    fn line(uci: &str, cp: i32) -> CandidateLine {
        CandidateLine {
            uci: uci.to_string(),
            score: Score::Cp(cp),
            pv: vec![uci.to_string()],
        }
    }

    #[test]
    fn rejects_finished_positions_before_any_engine_call() {
        // Fool's mate final position, White is checkmated.
        let fen = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
        let mut oracle = RecordingOracle::with_best("e2e4");
        let service = PlayService::new(PlayConfig::default());
        let mut rng = StdRng::seed_from_u64(1);

        let err = service
            .play_move(&mut oracle, fen, None, Some(1200), &mut rng)
            .unwrap_err();
        assert!(matches!(err, PlayError::GameOver));
        assert!(oracle.strength.is_empty());
        assert!(oracle.analyze_calls.is_empty());
        assert!(oracle.bestmove_calls.is_empty());
    }

    #[test]
    fn rejects_garbage_fen() {
        let mut oracle = RecordingOracle::with_best("e2e4");
        let service = PlayService::new(PlayConfig::default());
        let mut rng = StdRng::seed_from_u64(1);

        let err = service
            .play_move(&mut oracle, "not a fen", None, None, &mut rng)
            .unwrap_err();
        assert!(matches!(err, PlayError::InvalidPosition(_)));
    }

    #[test]
    fn native_strength_skips_the_selector() {
        let mut oracle = RecordingOracle::with_best("e2e4");
        let service = PlayService::new(PlayConfig::default());
        let mut rng = StdRng::seed_from_u64(1);

        let played = service
            .play_move(&mut oracle, START_FEN, None, Some(2000), &mut rng)
            .expect("plays");

        assert_eq!(oracle.strength, vec![Some(2000)]);
        assert!(oracle.line_calls.is_empty(), "no multi-line probe");
        assert_eq!(oracle.bestmove_calls.len(), 1);
        assert_eq!(played.uci, "e2e4");
        assert_eq!(played.san, "e4");
        assert_eq!(played.effective_elo, Some(2000));
        // Depth band: 2000 uses the configured default.
        assert_eq!(oracle.bestmove_calls[0].1, SearchLimit::Depth(14));
    }

    #[test]
    fn low_rating_goes_through_the_selector() {
        let mut oracle = RecordingOracle::with_best("e2e4").with_lines(vec![
            line("e2e4", 30),
            line("d2d4", 25),
            line("g1f3", 20),
        ]);
        let service = PlayService::new(PlayConfig::default());
        let mut rng = StdRng::seed_from_u64(3);

        let played = service
            .play_move(&mut oracle, START_FEN, None, Some(800), &mut rng)
            .expect("plays");

        // Strength limiting off, selector on: one multi-line probe at the
        // 800-band depth, no bestmove call.
        assert_eq!(oracle.strength, vec![None]);
        assert_eq!(oracle.line_calls.len(), 1);
        assert_eq!(oracle.line_calls[0].1, SearchLimit::Depth(6));
        assert_eq!(oracle.line_calls[0].2, 5);
        assert!(oracle.bestmove_calls.is_empty());

        // The choice is one of the proposed candidates.
        assert!(["e2e4", "d2d4", "g1f3"].contains(&played.uci.as_str()));

        // The resulting position was evaluated at the same depth.
        assert_eq!(oracle.analyze_calls.len(), 1);
        assert_eq!(oracle.analyze_calls[0].1, SearchLimit::Depth(6));
    }

    #[test]
    fn empty_candidate_lines_fall_back_to_bestmove() {
        let mut oracle = RecordingOracle::with_best("g1f3");
        let service = PlayService::new(PlayConfig::default());
        let mut rng = StdRng::seed_from_u64(3);

        let played = service
            .play_move(&mut oracle, START_FEN, None, Some(700), &mut rng)
            .expect("plays");

        assert_eq!(oracle.line_calls.len(), 1);
        assert_eq!(oracle.bestmove_calls.len(), 1);
        assert_eq!(played.uci, "g1f3");
    }

    #[test]
    fn depth_bands_scale_with_rating() {
        let service = PlayService::new(PlayConfig::default());
        assert_eq!(service.depth_for_elo(None), 14);
        assert_eq!(service.depth_for_elo(Some(600)), 4);
        assert_eq!(service.depth_for_elo(Some(1000)), 6);
        assert_eq!(service.depth_for_elo(Some(1300)), 8);
        assert_eq!(service.depth_for_elo(Some(1700)), 10);
        assert_eq!(service.depth_for_elo(Some(2500)), 14);
    }

    #[test]
    fn explicit_depth_overrides_the_band() {
        let mut oracle = RecordingOracle::with_best("e2e4");
        let service = PlayService::new(PlayConfig::default());
        let mut rng = StdRng::seed_from_u64(9);

        service
            .play_move(&mut oracle, START_FEN, Some(20), Some(2000), &mut rng)
            .expect("plays");
        assert_eq!(oracle.bestmove_calls[0].1, SearchLimit::Depth(20));
    }

    #[test]
    fn reports_the_resulting_position() {
        let mut oracle = RecordingOracle::with_best("e2e4");
        let service = PlayService::new(PlayConfig::default());
        let mut rng = StdRng::seed_from_u64(1);

        let played = service
            .play_move(&mut oracle, START_FEN, None, None, &mut rng)
            .expect("plays");

        assert!(played.fen_after.starts_with(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b"
        ));
        assert!(!played.is_check);
        assert!(!played.is_checkmate);
        // Cp(25) for the side to move (Black) is -0.25 for White.
        assert_eq!(played.eval, -0.25);
        assert_eq!(played.effective_elo, None);
    }
}
