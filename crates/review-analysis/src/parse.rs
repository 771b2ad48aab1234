//! Game record intake.
//!
//! The mainline is collected as SAN tokens via `pgn-reader` and re-parsed
//! against the evolving position, so every move is validated for legality
//! before any engine work starts. Variations and annotations are skipped.

use pgn_reader::{BufferedReader, SanPlus as PgnSanPlus, Skip, Visitor};
use serde::{Deserialize, Serialize};
use shakmaty::fen::Fen;
use shakmaty::san::{San, SanPlus};
use shakmaty::uci::Uci;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Move, Position};

use review_core::Color;

use crate::error::AnalyzerError;

/// One mainline move with derived notation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedMove {
    pub move_number: u32,
    pub color: Color,
    pub uci: String,
    pub san: String,
    pub fen_after: String,
}

/// An evaluation-free parse of a game record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedGame {
    /// Final position after the mainline.
    pub fen: String,
    pub moves: Vec<ParsedMove>,
}

/// Collects the first game's mainline SAN tokens.
#[derive(Default)]
struct MainlineCollector {
    sans: Vec<String>,
}

impl Visitor for MainlineCollector {
    type Result = ();

    fn san(&mut self, san_plus: PgnSanPlus) {
        self.sans.push(san_plus.san.to_string());
    }

    fn begin_variation(&mut self) -> Skip {
        Skip(true)
    }

    fn end_game(&mut self) -> Self::Result {}
}

/// Reads the first game's mainline from a PGN string.
pub(crate) fn mainline_sans(pgn: &str) -> Result<Vec<String>, AnalyzerError> {
    let mut reader = BufferedReader::new_cursor(pgn.as_bytes());
    let mut collector = MainlineCollector::default();
    let game = reader
        .read_game(&mut collector)
        .map_err(|e| AnalyzerError::InvalidGame(e.to_string()))?;

    if game.is_none() || collector.sans.is_empty() {
        return Err(AnalyzerError::InvalidGame(
            "game record contains no moves".to_string(),
        ));
    }

    Ok(collector.sans)
}

/// FEN of a position, en passant square included only when capturable.
pub(crate) fn fen_of(pos: &Chess) -> String {
    Fen::from_position(pos.clone(), EnPassantMode::Legal).to_string()
}

/// Resolves one SAN token against the current position.
pub(crate) fn san_to_move(pos: &Chess, san: &str) -> Result<Move, AnalyzerError> {
    let parsed: San = san
        .parse()
        .map_err(|_| AnalyzerError::InvalidGame(format!("unparseable move: {san}")))?;
    parsed
        .to_move(pos)
        .map_err(|_| AnalyzerError::InvalidGame(format!("illegal move: {san}")))
}

pub(crate) fn uci_of(mv: &Move) -> String {
    mv.to_uci(CastlingMode::Standard).to_string()
}

/// SAN with check/checkmate suffix for a legal move in `pos`.
pub(crate) fn san_of(pos: &Chess, mv: &Move) -> String {
    SanPlus::from_move(pos.clone(), mv).to_string()
}

/// Resolves an engine move in UCI notation against `pos`, if legal.
pub(crate) fn uci_to_move(pos: &Chess, uci: &str) -> Option<Move> {
    uci.parse::<Uci>().ok()?.to_move(pos).ok()
}

/// Parses a game record into its mainline without any evaluation.
///
/// # Errors
///
/// Returns [`AnalyzerError::InvalidGame`] for an empty or malformed record
/// or an illegal mainline move.
pub fn parse_game(pgn: &str) -> Result<ParsedGame, AnalyzerError> {
    let sans = mainline_sans(pgn)?;

    let mut pos = Chess::default();
    let mut moves = Vec::with_capacity(sans.len());
    let mut move_number = 1u32;

    for san in &sans {
        let mv = san_to_move(&pos, san)?;
        let color = Color::from(pos.turn());
        let uci = uci_of(&mv);
        let san_text = san_of(&pos, &mv);

        pos = pos
            .play(&mv)
            .map_err(|_| AnalyzerError::InvalidGame(format!("illegal move: {san}")))?;

        moves.push(ParsedMove {
            move_number,
            color,
            uci,
            san: san_text,
            fen_after: fen_of(&pos),
        });

        if color == Color::Black {
            move_number += 1;
        }
    }

    Ok(ParsedGame {
        fen: fen_of(&pos),
        moves,
    })
}
