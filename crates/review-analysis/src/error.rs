//! Analysis error types.

use thiserror::Error;

use review_engine::EngineError;

/// Errors that can occur during game analysis.
///
/// `InvalidGame` is recoverable and the caller's fault; `Engine` means the
/// external evaluation resource failed mid-analysis. In both cases no
/// partial move list is ever returned.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// The game record is missing, malformed, or contains illegal moves.
    #[error("Invalid game record: {0}")]
    InvalidGame(String),
    /// The evaluation engine failed or became unavailable.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}
