//! UCI engine integration for the review pipeline.
//!
//! One [`UciEngine`] is one exclusive session with an external engine
//! process. All calls on a session are strictly sequential; concurrent
//! requests are served by distinct sessions, never by interleaving calls
//! on one. Pooling is the caller's concern.
//!
//! # Overview
//!
//! - [`Score`] - Centipawn or mate score with a finite sentinel resolution
//! - [`SearchLimit`] - Depth-bounded or time-bounded search budget
//! - [`UciEngine`] - A spawned engine process speaking UCI
//! - [`EvaluationOracle`] - The narrow interface consumed by analysis/play

pub mod engine;
pub mod score;

pub use engine::{
    CandidateLine, EngineError, EvaluationOracle, PositionAnalysis, SearchLimit, UciEngine,
};
pub use score::{Score, MATE_SCORE};
