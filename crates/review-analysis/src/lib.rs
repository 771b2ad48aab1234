//! Game evaluation pipeline.
//!
//! Drives one full game through an [`EvaluationOracle`], choosing per-move
//! search budgets, short-circuiting known opening positions, deepening
//! analysis of tactically interesting moves, and upgrading qualifying best
//! moves to brilliancies.
//!
//! # Overview
//!
//! - [`GameAnalyzer`] - Analyzes a complete game record
//! - [`AnalysisConfig`] - Explicit per-analyzer configuration
//! - [`AnalyzerError`] - Distinguishes bad input from engine failure
//! - [`parse_game`] - Evaluation-free game record intake
//!
//! [`EvaluationOracle`]: review_engine::EvaluationOracle

pub mod analyzer;
pub mod config;
pub mod error;
pub mod heuristics;
pub mod parse;

pub use analyzer::GameAnalyzer;
pub use config::AnalysisConfig;
pub use error::AnalyzerError;
pub use parse::{parse_game, ParsedGame, ParsedMove};
