//! Core domain types and classification logic for game review.
//!
//! Everything in this crate is a total function over its documented input
//! domain: classification, brilliance gating, key moment detection, and
//! rating estimation never touch an engine and never fail.
//!
//! # Overview
//!
//! - [`MoveQuality`] - Closed set of quality tags with the eval-loss classifier
//! - [`EvaluatedMove`] - Immutable per-move analysis record
//! - [`BrilliantContext`] / [`is_brilliant`] - Multi-gate brilliancy override
//! - [`KeyMoment`] / [`find_key_moments`] - Blunders, swings, and missed wins
//! - [`RatingEstimate`] / [`estimate_rating`] - Elo-like strength estimate
//! - [`summarize`] - Per-player summary with cross-player sanity correction

pub mod brilliance;
pub mod color;
pub mod key_moments;
pub mod material;
pub mod moves;
pub mod quality;
pub mod rating;
pub mod stats;
pub mod summary;

pub use brilliance::{is_brilliant, BrilliantContext};
pub use color::Color;
pub use key_moments::{find_key_moments, KeyMoment, MomentReason};
pub use material::{is_piece_hanging, material_count, piece_value};
pub use moves::EvaluatedMove;
pub use quality::MoveQuality;
pub use rating::{estimate_rating, RatingEstimate};
pub use stats::{accuracy_percentage, acpl, count_by_quality, QualityCounts};
pub use summary::{summarize, GameSummary, PlayerSummary};
