//! Skill-calibrated live play.
//!
//! Independent of the analysis pipeline: given oracle-proposed candidate
//! moves and a target rating, the selector emulates bounded human
//! attention, and [`PlayService`] wires it to an engine session for one
//! move of live play.
//!
//! All randomness flows through an injected [`rand::Rng`], so a fixed seed
//! reproduces every selection exactly.

mod board;
pub mod humanize;
pub mod service;
pub mod themes;

pub use humanize::{priority_score, select_human_move};
pub use service::{PlayConfig, PlayError, PlayService, PlayedMove};
pub use themes::thematic_blunder;
