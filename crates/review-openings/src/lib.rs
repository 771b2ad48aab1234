//! Curated opening knowledge for the review pipeline.
//!
//! Two small, fast lookups keyed by normalized position: a membership test
//! used to short-circuit engine evaluation of well-known early positions,
//! and a name table resolving positions to ECO codes.
//!
//! Both operate on FEN strings so this crate stays independent of any
//! particular rules library.

pub mod book;
pub mod opening;

pub use book::{is_book_position, normalize_fen};
pub use opening::{detect_opening, Opening};
