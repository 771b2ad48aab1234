//! Opening book membership.
//!
//! A deliberately small curated set of early-game positions. Membership is
//! tested on the normalized FEN (board, side to move, castling rights), so
//! move counters and en passant state never cause a miss.

/// Known book positions, normalized. Extend over time.
const BOOK_POSITIONS: &[&str] = &[
    // Starting position
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq",
    // After 1.e4
    "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq",
    // After 1.d4
    "rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b KQkq",
    // After 1.e4 e5
    "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq",
    // After 1.e4 c5
    "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq",
    // After 1.e4 e5 2.Nf3
    "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq",
    // After 2...Nc6
    "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq",
    // Ruy Lopez after 3.Bb5
    "r1bqkbnr/pppp1ppp/2n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R b KQkq",
    // After 3...a6
    "r1bqkbnr/1ppp1ppp/p1n5/1B2p3/4P3/5N2/PPPP1PPP/RNBQK2R w KQkq",
];

/// Strips a FEN down to its rules fields: board, side to move, castling.
pub fn normalize_fen(fen: &str) -> String {
    fen.split_whitespace().take(3).collect::<Vec<_>>().join(" ")
}

/// Whether the position is in the curated book set.
pub fn is_book_position(fen: &str) -> bool {
    let key = normalize_fen(fen);
    BOOK_POSITIONS.iter().any(|p| *p == key)
}
