//! Analysis configuration.

/// Configuration for game analysis.
///
/// Passed explicitly into the analyzer at construction; there is no global
/// settings lookup.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Baseline search depth for every move.
    pub base_depth: u32,
    /// Shallow depth used while still inside the opening window.
    pub opening_depth: u32,
    /// Time budget (ms) for re-evaluating tactically interesting moves.
    /// Time-bounded search is treated as higher fidelity than the
    /// depth-bounded default.
    pub deep_time_ms: u64,
    /// Time budget (ms) for evaluating the opponent's best reply when
    /// judging brilliance.
    pub reply_time_ms: u64,
    /// Full moves considered part of the opening phase.
    pub opening_max_full_moves: u32,
    /// Full moves eligible for the opening book shortcut.
    pub book_max_full_moves: u32,
    /// Candidate lines requested when probing alternatives for the
    /// brilliance gates.
    pub brilliance_lines: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            base_depth: 14,
            opening_depth: 8,
            deep_time_ms: 150,
            reply_time_ms: 50,
            opening_max_full_moves: 10,
            book_max_full_moves: 10,
            brilliance_lines: 4,
        }
    }
}
