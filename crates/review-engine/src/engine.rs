//! UCI engine session management.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use thiserror::Error;
use tracing::debug;

use crate::score::Score;

/// Maximum number of lines to read before giving up on a UCI response.
pub const MAX_UCI_LINES: usize = 4096;

/// Errors that can occur when working with an engine session.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Failed to spawn the engine process.
    #[error("Failed to spawn engine: {0}")]
    SpawnError(#[from] std::io::Error),
    /// Engine executable was not found at the specified path.
    #[error("Engine not found at path: {0}")]
    NotFound(String),
    /// Engine failed to initialize properly (UCI handshake failed).
    #[error("Engine initialization failed")]
    InitFailed,
    /// Engine returned an invalid or unexpected response.
    #[error("Invalid engine response: {0}")]
    InvalidResponse(String),
}

/// Search budget for a single oracle call.
///
/// Depth-bounded search is the cheap default; time-bounded search is used
/// where fidelity matters more than cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchLimit {
    /// Search to a fixed depth in plies.
    Depth(u32),
    /// Search for a fixed wall-clock budget in milliseconds.
    MoveTime(u64),
}

impl SearchLimit {
    fn go_command(self) -> String {
        match self {
            SearchLimit::Depth(depth) => format!("go depth {depth}"),
            SearchLimit::MoveTime(ms) => format!("go movetime {ms}"),
        }
    }
}

/// Result of analyzing a position.
#[derive(Debug, Clone)]
pub struct PositionAnalysis {
    /// The best move found, in UCI notation.
    pub best_move: String,
    /// Score from the side to move's perspective.
    pub score: Score,
    /// The search depth reached.
    pub depth: u32,
    /// The number of nodes searched.
    pub nodes: u64,
    /// The principal variation.
    pub pv: Vec<String>,
}

/// One candidate line from a multi-line search.
#[derive(Debug, Clone)]
pub struct CandidateLine {
    /// The line's first move, in UCI notation.
    pub uci: String,
    /// Score from the side to move's perspective.
    pub score: Score,
    /// The full line.
    pub pv: Vec<String>,
}

/// The narrow evaluation interface consumed by the pipeline and the play
/// service. Implemented by [`UciEngine`]; tests substitute scripted
/// oracles.
pub trait EvaluationOracle {
    /// Resets engine state between games.
    fn new_game(&mut self) -> Result<(), EngineError>;

    /// Evaluates a position within the given budget.
    fn analyze(&mut self, fen: &str, limit: SearchLimit) -> Result<PositionAnalysis, EngineError>;

    /// Evaluates a position returning up to `lines` candidate lines.
    fn analyze_lines(
        &mut self,
        fen: &str,
        limit: SearchLimit,
        lines: u32,
    ) -> Result<Vec<CandidateLine>, EngineError>;

    /// Picks a move to play within the given budget.
    fn bestmove(&mut self, fen: &str, limit: SearchLimit) -> Result<String, EngineError>;

    /// Limits engine strength to a target rating, or restores full strength.
    fn set_strength(&mut self, elo: Option<u32>) -> Result<(), EngineError>;
}

/// An exclusive session with a UCI-compatible engine like Stockfish.
pub struct UciEngine {
    /// The engine process handle.
    process: Child,
    /// Writer for sending commands to the engine.
    stdin: ChildStdin,
    /// Reader for receiving responses from the engine.
    stdout: BufReader<ChildStdout>,
    /// The engine's name (reported via UCI id).
    name: String,
}

/// Parsed fields of one `info` line.
struct InfoLine {
    depth: u32,
    multipv: u32,
    score: Score,
    nodes: u64,
    pv: Vec<String>,
}

impl UciEngine {
    /// Spawns the engine process and performs the UCI handshake.
    ///
    /// # Errors
    ///
    /// - [`EngineError::NotFound`] if the executable does not exist
    /// - [`EngineError::SpawnError`] if the process fails to start
    /// - [`EngineError::InitFailed`] if the UCI handshake fails
    pub fn new(engine_path: &str) -> Result<Self, EngineError> {
        let mut process = Command::new(engine_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    EngineError::NotFound(engine_path.to_string())
                } else {
                    EngineError::SpawnError(e)
                }
            })?;

        let stdin = process.stdin.take().ok_or(EngineError::InitFailed)?;
        let stdout = process.stdout.take().ok_or(EngineError::InitFailed)?;
        let stdout = BufReader::new(stdout);

        let mut engine = Self {
            process,
            stdin,
            stdout,
            name: String::new(),
        };

        engine.init_uci()?;
        debug!(engine = %engine.name, "engine session ready");

        Ok(engine)
    }

    /// Initialize the UCI protocol with the engine.
    fn init_uci(&mut self) -> Result<(), EngineError> {
        self.send_command("uci")?;

        let mut name = String::new();
        let mut lines_read = 0;
        loop {
            if lines_read > MAX_UCI_LINES {
                return Err(EngineError::InitFailed);
            }
            lines_read += 1;
            let line = self.read_line()?;
            if let Some(reported) = line.strip_prefix("id name ") {
                name = reported.to_string();
            } else if line == "uciok" {
                break;
            }
        }

        self.name = if name.is_empty() {
            "Unknown Engine".to_string()
        } else {
            name
        };

        self.wait_ready()
    }

    /// Returns the engine's name as reported via UCI.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets an arbitrary UCI option.
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), EngineError> {
        self.send_command(&format!("setoption name {name} value {value}"))
    }

    /// Configures search threads and hash size.
    pub fn configure(&mut self, threads: u32, hash_mb: u32) -> Result<(), EngineError> {
        self.set_option("Threads", &threads.to_string())?;
        self.set_option("Hash", &hash_mb.to_string())?;
        self.wait_ready()
    }

    /// Sends `isready` and blocks until `readyok`.
    fn wait_ready(&mut self) -> Result<(), EngineError> {
        self.send_command("isready")?;
        let mut lines_read = 0;
        loop {
            if lines_read > MAX_UCI_LINES {
                return Err(EngineError::InitFailed);
            }
            lines_read += 1;
            if self.read_line()? == "readyok" {
                return Ok(());
            }
        }
    }

    /// Runs a search on the current position and collects the info lines.
    ///
    /// Returns the per-line slots (indexed by MultiPV rank) and the final
    /// best move.
    fn run_search(
        &mut self,
        limit: SearchLimit,
        lines: u32,
    ) -> Result<(Vec<Option<InfoLine>>, String), EngineError> {
        let go = limit.go_command();
        debug!(command = %go, "starting search");
        self.send_command(&go)?;

        let mut slots: Vec<Option<InfoLine>> = Vec::new();
        slots.resize_with(lines.max(1) as usize, || None);
        let mut best_move = String::new();

        let mut lines_read = 0;
        loop {
            if lines_read > MAX_UCI_LINES {
                return Err(EngineError::InvalidResponse(
                    "Too many lines without bestmove".to_string(),
                ));
            }
            lines_read += 1;
            let line = self.read_line()?;

            if line.starts_with("info depth ") {
                if let Some(parsed) = Self::parse_info_line(&line) {
                    let slot = (parsed.multipv as usize).saturating_sub(1);
                    if slot < slots.len() {
                        slots[slot] = Some(parsed);
                    }
                }
            } else if let Some(rest) = line.strip_prefix("bestmove ") {
                if let Some(mv) = rest.split_whitespace().next() {
                    best_move = mv.to_string();
                }
                break;
            }
        }

        if best_move.is_empty() {
            return Err(EngineError::InvalidResponse(
                "No best move received".to_string(),
            ));
        }

        Ok((slots, best_move))
    }

    /// Parse a UCI info line.
    ///
    /// Format: `info depth X [multipv M] score cp Y nodes Z pv move1 ...`
    /// (or `score mate Y`).
    fn parse_info_line(line: &str) -> Option<InfoLine> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        let mut depth: Option<u32> = None;
        let mut multipv: u32 = 1;
        let mut cp: Option<i32> = None;
        let mut mate: Option<i32> = None;
        let mut nodes: u64 = 0;
        let mut pv: Vec<String> = Vec::new();
        let mut in_pv = false;

        let mut i = 0;
        while i < parts.len() {
            match parts[i] {
                "depth" => {
                    if i + 1 < parts.len() {
                        depth = parts[i + 1].parse().ok();
                        i += 1;
                    }
                }
                "multipv" => {
                    if i + 1 < parts.len() {
                        multipv = parts[i + 1].parse().unwrap_or(1);
                        i += 1;
                    }
                }
                "score" => {
                    if i + 2 < parts.len() {
                        match parts[i + 1] {
                            "cp" => {
                                cp = parts[i + 2].parse().ok();
                                i += 2;
                            }
                            "mate" => {
                                mate = parts[i + 2].parse().ok();
                                i += 2;
                            }
                            _ => {}
                        }
                    }
                }
                "nodes" => {
                    if i + 1 < parts.len() {
                        nodes = parts[i + 1].parse().unwrap_or(0);
                        i += 1;
                    }
                }
                "pv" => {
                    in_pv = true;
                }
                _ => {
                    if in_pv {
                        pv.push(parts[i].to_string());
                    }
                }
            }
            i += 1;
        }

        let depth = depth?;
        let score = match (cp, mate) {
            (Some(cp), _) => Score::Cp(cp),
            (None, Some(mate)) => Score::Mate(mate),
            (None, None) => return None,
        };

        Some(InfoLine {
            depth,
            multipv,
            score,
            nodes,
            pv,
        })
    }

    /// Loads a position given in FEN notation.
    fn set_position(&mut self, fen: &str) -> Result<(), EngineError> {
        self.send_command(&format!("position fen {fen}"))
    }

    /// Send a command to the engine.
    fn send_command(&mut self, command: &str) -> Result<(), EngineError> {
        writeln!(self.stdin, "{command}")?;
        self.stdin.flush()?;
        Ok(())
    }

    /// Read a line from the engine's output.
    fn read_line(&mut self) -> Result<String, EngineError> {
        let mut line = String::new();
        let bytes = self.stdout.read_line(&mut line)?;
        if bytes == 0 {
            return Err(EngineError::InvalidResponse(
                "Engine closed unexpectedly".to_string(),
            ));
        }
        Ok(line.trim().to_string())
    }
}

impl EvaluationOracle for UciEngine {
    fn new_game(&mut self) -> Result<(), EngineError> {
        self.send_command("ucinewgame")?;
        self.wait_ready()
    }

    fn analyze(&mut self, fen: &str, limit: SearchLimit) -> Result<PositionAnalysis, EngineError> {
        self.set_position(fen)?;
        let (mut slots, best_move) = self.run_search(limit, 1)?;

        let (score, depth, nodes, pv) = match slots[0].take() {
            Some(info) => (info.score, info.depth, info.nodes, info.pv),
            None => (Score::Cp(0), 0, 0, Vec::new()),
        };

        Ok(PositionAnalysis {
            best_move,
            score,
            depth,
            nodes,
            pv,
        })
    }

    fn analyze_lines(
        &mut self,
        fen: &str,
        limit: SearchLimit,
        lines: u32,
    ) -> Result<Vec<CandidateLine>, EngineError> {
        self.set_option("MultiPV", &lines.to_string())?;
        self.set_position(fen)?;
        let searched = self.run_search(limit, lines);
        // Restore single-line search before reporting any error.
        let restore = self.set_option("MultiPV", "1");
        let (slots, _) = searched?;
        restore?;

        let candidates = slots
            .into_iter()
            .flatten()
            .filter_map(|info| {
                info.pv.first().cloned().map(|uci| CandidateLine {
                    uci,
                    score: info.score,
                    pv: info.pv,
                })
            })
            .collect();

        Ok(candidates)
    }

    fn bestmove(&mut self, fen: &str, limit: SearchLimit) -> Result<String, EngineError> {
        self.set_position(fen)?;
        let (_, best_move) = self.run_search(limit, 1)?;
        Ok(best_move)
    }

    fn set_strength(&mut self, elo: Option<u32>) -> Result<(), EngineError> {
        match elo {
            Some(elo) => {
                self.set_option("UCI_LimitStrength", "true")?;
                self.set_option("UCI_Elo", &elo.to_string())?;
            }
            None => {
                self.set_option("UCI_LimitStrength", "false")?;
            }
        }
        self.wait_ready()
    }
}

impl Drop for UciEngine {
    fn drop(&mut self) {
        // Ask the engine to exit and reap the process.
        let _ = self.send_command("quit");
        let _ = self.process.wait();
    }
}
