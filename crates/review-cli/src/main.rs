//! Game review from the command line.
//!
//! Wraps the analysis pipeline and the play service around a UCI engine
//! and prints JSON to stdout.

use anyhow::Context;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use review_analysis::{parse_game, AnalysisConfig, GameAnalyzer};
use review_core::{find_key_moments, summarize, EvaluatedMove, GameSummary, KeyMoment};
use review_engine::UciEngine;
use review_openings::Opening;
use review_play::{PlayConfig, PlayService};

#[derive(Parser)]
#[command(name = "review")]
#[command(about = "Analyze chess games and play skill-calibrated moves")]
struct Cli {
    /// Path to a UCI engine executable.
    #[arg(long, global = true, default_value = "stockfish")]
    engine: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a PGN file: per-move quality, key moments, summary
    Analyze {
        /// PGN file to analyze
        pgn_file: String,
        /// Search depth override
        #[arg(short, long)]
        depth: Option<u32>,
        /// Rating assumed for brilliance strictness
        #[arg(long, default_value = "1200")]
        elo: u32,
        /// Maximum key moments to report
        #[arg(long, default_value = "5")]
        key_moments: usize,
    },
    /// Play one engine move from a FEN position
    Play {
        /// Position in FEN notation
        fen: String,
        /// Search depth override
        #[arg(short, long)]
        depth: Option<u32>,
        /// Emulated strength (400-3000)
        #[arg(long)]
        elo: Option<u32>,
        /// Seed for reproducible selection
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Parse a PGN file without evaluating it
    Parse {
        /// PGN file to parse
        pgn_file: String,
    },
}

/// Full analysis response.
#[derive(Serialize)]
struct AnalysisReport {
    opening: Option<Opening>,
    moves: Vec<EvaluatedMove>,
    summary: GameSummary,
    key_moments: Vec<KeyMoment>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            pgn_file,
            depth,
            elo,
            key_moments,
        } => {
            let pgn = std::fs::read_to_string(&pgn_file)
                .with_context(|| format!("failed to read {pgn_file}"))?;

            let mut engine = UciEngine::new(&cli.engine).context("failed to start engine")?;
            engine.configure(1, 256)?;

            let analyzer = GameAnalyzer::new(AnalysisConfig::default());
            let (moves, opening) = analyzer.analyze_pgn(&mut engine, &pgn, depth, elo)?;

            let report = AnalysisReport {
                opening,
                summary: summarize(&moves),
                key_moments: find_key_moments(&moves, key_moments),
                moves,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Play {
            fen,
            depth,
            elo,
            seed,
        } => {
            let mut engine = UciEngine::new(&cli.engine).context("failed to start engine")?;
            engine.configure(1, 256)?;

            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            let service = PlayService::new(PlayConfig::default());
            let played = service.play_move(&mut engine, &fen, depth, elo, &mut rng)?;
            println!("{}", serde_json::to_string_pretty(&played)?);
        }
        Commands::Parse { pgn_file } => {
            let pgn = std::fs::read_to_string(&pgn_file)
                .with_context(|| format!("failed to read {pgn_file}"))?;
            let parsed = parse_game(&pgn)?;
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
    }

    Ok(())
}
