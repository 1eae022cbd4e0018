//! Headless self-play runner (default binary).
//!
//! Plays one game with a seeded random placement policy and reports the
//! outcome. There is no rendering or keyboard input; the final state can be
//! printed as JSON for a separate viewer.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{info, warn};

use tetris_2048::core::{EngineConfig, SimpleRng};
use tetris_2048::engine::{apply_place, Game};
use tetris_2048::types::{PieceKind, Rotation};

/// Placements tried for one piece before falling back to a plain hard drop
const PLACE_ATTEMPTS: usize = 8;

#[derive(Debug, Parser)]
#[command(author, version, about = "Play Tetris 2048 headlessly with a random policy")]
struct Cli {
    /// Seed for pieces, tile values and the policy
    #[arg(long, default_value_t = 1)]
    seed: u32,

    /// Stop after this many pieces even if the game is still running
    #[arg(long, value_name = "N", default_value_t = 500)]
    max_pieces: u32,

    /// JSON file with engine settings (missing fields use the 20x12 defaults)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Piece kinds to draw from, e.g. "ioz" (default: all seven)
    #[arg(long, value_name = "KINDS")]
    kinds: Option<String>,

    /// Print the final snapshot as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: EngineConfig = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    config.validate().context("invalid engine config")?;
    Ok(config)
}

fn parse_kinds(raw: Option<&str>) -> Result<Vec<PieceKind>> {
    let Some(raw) = raw else {
        return Ok(PieceKind::ALL.to_vec());
    };
    raw.chars()
        .map(|c| {
            PieceKind::from_str(&c.to_string())
                .with_context(|| format!("unknown piece kind {:?}", c))
        })
        .collect()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = load_config(cli.config.as_ref())?;
    let kinds = parse_kinds(cli.kinds.as_deref())?;
    let mut game = Game::with_kinds(config, cli.seed, &kinds)?;
    game.start();

    let mut policy = SimpleRng::new(cli.seed.wrapping_add(1));
    let rotations = [Rotation::North, Rotation::East, Rotation::South, Rotation::West];
    let width = config.width as u32;

    let mut pieces = 0;
    while !game.finished() && pieces < cli.max_pieces {
        let mut placed = false;
        for _ in 0..PLACE_ATTEMPTS {
            let rotation = rotations[policy.next_range(4) as usize];
            let col = policy.next_range(width) as i32;
            if apply_place(&mut game, col, rotation).is_ok() {
                placed = true;
                break;
            }
        }
        if !placed && game.hard_drop().is_none() {
            warn!("no piece to drop; stopping");
            break;
        }
        pieces += 1;
    }

    let engine = game.engine();
    info!(
        "seed={} pieces={} score={} lines={} won={} game_over={}",
        cli.seed,
        pieces,
        engine.score(),
        engine.lines(),
        engine.won(),
        engine.game_over()
    );

    if cli.json {
        let out = serde_json::to_string_pretty(&game.snapshot())
            .context("failed to serialize snapshot")?;
        println!("{}", out);
    }

    Ok(())
}
