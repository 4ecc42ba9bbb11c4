//! Blockfall: falling-block puzzle game in the terminal.

use anyhow::{Context, Result, bail};
use blockfall::app::App;
use blockfall::audio::Speaker;
use blockfall::config::{GameConfig, MIN_TICK_RATE};
use blockfall::shapes::TetrominoKind;
use blockfall::theme::Theme;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }
    let theme = Theme::load(args.theme.as_deref(), !args.plain)
        .with_context(|| format!("loading theme {:?}", args.theme))?;
    let config = args.game_config()?;
    info!(?config, "starting");

    let mut app = App::new(config, theme, Speaker::new(args.bell))?;
    app.run()
}

/// Logs go to a file; the game owns the terminal.
fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
    Ok(())
}

/// Falling-block puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "blockfall",
    version,
    about = "Falling-block puzzle in the terminal. Complete rows to clear them and score.",
    long_about = "Blockfall is a terminal falling-block puzzle.\n\n\
        Pieces fall one row per tick; the tick rate rises with your score. Fill a row \
        edge to edge to clear it. The game ends when a new piece cannot enter the board.\n\n\
        CONTROLS:\n  Left/Right or h/l  Move       Up or k    Rotate CW   Down or j   Rotate CCW\n  \
        Space              Hard drop / start / resume   Esc or P   Pause      Q   Quit\n\n\
        Use --theme to load a btop-style theme file with theme[piece_i]=\"#00FFFF\" style keys."
)]
pub struct Args {
    /// Playfield width in columns.
    #[arg(long, default_value = "10", value_name = "COLS",
        value_parser = clap::value_parser!(u16).range(4..=64))]
    pub width: u16,

    /// Playfield height in rows.
    #[arg(long, default_value = "20", value_name = "ROWS",
        value_parser = clap::value_parser!(u16).range(2..=64))]
    pub height: u16,

    /// Seed for the piece generator; makes games reproducible.
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Fixed piece order, cycled (letters from IJLOSTZP, e.g. "IOTS").
    #[arg(long, value_name = "LETTERS")]
    pub sequence: Option<String>,

    /// Gravity ticks per second at score 0.
    #[arg(long, default_value = "3.0", value_name = "RATE")]
    pub tick_rate: f64,

    /// Points needed to add one tick per second.
    #[arg(long, default_value = "1000", value_name = "POINTS")]
    pub score_step: f64,

    /// Path to theme file (btop-style theme[key]="value").
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<PathBuf>,

    /// Draw pieces as plain blocks instead of textured glyphs.
    #[arg(long)]
    pub plain: bool,

    /// Ring the terminal bell on drops, row clears and game over.
    #[arg(long)]
    pub bell: bool,

    /// Write logs to this file (level from RUST_LOG, default info).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    fn game_config(&self) -> Result<GameConfig> {
        if !(self.tick_rate >= MIN_TICK_RATE) {
            bail!("--tick-rate must be at least {MIN_TICK_RATE}");
        }
        if !(self.score_step > 0.0) {
            bail!("--score-step must be positive");
        }
        let sequence = match &self.sequence {
            None => None,
            Some(s) => Some(parse_sequence(s)?),
        };
        Ok(GameConfig {
            width: usize::from(self.width),
            height: usize::from(self.height),
            seed: self.seed,
            sequence,
            base_rate: self.tick_rate,
            score_step: self.score_step,
        })
    }
}

fn parse_sequence(s: &str) -> Result<Vec<TetrominoKind>> {
    let kinds = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| TetrominoKind::from_letter(c).with_context(|| format!("unknown piece '{c}'")))
        .collect::<Result<Vec<_>>>()?;
    if kinds.is_empty() {
        bail!("--sequence needs at least one piece");
    }
    Ok(kinds)
}
