mod config;
mod replay;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use config::{ModeSetting, RlmlogConfig};
use rlmlog_logging::{configure, init_tracing, EventRenderer, RenderMode};

#[derive(Parser, Debug)]
#[command(
    name = "rlmlog",
    about = "Render a REPL event log (code, results, LLM exchanges) in the terminal",
    version,
    author
)]
struct Cli {
    /// JSON-lines event file (default: stdin, also with "-")
    input: Option<PathBuf>,

    /// Rendering mode (default: from config, else auto-detect)
    #[arg(short, long, value_enum)]
    mode: Option<ModeChoice>,

    /// Parse events without rendering them
    #[arg(long)]
    disabled: bool,

    /// Stop at the first malformed event instead of skipping it
    #[arg(long)]
    strict: bool,

    /// Panel width in enhanced mode (default: terminal width)
    #[arg(short, long)]
    width: Option<usize>,

    /// Diagnostic log level (overridden by RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,

    /// Config file (default: ./rlmlog.toml, then the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeChoice {
    Auto,
    Plain,
    Enhanced,
}

impl From<ModeChoice> for ModeSetting {
    fn from(choice: ModeChoice) -> Self {
        match choice {
            ModeChoice::Auto => ModeSetting::Auto,
            ModeChoice::Plain => ModeSetting::Plain,
            ModeChoice::Enhanced => ModeSetting::Enhanced,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let working_dir = std::env::current_dir().context("Failed to get current directory")?;
    let config = match &cli.config {
        Some(path) => RlmlogConfig::load_from(path)?,
        None => RlmlogConfig::load(&working_dir)?.unwrap_or_default(),
    };

    let level = cli
        .log_level
        .clone()
        .or_else(|| config.log_level.clone())
        .unwrap_or_else(|| "warn".to_string());
    init_tracing(&level);

    let renderer = build_renderer(&cli, &config);
    tracing::debug!(?renderer, "renderer ready");

    let stats = match cli.input.as_deref() {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            replay::replay(BufReader::new(file), &renderer, cli.strict)?
        }
        _ => replay::replay(io::stdin().lock(), &renderer, cli.strict)?,
    };

    tracing::info!(
        parsed = stats.parsed,
        rendered = stats.rendered,
        skipped = stats.skipped,
        "replay finished"
    );
    Ok(())
}

/// CLI flags override the config file. In auto mode the process-wide renderer
/// is always reconfigured, and a `--width` copy of it is used for the replay.
fn build_renderer(cli: &Cli, config: &RlmlogConfig) -> Arc<EventRenderer> {
    let enabled = !cli.disabled && config.enabled.unwrap_or(true);
    let mode = cli
        .mode
        .map(ModeSetting::from)
        .or(config.mode)
        .unwrap_or_default();

    let renderer = match mode {
        ModeSetting::Auto => {
            let current = configure(enabled);
            match cli.width {
                Some(_) => EventRenderer::with_mode(enabled, current.mode()),
                None => return current,
            }
        }
        ModeSetting::Plain => EventRenderer::with_mode(enabled, RenderMode::Plain),
        ModeSetting::Enhanced => {
            // Keep styling even when stdout is piped
            colored::control::set_override(true);
            EventRenderer::with_mode(enabled, RenderMode::Enhanced)
        }
    };

    match cli.width {
        Some(width) => Arc::new(renderer.with_width(width)),
        None => Arc::new(renderer),
    }
}
