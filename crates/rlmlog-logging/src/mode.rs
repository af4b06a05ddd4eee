//! Rendering mode detection.
//!
//! Decides once, at renderer construction, whether styled terminal output can
//! be used.

use std::io::IsTerminal;

/// Force plain output regardless of the terminal
pub const PLAIN_ENV: &str = "RLMLOG_PLAIN";
/// Force enhanced output regardless of the terminal
pub const RICH_ENV: &str = "RLMLOG_RICH";

/// How events are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Colored panels, syntax highlighting and tables
    Enhanced,
    /// Banner-delimited unstyled text
    Plain,
}

impl RenderMode {
    /// Inspect the environment for styled-output support. Never fails; anything
    /// doubtful resolves to [`RenderMode::Plain`].
    pub fn detect() -> Self {
        let mode = Self::from_env(&EnvSnapshot::capture());
        tracing::debug!(?mode, "detected render mode");
        mode
    }

    fn from_env(env: &EnvSnapshot) -> Self {
        // Explicit settings win, plain over rich
        if env.force_plain {
            return RenderMode::Plain;
        }
        if env.force_rich {
            return RenderMode::Enhanced;
        }

        if env.no_color || env.dumb_terminal {
            return RenderMode::Plain;
        }

        if env.stdout_is_terminal {
            RenderMode::Enhanced
        } else {
            RenderMode::Plain
        }
    }

    pub fn is_enhanced(&self) -> bool {
        matches!(self, RenderMode::Enhanced)
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, RenderMode::Plain)
    }
}

impl std::str::FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "enhanced" | "rich" => Ok(RenderMode::Enhanced),
            "plain" => Ok(RenderMode::Plain),
            _ => Err(format!("Unknown render mode: {}", s)),
        }
    }
}

/// Snapshot of everything detection looks at
#[derive(Debug, Default, Clone, Copy)]
struct EnvSnapshot {
    force_plain: bool,
    force_rich: bool,
    no_color: bool,
    dumb_terminal: bool,
    stdout_is_terminal: bool,
}

impl EnvSnapshot {
    fn capture() -> Self {
        Self {
            force_plain: std::env::var_os(PLAIN_ENV).is_some(),
            force_rich: std::env::var_os(RICH_ENV).is_some(),
            no_color: std::env::var_os("NO_COLOR").is_some(),
            dumb_terminal: std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false),
            stdout_is_terminal: std::io::stdout().is_terminal(),
        }
    }
}
