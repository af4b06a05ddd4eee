//! Replays a JSON-lines log of REPL events through a renderer.

use std::io::BufRead;

use anyhow::{Context, Result};
use rlmlog_core::ReplEvent;
use rlmlog_logging::EventRenderer;

/// Counters for one replay run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStats {
    /// Well-formed events read from the input
    pub parsed: usize,
    /// Events actually drawn (zero when the renderer is disabled)
    pub rendered: usize,
    pub skipped: usize,
}

/// Parse one input line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Option<serde_json::Result<ReplEvent>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    Some(serde_json::from_str(line))
}

/// Render every event read from `reader`.
///
/// Malformed lines are skipped with a warning, or abort the replay when
/// `strict` is set.
pub fn replay<R: BufRead>(reader: R, renderer: &EventRenderer, strict: bool) -> Result<ReplayStats> {
    let mut stats = ReplayStats::default();

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.with_context(|| format!("Failed to read line {}", line_number))?;

        match parse_line(&line) {
            None => continue,
            Some(Ok(event)) => {
                stats.parsed += 1;
                if renderer.enabled() {
                    renderer.render(&event);
                    stats.rendered += 1;
                }
            }
            Some(Err(err)) if strict => {
                return Err(err).with_context(|| format!("Invalid event on line {}", line_number));
            }
            Some(Err(err)) => {
                tracing::warn!(line = line_number, error = %err, "skipping invalid event");
                stats.skipped += 1;
            }
        }
    }

    Ok(stats)
}
