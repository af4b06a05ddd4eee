//! # rlmlog-logging
//!
//! Terminal rendering for a code-executing REPL driven by a language model.
//!
//! Three kinds of events are shown: code about to run, the result of running
//! it, and LLM query/response exchanges.
//!
//! ## Key Types
//!
//! - [`EventRenderer`] - Renders events, gated by an `enabled` flag
//! - [`RenderMode`] - Enhanced (styled) or Plain output, detected once
//!
//! ## Render Modes
//!
//! - `Enhanced` - Colored panels, highlighted code, variable table
//! - `Plain` - Banner-delimited text carrying the same information
//!
//! Both modes share the truncation limits in [`truncate`] and the variable
//! filtering in [`view`].

mod enhanced;
mod global;
mod highlight;
mod mode;
mod plain;
mod renderer;
mod style;
pub mod truncate;
pub mod view;

pub use global::{configure, get_current_renderer};
pub use mode::{RenderMode, PLAIN_ENV, RICH_ENV};
pub use renderer::{EventRenderer, DEFAULT_WIDTH};
pub use view::{ResultView, VariableDisplayEntry};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing for the application.
///
/// Diagnostics go to stderr so they never mix with rendered events on stdout.
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
