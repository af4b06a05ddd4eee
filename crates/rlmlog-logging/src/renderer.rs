use std::fmt;
use std::io::{self, Write};
use std::sync::Mutex;

use rlmlog_core::{ExecutionResult, ReplEvent};

use crate::mode::RenderMode;
use crate::truncate;
use crate::view::ResultView;
use crate::{enhanced, plain};

/// Panel width used when the terminal size cannot be queried
pub const DEFAULT_WIDTH: usize = 80;

/// Renders REPL events to a terminal stream.
///
/// The mode is fixed at construction. Every render call is a no-op while the
/// renderer is disabled; otherwise the whole event is formatted first and then
/// written in one go, so events from concurrent callers never interleave.
pub struct EventRenderer {
    enabled: bool,
    mode: RenderMode,
    width: Option<usize>,
    out: Mutex<Box<dyn Write + Send>>,
}

impl EventRenderer {
    /// Renderer writing to stdout, with the mode detected from the environment
    pub fn new(enabled: bool) -> Self {
        Self::with_mode(enabled, RenderMode::detect())
    }

    /// Renderer writing to stdout in the given mode
    pub fn with_mode(enabled: bool, mode: RenderMode) -> Self {
        Self {
            enabled,
            mode,
            width: None,
            out: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Send output to `writer` instead of stdout
    pub fn with_writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.out = Mutex::new(Box::new(writer));
        self
    }

    /// Fix the enhanced panel width instead of following the terminal
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Show code that is about to run
    pub fn render_code(&self, code: &str) {
        if !self.enabled {
            return;
        }
        let text = match self.mode {
            RenderMode::Enhanced => enhanced::code(code, self.panel_width()),
            RenderMode::Plain => plain::code(code),
        };
        self.emit(&text);
    }

    /// Show the outcome of running code
    pub fn render_result(&self, result: &ExecutionResult) {
        if !self.enabled {
            return;
        }
        let view = ResultView::new(result);
        let text = match self.mode {
            RenderMode::Enhanced => enhanced::result(&view, self.panel_width()),
            RenderMode::Plain => plain::result(&view),
        };
        self.emit(&text);
    }

    /// Show a prompt sent to the language model
    pub fn render_llm_query(&self, prompt: &str) {
        if !self.enabled {
            return;
        }
        let prompt = truncate::llm_text(prompt);
        let text = match self.mode {
            RenderMode::Enhanced => enhanced::llm_query(&prompt, self.panel_width()),
            RenderMode::Plain => plain::llm_query(&prompt),
        };
        self.emit(&text);
    }

    /// Show a language model reply
    pub fn render_llm_response(&self, response: &str) {
        if !self.enabled {
            return;
        }
        let response = truncate::llm_text(response);
        let text = match self.mode {
            RenderMode::Enhanced => enhanced::llm_response(&response, self.panel_width()),
            RenderMode::Plain => plain::llm_response(&response),
        };
        self.emit(&text);
    }

    /// Dispatch any event to the matching render call
    pub fn render(&self, event: &ReplEvent) {
        match event {
            ReplEvent::Code { code } => self.render_code(code),
            ReplEvent::Result(result) => self.render_result(result),
            ReplEvent::LlmQuery { prompt } => self.render_llm_query(prompt),
            ReplEvent::LlmResponse { response } => self.render_llm_response(response),
        }
    }

    fn panel_width(&self) -> usize {
        self.width.unwrap_or_else(|| {
            crossterm::terminal::size()
                .map(|(cols, _)| usize::from(cols))
                .ok()
                .filter(|cols| *cols > 0)
                .unwrap_or(DEFAULT_WIDTH)
        })
    }

    fn emit(&self, text: &str) {
        let mut out = match self.out.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(err) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            tracing::debug!(error = %err, "failed to write rendered event");
        }
    }
}

impl fmt::Debug for EventRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventRenderer")
            .field("enabled", &self.enabled)
            .field("mode", &self.mode)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}
