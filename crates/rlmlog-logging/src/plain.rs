//! Unstyled, banner-delimited rendering.

use std::fmt::Write;

use crate::view::ResultView;

/// Width of the `=` banner lines
pub const BANNER_WIDTH: usize = 50;

fn banner() -> String {
    "=".repeat(BANNER_WIDTH)
}

/// Leading blank line, banner, title, banner, body, closing banner
fn titled_block(title: &str, body: &str) -> String {
    let banner = banner();
    format!("\n{banner}\n{title}\n{banner}\n{body}\n{banner}\n")
}

pub fn code(code: &str) -> String {
    titled_block("CODE EXECUTION", code)
}

pub fn llm_query(text: &str) -> String {
    titled_block("LLM QUERY", text)
}

pub fn llm_response(text: &str) -> String {
    titled_block("LLM RESPONSE", text)
}

pub fn result(view: &ResultView) -> String {
    let banner = banner();
    let mut out = String::new();

    let _ = writeln!(out, "\n{}", banner);
    let _ = writeln!(
        out,
        "RESULT: {} (executed in {})",
        view.status.label(),
        view.elapsed
    );
    let _ = writeln!(out, "{}", banner);

    if let Some(stdout) = &view.stdout {
        let _ = writeln!(out, "\nOutput:");
        let _ = writeln!(out, "{}", stdout);
    }

    if let Some(stderr) = &view.stderr {
        let _ = writeln!(out, "\nErrors:");
        let _ = writeln!(out, "{}", stderr);
    }

    if !view.variables.is_empty() {
        let _ = writeln!(out, "\nVariables:");
        for entry in &view.variables.entries {
            let _ = writeln!(
                out,
                "  {} ({}): {}",
                entry.name, entry.type_name, entry.value
            );
        }
        if let Some(more) = view.variables.more_line() {
            let _ = writeln!(out, "  {}", more);
        }
    }

    let _ = writeln!(out, "{}", banner);
    out
}
