//! Styled rendering: colored panels, highlighted code and a variable table.

use colored::Color;

use crate::highlight::highlight_python;
use crate::style::{Line, Panel, Span, Style, Table};
use crate::view::{ResultView, Status};

pub fn code(code: &str, width: usize) -> String {
    Panel::new(
        Line::styled("Code Execution", Style::fg(Color::Cyan).bold()),
        highlight_python(code),
        Style::fg(Color::Cyan),
    )
    .render(width)
}

pub fn llm_query(text: &str, width: usize) -> String {
    llm_panel("LLM Query", text, width)
}

pub fn llm_response(text: &str, width: usize) -> String {
    llm_panel("LLM Response", text, width)
}

fn llm_panel(title: &str, text: &str, width: usize) -> String {
    Panel::new(
        Line::styled(title, Style::fg(Color::Blue).bold()),
        Line::from_text(text, Style::fg(Color::White)),
        Style::fg(Color::Blue),
    )
    .render(width)
}

fn status_color(status: Status) -> Color {
    if status.is_success() {
        Color::Green
    } else {
        Color::Red
    }
}

/// Result panel, followed by the variable table when there are user variables
pub fn result(view: &ResultView, width: usize) -> String {
    let color = status_color(view.status);

    let mut body = vec![Line::styled(view.elapsed_line(), Style::dimmed())];
    if let Some(stdout) = &view.stdout {
        body.push(Line::styled("Output:", Style::fg(Color::Yellow).bold()));
        body.extend(Line::from_text(stdout, Style::fg(Color::White)));
    }
    if let Some(stderr) = &view.stderr {
        body.push(Line::styled("Errors:", Style::fg(Color::Red).bold()));
        body.extend(Line::from_text(stderr, Style::fg(Color::Red)));
    }
    if !view.variables.is_empty() {
        body.push(Line::styled("Variables:", Style::fg(Color::Magenta).bold()));
        if let Some(more) = view.variables.more_line() {
            body.push(Line::styled(format!("  {}", more), Style::dimmed()));
        }
    }

    let title = Line(vec![
        Span::new("Result: ", Style::default().bold()),
        Span::new(view.status.label(), Style::fg(color).bold()),
    ]);
    let mut out = Panel::new(title, body, Style::fg(color)).render(width);

    if !view.variables.is_empty() {
        let mut table = Table::new();
        table.add_column("Name", Style::fg(Color::Cyan));
        table.add_column("Type", Style::fg(Color::Yellow));
        table.add_column("Value", Style::fg(Color::White));
        for entry in &view.variables.entries {
            table.add_row(vec![
                entry.name.clone(),
                entry.type_name.clone(),
                entry.value.clone(),
            ]);
        }
        out.push_str(&table.render());
    }
    out
}
