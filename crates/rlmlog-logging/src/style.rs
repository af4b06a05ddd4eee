//! Minimal styled-text building blocks for enhanced mode: spans, panels and
//! borderless tables.
//!
//! Layout is computed on the unstyled text in terminal columns, styling is
//! applied last, so the ANSI escapes never affect alignment.

use colored::{Color, ColoredString, Colorize};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Text attributes of a span
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Style {
    pub color: Option<Color>,
    pub bold: bool,
    pub dim: bool,
}

impl Style {
    pub fn fg(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Default::default()
        }
    }

    pub fn dimmed() -> Self {
        Self {
            dim: true,
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn paint(&self, text: &str) -> String {
        if *self == Style::default() {
            return text.to_string();
        }
        let mut styled: ColoredString = text.normal();
        if let Some(color) = self.color {
            styled = styled.color(color);
        }
        if self.bold {
            styled = styled.bold();
        }
        if self.dim {
            styled = styled.dimmed();
        }
        styled.to_string()
    }
}

/// A run of text sharing one style. Never contains a newline.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub style: Style,
}

impl Span {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into().replace('\t', "    "),
            style,
        }
    }

    fn width(&self) -> usize {
        self.text.width()
    }
}

/// Remove escape sequences and other control characters from captured text.
/// Newlines survive and tabs become four spaces.
pub fn sanitize(text: &str) -> String {
    strip_ansi_escapes::strip_str(text.replace('\t', "    "))
        .chars()
        .filter(|c| !c.is_control() || *c == '\n')
        .collect()
}

/// One visual line made of spans
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line(pub Vec<Span>);

impl Line {
    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Line(vec![Span::new(text, style)])
    }

    /// Split multi-line text into one line per `\n`, all in the same style.
    /// Escape sequences in `text` are dropped.
    pub fn from_text(text: &str, style: Style) -> Vec<Line> {
        sanitize(text)
            .split('\n')
            .map(|line| Line::styled(line, style))
            .collect()
    }

    pub fn push(&mut self, span: Span) {
        self.0.push(span);
    }

    pub fn width(&self) -> usize {
        self.0.iter().map(Span::width).sum()
    }

    #[cfg(test)]
    pub fn plain_text(&self) -> String {
        self.0.iter().map(|span| span.text.as_str()).collect()
    }

    pub fn paint(&self) -> String {
        self.0.iter().map(|span| span.style.paint(&span.text)).collect()
    }

    /// Hard-wrap into lines of at most `width` terminal columns
    pub fn wrap(&self, width: usize) -> Vec<Line> {
        let width = width.max(1);
        if self.width() <= width {
            return vec![self.clone()];
        }

        let mut lines = Vec::new();
        let mut current = Line::default();
        let mut used = 0;
        for span in &self.0 {
            let mut chunk = String::new();
            for c in span.text.chars() {
                let cells = c.width().unwrap_or(0);
                if used > 0 && used + cells > width {
                    if !chunk.is_empty() {
                        current.push(Span::new(std::mem::take(&mut chunk), span.style));
                    }
                    lines.push(std::mem::take(&mut current));
                    used = 0;
                }
                chunk.push(c);
                used += cells;
            }
            if !chunk.is_empty() {
                current.push(Span::new(chunk, span.style));
            }
        }
        if !current.0.is_empty() {
            lines.push(current);
        }
        lines
    }
}

/// Rounded box around a block of lines, with a centered title
#[derive(Debug, Clone)]
pub struct Panel {
    title: Line,
    body: Vec<Line>,
    border: Style,
}

/// Narrowest panel we are willing to draw
const MIN_PANEL_WIDTH: usize = 20;

impl Panel {
    pub fn new(title: Line, body: Vec<Line>, border: Style) -> Self {
        Self {
            title,
            body,
            border,
        }
    }

    /// Render the panel `width` columns wide (one horizontal padding cell
    /// inside each border)
    pub fn render(&self, width: usize) -> String {
        let width = width.max(MIN_PANEL_WIDTH);
        let inner = width - 4;
        let mut out = String::new();

        let title = self
            .title
            .wrap(width - 6)
            .into_iter()
            .next()
            .unwrap_or_default();
        let fill = width - 2 - (title.width() + 2);
        let left = fill / 2;
        let right = fill - left;
        out.push_str(&self.border.paint(&format!("╭{}", "─".repeat(left))));
        out.push(' ');
        out.push_str(&title.paint());
        out.push(' ');
        out.push_str(&self.border.paint(&format!("{}╮", "─".repeat(right))));
        out.push('\n');

        let side = self.border.paint("│");
        for line in self.body.iter().flat_map(|line| line.wrap(inner)) {
            let pad = inner.saturating_sub(line.width());
            out.push_str(&side);
            out.push(' ');
            out.push_str(&line.paint());
            out.push_str(&" ".repeat(pad));
            out.push(' ');
            out.push_str(&side);
            out.push('\n');
        }

        out.push_str(&self.border.paint(&format!("╰{}╯", "─".repeat(width - 2))));
        out.push('\n');
        out
    }
}

#[derive(Debug, Clone)]
struct Column {
    header: String,
    style: Style,
}

/// Borderless table with a bold header row and one padding cell per side
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<Column>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_column(&mut self, header: impl Into<String>, style: Style) {
        self.columns.push(Column {
            header: header.into(),
            style,
        });
    }

    pub fn add_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells.iter().map(|cell| sanitize(cell)).collect());
    }

    pub fn render(&self) -> String {
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.width())
                    .chain(std::iter::once(column.header.width()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header_style = Style::default().bold();
        let mut out = String::new();
        let header: Vec<(&str, Style)> = self
            .columns
            .iter()
            .map(|column| (column.header.as_str(), header_style))
            .collect();
        out.push_str(&Self::render_row(&header, &widths));

        for row in &self.rows {
            let cells: Vec<(&str, Style)> = self
                .columns
                .iter()
                .enumerate()
                .map(|(i, column)| (row.get(i).map(String::as_str).unwrap_or(""), column.style))
                .collect();
            out.push_str(&Self::render_row(&cells, &widths));
        }
        out
    }

    fn render_row(cells: &[(&str, Style)], widths: &[usize]) -> String {
        let mut line = String::new();
        let last = cells.len().saturating_sub(1);
        for (i, (text, style)) in cells.iter().enumerate() {
            line.push(' ');
            line.push_str(&style.paint(text));
            if i < last {
                let pad = widths[i].saturating_sub(text.width());
                line.push_str(&" ".repeat(pad + 1));
            }
        }
        line.push('\n');
        line
    }
}
