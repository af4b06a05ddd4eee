//! Lightweight Python syntax highlighting for the code panel.
//!
//! Tokenizes line by line with just enough state to follow triple-quoted
//! strings across lines. Colors follow a monokai-like palette.

use colored::Color;

use crate::style::{sanitize, Line, Span, Style};

const KEYWORDS: &[&str] = &[
    "and", "as", "assert", "async", "await", "break", "class", "continue", "def", "del", "elif",
    "else", "except", "finally", "for", "from", "global", "if", "import", "in", "is", "lambda",
    "nonlocal", "not", "or", "pass", "raise", "return", "try", "while", "with", "yield",
];

const CONSTANTS: &[&str] = &["True", "False", "None"];

const BUILTINS: &[&str] = &[
    "abs", "all", "any", "bool", "dict", "enumerate", "filter", "float", "int", "isinstance",
    "len", "list", "map", "max", "min", "open", "print", "range", "repr", "reversed", "round",
    "set", "sorted", "str", "sum", "tuple", "type", "zip",
];

const STRING_PREFIXES: &[&str] = &["r", "b", "f", "u", "rb", "br", "fr", "rf"];

fn keyword() -> Style {
    Style::fg(Color::BrightRed)
}

fn constant() -> Style {
    Style::fg(Color::Magenta)
}

fn number() -> Style {
    Style::fg(Color::Magenta)
}

fn string() -> Style {
    Style::fg(Color::Yellow)
}

fn comment() -> Style {
    Style::dimmed()
}

fn builtin() -> Style {
    Style::fg(Color::Cyan)
}

fn definition() -> Style {
    Style::fg(Color::Green)
}

/// Highlight `code` and prefix every line with a right-aligned line number
pub fn highlight_python(code: &str) -> Vec<Line> {
    let code = sanitize(code);
    let source_lines: Vec<&str> = code.split('\n').collect();
    let number_width = source_lines.len().to_string().len();
    let mut highlighter = Highlighter::default();

    source_lines
        .iter()
        .enumerate()
        .map(|(i, text)| {
            let mut line = Line(vec![Span::new(
                format!("{:>width$} ", i + 1, width = number_width),
                Style::dimmed(),
            )]);
            for span in highlighter.line(text) {
                line.push(span);
            }
            line
        })
        .collect()
}

#[derive(Default)]
struct Highlighter {
    /// Delimiter of a triple-quoted string left open by a previous line
    open_triple: Option<&'static str>,
    /// The previous identifier was `def` or `class`
    naming: bool,
}

impl Highlighter {
    fn line(&mut self, text: &str) -> Vec<Span> {
        let chars: Vec<char> = text.chars().collect();
        let mut out = Spans::default();
        let mut i = 0;

        if let Some(delim) = self.open_triple {
            let end = find_triple_end(&chars, 0, delim);
            match end {
                Some(end) => {
                    out.push(collect(&chars[..end]), string());
                    self.open_triple = None;
                    i = end;
                }
                None => {
                    out.push(text.to_string(), string());
                    return out.finish();
                }
            }
        }

        while i < chars.len() {
            let c = chars[i];
            if c == '#' {
                out.push(collect(&chars[i..]), comment());
                break;
            } else if c == '\'' || c == '"' {
                i = self.string(&chars, i, i, &mut out);
            } else if c.is_ascii_digit() {
                let start = i;
                while i < chars.len()
                    && (chars[i].is_ascii_alphanumeric() || chars[i] == '.' || chars[i] == '_')
                {
                    i += 1;
                }
                out.push(collect(&chars[start..i]), number());
            } else if c.is_alphabetic() || c == '_' {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let word = collect(&chars[start..i]);
                let quote_follows = matches!(chars.get(i), Some('\'') | Some('"'));
                if quote_follows && STRING_PREFIXES.contains(&word.to_ascii_lowercase().as_str()) {
                    i = self.string(&chars, start, i, &mut out);
                    continue;
                }
                let style = if self.naming {
                    definition()
                } else if KEYWORDS.contains(&word.as_str()) {
                    keyword()
                } else if CONSTANTS.contains(&word.as_str()) {
                    constant()
                } else if BUILTINS.contains(&word.as_str()) {
                    builtin()
                } else {
                    Style::default()
                };
                self.naming = word == "def" || word == "class";
                out.push(word, style);
            } else {
                out.push(c.to_string(), Style::default());
                i += 1;
            }
        }
        out.finish()
    }

    /// Consume a string literal whose prefix starts at `start` and whose
    /// opening quote is at `quote_at`. Returns the index after the literal.
    fn string(&mut self, chars: &[char], start: usize, quote_at: usize, out: &mut Spans) -> usize {
        let quote = chars[quote_at];
        let triple =
            chars.get(quote_at + 1) == Some(&quote) && chars.get(quote_at + 2) == Some(&quote);

        if triple {
            let delim = if quote == '"' { "\"\"\"" } else { "'''" };
            match find_triple_end(chars, quote_at + 3, delim) {
                Some(end) => {
                    out.push(collect(&chars[start..end]), string());
                    end
                }
                None => {
                    self.open_triple = Some(delim);
                    out.push(collect(&chars[start..]), string());
                    chars.len()
                }
            }
        } else {
            let mut i = quote_at + 1;
            while i < chars.len() {
                if chars[i] == '\\' {
                    i += 2;
                    continue;
                }
                if chars[i] == quote {
                    i += 1;
                    break;
                }
                i += 1;
            }
            let end = i.min(chars.len());
            out.push(collect(&chars[start..end]), string());
            end
        }
    }
}

/// Index just past the closing `delim`, searching from `from`
fn find_triple_end(chars: &[char], from: usize, delim: &str) -> Option<usize> {
    let quote = delim.chars().next()?;
    let mut i = from;
    while i + 3 <= chars.len() {
        if chars[i] == '\\' {
            i += 2;
            continue;
        }
        if chars[i] == quote && chars[i + 1] == quote && chars[i + 2] == quote {
            return Some(i + 3);
        }
        i += 1;
    }
    None
}

fn collect(chars: &[char]) -> String {
    chars.iter().collect()
}

/// Span accumulator that merges neighbours sharing a style
#[derive(Default)]
struct Spans(Vec<Span>);

impl Spans {
    fn push(&mut self, text: String, style: Style) {
        if text.is_empty() {
            return;
        }
        match self.0.last_mut() {
            Some(last) if last.style == style => last.text.push_str(&text.replace('\t', "    ")),
            _ => self.0.push(Span::new(text, style)),
        }
    }

    fn finish(self) -> Vec<Span> {
        self.0
    }
}
