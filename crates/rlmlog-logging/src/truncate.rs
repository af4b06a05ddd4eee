//! Truncation limits and Unicode-safe cutting helpers.
//!
//! All limits count characters, never bytes.

/// Maximum characters of trimmed stdout shown for a result
pub const STDOUT_LIMIT: usize = 2000;
/// Maximum characters of trimmed stderr shown for a result
pub const STDERR_LIMIT: usize = 1000;
/// Maximum characters of an LLM prompt or response
pub const LLM_TEXT_LIMIT: usize = 500;
/// Maximum characters of a single variable representation
pub const VALUE_LIMIT: usize = 60;
/// Maximum number of variables listed for a result
pub const MAX_VARIABLES: usize = 10;

/// Appended to result bodies that were cut
pub const BODY_TRUNCATION_MARKER: &str = "\n... (truncated)";
/// Appended to LLM text and variable values that were cut
pub const ELLIPSIS: &str = "...";

/// Convert a character index (0-based) to a byte index in the given string.
/// If `n` exceeds the number of characters, returns `s.len()`.
pub fn char_to_byte_index(s: &str, n: usize) -> usize {
    match s.char_indices().nth(n) {
        Some((i, _)) => i,
        None => s.len(),
    }
}

/// First `n` characters of `s`
pub fn take_chars(s: &str, n: usize) -> &str {
    &s[..char_to_byte_index(s, n)]
}

fn exceeds(s: &str, limit: usize) -> bool {
    s.chars().nth(limit).is_some()
}

/// Trim a captured stream and cut it to `limit` characters.
///
/// Returns `None` when nothing but whitespace was captured.
pub fn stream_body(raw: &str, limit: usize) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if exceeds(trimmed, limit) {
        Some(format!("{}{}", take_chars(trimmed, limit), BODY_TRUNCATION_MARKER))
    } else {
        Some(trimmed.to_string())
    }
}

/// Cut an LLM prompt or response to [`LLM_TEXT_LIMIT`] characters
pub fn llm_text(text: &str) -> String {
    if exceeds(text, LLM_TEXT_LIMIT) {
        format!("{}{}", take_chars(text, LLM_TEXT_LIMIT), ELLIPSIS)
    } else {
        text.to_string()
    }
}

/// Cut a value representation so the result fits in [`VALUE_LIMIT`] characters
pub fn value_repr(repr: &str) -> String {
    if exceeds(repr, VALUE_LIMIT) {
        let keep = VALUE_LIMIT - ELLIPSIS.len();
        format!("{}{}", take_chars(repr, keep), ELLIPSIS)
    } else {
        repr.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_to_byte_index_multibyte() {
        let s = "héllo";
        assert_eq!(char_to_byte_index(s, 0), 0);
        assert_eq!(char_to_byte_index(s, 2), 3);
        assert_eq!(char_to_byte_index(s, 99), s.len());
    }

    #[test]
    fn test_stream_body_empty_is_none() {
        assert_eq!(stream_body("", STDOUT_LIMIT), None);
        assert_eq!(stream_body("  \n\t ", STDOUT_LIMIT), None);
    }

    #[test]
    fn test_stream_body_trims_without_marker() {
        assert_eq!(
            stream_body("\n  hello\n", STDOUT_LIMIT),
            Some("hello".to_string())
        );
        let exact = "a".repeat(STDOUT_LIMIT);
        assert_eq!(stream_body(&exact, STDOUT_LIMIT), Some(exact.clone()));
    }

    #[test]
    fn test_stream_body_truncates_after_trim() {
        let raw = format!("   {}   ", "b".repeat(STDERR_LIMIT + 5));
        let body = stream_body(&raw, STDERR_LIMIT).unwrap();
        assert_eq!(
            body,
            format!("{}\n... (truncated)", "b".repeat(STDERR_LIMIT))
        );
    }

    #[test]
    fn test_llm_text_boundary() {
        let exact = "q".repeat(LLM_TEXT_LIMIT);
        assert_eq!(llm_text(&exact), exact);

        let long = "q".repeat(LLM_TEXT_LIMIT + 1);
        assert_eq!(llm_text(&long), format!("{}...", exact));
    }

    #[test]
    fn test_llm_text_counts_characters() {
        let long = "é".repeat(LLM_TEXT_LIMIT + 10);
        let cut = llm_text(&long);
        assert_eq!(cut.chars().count(), LLM_TEXT_LIMIT + 3);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_value_repr_limit() {
        let exact = "v".repeat(VALUE_LIMIT);
        assert_eq!(value_repr(&exact), exact);

        let long = "v".repeat(VALUE_LIMIT + 1);
        let cut = value_repr(&long);
        assert_eq!(cut, format!("{}...", "v".repeat(57)));
        assert_eq!(cut.chars().count(), VALUE_LIMIT);
    }
}
