//! Mode-independent views of rendered events.
//!
//! Truncation and variable filtering happen here exactly once, so the plain
//! and enhanced formatters can only differ in presentation.

use rlmlog_core::{ExecutionResult, ReplValue};

use crate::truncate::{self, MAX_VARIABLES, STDERR_LIMIT, STDOUT_LIMIT};

/// Names of REPL bootstrap bindings that are never shown as user variables
pub const EXCLUDED_NAMES: &[&str] = &["context", "json", "re", "os", "collections", "math"];

/// Shown in place of a value whose representation failed
pub const UNREPRESENTABLE: &str = "<unable to repr>";

/// Outcome of an execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Error,
}

impl Status {
    pub fn from_success(success: bool) -> Self {
        if success {
            Status::Success
        } else {
            Status::Error
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Success => "SUCCESS",
            Status::Error => "ERROR",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success)
    }
}

/// One row of the variable listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableDisplayEntry {
    pub name: String,
    pub type_name: String,
    pub value: String,
}

/// User variables selected for display
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableListing {
    /// At most [`MAX_VARIABLES`] entries, in namespace order
    pub entries: Vec<VariableDisplayEntry>,
    /// User variables left out of `entries`
    pub hidden: usize,
}

impl VariableListing {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Summary line for the variables that did not fit
    pub fn more_line(&self) -> Option<String> {
        (self.hidden > 0).then(|| format!("... and {} more variables", self.hidden))
    }
}

/// Everything a formatter needs to show an [`ExecutionResult`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub status: Status,
    /// Execution time with three decimals and unit, e.g. `0.002s`
    pub elapsed: String,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub variables: VariableListing,
}

impl ResultView {
    pub fn new(result: &ExecutionResult) -> Self {
        Self {
            status: Status::from_success(result.success),
            elapsed: format!("{:.3}s", result.execution_time),
            stdout: truncate::stream_body(&result.stdout, STDOUT_LIMIT),
            stderr: truncate::stream_body(&result.stderr, STDERR_LIMIT),
            variables: user_variables(result),
        }
    }

    /// `Executed in 0.002s`
    pub fn elapsed_line(&self) -> String {
        format!("Executed in {}", self.elapsed)
    }
}

/// Whether a namespace entry is something the user defined
pub fn is_user_variable(name: &str) -> bool {
    !name.starts_with('_') && !EXCLUDED_NAMES.contains(&name)
}

/// Select and format the user variables of a result
pub fn user_variables(result: &ExecutionResult) -> VariableListing {
    let mut listing = VariableListing::default();
    for (name, value) in result.locals.iter().filter(|(name, _)| is_user_variable(name)) {
        if listing.entries.len() < MAX_VARIABLES {
            listing.entries.push(VariableDisplayEntry {
                name: name.to_string(),
                type_name: value.type_name(),
                value: format_value(value),
            });
        } else {
            listing.hidden += 1;
        }
    }
    listing
}

/// Representation of a value for the variable listing.
///
/// Never fails: a representation error is replaced by [`UNREPRESENTABLE`].
pub fn format_value(value: &dyn ReplValue) -> String {
    match value.describe() {
        Ok(repr) => truncate::value_repr(&repr),
        Err(err) => {
            tracing::debug!(type_name = %value.type_name(), error = %err, "value representation failed");
            UNREPRESENTABLE.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rlmlog_core::{FormatError, Locals, Value};

    #[derive(Debug)]
    struct BrokenRepr;

    impl ReplValue for BrokenRepr {
        fn type_name(&self) -> String {
            "BrokenRepr".to_string()
        }

        fn describe(&self) -> Result<String, FormatError> {
            Err(FormatError::Failed("boom".to_string()))
        }
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(Status::from_success(true).label(), "SUCCESS");
        assert_eq!(Status::from_success(false).label(), "ERROR");
        assert!(Status::Success.is_success());
        assert!(!Status::Error.is_success());
    }

    #[test]
    fn test_is_user_variable() {
        assert!(is_user_variable("x"));
        assert!(is_user_variable("results_2"));
        assert!(is_user_variable("ctx"));
        assert!(!is_user_variable("_private"));
        assert!(!is_user_variable("__builtins__"));
        for name in EXCLUDED_NAMES {
            assert!(!is_user_variable(name), "{} should be excluded", name);
        }
    }

    #[test]
    fn test_format_value_placeholder() {
        assert_eq!(format_value(&BrokenRepr), "<unable to repr>");
        assert_eq!(format_value(&Value::unrepresentable("socket")), "<unable to repr>");
        assert_eq!(format_value(&Value::from(5)), "5");
    }

    #[test]
    fn test_format_value_truncates() {
        let value = Value::from("x".repeat(100));
        let formatted = format_value(&value);
        assert_eq!(formatted.chars().count(), 60);
        assert!(formatted.starts_with("'xxx"));
        assert!(formatted.ends_with("..."));
    }

    #[test]
    fn test_user_variables_caps_at_ten() {
        let locals: Locals = (0..13)
            .map(|i| (format!("v{}", i), Value::from(i)))
            .chain([
                ("_hidden".to_string(), Value::from(1)),
                ("json".to_string(), Value::opaque("module", "<module 'json'>")),
            ])
            .collect();
        let result = ExecutionResult::new(true, 0.1).with_locals(locals);

        let listing = user_variables(&result);
        assert_eq!(listing.entries.len(), 10);
        assert_eq!(listing.hidden, 3);
        assert_eq!(listing.entries[0].name, "v0");
        assert_eq!(listing.entries[9].name, "v9");
        assert_eq!(
            listing.more_line().as_deref(),
            Some("... and 3 more variables")
        );
    }

    #[test]
    fn test_user_variables_exactly_ten_has_no_summary() {
        let locals: Locals = (0..10).map(|i| (format!("v{}", i), Value::from(i))).collect();
        let result = ExecutionResult::new(true, 0.1).with_locals(locals);

        let listing = user_variables(&result);
        assert_eq!(listing.entries.len(), 10);
        assert_eq!(listing.more_line(), None);
    }

    #[test]
    fn test_result_view() {
        let result = ExecutionResult::new(true, 0.0021)
            .with_stdout("hello\n")
            .with_stderr("   ")
            .with_local("x", 5)
            .with_local("__name__", "__main__");

        let view = ResultView::new(&result);
        assert_eq!(view.status, Status::Success);
        assert_eq!(view.elapsed_line(), "Executed in 0.002s");
        assert_eq!(view.stdout.as_deref(), Some("hello"));
        assert_eq!(view.stderr, None);
        assert_eq!(
            view.variables.entries,
            vec![VariableDisplayEntry {
                name: "x".to_string(),
                type_name: "int".to_string(),
                value: "5".to_string(),
            }]
        );
    }
}
