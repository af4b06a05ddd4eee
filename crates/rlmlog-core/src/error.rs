use thiserror::Error;

/// Failure to produce the textual representation of a REPL value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("No representation available for value of type {0}")]
    Unrepresentable(String),

    #[error("Representation failed: {0}")]
    Failed(String),
}
