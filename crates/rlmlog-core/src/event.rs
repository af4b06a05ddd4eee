use serde::Deserialize;

use crate::ExecutionResult;

/// One renderable REPL event
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReplEvent {
    /// Code about to be executed
    Code { code: String },
    /// Result of executing the previous code block
    Result(ExecutionResult),
    /// Prompt sent to the language model
    LlmQuery { prompt: String },
    /// Language model reply
    LlmResponse { response: String },
}
