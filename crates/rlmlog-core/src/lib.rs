//! # rlmlog-core
//!
//! Data model shared between the REPL execution engine and the rlmlog renderer.
//!
//! ## Key Types
//!
//! - [`ExecutionResult`] - Outcome of running one code block
//! - [`Locals`] - Insertion-ordered variables left behind by the code
//! - [`Value`] - Dynamically typed REPL value
//! - [`ReplValue`] - Anything that can report a type name and a representation
//! - [`ReplEvent`] - One renderable event (code, result, LLM query/response)

mod error;
mod event;
mod result;
mod value;

pub use error::FormatError;
pub use event::ReplEvent;
pub use result::{ExecutionResult, Locals};
pub use value::{ReplValue, Value};
