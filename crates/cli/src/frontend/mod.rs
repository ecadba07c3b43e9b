//! Argument parsing, settings resolution and command execution.

mod arguments;
mod execution;
mod settings;

pub use arguments::{CommandRequest, ParsedArgs, parse_args};
pub(crate) use arguments::PROGRAM_NAME;
pub(crate) use execution::execute;
