mod parsed_args;
mod parser;


pub use parsed_args::{CommandRequest, ParsedArgs}; // pub for test_utils
pub use parser::parse_args; // pub for test_utils
pub(crate) use parser::PROGRAM_NAME;
#[cfg(test)]
use parser::clap_command;
