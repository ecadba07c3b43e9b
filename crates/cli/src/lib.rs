#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the command-line front-end of the pageshift tools. It
//! parses arguments with [`clap`](https://docs.rs/clap/), resolves classifier
//! settings, loads pages through [`pagestore`] and hands them to
//! [`displacement`].
//!
//! # Commands
//!
//! - `compare ID1 ID2` classifies one pair and narrates the decision path
//!   (`--show-diff` appends a hex dump, `--json` prints one JSON object).
//! - `batch LOG` classifies every pair named in a collision log and prints
//!   one JSON object per line.
//! - `slide ID SHIFT -o OUT` writes a displaced copy of a page.
//! - `histogram ID` lists the most frequent byte values of a page.
//!
//! # Exit codes
//!
//! | code | meaning |
//! |------|---------|
//! | 0 | success |
//! | 1 | usage or configuration error |
//! | 2 | page lookup, read or write failure |
//! | 3 | `compare` ended in a size mismatch |
//!
//! # Examples
//!
//! ```
//! use cli::run;
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = run(["pageshift", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! assert!(!stdout.is_empty());
//! assert!(stderr.is_empty());
//! ```

use std::ffi::OsString;
use std::io::Write;

use clap::error::ErrorKind;

mod error;
mod frontend;
pub mod report;

pub use error::{CliError, EXIT_IO, EXIT_SIZE_MISMATCH, EXIT_USAGE};

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Argument parsing entry points for integration tests.
pub mod test_utils {
    pub use crate::frontend::{CommandRequest, ParsedArgs, parse_args};
}

/// Runs the CLI using the provided argument iterator and output handles.
///
/// Verdicts, JSON records and help text go to `stdout`; diagnostics go to
/// `stderr`. The returned value is the process exit code.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let parsed = match frontend::parse_args(arguments) {
        Ok(parsed) => parsed,
        Err(error) => {
            return match error.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = write!(stdout, "{error}");
                    0
                }
                _ => {
                    let _ = write!(stderr, "{error}");
                    EXIT_USAGE
                }
            };
        }
    };

    match frontend::execute(&parsed, stdout) {
        Ok(status) => status,
        Err(error) => {
            let code = error.exit_code();
            let _ = writeln!(
                stderr,
                "{} error: {error} (code {code})",
                frontend::PROGRAM_NAME
            );
            code
        }
    }
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(clamped as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_with_args<I, S>(args: I) -> (i32, String, String)
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let code = run(args, &mut stdout, &mut stderr);
        (
            code,
            String::from_utf8(stdout).unwrap(),
            String::from_utf8(stderr).unwrap(),
        )
    }

    #[test]
    fn help_goes_to_stdout() {
        let (code, stdout, stderr) = run_with_args(["pageshift", "--help"]);
        assert_eq!(code, 0);
        assert!(stdout.contains("compare"));
        assert!(stdout.contains("batch"));
        assert!(stderr.is_empty());
    }

    #[test]
    fn usage_error_goes_to_stderr() {
        let (code, stdout, stderr) = run_with_args(["pageshift", "compare", "1"]);
        assert_eq!(code, EXIT_USAGE);
        assert!(stdout.is_empty());
        assert!(stderr.contains("error:"));
    }

    #[test]
    fn missing_subcommand_is_usage_error() {
        let (code, _, stderr) = run_with_args(["pageshift"]);
        assert_eq!(code, EXIT_USAGE);
        assert!(stderr.contains("Usage"));
    }

    #[test]
    fn execution_error_carries_code() {
        let dir = test_support::PageDir::new().unwrap();
        let (code, stdout, stderr) = run_with_args([
            "pageshift",
            "histogram",
            "5",
            "--dir",
            dir.path().to_str().unwrap(),
        ]);
        assert_eq!(code, EXIT_IO);
        assert!(stdout.is_empty());
        assert!(stderr.starts_with("pageshift error: no page file for id 5"));
        assert!(stderr.trim_end().ends_with("(code 2)"));
    }

    #[test]
    fn exit_code_is_clamped() {
        let debug = |status| format!("{:?}", exit_code_from(status));
        assert_eq!(debug(-4), debug(0));
        assert_eq!(debug(1000), debug(255));
        assert_ne!(debug(3), debug(0));
    }
}
