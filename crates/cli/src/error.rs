//! crates/cli/src/error.rs
//!
//! Failures surfaced by the front-end and their exit codes.

use std::io;
use std::path::PathBuf;

use displacement::ConfigError;
use logging::TracingInitError;
use pagestore::{CollisionLogError, StoreError};
use thiserror::Error;

/// Exit code for usage and configuration errors.
pub const EXIT_USAGE: i32 = 1;
/// Exit code for page lookup, read and write failures.
pub const EXIT_IO: i32 = 2;
/// Exit code when a single-pair comparison ends in a size mismatch.
pub const EXIT_SIZE_MISMATCH: i32 = 3;

/// Errors raised while executing a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Rejected command-line input.
    #[error("{0}")]
    Usage(String),
    /// Classifier settings failed validation.
    #[error("invalid classifier configuration: {0}")]
    Config(#[from] ConfigError),
    /// The `--config` file could not be read.
    #[error("cannot read configuration file {}: {source}", path.display())]
    ConfigRead {
        /// Configuration file.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// The `--config` file is not a valid classifier configuration.
    #[error("cannot parse configuration file {}: {source}", path.display())]
    ConfigParse {
        /// Configuration file.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: serde_json::Error,
    },
    /// Diagnostics could not be set up.
    #[error(transparent)]
    Logging(#[from] TracingInitError),
    /// Page lookup, read or slide failure.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Collision log failure.
    #[error("cannot read collision log: {0}")]
    CollisionLog(#[from] CollisionLogError),
    /// Reading an auxiliary input or writing output failed.
    #[error("{context}: {source}")]
    Io {
        /// What was being done.
        context: String,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
}

impl CliError {
    /// Wraps an I/O failure with a short description of the operation.
    pub fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Process exit code for this error.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Usage(_)
            | Self::Config(_)
            | Self::ConfigRead { .. }
            | Self::ConfigParse { .. }
            | Self::Logging(_)
            | Self::Store(StoreError::PayloadTooLong { .. }) => EXIT_USAGE,
            Self::Store(_) | Self::CollisionLog(_) | Self::Io { .. } => EXIT_IO,
        }
    }
}
