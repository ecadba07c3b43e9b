//! crates/pagestore/src/error.rs
//!
//! Error types for page lookup, sliding and collision-log parsing.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for page store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while locating, reading or rebuilding pages.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No file named `{id}_*` exists in the directory.
    #[error("no page file for id {id} in {}", dir.display())]
    NotFound {
        /// Requested page id.
        id: u64,
        /// Directory that was searched.
        dir: PathBuf,
    },
    /// The page directory could not be listed.
    #[error("cannot list page directory {}: {source}", dir.display())]
    ListDir {
        /// Directory that was listed.
        dir: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// A located page could not be read.
    #[error("cannot read page {id} from {}: {source}", path.display())]
    Read {
        /// Page id.
        id: u64,
        /// File that failed.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// A slide payload does not fit in the requested shift.
    #[error("payload of {payload_len} bytes does not fit in a shift of {shift} bytes")]
    PayloadTooLong {
        /// Payload length.
        payload_len: usize,
        /// Requested shift.
        shift: usize,
    },
}

/// Errors raised while reading a collision log.
#[derive(Debug, Error)]
pub enum CollisionLogError {
    /// The log could not be read.
    #[error("I/O error: {0}")]
    Io(
        #[from]
        #[source]
        io::Error,
    ),
    /// A collision line carried an unparseable `#pages` field.
    #[error("line {line}: malformed page pair '{text}'")]
    MalformedPages {
        /// One-based line number.
        line: usize,
        /// Offending text.
        text: String,
    },
    /// A collision line had no hash name before `COLLISION`.
    #[error("line {line}: missing hash name")]
    MissingHash {
        /// One-based line number.
        line: usize,
    },
}
