use std::path::PathBuf;

use displacement::DescriptionStyle;
use logging::Topic;

/// Parsed command-line state produced by [`super::parse_args`].
///
/// **Warning**: This type is exposed via `cli::test_utils` for integration
/// tests. Its fields may change without notice.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedArgs {
    /// Number of `-v` flags.
    pub verbose: u8,
    /// Topics passed through `--debug`.
    pub debug_topics: Vec<Topic>,
    /// Directory holding the page files.
    pub dir: PathBuf,
    /// JSON file with classifier settings.
    pub config_file: Option<PathBuf>,
    /// `--page-size` override.
    pub page_size: Option<usize>,
    /// `--budget` override.
    pub budget: Option<usize>,
    /// `--bulk-threshold` override.
    pub bulk_threshold: Option<f64>,
    /// `--low-confidence-ratio` override.
    pub low_confidence_ratio: Option<f64>,
    /// Description renderer.
    pub style: DescriptionStyle,
    /// Requested subcommand.
    pub command: CommandRequest,
}

/// A subcommand and its operands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandRequest {
    /// Classify one page pair.
    Compare {
        /// First page id.
        first: u64,
        /// Second page id.
        second: u64,
        /// Append a side-by-side hex dump.
        show_diff: bool,
        /// Emit one JSON object instead of the narration.
        json: bool,
    },
    /// Classify every pair named in a collision log.
    Batch {
        /// Collision log path.
        log: PathBuf,
        /// Disable row filtering.
        keep_all: bool,
    },
    /// Write a displaced copy of a page.
    Slide {
        /// Source page id.
        id: u64,
        /// Displacement in bytes.
        shift: usize,
        /// Fill byte after the payload.
        fill: u8,
        /// File whose bytes open the prefix.
        payload: Option<PathBuf>,
        /// Destination file.
        output: PathBuf,
    },
    /// Print the most frequent byte values of a page.
    Histogram {
        /// Page id.
        id: u64,
        /// Number of values to list.
        top: usize,
    },
}
