use std::io::Write;

use displacement::{Classifier, DescriptionStyle, Verdict};
use pagestore::PageStore;
use serde::Serialize;

use crate::error::{CliError, EXIT_SIZE_MISMATCH};
use crate::report::{PairReport, write_hex_diff, write_narration};

/// JSON form of a single comparison.
#[derive(Debug, Serialize)]
struct CompareRecord<'a> {
    page1: u64,
    page2: u64,
    description: String,
    verdict: &'a Verdict,
}

pub(crate) struct CompareRequest {
    pub(crate) first: u64,
    pub(crate) second: u64,
    pub(crate) show_diff: bool,
    pub(crate) json: bool,
    pub(crate) style: DescriptionStyle,
}

/// Classifies one pair and prints the result.
///
/// Returns [`EXIT_SIZE_MISMATCH`] when the verdict is a size error.
pub(crate) fn run_compare<Out: Write>(
    store: &PageStore,
    classifier: &Classifier,
    request: &CompareRequest,
    stdout: &mut Out,
) -> Result<i32, CliError> {
    let first = store.read(request.first)?;
    let second = store.read(request.second)?;
    tracing::info!(
        target: "pageshift::store",
        first = %first.path.display(),
        second = %second.path.display(),
        "pages loaded"
    );

    let classification = classifier.classify_detailed(&first.bytes, &second.bytes);
    let write_failed = |source: std::io::Error| CliError::io("writing output", source);

    if request.json {
        let record = CompareRecord {
            page1: first.id,
            page2: second.id,
            description: classification.verdict.render(request.style),
            verdict: &classification.verdict,
        };
        serde_json::to_writer(&mut *stdout, &record)
            .map_err(|source| CliError::io("writing output", source.into()))?;
        writeln!(stdout).map_err(write_failed)?;
    } else {
        let report = PairReport {
            first_path: &first.path,
            second_path: &second.path,
            classification: &classification,
            config: classifier.config(),
            style: request.style,
            show_diff: request.show_diff,
        };
        write_narration(stdout, &report).map_err(write_failed)?;
    }

    if request.show_diff {
        writeln!(stdout).map_err(write_failed)?;
        write_hex_diff(stdout, &first.bytes, &second.bytes).map_err(write_failed)?;
    }

    if classification.verdict.is_size_error() {
        Ok(EXIT_SIZE_MISMATCH)
    } else {
        Ok(0)
    }
}
