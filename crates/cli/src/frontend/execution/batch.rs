use std::collections::HashSet;
use std::io::Write;
use std::path::Path;

use displacement::{Classifier, DescriptionStyle, Verdict};
use pagestore::{CollisionRecord, PageStore, StoreResult, read_collision_log};
use serde::Serialize;

use crate::error::CliError;

/// One output line of `pageshift batch`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub(crate) struct BatchRow {
    pub(crate) page1: u64,
    pub(crate) page2: u64,
    pub(crate) hashes: String,
    pub(crate) description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) verdict: Option<Verdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<String>,
}

impl BatchRow {
    fn classified(record: &CollisionRecord, verdict: Verdict, style: DescriptionStyle) -> Self {
        Self {
            page1: record.page1,
            page2: record.page2,
            hashes: record.hash_label(),
            description: verdict.render(style),
            verdict: Some(verdict),
            error: None,
        }
    }

    fn failed(record: &CollisionRecord, error: String) -> Self {
        Self {
            page1: record.page1,
            page2: record.page2,
            hashes: record.hash_label(),
            description: "error".to_owned(),
            verdict: None,
            error: Some(error),
        }
    }
}

fn load_pair(store: &PageStore, record: &CollisionRecord) -> StoreResult<(Vec<u8>, Vec<u8>)> {
    let first = store.read(record.page1)?;
    let second = store.read(record.page2)?;
    Ok((first.bytes, second.bytes))
}

/// Classifies every record, keeping log order.
///
/// Pairs whose pages cannot be loaded become error rows.
pub(crate) fn classify_records(
    store: &PageStore,
    classifier: &Classifier,
    records: &[CollisionRecord],
    style: DescriptionStyle,
) -> Vec<BatchRow> {
    let mut pairs = Vec::with_capacity(records.len());
    let mut slots = Vec::with_capacity(records.len());
    for record in records {
        match load_pair(store, record) {
            Ok(pair) => {
                slots.push(Ok(pairs.len()));
                pairs.push(pair);
            }
            Err(error) => {
                tracing::warn!(
                    target: "pageshift::batch",
                    page1 = record.page1,
                    page2 = record.page2,
                    %error,
                    "pair skipped"
                );
                slots.push(Err(error.to_string()));
            }
        }
    }

    let verdicts = classifier.classify_all(&pairs);
    records
        .iter()
        .zip(slots)
        .map(|(record, slot)| match slot {
            Ok(index) => BatchRow::classified(record, verdicts[index].clone(), style),
            Err(error) => BatchRow::failed(record, error),
        })
        .collect()
}

/// Drops size mismatches and zero shifts, then keeps the first row per
/// `page1`. Error rows are always kept.
pub(crate) fn filter_rows(rows: Vec<BatchRow>) -> Vec<BatchRow> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| match &row.verdict {
            None => true,
            Some(verdict) if verdict.is_size_error() => false,
            Some(verdict) if matches!(verdict.shift(), Some((0, _))) => false,
            Some(_) => seen.insert(row.page1),
        })
        .collect()
}

pub(crate) fn run_batch<Out: Write>(
    store: &PageStore,
    classifier: &Classifier,
    log: &Path,
    keep_all: bool,
    style: DescriptionStyle,
    stdout: &mut Out,
) -> Result<i32, CliError> {
    let records = read_collision_log(log)?;
    let classified = classify_records(store, classifier, &records, style);
    let total = classified.len();
    let errors = classified.iter().filter(|row| row.error.is_some()).count();
    let rows = if keep_all {
        classified
    } else {
        filter_rows(classified)
    };

    for row in &rows {
        serde_json::to_writer(&mut *stdout, row)
            .map_err(|source| CliError::io("writing output", source.into()))?;
        writeln!(stdout).map_err(|source| CliError::io("writing output", source))?;
    }

    tracing::info!(
        target: "pageshift::batch",
        pairs = total,
        errors,
        emitted = rows.len(),
        "batch finished"
    );
    Ok(0)
}
