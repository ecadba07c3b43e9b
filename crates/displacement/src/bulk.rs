//! crates/displacement/src/bulk.rs
//!
//! Zero-shift, position-by-position comparison of two buffers.

#[cfg(feature = "tracing")]
use tracing::instrument;

/// A single position where the two buffers disagree.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ByteDiff {
    /// Offset of the differing byte.
    pub position: usize,
    /// Byte found in the first buffer.
    pub first: u8,
    /// Byte found in the second buffer.
    pub second: u8,
}

/// Outcome of [`bulk_compare`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BulkComparison {
    /// Number of positions holding the same byte in both buffers.
    pub matching: usize,
    /// Whether `matching` exceeded the configured threshold.
    pub is_bulk_equal: bool,
    /// Every differing position, in ascending order.
    pub diffs: Vec<ByteDiff>,
}

impl BulkComparison {
    /// Total number of positions inspected.
    pub fn compared(&self) -> usize {
        self.matching + self.diffs.len()
    }

    /// Returns `true` when no position differs.
    pub fn is_identical(&self) -> bool {
        self.diffs.is_empty()
    }
}

/// Compares `first` and `second` at zero shift.
///
/// The buffers are bulk-equal when the number of matching positions is
/// strictly greater than `threshold * first.len()`. The differing positions
/// are always collected, whatever the outcome. Lengths are expected to be
/// equal; trailing bytes of the longer buffer are ignored.
#[cfg_attr(feature = "tracing", instrument(skip_all, fields(len = first.len(), threshold = threshold), name = "bulk_compare"))]
pub fn bulk_compare(first: &[u8], second: &[u8], threshold: f64) -> BulkComparison {
    let diffs: Vec<ByteDiff> = first
        .iter()
        .zip(second)
        .enumerate()
        .filter(|(_, (a, b))| a != b)
        .map(|(position, (&a, &b))| ByteDiff {
            position,
            first: a,
            second: b,
        })
        .collect();

    let compared = first.len().min(second.len());
    let matching = compared - diffs.len();
    let is_bulk_equal = matching as f64 > threshold * first.len() as f64;

    #[cfg(feature = "tracing")]
    tracing::debug!(target: "pageshift::bulk", matching, differing = diffs.len(), is_bulk_equal, "bulk comparison");

    BulkComparison {
        matching,
        is_bulk_equal,
        diffs,
    }
}
