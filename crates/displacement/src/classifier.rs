//! crates/displacement/src/classifier.rs
//!
//! Classification policy combining the exact search, the bulk comparator and
//! the tolerant search into a single verdict.

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::alignment::{Alignment, find_exact_shift, find_shift_with_budget};
use crate::bulk::{BulkComparison, bulk_compare};
use crate::config::{ClassifierConfig, ConfigError};
use crate::verdict::Verdict;

/// Verdict together with the intermediate result of every stage that ran.
///
/// Stages that were not reached are `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification {
    /// Final verdict.
    pub verdict: Verdict,
    /// Exact alignment found by the first stage.
    pub exact: Option<Alignment>,
    /// Zero-shift comparison, when the exact stage did not settle the pair.
    pub bulk: Option<BulkComparison>,
    /// Tolerant alignment, when the bulk stage did not settle the pair.
    pub tolerant: Option<Alignment>,
    /// Whether the tolerant stage ran.
    pub tolerant_attempted: bool,
}

impl Classification {
    fn settled(verdict: Verdict) -> Self {
        Self {
            verdict,
            exact: None,
            bulk: None,
            tolerant: None,
            tolerant_attempted: false,
        }
    }
}

/// Explains the similarity between two pages.
///
/// The classifier is immutable after construction and may be shared across
/// threads.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    /// Creates a classifier after validating `config`.
    pub fn new(config: ClassifierConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the configuration in use.
    pub const fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classifies a page pair.
    pub fn classify(&self, first: &[u8], second: &[u8]) -> Verdict {
        self.classify_detailed(first, second).verdict
    }

    /// Classifies a page pair and keeps every stage's intermediate result.
    ///
    /// Stages run in priority order:
    ///
    /// 1. Both lengths must equal the page size, otherwise
    ///    [`Verdict::SizeError`].
    /// 2. Exact shift search. A shift within the confidence boundary is final.
    ///    A larger shift is kept as a provisional answer.
    /// 3. Zero-shift bulk comparison. Bulk-equal pages yield
    ///    [`Verdict::BulkEqual`].
    /// 4. Tolerant shift search with the configured budget, restarting from
    ///    shift zero. Any hit yields [`Verdict::ThresholdShift`], even with no
    ///    differing bytes. The provisional shift is reported only when the
    ///    tolerant search finds nothing.
    /// 5. [`Verdict::Undetermined`].
    #[cfg_attr(feature = "tracing", instrument(skip_all, fields(first_len = first.len(), second_len = second.len()), name = "classify"))]
    pub fn classify_detailed(&self, first: &[u8], second: &[u8]) -> Classification {
        let page_size = self.config.page_size;
        if first.len() != page_size || second.len() != page_size {
            #[cfg(feature = "tracing")]
            tracing::warn!(target: "pageshift::policy", first_len = first.len(), second_len = second.len(), page_size, "page size mismatch");
            return Classification::settled(Verdict::SizeError {
                first_len: first.len(),
                second_len: second.len(),
            });
        }

        let exact = find_exact_shift(first, second);
        if let Some(alignment) = exact {
            if !self.config.is_low_confidence(alignment.shift) {
                return Classification {
                    exact,
                    ..Classification::settled(self.exact_verdict(alignment))
                };
            }
            #[cfg(feature = "tracing")]
            tracing::info!(target: "pageshift::policy", shift = alignment.shift, "exact shift is low confidence, comparing byte by byte");
        }

        let bulk = bulk_compare(first, second, self.config.bulk_threshold);
        if bulk.is_bulk_equal {
            // Identical pages align at shift zero and never reach this stage.
            let verdict = Verdict::BulkEqual {
                diffs: bulk.diffs.clone(),
            };
            return Classification {
                verdict,
                exact,
                bulk: Some(bulk),
                tolerant: None,
                tolerant_attempted: false,
            };
        }

        let tolerant = find_shift_with_budget(first, second, self.config.diff_budget);
        let verdict = match (tolerant, exact) {
            (Some(found), _) => Verdict::ThresholdShift {
                shift: found.shift,
                side: found.side,
                diff_count: found.diff_count,
                low_confidence: self.config.is_low_confidence(found.shift),
            },
            (None, Some(provisional)) => self.exact_verdict(provisional),
            (None, None) => Verdict::Undetermined,
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(target: "pageshift::policy", verdict = %verdict, "pair classified");

        Classification {
            verdict,
            exact,
            bulk: Some(bulk),
            tolerant,
            tolerant_attempted: true,
        }
    }

    fn exact_verdict(&self, alignment: Alignment) -> Verdict {
        Verdict::ExactShift {
            shift: alignment.shift,
            side: alignment.side,
            low_confidence: self.config.is_low_confidence(alignment.shift),
        }
    }
}
