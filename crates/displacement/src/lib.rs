#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]

//! Displacement search and tolerant byte comparison for memory page pairs.
//!
//! Two pages flagged as similar by a fuzzy hash are rarely byte-identical.
//! This crate explains the similarity structurally:
//! - [`find_exact_shift`] finds the smallest displacement that aligns one page
//!   onto the other without a single mismatching byte
//! - [`find_shift_with_budget`] repeats the search tolerating a bounded number
//!   of mismatches
//! - [`bulk_compare`] compares both pages at zero displacement and lists every
//!   differing position
//! - [`Classifier`] runs the three stages in priority order and produces a
//!   single [`Verdict`]
//!
//! # Design
//!
//! The classifier is a pure function of its configuration and the two input
//! slices. It holds no state between calls, so one instance can be shared by
//! reference across threads; [`Classifier::classify_all`] does exactly that
//! when the `parallel` feature is enabled.
//!
//! Console narration is not part of this crate. [`Classifier::classify_detailed`]
//! returns the intermediate stage results so a presentation layer can describe
//! the decision without repeating the searches.
//!
//! # Examples
//!
//! ```
//! use displacement::{Classifier, Side, Verdict};
//!
//! let first: Vec<u8> = (0..4096u32).map(|i| (i * 7 % 251) as u8).collect();
//! let mut second = vec![0u8; 3];
//! second.extend_from_slice(&first[..4096 - 3]);
//!
//! let verdict = Classifier::default().classify(&first, &second);
//! assert_eq!(
//!     verdict,
//!     Verdict::ExactShift { shift: 3, side: Side::OverFirst, low_confidence: false }
//! );
//! assert_eq!(verdict.to_string(), "shift of 3 bytes over side 1");
//! ```

mod alignment;
mod batch;
mod bulk;
mod classifier;
mod config;
mod verdict;

pub use alignment::{Alignment, Side, find_exact_shift, find_shift_with_budget};
pub use batch::PagePair;
pub use bulk::{BulkComparison, ByteDiff, bulk_compare};
pub use classifier::{Classification, Classifier};
pub use config::{
    ClassifierConfig, ConfigError, DEFAULT_BULK_THRESHOLD, DEFAULT_DIFF_BUDGET,
    DEFAULT_LOW_CONFIDENCE_RATIO, PAGE_SIZE,
};
pub use verdict::{DescriptionStyle, Verdict};
