//! crates/displacement/src/config.rs
//!
//! Tunable tolerances for the classifier.

use thiserror::Error;

/// Size of a memory page in bytes.
pub const PAGE_SIZE: usize = 4096;

/// Maximum number of mismatching bytes tolerated by the tolerant shift search.
pub const DEFAULT_DIFF_BUDGET: usize = 2;

/// Fraction of positions that must match at zero shift for two pages to be
/// considered bulk-equal.
pub const DEFAULT_BULK_THRESHOLD: f64 = 0.9;

/// Fraction of the page size above which a shift is reported as low confidence.
pub const DEFAULT_LOW_CONFIDENCE_RATIO: f64 = 0.5;

/// Errors returned when validating a [`ClassifierConfig`].
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The configured page size was zero.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
    /// A ratio setting was outside the closed unit interval.
    #[error("{name} must be within 0.0..=1.0, got {value}")]
    RatioOutOfRange {
        /// Name of the offending setting.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
}

/// Configuration values consumed by [`Classifier`](crate::Classifier).
///
/// Every field has a default matching the values used when the pages were
/// first analysed: 4096-byte pages, a two-byte diff budget, a 90% bulk match
/// threshold and a 50% low-confidence boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ClassifierConfig {
    /// Expected length of both input buffers.
    pub page_size: usize,
    /// Mismatches tolerated by the tolerant shift search.
    pub diff_budget: usize,
    /// Fraction of matching positions required for bulk equality.
    pub bulk_threshold: f64,
    /// Shifts above `low_confidence_ratio * page_size` are flagged.
    pub low_confidence_ratio: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            diff_budget: DEFAULT_DIFF_BUDGET,
            bulk_threshold: DEFAULT_BULK_THRESHOLD,
            low_confidence_ratio: DEFAULT_LOW_CONFIDENCE_RATIO,
        }
    }
}

impl ClassifierConfig {
    /// Creates a configuration populated with the default tolerances.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the expected page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the tolerant search diff budget.
    pub fn with_diff_budget(mut self, diff_budget: usize) -> Self {
        self.diff_budget = diff_budget;
        self
    }

    /// Sets the bulk match threshold.
    pub fn with_bulk_threshold(mut self, bulk_threshold: f64) -> Self {
        self.bulk_threshold = bulk_threshold;
        self
    }

    /// Sets the low-confidence boundary as a fraction of the page size.
    pub fn with_low_confidence_ratio(mut self, ratio: f64) -> Self {
        self.low_confidence_ratio = ratio;
        self
    }

    /// Checks that every setting is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        check_ratio("bulk_threshold", self.bulk_threshold)?;
        check_ratio("low_confidence_ratio", self.low_confidence_ratio)?;
        Ok(())
    }

    /// Returns `true` when `shift` lies beyond the low-confidence boundary.
    pub fn is_low_confidence(&self, shift: usize) -> bool {
        shift as f64 > self.page_size as f64 * self.low_confidence_ratio
    }

    /// Minimum number of matching positions required for bulk equality.
    ///
    /// Pages are bulk-equal when their match count is strictly greater than
    /// the returned value.
    pub fn bulk_match_floor(&self) -> f64 {
        self.page_size as f64 * self.bulk_threshold
    }
}

fn check_ratio(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::RatioOutOfRange { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_published_constants() {
        let config = ClassifierConfig::default();
        assert_eq!(config.page_size, PAGE_SIZE);
        assert_eq!(config.diff_budget, DEFAULT_DIFF_BUDGET);
        assert!((config.bulk_threshold - DEFAULT_BULK_THRESHOLD).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_chaining() {
        let config = ClassifierConfig::new()
            .with_page_size(512)
            .with_diff_budget(4)
            .with_bulk_threshold(0.75)
            .with_low_confidence_ratio(0.25);
        assert_eq!(config.page_size, 512);
        assert_eq!(config.diff_budget, 4);
        assert!(config.is_low_confidence(129));
        assert!(!config.is_low_confidence(128));
    }

    #[test]
    fn half_page_shift_is_still_confident() {
        let config = ClassifierConfig::default();
        assert!(!config.is_low_confidence(2048));
        assert!(config.is_low_confidence(2049));
    }

    #[test]
    fn zero_page_size_rejected() {
        let config = ClassifierConfig::default().with_page_size(0);
        assert_eq!(config.validate(), Err(ConfigError::ZeroPageSize));
    }

    #[test]
    fn ratio_out_of_range_rejected() {
        let config = ClassifierConfig::default().with_bulk_threshold(1.5);
        let error = config.validate().unwrap_err();
        assert_eq!(
            error,
            ConfigError::RatioOutOfRange {
                name: "bulk_threshold",
                value: 1.5
            }
        );
        assert!(error.to_string().contains("bulk_threshold"));
    }

    #[test]
    fn nan_ratio_rejected() {
        let config = ClassifierConfig::default().with_low_confidence_ratio(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn bulk_floor_scales_with_page_size() {
        let config = ClassifierConfig::default();
        assert!((config.bulk_match_floor() - 3686.4).abs() < 1e-9);
    }
}
