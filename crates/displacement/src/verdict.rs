//! crates/displacement/src/verdict.rs
//!
//! Classification results and their stable textual descriptions.
//!
//! Downstream tooling groups and filters pairs by matching substrings of the
//! rendered descriptions, so the wording and field order of every template
//! below is fixed.

use std::fmt;

use crate::alignment::Side;
use crate::bulk::ByteDiff;

/// Text flavour used when rendering a [`Verdict`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DescriptionStyle {
    /// Plain English, suitable for logs and tables.
    #[default]
    Plain,
    /// LaTeX math markup, suitable for figure captions and legends.
    Latex,
}

/// Structural explanation of why two pages look alike.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Verdict {
    /// One page is the other displaced by `shift` bytes, without a single
    /// mismatching byte in the overlap.
    ExactShift {
        /// Displacement in bytes.
        shift: usize,
        /// Page the displacement applies to.
        side: Side,
        /// The shift exceeds the configured low-confidence boundary.
        low_confidence: bool,
    },
    /// One page is the other displaced by `shift` bytes, with `diff_count`
    /// mismatching bytes in the overlap.
    ThresholdShift {
        /// Displacement in bytes.
        shift: usize,
        /// Page the displacement applies to.
        side: Side,
        /// Mismatching bytes inside the overlap.
        diff_count: usize,
        /// The shift exceeds the configured low-confidence boundary.
        low_confidence: bool,
    },
    /// The pages match at zero shift except for the listed positions.
    BulkEqual {
        /// Differing positions in ascending order.
        diffs: Vec<ByteDiff>,
    },
    /// No structural relationship was found within the configured tolerances.
    Undetermined,
    /// At least one buffer did not have the expected page size.
    SizeError {
        /// Length of the first buffer.
        first_len: usize,
        /// Length of the second buffer.
        second_len: usize,
    },
}

impl Verdict {
    /// Short machine-friendly name of the verdict category.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ExactShift { .. } => "exact_shift",
            Self::ThresholdShift { .. } => "threshold_shift",
            Self::BulkEqual { .. } => "bulk_equal",
            Self::Undetermined => "undetermined",
            Self::SizeError { .. } => "size_error",
        }
    }

    /// Displacement carried by shift verdicts.
    pub const fn shift(&self) -> Option<(usize, Side)> {
        match *self {
            Self::ExactShift { shift, side, .. } | Self::ThresholdShift { shift, side, .. } => {
                Some((shift, side))
            }
            _ => None,
        }
    }

    /// Number of differing bytes the verdict accounts for.
    pub fn diff_count(&self) -> Option<usize> {
        match self {
            Self::ExactShift { .. } => Some(0),
            Self::ThresholdShift { diff_count, .. } => Some(*diff_count),
            Self::BulkEqual { diffs } => Some(diffs.len()),
            Self::Undetermined | Self::SizeError { .. } => None,
        }
    }

    /// Returns `true` for shift verdicts flagged as unreliable.
    pub const fn is_low_confidence(&self) -> bool {
        matches!(
            self,
            Self::ExactShift {
                low_confidence: true,
                ..
            } | Self::ThresholdShift {
                low_confidence: true,
                ..
            }
        )
    }

    /// Returns `true` when the verdict states the pages are byte-identical.
    pub fn is_identical(&self) -> bool {
        match self {
            Self::ExactShift { shift, .. } => *shift == 0,
            Self::BulkEqual { diffs } => diffs.is_empty(),
            _ => false,
        }
    }

    /// Returns `true` for [`Verdict::SizeError`].
    pub const fn is_size_error(&self) -> bool {
        matches!(self, Self::SizeError { .. })
    }

    /// Renders the description in the requested style.
    pub fn render(&self, style: DescriptionStyle) -> String {
        match style {
            DescriptionStyle::Plain => self.to_string(),
            DescriptionStyle::Latex => self.render_latex(),
        }
    }

    fn render_latex(&self) -> String {
        let mut text = match self {
            Self::ExactShift { shift, side, .. } => format!("$\\Delta = {shift}$ ({side})"),
            Self::ThresholdShift {
                shift,
                side,
                diff_count,
                ..
            } => format!("$\\Delta = {shift}$ ({side}) + {diff_count}B different"),
            Self::BulkEqual { diffs } => format!("{}B different", diffs.len()),
            Self::Undetermined => "undefined".to_owned(),
            Self::SizeError { .. } => "size mismatch error".to_owned(),
        };
        if self.is_low_confidence() {
            text.push_str(" (low confidence)");
        }
        text
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExactShift { shift, side, .. } => {
                write!(f, "shift of {shift} bytes over side {side}")?;
            }
            Self::ThresholdShift {
                shift,
                side,
                diff_count,
                ..
            } => write!(
                f,
                "shift of {shift} bytes over side {side} + {diff_count} differing bytes"
            )?,
            Self::BulkEqual { diffs } => write!(f, "{} differing bytes", diffs.len())?,
            Self::Undetermined => f.write_str("undefined")?,
            Self::SizeError {
                first_len,
                second_len,
            } => write!(
                f,
                "size mismatch error ({first_len} vs {second_len} bytes)"
            )?,
        }
        if self.is_low_confidence() {
            f.write_str(" (low confidence)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exact(shift: usize, side: Side, low_confidence: bool) -> Verdict {
        Verdict::ExactShift {
            shift,
            side,
            low_confidence,
        }
    }

    mod plain_rendering {
        use super::*;

        #[test]
        fn exact_shift() {
            assert_eq!(
                exact(10, Side::OverFirst, false).to_string(),
                "shift of 10 bytes over side 1"
            );
        }

        #[test]
        fn exact_shift_low_confidence() {
            assert_eq!(
                exact(3000, Side::OverSecond, true).to_string(),
                "shift of 3000 bytes over side 2 (low confidence)"
            );
        }

        #[test]
        fn threshold_shift() {
            let verdict = Verdict::ThresholdShift {
                shift: 5,
                side: Side::OverFirst,
                diff_count: 1,
                low_confidence: false,
            };
            assert_eq!(
                verdict.to_string(),
                "shift of 5 bytes over side 1 + 1 differing bytes"
            );
        }

        #[test]
        fn bulk_equal() {
            let verdict = Verdict::BulkEqual {
                diffs: vec![
                    ByteDiff {
                        position: 1,
                        first: 0,
                        second: 1
                    };
                    3
                ],
            };
            assert_eq!(verdict.to_string(), "3 differing bytes");
        }

        #[test]
        fn undetermined() {
            assert_eq!(Verdict::Undetermined.to_string(), "undefined");
        }

        #[test]
        fn size_error() {
            let verdict = Verdict::SizeError {
                first_len: 4095,
                second_len: 4096,
            };
            assert_eq!(
                verdict.to_string(),
                "size mismatch error (4095 vs 4096 bytes)"
            );
            assert!(verdict.to_string().contains("size mismatch error"));
        }
    }

    mod latex_rendering {
        use super::*;

        #[test]
        fn exact_shift() {
            assert_eq!(
                exact(0, Side::OverFirst, false).render(DescriptionStyle::Latex),
                r"$\Delta = 0$ (1)"
            );
        }

        #[test]
        fn threshold_shift() {
            let verdict = Verdict::ThresholdShift {
                shift: 12,
                side: Side::OverSecond,
                diff_count: 2,
                low_confidence: false,
            };
            assert_eq!(
                verdict.render(DescriptionStyle::Latex),
                r"$\Delta = 12$ (2) + 2B different"
            );
        }

        #[test]
        fn low_confidence_suffix() {
            assert_eq!(
                exact(4000, Side::OverFirst, true).render(DescriptionStyle::Latex),
                r"$\Delta = 4000$ (1) (low confidence)"
            );
        }

        #[test]
        fn plain_style_matches_display() {
            let verdict = Verdict::Undetermined;
            assert_eq!(verdict.render(DescriptionStyle::Plain), verdict.to_string());
        }
    }

    mod accessors {
        use super::*;

        #[test]
        fn kind_names() {
            assert_eq!(exact(1, Side::OverFirst, false).kind(), "exact_shift");
            assert_eq!(Verdict::Undetermined.kind(), "undetermined");
            assert_eq!(
                Verdict::SizeError {
                    first_len: 0,
                    second_len: 0
                }
                .kind(),
                "size_error"
            );
        }

        #[test]
        fn shift_accessor() {
            assert_eq!(
                exact(7, Side::OverSecond, false).shift(),
                Some((7, Side::OverSecond))
            );
            assert_eq!(Verdict::Undetermined.shift(), None);
        }

        #[test]
        fn diff_count_accessor() {
            assert_eq!(exact(7, Side::OverSecond, false).diff_count(), Some(0));
            assert_eq!(Verdict::BulkEqual { diffs: Vec::new() }.diff_count(), Some(0));
            assert_eq!(Verdict::Undetermined.diff_count(), None);
        }

        #[test]
        fn identical_detection() {
            assert!(exact(0, Side::OverFirst, false).is_identical());
            assert!(!exact(1, Side::OverFirst, false).is_identical());
            assert!(Verdict::BulkEqual { diffs: Vec::new() }.is_identical());
            assert!(!Verdict::Undetermined.is_identical());
        }

        #[test]
        fn size_error_distinct_from_undetermined() {
            let size = Verdict::SizeError {
                first_len: 1,
                second_len: 2,
            };
            assert!(size.is_size_error());
            assert!(!Verdict::Undetermined.is_size_error());
            assert_ne!(size.kind(), Verdict::Undetermined.kind());
        }
    }
}
