//! crates/displacement/src/alignment.rs
//!
//! Exact and tolerant displacement search between two equal-length buffers.
//!
//! Both searches enumerate candidates in the same order: shift ascending from
//! zero, and at each shift [`Side::OverFirst`] before [`Side::OverSecond`]. The
//! first candidate that satisfies the stage's acceptance rule wins, which makes
//! the returned shift the smallest one that works.

use std::fmt;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Which buffer is conceptually slid forward relative to the other.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Side {
    /// The first buffer's content reappears `shift` bytes later in the second:
    /// `first[i] == second[i + shift]`.
    OverFirst,
    /// The second buffer's content reappears `shift` bytes later in the first:
    /// `first[i + shift] == second[i]`.
    OverSecond,
}

impl Side {
    /// Both sides in enumeration order.
    pub const ALL: [Self; 2] = [Self::OverFirst, Self::OverSecond];

    /// One-based index of the buffer the shift applies to.
    pub const fn index(self) -> u8 {
        match self {
            Self::OverFirst => 1,
            Self::OverSecond => 2,
        }
    }

    /// Returns the overlapping windows of `first` and `second` for `shift`.
    ///
    /// The windows are aligned so that position `i` of the left window is
    /// compared with position `i` of the right window.
    pub fn overlap<'a>(
        self,
        first: &'a [u8],
        second: &'a [u8],
        shift: usize,
    ) -> (&'a [u8], &'a [u8]) {
        let len = first.len().min(second.len());
        let shift = shift.min(len);
        let overlap = len - shift;
        match self {
            Self::OverFirst => (&first[..overlap], &second[shift..shift + overlap]),
            Self::OverSecond => (&first[shift..shift + overlap], &second[..overlap]),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// A displacement that aligns one buffer onto the other.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alignment {
    /// Number of bytes one buffer is slid forward by.
    pub shift: usize,
    /// Buffer the shift applies to.
    pub side: Side,
    /// Mismatching bytes inside the overlap. Always zero for exact alignments.
    pub diff_count: usize,
}

impl Alignment {
    /// Constructs an exact alignment.
    pub const fn exact(shift: usize, side: Side) -> Self {
        Self {
            shift,
            side,
            diff_count: 0,
        }
    }

    /// Position of this alignment in the search enumeration order.
    pub const fn order_key(&self) -> (usize, Side) {
        (self.shift, self.side)
    }

    /// Length of the overlapping region for buffers of `len` bytes.
    pub const fn overlap_len(&self, len: usize) -> usize {
        len.saturating_sub(self.shift)
    }
}

/// Finds the smallest shift under which one buffer matches the other exactly
/// over their overlap.
///
/// Returns `None` when the buffers differ in length, are empty, or when no
/// shift aligns them. Nothing is claimed about the bytes outside the overlap.
#[cfg_attr(feature = "tracing", instrument(skip_all, fields(len = first.len()), name = "find_exact_shift"))]
pub fn find_exact_shift(first: &[u8], second: &[u8]) -> Option<Alignment> {
    if first.len() != second.len() {
        return None;
    }

    for shift in 0..first.len() {
        for side in Side::ALL {
            let (left, right) = side.overlap(first, second, shift);
            if left == right {
                #[cfg(feature = "tracing")]
                tracing::debug!(target: "pageshift::search", shift, side = side.index(), "exact alignment found");
                return Some(Alignment::exact(shift, side));
            }
        }
    }

    None
}

/// Finds the smallest shift whose overlap contains at most `budget`
/// mismatching bytes.
///
/// Candidates whose overlap is not longer than `budget` are skipped: any
/// content would satisfy them. Returns `None` when the buffers differ in
/// length or no candidate fits the budget.
#[cfg_attr(feature = "tracing", instrument(skip_all, fields(len = first.len(), budget = budget), name = "find_shift_with_budget"))]
pub fn find_shift_with_budget(first: &[u8], second: &[u8], budget: usize) -> Option<Alignment> {
    if first.len() != second.len() {
        return None;
    }

    let len = first.len();
    for shift in (0..len).take_while(|shift| len - shift > budget) {
        for side in Side::ALL {
            let (left, right) = side.overlap(first, second, shift);
            if let Some(diff_count) = count_mismatches_within(left, right, budget) {
                #[cfg(feature = "tracing")]
                tracing::debug!(target: "pageshift::search", shift, side = side.index(), diff_count, "tolerant alignment found");
                return Some(Alignment {
                    shift,
                    side,
                    diff_count,
                });
            }
        }
    }

    None
}

/// Counts mismatching positions, giving up once the count exceeds `budget`.
fn count_mismatches_within(left: &[u8], right: &[u8], budget: usize) -> Option<usize> {
    let mut mismatches = 0usize;
    for (a, b) in left.iter().zip(right) {
        if a != b {
            mismatches += 1;
            if mismatches > budget {
                return None;
            }
        }
    }
    Some(mismatches)
}
