//! crates/pagestore/src/histogram.rs
//!
//! Byte frequency counts, used to spot pages dominated by a few values.

/// Occurrence count for every byte value of a page.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ByteHistogram {
    counts: [usize; 256],
    total: usize,
}

impl ByteHistogram {
    /// Counts the bytes of `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0usize; 256];
        for &byte in data {
            counts[usize::from(byte)] += 1;
        }
        Self {
            counts,
            total: data.len(),
        }
    }

    /// Occurrences of `byte`.
    pub const fn count(&self, byte: u8) -> usize {
        self.counts[byte as usize]
    }

    /// Number of bytes counted.
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct byte values present.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    /// The `n` most frequent byte values with their counts, most frequent
    /// first. Ties are broken by the smaller byte value; absent values are
    /// never returned.
    pub fn most_common(&self, n: usize) -> Vec<(u8, usize)> {
        let mut present: Vec<(u8, usize)> = (0..=u8::MAX)
            .map(|byte| (byte, self.count(byte)))
            .filter(|&(_, count)| count > 0)
            .collect();
        present.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        present.truncate(n);
        present
    }

    /// Share of the page taken by `byte`, in `0.0..=1.0`.
    pub fn fraction(&self, byte: u8) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count(byte) as f64 / self.total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_every_byte() {
        let histogram = ByteHistogram::from_bytes(&[0, 0, 7, 255, 0]);
        assert_eq!(histogram.count(0), 3);
        assert_eq!(histogram.count(7), 1);
        assert_eq!(histogram.count(255), 1);
        assert_eq!(histogram.count(1), 0);
        assert_eq!(histogram.total(), 5);
        assert_eq!(histogram.distinct(), 3);
    }

    #[test]
    fn most_common_orders_by_count_then_value() {
        let histogram = ByteHistogram::from_bytes(&[5, 5, 3, 3, 9, 1, 1, 1]);
        assert_eq!(
            histogram.most_common(3),
            vec![(1, 3), (3, 2), (5, 2)]
        );
    }

    #[test]
    fn most_common_skips_absent_values() {
        let histogram = ByteHistogram::from_bytes(&[4, 4]);
        assert_eq!(histogram.most_common(10), vec![(4, 2)]);
    }

    #[test]
    fn empty_input() {
        let histogram = ByteHistogram::from_bytes(&[]);
        assert!(histogram.most_common(5).is_empty());
        assert_eq!(histogram.fraction(0), 0.0);
    }

    #[test]
    fn fraction_of_constant_page() {
        let histogram = ByteHistogram::from_bytes(&[0xAA; 4096]);
        assert_eq!(histogram.fraction(0xAA), 1.0);
        assert_eq!(histogram.fraction(0x00), 0.0);
    }
}
