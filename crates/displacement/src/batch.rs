//! crates/displacement/src/batch.rs
//!
//! Classification of many independent page pairs.
//!
//! Each pair is classified on its own with no shared mutable state, so with
//! the `parallel` feature the work is spread across the rayon thread pool.
//! Output order always matches input order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::classifier::Classifier;
use crate::verdict::Verdict;

/// Two page buffers to be classified together.
pub trait PagePair {
    /// First page of the pair.
    fn first(&self) -> &[u8];
    /// Second page of the pair.
    fn second(&self) -> &[u8];
}

impl<A, B> PagePair for (A, B)
where
    A: AsRef<[u8]>,
    B: AsRef<[u8]>,
{
    fn first(&self) -> &[u8] {
        self.0.as_ref()
    }

    fn second(&self) -> &[u8] {
        self.1.as_ref()
    }
}

impl Classifier {
    /// Classifies every pair, returning verdicts in input order.
    #[cfg(feature = "parallel")]
    pub fn classify_all<P>(&self, pairs: &[P]) -> Vec<Verdict>
    where
        P: PagePair + Sync,
    {
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "pageshift::batch", pairs = pairs.len(), "classifying in parallel");

        pairs
            .par_iter()
            .map(|pair| self.classify(pair.first(), pair.second()))
            .collect()
    }

    /// Classifies every pair, returning verdicts in input order.
    #[cfg(not(feature = "parallel"))]
    pub fn classify_all<P>(&self, pairs: &[P]) -> Vec<Verdict>
    where
        P: PagePair + Sync,
    {
        pairs
            .iter()
            .map(|pair| self.classify(pair.first(), pair.second()))
            .collect()
    }
}
