//! Random sample sequences shared between simulation runs

use std::ops::Deref;
use std::sync::Arc;

/// Immutable sequence of standard-normal draws.
///
/// Cloning is cheap and shares the underlying buffer. A sequence is never
/// mutated in place; extending or regenerating produces a new sequence, so
/// any holder keeps a consistent view.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSequence(Arc<[f64]>);

impl SampleSequence {
    #[must_use]
    pub fn empty() -> Self {
        Self(Arc::from(Vec::new()))
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// A new sequence holding this one's samples followed by `extra`
    #[must_use]
    pub fn extended_with(&self, extra: impl IntoIterator<Item = f64>) -> Self {
        let mut values = self.0.to_vec();
        values.extend(extra);
        Self(Arc::from(values))
    }

    /// Whether both sequences share the same buffer
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SampleSequence {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for SampleSequence {
    fn from(values: Vec<f64>) -> Self {
        Self(Arc::from(values))
    }
}

impl From<&[f64]> for SampleSequence {
    fn from(values: &[f64]) -> Self {
        Self(Arc::from(values))
    }
}

/// Sample sequence tagged with the seed epoch it belongs to
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSnapshot {
    pub epoch: u64,
    pub samples: SampleSequence,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extended_keeps_prefix_and_leaves_original() {
        let original = SampleSequence::from(vec![0.1, -0.2]);
        let longer = original.extended_with([0.3, 0.4]);

        assert_eq!(original.as_slice(), &[0.1, -0.2]);
        assert_eq!(longer.as_slice(), &[0.1, -0.2, 0.3, 0.4]);
        assert!(!original.ptr_eq(&longer));
    }

    #[test]
    fn test_clone_shares_buffer() {
        let seq = SampleSequence::from(vec![1.0, 2.0, 3.0]);
        let copy = seq.clone();
        assert!(seq.ptr_eq(&copy));
        assert_eq!(copy.len(), 3);
    }
}
