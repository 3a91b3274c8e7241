//! Lazily computed analysis results.

use crate::analyser::{FrequencyData, TimeDomainData};

/// One memoized result: either not yet computed since the last mutation, or
/// the computed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cached<T> {
    /// Invalidated; the next request recomputes.
    Uncomputed,
    /// Valid until the next invalidation.
    Computed(T),
}

// Manual impl: the derive would require `T: Default`.
impl<T> Default for Cached<T> {
    fn default() -> Self {
        Cached::Uncomputed
    }
}

impl<T> Cached<T> {
    /// Drop the stored value.
    pub fn invalidate(&mut self) {
        *self = Cached::Uncomputed;
    }

    /// True when a value is stored.
    pub fn is_computed(&self) -> bool {
        matches!(self, Cached::Computed(_))
    }

    /// The stored value, if any.
    pub fn get(&self) -> Option<&T> {
        match self {
            Cached::Computed(value) => Some(value),
            Cached::Uncomputed => None,
        }
    }

    /// Return a copy of the stored value, computing and storing it first if
    /// needed.
    pub fn get_or_compute(&mut self, compute: impl FnOnce() -> T) -> T
    where
        T: Clone,
    {
        match self {
            Cached::Computed(value) => value.clone(),
            Cached::Uncomputed => {
                let value = compute();
                *self = Cached::Computed(value.clone());
                value
            }
        }
    }
}

/// The two cached query results of an analyser.
#[derive(Debug, Clone, Default)]
pub struct AnalysisCache {
    /// Most recent time-domain snapshot.
    pub time_domain: Cached<TimeDomainData>,
    /// Most recent frequency-domain snapshot.
    pub frequency: Cached<FrequencyData>,
}

impl AnalysisCache {
    /// Invalidate both entries.
    pub fn invalidate(&mut self) {
        self.time_domain.invalidate();
        self.frequency.invalidate();
    }
}
