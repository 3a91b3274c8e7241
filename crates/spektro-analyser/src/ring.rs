//! Bounded sample history.

use crate::options::MAX_FFT_SIZE;

/// Append-only buffer of the most recent mono samples.
///
/// The logical length never exceeds the capacity (32768 by default, the
/// largest FFT size), so one stream of samples serves an analyser of any
/// supported size. Storage is allowed to grow to twice the capacity before
/// the head is compacted away, which keeps `append` amortized O(block length).
#[derive(Debug, Clone)]
pub struct SampleRing {
    buf: Vec<f32>,
    capacity: usize,
}

impl Default for SampleRing {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleRing {
    /// Ring bounded by [`MAX_FFT_SIZE`].
    pub fn new() -> Self {
        Self::with_capacity(MAX_FFT_SIZE)
    }

    /// Ring bounded by `capacity` samples.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(2 * capacity),
            capacity,
        }
    }

    /// Maximum number of samples retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of samples currently retained.
    pub fn len(&self) -> usize {
        self.buf.len().min(self.capacity)
    }

    /// True when no samples are retained.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Append a block, dropping the oldest samples beyond capacity.
    pub fn append(&mut self, samples: &[f32]) {
        if samples.len() >= self.capacity {
            self.buf.clear();
            self.buf
                .extend_from_slice(&samples[samples.len() - self.capacity..]);
            return;
        }

        if self.buf.len() + samples.len() > 2 * self.capacity {
            let keep = self.capacity - samples.len();
            let stale = self.buf.len() - keep;
            self.buf.drain(..stale);
        }
        self.buf.extend_from_slice(samples);
    }

    /// Drop every sample.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// All retained samples, oldest first.
    pub fn as_slice(&self) -> &[f32] {
        &self.buf[self.buf.len() - self.len()..]
    }

    /// The most recent `n` samples, or `None` if fewer are retained.
    pub fn suffix(&self, n: usize) -> Option<&[f32]> {
        if n > self.len() {
            return None;
        }
        Some(&self.buf[self.buf.len() - n..])
    }
}
