// Copyright 2025 the Sparkline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sampled series and its derived statistics.

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;

/// Read-only values derived from a series.
///
/// These ignore the forced range limits: they describe the raw samples only.
/// All three are `None` for an empty series.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SeriesStats {
    /// Smallest sample.
    pub minimum: Option<f64>,
    /// Largest sample.
    pub maximum: Option<f64>,
    /// The last (most recent) sample.
    pub current: Option<f64>,
}

impl SeriesStats {
    /// Computes statistics over `values` in one pass.
    ///
    /// NaN samples do not participate in the minimum/maximum; such series are
    /// rejected before planning anyway.
    pub fn from_values(values: &[f64]) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut any = false;
        for &v in values {
            if v.is_nan() {
                continue;
            }
            min = min.min(v);
            max = max.max(v);
            any = true;
        }
        Self {
            minimum: any.then_some(min),
            maximum: any.then_some(max),
            current: values.last().copied(),
        }
    }
}

/// An immutable, chronologically ordered series of samples.
///
/// Constructing a `Series` copies the caller's data, so later mutation of the
/// source container is never observed. Cloning is cheap (the samples are shared).
/// Statistics are computed once at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    values: Arc<[f64]>,
    stats: SeriesStats,
}

impl Series {
    /// Creates a series by copying `values`.
    pub fn new(values: &[f64]) -> Self {
        Self::from_arc(Arc::from(values))
    }

    /// Creates an empty series.
    pub fn empty() -> Self {
        Self::new(&[])
    }

    fn from_arc(values: Arc<[f64]>) -> Self {
        let stats = SeriesStats::from_values(&values);
        Self { values, stats }
    }

    /// Returns the samples in chronological order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the series has no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the memoized statistics.
    pub fn stats(&self) -> SeriesStats {
        self.stats
    }

    /// Returns the index and value of the first NaN or infinite sample, if any.
    pub fn first_non_finite(&self) -> Option<(usize, f64)> {
        self.values
            .iter()
            .copied()
            .enumerate()
            .find(|(_, v)| !v.is_finite())
    }
}

impl Default for Series {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&[f64]> for Series {
    fn from(values: &[f64]) -> Self {
        Self::new(values)
    }
}

impl From<Vec<f64>> for Series {
    fn from(values: Vec<f64>) -> Self {
        Self::from_arc(Arc::from(values))
    }
}

impl<const N: usize> From<[f64; N]> for Series {
    fn from(values: [f64; N]) -> Self {
        Self::new(&values)
    }
}

impl<const N: usize> From<&[f64; N]> for Series {
    fn from(values: &[f64; N]) -> Self {
        Self::new(values)
    }
}

impl FromIterator<f64> for Series {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}
