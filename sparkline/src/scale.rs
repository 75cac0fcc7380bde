// Copyright 2025 the Sparkline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vertical axis resolution and linear mapping.
//!
//! The axis of a sparkline always shows every sample. Forced range limits can
//! only widen it: a lower limit above the data minimum (or an upper limit below
//! the data maximum) leaves the data extreme in charge.

use crate::series::SeriesStats;

/// The data values mapped to the bottom and top of the plot region.
///
/// `min < max` holds for every value produced by [`resolve_scale`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisBounds {
    /// Value drawn at the bottom edge of the plot.
    pub min: f64,
    /// Value drawn at the top edge of the plot.
    pub max: f64,
}

impl AxisBounds {
    /// The scale used when there is nothing to plot and no forced limits.
    pub const UNIT: Self = Self { min: 0.0, max: 1.0 };

    /// Resolves bounds from precomputed series statistics and optional forced limits.
    pub fn resolve(stats: &SeriesStats, lower: Option<f64>, upper: Option<f64>) -> Self {
        let (mut min, mut max) = match (stats.minimum, stats.maximum) {
            (Some(data_min), Some(data_max)) => (
                lower.map_or(data_min, |l| l.min(data_min)),
                upper.map_or(data_max, |u| u.max(data_max)),
            ),
            // No samples: the limits alone define the axis, with 0..1 defaults.
            _ => match (lower, upper) {
                (Some(l), Some(u)) => (l, u),
                (Some(l), None) => (l, if l < 1.0 { 1.0 } else { l + 1.0 }),
                (None, Some(u)) => (if u > 0.0 { 0.0 } else { u - 1.0 }, u),
                (None, None) => return Self::UNIT,
            },
        };

        if min > max {
            core::mem::swap(&mut min, &mut max);
        }
        if min == max {
            // Saturate at the ends of the f64 range instead of overflowing to infinity.
            let eps = flat_span_epsilon(min);
            return Self {
                min: (min - eps).max(f64::MIN),
                max: (max + eps).min(f64::MAX),
            };
        }
        Self { min, max }
    }

    /// Returns `true` if `value` lies within the bounds (inclusive).
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Half of the span substituted for a flat axis centered on `value`.
///
/// This is the larger of one unit and 1% of the value's magnitude, so large
/// values still get a visible span.
pub fn flat_span_epsilon(value: f64) -> f64 {
    (0.01 * value.abs()).max(1.0)
}

/// Computes the vertical axis bounds for a series.
///
/// - `min = min(series minimum, lower)` and `max = max(series maximum, upper)`.
/// - Without samples, `lower` (default `0`) and `upper` (default `1`) are used;
///   a default that would invert the axis is replaced by the present limit ∓ 1.
/// - A flat result (`min == max`) is widened symmetrically by
///   [`flat_span_epsilon`], so the line sits mid-plot.
///
/// The result always satisfies `min < max` for finite inputs.
pub fn resolve_scale(values: &[f64], lower: Option<f64>, upper: Option<f64>) -> AxisBounds {
    AxisBounds::resolve(&SeriesStats::from_values(values), lower, upper)
}

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a new scale mapping `domain` values to `range` values.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// Maps a value from domain space into range space.
    ///
    /// A zero-width domain maps everything to the start of the range. Domain
    /// differences are taken on halved values, so any finite domain (up to
    /// `f64::MIN..f64::MAX`) maps finite inputs to finite outputs.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = 0.5 * d1 - 0.5 * d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (0.5 * x - 0.5 * d0) / denom;
        r0 + t * (r1 - r0)
    }
}
