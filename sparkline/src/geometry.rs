// Copyright 2025 the Sparkline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mapping samples into the plot rectangle.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::scale::{AxisBounds, ScaleLinear};

/// Maps `(index, value)` pairs to scene coordinates inside a plot rectangle.
///
/// Samples are spread evenly across the full width, first at the left edge and
/// last at the right edge. Values grow upward: `bounds.min` lands on the bottom
/// edge and `bounds.max` on the top edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotMapping {
    plot: Rect,
    count: usize,
    x: ScaleLinear,
    y: ScaleLinear,
}

impl PlotMapping {
    /// Creates a mapping for `count` samples with the given axis bounds.
    pub fn new(bounds: AxisBounds, plot: Rect, count: usize) -> Self {
        let last = count.saturating_sub(1) as f64;
        Self {
            plot,
            count,
            x: ScaleLinear::new((0.0, last), (plot.x0, plot.x1)),
            y: ScaleLinear::new((bounds.min, bounds.max), (plot.y1, plot.y0)),
        }
    }

    /// Returns the plot rectangle.
    pub fn plot(&self) -> Rect {
        self.plot
    }

    /// Returns the number of samples this mapping was built for.
    pub fn count(&self) -> usize {
        self.count
    }

    /// X coordinate of sample `index`. A lone sample sits at the horizontal center.
    pub fn x(&self, index: usize) -> f64 {
        if self.count <= 1 {
            return self.plot.center().x;
        }
        self.x.map(index as f64)
    }

    /// Y coordinate of `value`.
    pub fn y(&self, value: f64) -> f64 {
        self.y.map(value)
    }

    /// Scene position of sample `index` with value `value`.
    pub fn point(&self, index: usize, value: f64) -> Point {
        Point::new(self.x(index), self.y(value))
    }

    /// One point per sample, or nothing when there are fewer than two samples.
    pub fn polyline(&self, values: &[f64]) -> Vec<Point> {
        if values.len() < 2 {
            return Vec::new();
        }
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| self.point(i, v))
            .collect()
    }

    /// The band for `overlay`, spanning the plot's full width.
    ///
    /// A missing limit extends the band to that edge of the plot.
    pub fn overlay_band(&self, overlay: RangeOverlay) -> Rect {
        let top = overlay.upper.map_or(self.plot.y0, |u| self.y(u));
        let bottom = overlay.lower.map_or(self.plot.y1, |l| self.y(l));
        let clamp = |y: f64| y.clamp(self.plot.y0, self.plot.y1);
        Rect::new(self.plot.x0, clamp(top), self.plot.x1, clamp(bottom)).abs()
    }
}

/// Forced range limits, as used for the overlay band.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RangeOverlay {
    /// Lower limit; `None` extends the band to the plot bottom.
    pub lower: Option<f64>,
    /// Upper limit; `None` extends the band to the plot top.
    pub upper: Option<f64>,
}

/// The mapped shapes of one sparkline.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesGeometry {
    /// The mapping used for every shape below.
    pub mapping: PlotMapping,
    /// Polyline vertices; empty for fewer than two samples.
    pub polyline: Vec<Point>,
    /// The range overlay band, if requested.
    pub band: Option<Rect>,
    /// Center of the current-value marker, if requested.
    pub marker: Option<Point>,
}

/// Maps `values` into `plot`.
///
/// `band` and `marker` are only produced for a non-empty series.
pub fn build_geometry(
    values: &[f64],
    bounds: AxisBounds,
    plot: Rect,
    overlay: Option<RangeOverlay>,
    marker: bool,
) -> SeriesGeometry {
    let mapping = PlotMapping::new(bounds, plot, values.len());
    let last = values.len().checked_sub(1);
    SeriesGeometry {
        polyline: mapping.polyline(values),
        band: overlay
            .filter(|_| !values.is_empty())
            .map(|o| mapping.overlay_band(o)),
        marker: last
            .filter(|_| marker)
            .map(|i| mapping.point(i, values[i])),
        mapping,
    }
}

/// Where to draw the readout text next to a marker.
///
/// Returns the left edge and vertical middle of the text box (draw with
/// [`TextAnchor::Start`](crate::TextAnchor::Start) and
/// [`TextBaseline::Middle`](crate::TextBaseline::Middle)).
///
/// The text starts just right of the marker and is shifted left until it ends
/// at the plot's right edge. It sits above a marker in the lower half of the
/// plot and below one in the upper half, and is kept inside the plot vertically.
pub fn readout_origin(
    marker: Point,
    marker_radius: f64,
    gap: f64,
    text: Size,
    plot: Rect,
) -> Point {
    let offset = marker_radius.max(0.0) + gap.max(0.0);

    let mut x = marker.x + offset;
    if x + text.width > plot.x1 {
        x = plot.x1 - text.width;
    }
    let x = x.max(plot.x0);

    let half_h = 0.5 * text.height;
    let y = if marker.y >= plot.center().y {
        marker.y - offset - half_h
    } else {
        marker.y + offset + half_h
    };
    let (lo, hi) = (plot.y0 + half_h, plot.y1 - half_h);
    let y = if lo <= hi {
        y.clamp(lo, hi)
    } else {
        plot.center().y
    };

    Point::new(x, y)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    const PLOT: Rect = Rect::new(10.0, 0.0, 110.0, 40.0);

    #[test]
    fn samples_span_the_plot_width() {
        let m = PlotMapping::new(AxisBounds { min: 0.0, max: 4.0 }, PLOT, 5);
        assert_eq!(m.x(0), 10.0);
        assert_eq!(m.x(4), 110.0);
        assert!((m.x(2) - 60.0).abs() < 1e-9);
        assert_eq!(m.y(0.0), 40.0);
        assert_eq!(m.y(4.0), 0.0);
    }

    #[test]
    fn single_sample_is_centered_without_a_line() {
        let g = build_geometry(
            &[7.0],
            AxisBounds { min: 6.0, max: 8.0 },
            PLOT,
            None,
            true,
        );
        assert!(g.polyline.is_empty());
        assert_eq!(g.marker, Some(Point::new(60.0, 20.0)));
        assert_eq!(g.mapping.count(), 1);
        assert_eq!(g.mapping.plot(), PLOT);
    }

    #[test]
    fn overlay_band_defaults_to_plot_edges() {
        let m = PlotMapping::new(AxisBounds { min: 0.0, max: 10.0 }, PLOT, 3);
        let band = m.overlay_band(RangeOverlay {
            lower: Some(2.5),
            upper: None,
        });
        assert_eq!(band, Rect::new(10.0, 0.0, 110.0, 30.0));

        let full = m.overlay_band(RangeOverlay::default());
        assert_eq!(full, PLOT);
    }

    #[test]
    fn empty_series_has_no_shapes() {
        let g = build_geometry(
            &[],
            AxisBounds::UNIT,
            PLOT,
            Some(RangeOverlay::default()),
            true,
        );
        assert!(g.polyline.is_empty());
        assert_eq!(g.band, None);
        assert_eq!(g.marker, None);
    }

    #[test]
    fn readout_is_shifted_left_at_the_right_edge() {
        let text = Size::new(30.0, 10.0);
        // Marker at the right edge, low in the plot: text goes above, flush right.
        let o = readout_origin(Point::new(110.0, 35.0), 2.0, 2.0, text, PLOT);
        assert_eq!(o.x, 80.0);
        assert_eq!(o.y, 26.0);

        // Marker near the top-left: text goes right of and below it.
        let o = readout_origin(Point::new(20.0, 1.0), 2.0, 2.0, text, PLOT);
        assert_eq!(o.x, 24.0);
        assert_eq!(o.y, 10.0);
    }

    #[test]
    fn readout_stays_in_a_plot_shorter_than_the_text() {
        let plot = Rect::new(0.0, 0.0, 20.0, 6.0);
        let o = readout_origin(Point::new(20.0, 0.0), 2.0, 2.0, Size::new(40.0, 10.0), plot);
        assert_eq!(o, Point::new(0.0, 3.0));
    }
}
