// Copyright 2025 the Sparkline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Label/plot partitioning.
//!
//! The sparkline rectangle is split horizontally:
//! - **Label**: as wide as the measured label plus padding, but never more than
//!   [`MAX_LABEL_FRACTION`] of the rectangle.
//! - **Plot**: everything to the right, inset on all sides so strokes and the
//!   marker disc stay inside the view.
//!
//! A label that does not fit is first drawn smaller (down to the configured
//! floor size) and only then truncated with an ellipsis.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use sparkline_text::{TextMeasurer, TextStyle};

/// Largest share of the rectangle's width the label may take.
pub const MAX_LABEL_FRACTION: f64 = 0.5;

/// Appended to truncated labels.
pub const ELLIPSIS: &str = "\u{2026}";

/// Slack for text that was shrunk to exactly the available width.
const FIT_TOLERANCE: f64 = 1e-6;

/// Inputs to [`plan_layout`] besides the rectangle and label text.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelLayoutSpec {
    /// Preferred label font.
    pub style: TextStyle,
    /// Floor for font shrinking.
    pub min_font_size: f64,
    /// Gap reserved between the label text and the plot.
    pub padding: f64,
    /// Inset applied around the plot region.
    pub plot_inset: f64,
}

/// Output of the layout pass.
#[derive(Clone, Debug, PartialEq)]
pub struct SparklineLayout {
    /// The normalized input rectangle.
    pub bounds: Rect,
    /// The label region (zero width when there is no label).
    pub label: Rect,
    /// The region right of the label, before the inset. Series drawing is clipped to it.
    pub plot_area: Rect,
    /// The inset plot rectangle that data is mapped into.
    pub plot: Rect,
    /// The label text as it should be drawn (possibly truncated), if any.
    pub label_text: Option<String>,
    /// The label style as it should be drawn (possibly shrunk).
    pub label_style: TextStyle,
}

/// Partitions `rect` into a label region and a plot region.
///
/// `rect` is normalized first. The result satisfies:
/// - `label.width() <= MAX_LABEL_FRACTION * rect.width()`,
/// - `label` and `plot_area` are disjoint and lie inside `rect`,
/// - `plot` lies inside `plot_area` and never has a negative size (it collapses to a
///   point in rectangles smaller than the inset).
///
/// Measurement failures are returned unchanged.
pub fn plan_layout<M: TextMeasurer + ?Sized>(
    measurer: &M,
    rect: Rect,
    label: Option<&str>,
    spec: &LabelLayoutSpec,
) -> Result<SparklineLayout, M::Error> {
    let bounds = rect.abs();
    let max_label_w = MAX_LABEL_FRACTION * bounds.width();
    let padding = spec.padding.max(0.0);

    let (label_text, label_style, label_w) = match label.filter(|t| !t.is_empty()) {
        None => (None, spec.style.clone(), 0.0),
        Some(text) => {
            let avail = (max_label_w - padding).max(0.0);
            let (fitted, style, text_w) =
                fit_label(measurer, text, &spec.style, spec.min_font_size, avail)?;
            if fitted.is_empty() {
                (None, style, 0.0)
            } else {
                (Some(fitted), style, (text_w + padding).min(max_label_w))
            }
        }
    };

    let label_rect = Rect::new(bounds.x0, bounds.y0, bounds.x0 + label_w, bounds.y1);
    let plot_area = Rect::new(label_rect.x1, bounds.y0, bounds.x1, bounds.y1);

    let inset = spec.plot_inset.max(0.0);
    let inset_x = inset.min(0.5 * plot_area.width());
    let inset_y = inset.min(0.5 * plot_area.height());
    let plot = Rect::new(
        plot_area.x0 + inset_x,
        plot_area.y0 + inset_y,
        plot_area.x1 - inset_x,
        plot_area.y1 - inset_y,
    );

    Ok(SparklineLayout {
        bounds,
        label: label_rect,
        plot_area,
        plot,
        label_text,
        label_style,
    })
}

/// Fits `text` into `avail` width: as-is, then shrunk to the floor size, then truncated.
///
/// Returns the text to draw, the style to draw it with, and its measured width.
fn fit_label<M: TextMeasurer + ?Sized>(
    measurer: &M,
    text: &str,
    style: &TextStyle,
    min_font_size: f64,
    avail: f64,
) -> Result<(String, TextStyle, f64), M::Error> {
    let width = measurer.measure(text, style)?.advance_width;
    if width <= avail + FIT_TOLERANCE {
        return Ok((String::from(text), style.clone(), width));
    }

    let floor = min_font_size.max(0.0).min(style.font_size);
    let shrunk_size = (style.font_size * avail / width).max(floor);
    let shrunk = style.clone().with_font_size(shrunk_size);
    let width = measurer.measure(text, &shrunk)?.advance_width;
    if width <= avail + FIT_TOLERANCE {
        tracing::trace!(
            from = style.font_size,
            to = shrunk_size,
            "label font shrunk to fit"
        );
        return Ok((String::from(text), shrunk, width));
    }

    let (truncated, width) = truncate_to_width(measurer, text, &shrunk, avail)?;
    tracing::trace!(
        font_size = shrunk_size,
        kept = truncated.len(),
        "label truncated at the font floor"
    );
    Ok((truncated, shrunk, width))
}

/// Finds the longest prefix of `text` that fits `avail` with an ellipsis appended.
///
/// Returns an empty string if not even the ellipsis fits.
fn truncate_to_width<M: TextMeasurer + ?Sized>(
    measurer: &M,
    text: &str,
    style: &TextStyle,
    avail: f64,
) -> Result<(String, f64), M::Error> {
    // boundaries[k] is the byte offset where the k-char prefix ends.
    let boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let mut best = (String::new(), 0.0);
    let (mut lo, mut hi) = (0, boundaries.len());
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let candidate = format!("{}{ELLIPSIS}", text[..boundaries[mid]].trim_end());
        let width = measurer.measure(&candidate, style)?.advance_width;
        if width <= avail + FIT_TOLERANCE {
            best = (candidate, width);
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    Ok(best)
}
