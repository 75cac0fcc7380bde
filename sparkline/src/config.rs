// Copyright 2025 the Sparkline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sparkline configuration.

extern crate alloc;

use alloc::string::String;

use peniko::Color;
use peniko::color::palette::css;
use sparkline_text::TextStyle;

use crate::error::{InputError, LimitSide};
use crate::format::NumberFormat;
use crate::layout::LabelLayoutSpec;

/// A color + width pair for the sparkline stroke.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in scene coordinates.
    pub width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Everything about a sparkline except its data.
///
/// Configuration is immutable once handed to the engine; build it with
/// [`SparklineConfig::new`] and the `with_*` methods, then replace it wholesale.
#[derive(Clone, Debug, PartialEq)]
pub struct SparklineConfig {
    /// Text drawn to the left of the plot.
    pub label_text: Option<String>,
    /// Label text color (default: dark gray).
    pub label_color: Color,
    /// Whether to draw the current-value readout and marker (default: `true`).
    pub show_current_value: bool,
    /// Color of the readout text and the marker (default: blue).
    pub current_value_color: Color,
    /// printf-style pattern for the readout (default: `"%.1f"`).
    pub current_value_format: String,
    /// Whether to draw the range overlay band (default: `false`).
    pub show_range_overlay: bool,
    /// Fill color of the range overlay (default: light gray).
    pub range_overlay_color: Color,
    /// Lower limit of the overlay; also forces the axis to include it.
    pub range_overlay_lower_limit: Option<f64>,
    /// Upper limit of the overlay; also forces the axis to include it.
    pub range_overlay_upper_limit: Option<f64>,
    /// The polyline stroke (default: black, width 1).
    pub pen: StrokeStyle,
    /// Label and readout font.
    pub font: TextStyle,
    /// Smallest font size the label may shrink to before being truncated.
    pub min_font_size: f64,
    /// Gap between the label text and the plot.
    pub label_padding: f64,
    /// Inset applied around the plot so strokes and markers are not clipped.
    pub plot_inset: f64,
    /// Radius of the current-value marker.
    pub marker_radius: f64,
    /// Gap between the marker and the readout text.
    pub readout_gap: f64,
}

impl Default for SparklineConfig {
    fn default() -> Self {
        Self {
            label_text: None,
            label_color: css::DARK_GRAY,
            show_current_value: true,
            current_value_color: css::BLUE,
            current_value_format: String::from("%.1f"),
            show_range_overlay: false,
            range_overlay_color: css::LIGHT_GRAY,
            range_overlay_lower_limit: None,
            range_overlay_upper_limit: None,
            pen: StrokeStyle::default(),
            font: TextStyle::new(12.0),
            min_font_size: 10.0,
            label_padding: 4.0,
            plot_inset: 3.0,
            marker_radius: 2.0,
            readout_gap: 2.0,
        }
    }
}

impl SparklineConfig {
    /// Creates a configuration with every field at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the label text.
    pub fn with_label_text(mut self, text: impl Into<String>) -> Self {
        self.label_text = Some(text.into());
        self
    }

    /// Removes the label.
    pub fn without_label(mut self) -> Self {
        self.label_text = None;
        self
    }

    /// Sets the label color.
    pub fn with_label_color(mut self, color: Color) -> Self {
        self.label_color = color;
        self
    }

    /// Enables or disables the current-value readout and marker.
    pub fn with_show_current_value(mut self, show: bool) -> Self {
        self.show_current_value = show;
        self
    }

    /// Sets the readout and marker color.
    pub fn with_current_value_color(mut self, color: Color) -> Self {
        self.current_value_color = color;
        self
    }

    /// Sets the printf-style readout pattern.
    pub fn with_current_value_format(mut self, pattern: impl Into<String>) -> Self {
        self.current_value_format = pattern.into();
        self
    }

    /// Enables or disables the range overlay band.
    pub fn with_show_range_overlay(mut self, show: bool) -> Self {
        self.show_range_overlay = show;
        self
    }

    /// Sets the range overlay fill color.
    pub fn with_range_overlay_color(mut self, color: Color) -> Self {
        self.range_overlay_color = color;
        self
    }

    /// Sets (or clears, with `None`) the lower range limit.
    pub fn with_range_overlay_lower_limit(mut self, limit: Option<f64>) -> Self {
        self.range_overlay_lower_limit = limit;
        self
    }

    /// Sets (or clears, with `None`) the upper range limit.
    pub fn with_range_overlay_upper_limit(mut self, limit: Option<f64>) -> Self {
        self.range_overlay_upper_limit = limit;
        self
    }

    /// Sets both range limits.
    pub fn with_range_overlay_limits(self, lower: Option<f64>, upper: Option<f64>) -> Self {
        self.with_range_overlay_lower_limit(lower)
            .with_range_overlay_upper_limit(upper)
    }

    /// Sets the polyline color.
    pub fn with_pen_color(mut self, color: Color) -> Self {
        self.pen.color = color;
        self
    }

    /// Sets the polyline width.
    pub fn with_pen_width(mut self, width: f64) -> Self {
        self.pen.width = width.max(0.0);
        self
    }

    /// Sets the label/readout font.
    pub fn with_font(mut self, font: TextStyle) -> Self {
        self.font = font;
        self
    }

    /// Sets the smallest font size the label may shrink to.
    pub fn with_min_font_size(mut self, size: f64) -> Self {
        self.min_font_size = size.max(0.0);
        self
    }

    /// Sets the gap between the label and the plot.
    pub fn with_label_padding(mut self, padding: f64) -> Self {
        self.label_padding = padding.max(0.0);
        self
    }

    /// Sets the plot inset.
    pub fn with_plot_inset(mut self, inset: f64) -> Self {
        self.plot_inset = inset.max(0.0);
        self
    }

    /// Sets the marker radius.
    pub fn with_marker_radius(mut self, radius: f64) -> Self {
        self.marker_radius = radius.max(0.0);
        self
    }

    /// Checks the limits and parses the readout pattern.
    pub fn validate(&self) -> Result<NumberFormat, InputError> {
        for (side, limit) in [
            (LimitSide::Lower, self.range_overlay_lower_limit),
            (LimitSide::Upper, self.range_overlay_upper_limit),
        ] {
            if let Some(value) = limit
                && !value.is_finite()
            {
                return Err(InputError::NonFiniteLimit { side, value });
            }
        }
        if let (Some(lower), Some(upper)) =
            (self.range_overlay_lower_limit, self.range_overlay_upper_limit)
            && lower > upper
        {
            return Err(InputError::InvertedLimits { lower, upper });
        }
        Ok(NumberFormat::parse(&self.current_value_format)?)
    }

    /// The label layout parameters derived from this configuration.
    pub fn label_layout(&self) -> LabelLayoutSpec {
        LabelLayoutSpec {
            style: self.font.clone(),
            min_font_size: self.min_font_size,
            padding: self.label_padding,
            plot_inset: self.plot_inset,
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::format::FormatError;

    #[test]
    fn defaults_match_documented_values() {
        let c = SparklineConfig::new();
        assert_eq!(c.label_text, None);
        assert_eq!(c.label_color, css::DARK_GRAY);
        assert!(c.show_current_value);
        assert_eq!(c.current_value_color, css::BLUE);
        assert_eq!(c.current_value_format, "%.1f");
        assert!(!c.show_range_overlay);
        assert_eq!(c.range_overlay_color, css::LIGHT_GRAY);
        assert_eq!(c.range_overlay_lower_limit, None);
        assert_eq!(c.range_overlay_upper_limit, None);
        assert_eq!(c.pen, StrokeStyle::default());
    }

    #[test]
    fn validate_rejects_bad_limits_and_patterns() {
        let inverted = SparklineConfig::new().with_range_overlay_limits(Some(5.0), Some(1.0));
        assert_eq!(
            inverted.validate(),
            Err(InputError::InvertedLimits {
                lower: 5.0,
                upper: 1.0
            })
        );

        let infinite = SparklineConfig::new().with_range_overlay_upper_limit(Some(f64::INFINITY));
        assert!(matches!(
            infinite.validate(),
            Err(InputError::NonFiniteLimit {
                side: LimitSide::Upper,
                ..
            })
        ));

        let bad_format = SparklineConfig::new().with_current_value_format("%s");
        assert_eq!(
            bad_format.validate(),
            Err(InputError::InvalidFormat(
                FormatError::UnsupportedConversion('s')
            ))
        );

        let equal = SparklineConfig::new().with_range_overlay_limits(Some(2.0), Some(2.0));
        assert!(equal.validate().is_ok());
    }
}
