// Copyright 2025 the Sparkline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The sparkline engine: data + configuration in, draw plan out.

extern crate alloc;

use alloc::format;
use alloc::string::String;

use kurbo::{Point, Rect, Size};

use crate::config::SparklineConfig;
use crate::error::{InputError, SparklineError};
use crate::format::NumberFormat;
use crate::geometry::{RangeOverlay, build_geometry, readout_origin};
use crate::layout::{SparklineLayout, plan_layout};
use crate::plan::{DrawCommand, DrawPlan, TextAnchor, TextBaseline};
use crate::renderer::Renderer;
use crate::scale::AxisBounds;
use crate::series::{Series, SeriesStats};
use sparkline_text::TextMeasurer;

/// One sparkline: an immutable series plus an immutable configuration.
///
/// Both parts are replaced wholesale. Derived values (minimum, maximum, current)
/// are computed once per series and are always in sync with the data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SparklineEngine {
    series: Series,
    config: SparklineConfig,
}

/// Everything one planning pass produced.
#[derive(Clone, Debug, PartialEq)]
pub struct SparklineFrame {
    /// Label and plot regions.
    pub layout: SparklineLayout,
    /// The resolved vertical axis.
    pub axis: AxisBounds,
    /// The ordered draw commands.
    pub plan: DrawPlan,
    /// Derived values of the series.
    pub stats: SeriesStats,
    /// The formatted current value, when the readout was drawn.
    pub readout: Option<String>,
}

impl SparklineEngine {
    /// Creates an engine with no data.
    pub fn new(config: SparklineConfig) -> Self {
        Self {
            series: Series::empty(),
            config,
        }
    }

    /// Creates an engine with no data and the default configuration.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates an engine for `data` with the default configuration.
    pub fn from_data(data: impl Into<Series>) -> Self {
        Self::default().with_series(data)
    }

    /// Creates an engine for `data` with a label and otherwise default configuration.
    pub fn from_data_with_label(data: impl Into<Series>, label: impl Into<String>) -> Self {
        Self::new(SparklineConfig::new().with_label_text(label)).with_series(data)
    }

    /// Replaces the series.
    pub fn with_series(mut self, data: impl Into<Series>) -> Self {
        self.set_series(data);
        self
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: SparklineConfig) -> Self {
        self.set_config(config);
        self
    }

    /// Replaces the series in place.
    pub fn set_series(&mut self, data: impl Into<Series>) {
        self.series = data.into();
    }

    /// Replaces the configuration in place.
    pub fn set_config(&mut self, config: SparklineConfig) {
        self.config = config;
    }

    /// Returns the series.
    pub fn series(&self) -> &Series {
        &self.series
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SparklineConfig {
        &self.config
    }

    /// Returns the derived values of the series.
    pub fn stats(&self) -> SeriesStats {
        self.series.stats()
    }

    /// Smallest sample, or `None` for an empty series.
    pub fn data_minimum(&self) -> Option<f64> {
        self.series.stats().minimum
    }

    /// Largest sample, or `None` for an empty series.
    pub fn data_maximum(&self) -> Option<f64> {
        self.series.stats().maximum
    }

    /// Most recent sample, or `None` for an empty series.
    pub fn data_current_value(&self) -> Option<f64> {
        self.series.stats().current
    }

    /// The vertical axis the series would be plotted against.
    pub fn axis_bounds(&self) -> AxisBounds {
        AxisBounds::resolve(
            &self.series.stats(),
            self.config.range_overlay_lower_limit,
            self.config.range_overlay_upper_limit,
        )
    }

    /// Checks the series and configuration, returning the parsed readout format.
    pub fn validate(&self) -> Result<NumberFormat, InputError> {
        if let Some((index, value)) = self.series.first_non_finite() {
            return Err(InputError::NonFiniteSample { index, value });
        }
        self.config.validate()
    }

    /// Computes the layout, axis and draw commands for `rect` without drawing.
    pub fn plan<M: TextMeasurer + ?Sized>(
        &self,
        rect: Rect,
        measurer: &M,
    ) -> Result<SparklineFrame, SparklineError<M::Error>> {
        let format = self.validate()?;
        if ![rect.x0, rect.y0, rect.x1, rect.y1]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(InputError::NonFiniteBounds.into());
        }

        let config = &self.config;
        let layout = plan_layout(
            measurer,
            rect,
            config.label_text.as_deref(),
            &config.label_layout(),
        )
        .map_err(SparklineError::Renderer)?;
        let stats = self.series.stats();
        let axis = self.axis_bounds();

        let mut plan = DrawPlan::new();
        if let Some(text) = &layout.label_text {
            plan.push(DrawCommand::PushClip(layout.label));
            plan.push(DrawCommand::DrawText {
                text: text.clone(),
                origin: Point::new(layout.label.x0, layout.label.center().y),
                style: layout.label_style.clone(),
                anchor: TextAnchor::Start,
                baseline: TextBaseline::Middle,
                color: config.label_color,
            });
            plan.push(DrawCommand::PopClip);
        }

        let mut readout = None;
        if !self.series.is_empty() {
            let overlay = config.show_range_overlay.then_some(RangeOverlay {
                lower: config.range_overlay_lower_limit,
                upper: config.range_overlay_upper_limit,
            });
            let geometry = build_geometry(
                self.series.values(),
                axis,
                layout.plot,
                overlay,
                config.show_current_value,
            );

            plan.push(DrawCommand::PushClip(layout.plot_area));
            if let Some(band) = geometry.band {
                plan.push(DrawCommand::FillRect {
                    rect: band,
                    color: config.range_overlay_color,
                });
            }
            if !geometry.polyline.is_empty() {
                plan.push(DrawCommand::StrokePolyline {
                    points: geometry.polyline,
                    color: config.pen.color,
                    width: config.pen.width,
                });
            }
            if let Some(marker) = geometry.marker
                && let Some(current) = stats.current
            {
                plan.push(DrawCommand::FillDisc {
                    center: marker,
                    radius: config.marker_radius,
                    color: config.current_value_color,
                });
                let text = format.format(current);
                let metrics = measurer
                    .measure(&text, &config.font)
                    .map_err(SparklineError::Renderer)?;
                let origin = readout_origin(
                    marker,
                    config.marker_radius,
                    config.readout_gap,
                    Size::new(metrics.advance_width, metrics.line_height()),
                    layout.plot,
                );
                plan.push(DrawCommand::DrawText {
                    text: text.clone(),
                    origin,
                    style: config.font.clone(),
                    anchor: TextAnchor::Start,
                    baseline: TextBaseline::Middle,
                    color: config.current_value_color,
                });
                readout = Some(text);
            }
            plan.push(DrawCommand::PopClip);
        }

        tracing::debug!(
            samples = self.series.len(),
            axis_min = axis.min,
            axis_max = axis.max,
            commands = plan.len(),
            "sparkline planned"
        );

        Ok(SparklineFrame {
            layout,
            axis,
            plan,
            stats,
            readout,
        })
    }

    /// Plans for `rect` and issues the commands against `renderer`.
    ///
    /// Text is measured with the renderer itself. Renderer failures are returned
    /// unchanged; commands issued before the failure are not rolled back.
    pub fn render<R: Renderer + ?Sized>(
        &self,
        rect: Rect,
        renderer: &mut R,
    ) -> Result<SparklineFrame, SparklineError<R::Error>> {
        let frame = self.plan(rect, &*renderer)?;
        frame.plan.replay(renderer).map_err(SparklineError::Renderer)?;
        Ok(frame)
    }

    /// A one-line text summary of the derived values, for assistive technology.
    ///
    /// Values use the readout format, or `%.1f` if that pattern is invalid.
    pub fn accessibility_label(&self) -> String {
        let format = NumberFormat::parse(&self.config.current_value_format).unwrap_or_default();
        let stats = self.series.stats();
        let summary = match (stats.current, stats.minimum, stats.maximum) {
            (Some(current), Some(min), Some(max)) => format!(
                "current {}, minimum {}, maximum {}",
                format.format(current),
                format.format(min),
                format.format(max)
            ),
            _ => String::from("no data"),
        };
        match self.config.label_text.as_deref().filter(|l| !l.is_empty()) {
            Some(label) => format!("{label}: {summary}"),
            None => summary,
        }
    }
}
