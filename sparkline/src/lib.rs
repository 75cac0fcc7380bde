// Copyright 2025 the Sparkline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sparkline scale and layout engine.
//!
//! A sparkline is a word-sized line chart: one numeric series, auto-scaled into
//! a small rectangle that it shares with a text label. This crate turns
//! `(series, configuration, rectangle)` into an ordered [`DrawPlan`]:
//! - the [`scale`](resolve_scale) step picks the vertical axis bounds,
//! - the [`layout`](plan_layout) step splits the rectangle into a label region
//!   and a plot region using text measurement,
//! - the [`geometry`](build_geometry) step maps samples to pixel coordinates for
//!   the polyline, the range overlay band and the current-value marker.
//!
//! Drawing itself is left to the host through the [`Renderer`] trait. Planning
//! is a pure function of its inputs, so the same inputs always produce the same
//! plan, and plans can be tested without any rendering backend
//! (see [`RecordingRenderer`]).

#![no_std]

extern crate alloc;

mod config;
mod engine;
mod error;
mod format;
mod geometry;
mod layout;
mod plan;
#[cfg(test)]
mod render_tests;
mod renderer;
mod scale;
mod series;

pub use config::{SparklineConfig, StrokeStyle};
pub use engine::{SparklineEngine, SparklineFrame};
pub use error::{InputError, LimitSide, SparklineError};
pub use format::{FormatError, NumberFormat};
pub use geometry::{PlotMapping, RangeOverlay, SeriesGeometry, build_geometry, readout_origin};
pub use layout::{ELLIPSIS, LabelLayoutSpec, MAX_LABEL_FRACTION, SparklineLayout, plan_layout};
pub use plan::{DrawCommand, DrawPlan, TextAnchor, TextBaseline};
pub use renderer::{RecordingRenderer, Renderer};
pub use scale::{AxisBounds, ScaleLinear, flat_span_epsilon, resolve_scale};
pub use series::{Series, SeriesStats};

pub use sparkline_text::{
    FontFamily, FontStyle, FontWeight, HeuristicTextMeasurer, TextMeasurer, TextMetrics, TextStyle,
};
