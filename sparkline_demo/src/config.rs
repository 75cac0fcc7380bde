// Copyright 2025 the Sparkline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! TOML description of a sparkline report.

use anyhow::{Context as _, Result, anyhow};
use peniko::Color;
use peniko::color::{Srgb, parse_color};
use serde::Deserialize;
use sparkline::{SparklineConfig, SparklineEngine, TextStyle};

#[derive(Debug, Deserialize, Clone)]
pub(crate) struct ReportConfig {
    #[serde(default = "default_title")]
    pub(crate) title: String,
    /// Size of every sparkline, in pixels.
    #[serde(default = "default_width")]
    pub(crate) width: f64,
    #[serde(default = "default_height")]
    pub(crate) height: f64,
    #[serde(default)]
    pub(crate) sparkline: Vec<SparklineEntry>,
}

/// One row of the report. Unset fields keep the engine defaults.
#[derive(Debug, Deserialize, Clone)]
pub(crate) struct SparklineEntry {
    pub(crate) label: Option<String>,
    #[serde(default)]
    pub(crate) values: Vec<f64>,
    pub(crate) label_color: Option<String>,
    pub(crate) show_current_value: Option<bool>,
    pub(crate) current_value_color: Option<String>,
    pub(crate) current_value_format: Option<String>,
    pub(crate) show_range_overlay: Option<bool>,
    pub(crate) range_overlay_color: Option<String>,
    pub(crate) lower_limit: Option<f64>,
    pub(crate) upper_limit: Option<f64>,
    pub(crate) pen_color: Option<String>,
    pub(crate) pen_width: Option<f64>,
    pub(crate) font_size: Option<f64>,
}

fn default_title() -> String {
    "Sparklines".to_string()
}

fn default_width() -> f64 {
    240.0
}

fn default_height() -> f64 {
    24.0
}

impl ReportConfig {
    pub(crate) fn from_toml(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }
}

impl SparklineEntry {
    pub(crate) fn engine(&self) -> Result<SparklineEngine> {
        let mut config = SparklineConfig::new().with_range_overlay_limits(
            self.lower_limit,
            self.upper_limit,
        );
        if let Some(label) = &self.label {
            config = config.with_label_text(label.clone());
        }
        if let Some(color) = &self.label_color {
            config = config.with_label_color(parse_css_color(color)?);
        }
        if let Some(show) = self.show_current_value {
            config = config.with_show_current_value(show);
        }
        if let Some(color) = &self.current_value_color {
            config = config.with_current_value_color(parse_css_color(color)?);
        }
        if let Some(format) = &self.current_value_format {
            config = config.with_current_value_format(format.clone());
        }
        if let Some(show) = self.show_range_overlay {
            config = config.with_show_range_overlay(show);
        }
        if let Some(color) = &self.range_overlay_color {
            config = config.with_range_overlay_color(parse_css_color(color)?);
        }
        if let Some(color) = &self.pen_color {
            config = config.with_pen_color(parse_css_color(color)?);
        }
        if let Some(width) = self.pen_width {
            config = config.with_pen_width(width);
        }
        if let Some(size) = self.font_size {
            config = config.with_font(TextStyle::new(size));
        }

        let engine = SparklineEngine::new(config).with_series(self.values.as_slice());
        engine
            .validate()
            .with_context(|| format!("sparkline {:?}", self.label.as_deref().unwrap_or("")))?;
        Ok(engine)
    }
}

/// Parses any CSS color syntax (`"steelblue"`, `"#336699"`, `"rgb(0 0 0 / 50%)"`).
pub(crate) fn parse_css_color(s: &str) -> Result<Color> {
    parse_color(s)
        .map(|c| c.to_alpha_color::<Srgb>())
        .map_err(|e| anyhow!("invalid color {s:?}: {e}"))
}
