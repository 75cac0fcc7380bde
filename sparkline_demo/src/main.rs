// Copyright 2025 the Sparkline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders TOML-described sparklines into an HTML report of inline SVGs.
mod config;
mod html;
mod svg;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use kurbo::Rect;
use sparkline::SparklineEngine;
use tracing_subscriber::EnvFilter;

use crate::config::ReportConfig;

/// The report rendered when no `--input` is given.
pub(crate) const SAMPLE_REPORT: &str = include_str!("../sparklines.toml");

#[cfg(feature = "parley")]
type DemoMeasurer = sparkline_text_parley::ParleyTextMeasurer;

#[cfg(not(feature = "parley"))]
type DemoMeasurer = sparkline::HeuristicTextMeasurer;

#[derive(Debug, Parser)]
#[command(name = "sparkline_demo", version, about = "Render sparklines to HTML")]
struct Args {
    /// TOML report description (defaults to the bundled sample)
    #[arg(long)]
    input: Option<PathBuf>,

    /// Where to write the HTML report
    #[arg(long, default_value = "sparkline_demo.html")]
    output: PathBuf,

    /// Override the sparkline width from the report
    #[arg(long)]
    width: Option<f64>,

    /// Override the sparkline height from the report
    #[arg(long)]
    height: Option<f64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let source = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => SAMPLE_REPORT.to_string(),
    };
    let report = ReportConfig::from_toml(&source).context("parsing report")?;
    let rect = Rect::new(
        0.0,
        0.0,
        args.width.unwrap_or(report.width),
        args.height.unwrap_or(report.height),
    );

    let mut rows = Vec::with_capacity(report.sparkline.len());
    for entry in &report.sparkline {
        let engine = entry.engine()?;
        rows.push(render_row(&engine, rect)?);
    }

    let html = html::render_report(&report.title, &rows);
    std::fs::write(&args.output, html)
        .with_context(|| format!("writing {}", args.output.display()))?;
    tracing::info!(rows = rows.len(), output = %args.output.display(), "wrote report");
    Ok(())
}

fn render_row(engine: &SparklineEngine, rect: Rect) -> Result<html::HtmlRow> {
    let mut renderer = svg::SvgRenderer::new(DemoMeasurer::default());
    let frame = engine.render(rect, &mut renderer)?;
    tracing::debug!(
        label = engine.config().label_text.as_deref().unwrap_or(""),
        axis_min = frame.axis.min,
        axis_max = frame.axis.max,
        readout = frame.readout.as_deref().unwrap_or(""),
        "rendered sparkline"
    );
    Ok(html::HtmlRow {
        summary: engine.accessibility_label(),
        svg: renderer.finish(rect),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_report_renders_every_row() {
        let report = ReportConfig::from_toml(SAMPLE_REPORT).unwrap();
        let rect = Rect::new(0.0, 0.0, report.width, report.height);
        for entry in &report.sparkline {
            let row = render_row(&entry.engine().unwrap(), rect).unwrap();
            assert!(row.svg.starts_with("<svg"));
            assert!(!row.summary.is_empty());
        }
    }
}
