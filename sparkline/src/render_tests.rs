// Copyright 2025 the Sparkline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end rendering scenarios against a recording renderer.

extern crate std;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Color;

use crate::{
    DrawCommand, HeuristicTextMeasurer, MAX_LABEL_FRACTION, RecordingRenderer, Renderer, Series,
    SparklineConfig, SparklineEngine, SparklineError, SparklineFrame, TextAnchor, TextBaseline,
    TextMeasurer, TextMetrics, TextStyle,
};

const RECT: Rect = Rect::new(0.0, 0.0, 160.0, 24.0);

fn render(engine: &SparklineEngine) -> (SparklineFrame, Vec<DrawCommand>) {
    let mut renderer = RecordingRenderer::new(HeuristicTextMeasurer);
    let frame = engine.render(RECT, &mut renderer).unwrap();
    assert_eq!(renderer.clip_depth(), 0, "clips must be balanced");
    (frame, renderer.take_commands())
}

fn polyline(commands: &[DrawCommand]) -> Option<&[Point]> {
    commands.iter().find_map(|c| match c {
        DrawCommand::StrokePolyline { points, .. } => Some(points.as_slice()),
        _ => None,
    })
}

fn texts(commands: &[DrawCommand]) -> Vec<&str> {
    commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::DrawText { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

fn kind(c: &DrawCommand) -> &'static str {
    match c {
        DrawCommand::PushClip(_) => "push_clip",
        DrawCommand::PopClip => "pop_clip",
        DrawCommand::FillRect { .. } => "fill_rect",
        DrawCommand::StrokePolyline { .. } => "stroke_polyline",
        DrawCommand::FillDisc { .. } => "fill_disc",
        DrawCommand::DrawText { .. } => "draw_text",
    }
}

#[test]
fn rise_and_fall_series_auto_scales() {
    let engine = SparklineEngine::from_data([1.0, 2.0, 3.0, 2.0, 1.0]);
    let (frame, commands) = render(&engine);
    assert_eq!((frame.axis.min, frame.axis.max), (1.0, 3.0));

    let points = polyline(&commands).expect("polyline drawn");
    assert_eq!(points.len(), 5);
    let plot = frame.layout.plot;
    let mid = plot.center().y;
    assert!((points[1].y - mid).abs() < 1e-9, "value 2 is mid-scale");
    assert!((points[3].y - mid).abs() < 1e-9, "value 2 is mid-scale");
    assert!((points[2].y - plot.y0).abs() < 1e-9, "maximum at the top");
    assert!((points[4].y - plot.y1).abs() < 1e-9, "last sample is the minimum");
    assert_eq!(frame.readout.as_deref(), Some("1.0"));
}

#[test]
fn empty_series_draws_only_the_label() {
    let engine = SparklineEngine::from_data_with_label(Series::empty(), "CPU");
    let (frame, commands) = render(&engine);
    assert_eq!(engine.data_current_value(), None);
    assert_eq!(frame.readout, None);
    let kinds: Vec<_> = commands.iter().map(kind).collect();
    assert_eq!(kinds, ["push_clip", "draw_text", "pop_clip"]);
    assert_eq!(texts(&commands), ["CPU"]);
}

#[test]
fn flat_series_inside_forced_limits() {
    let config = SparklineConfig::new()
        .with_show_range_overlay(true)
        .with_range_overlay_limits(Some(0.0), Some(10.0));
    let engine = SparklineEngine::new(config).with_series([5.0, 5.0, 5.0]);
    let (frame, commands) = render(&engine);
    assert_eq!((frame.axis.min, frame.axis.max), (0.0, 10.0));

    let plot = frame.layout.plot;
    let points = polyline(&commands).expect("polyline drawn");
    assert_eq!(points.len(), 3);
    for p in points {
        assert!((p.y - plot.center().y).abs() < 1e-9, "flat line at Y(5)");
    }

    let band = commands
        .iter()
        .find_map(|c| match c {
            DrawCommand::FillRect { rect, .. } => Some(*rect),
            _ => None,
        })
        .expect("band drawn");
    assert!((band.y0 - plot.y0).abs() < 1e-9 && (band.y1 - plot.y1).abs() < 1e-9);
    assert_eq!((band.x0, band.x1), (plot.x0, plot.x1));
}

#[test]
fn single_sample_draws_marker_and_readout() {
    let config = SparklineConfig::new().with_current_value_format("%.1f");
    let engine = SparklineEngine::new(config).with_series([10.0]);
    let (frame, commands) = render(&engine);

    assert!(polyline(&commands).is_none(), "a single sample has no line");
    let center = commands
        .iter()
        .find_map(|c| match c {
            DrawCommand::FillDisc { center, .. } => Some(*center),
            _ => None,
        })
        .expect("marker drawn");
    assert_eq!(center, frame.layout.plot.center());
    assert_eq!(texts(&commands), ["10.0"]);
    assert_eq!(frame.readout.as_deref(), Some("10.0"));
}

#[test]
fn layers_are_ordered_band_line_marker_text() {
    let config = SparklineConfig::new()
        .with_label_text("Load")
        .with_show_range_overlay(true)
        .with_range_overlay_limits(Some(1.0), Some(2.0));
    let engine = SparklineEngine::new(config).with_series([0.5, 1.5, 2.5, 1.0]);
    let (_, commands) = render(&engine);
    let kinds: Vec<_> = commands.iter().map(kind).collect();
    assert_eq!(
        kinds,
        [
            "push_clip",
            "draw_text",
            "pop_clip",
            "push_clip",
            "fill_rect",
            "stroke_polyline",
            "fill_disc",
            "draw_text",
            "pop_clip",
        ]
    );
}

#[test]
fn polyline_points_match_samples_and_increase_in_x() {
    let series: [&[f64]; 4] = [
        &[0.0, 1.0],
        &[3.0, -1.0, 4.0, 1.0, -5.0, 9.0],
        &[2.0; 40],
        &[1e6, 1e6 + 1.0, 1e6 - 3.0],
    ];
    for values in series {
        let engine = SparklineEngine::from_data(values);
        let (frame, commands) = render(&engine);
        let points = polyline(&commands).expect("polyline drawn");
        assert_eq!(points.len(), values.len());
        assert!(points.windows(2).all(|w| w[0].x < w[1].x), "x increases");
        for &v in values {
            assert!(frame.axis.contains(v), "{v} outside {:?}", frame.axis);
        }
        let plot = frame.layout.plot;
        assert!(
            points
                .iter()
                .all(|p| p.y >= plot.y0 - 1e-9 && p.y <= plot.y1 + 1e-9)
        );
    }
}

#[test]
fn label_is_capped_at_half_the_width() {
    let engine = SparklineEngine::from_data_with_label(
        [1.0, 2.0],
        "Average response time across every region",
    );
    let (frame, commands) = render(&engine);
    assert!(frame.layout.label.width() <= MAX_LABEL_FRACTION * RECT.width() + 1e-9);
    let label = texts(&commands)[0];
    assert!(label.ends_with(crate::ELLIPSIS), "label truncated: {label}");
}

#[test]
fn readout_stays_inside_the_plot_area() {
    let engine = SparklineEngine::from_data([1.0, 5.0, 1234.5678]);
    let (frame, commands) = render(&engine);
    let (text, origin, style) = commands
        .iter()
        .find_map(|c| match c {
            DrawCommand::DrawText {
                text,
                origin,
                style,
                anchor: TextAnchor::Start,
                baseline: TextBaseline::Middle,
                ..
            } => Some((text, *origin, style)),
            _ => None,
        })
        .expect("readout drawn");
    assert_eq!(text, "1234.6");
    let width = HeuristicTextMeasurer
        .measure(text, style)
        .unwrap()
        .advance_width;
    assert!(origin.x + width <= frame.layout.plot.x1 + 1e-9, "no overflow");
    assert!(origin.x >= frame.layout.plot_area.x0);
}

#[test]
fn hidden_readout_and_overlay_are_not_drawn() {
    let config = SparklineConfig::new()
        .with_show_current_value(false)
        .with_range_overlay_limits(Some(0.0), Some(4.0));
    let engine = SparklineEngine::new(config).with_series([1.0, 2.0]);
    let (frame, commands) = render(&engine);
    assert_eq!(frame.readout, None);
    assert!(
        commands
            .iter()
            .all(|c| !matches!(c, DrawCommand::FillDisc { .. } | DrawCommand::FillRect { .. }))
    );
    // Limits still widen the axis without the band.
    assert_eq!((frame.axis.min, frame.axis.max), (0.0, 4.0));
}

#[test]
fn pen_settings_reach_the_polyline() {
    let red = Color::from_rgb8(200, 0, 0);
    let config = SparklineConfig::new().with_pen_color(red).with_pen_width(2.5);
    let engine = SparklineEngine::new(config).with_series([1.0, 2.0]);
    let (_, commands) = render(&engine);
    assert!(commands.iter().any(|c| matches!(
        c,
        DrawCommand::StrokePolyline { color, width, .. } if *color == red && *width == 2.5
    )));
}

#[test]
fn planning_is_deterministic_and_matches_render() {
    let engine = SparklineEngine::from_data_with_label([3.0, 1.0, 4.0, 1.0, 5.0], "Queue");
    let a = engine.plan(RECT, &HeuristicTextMeasurer).unwrap();
    let b = engine.plan(RECT, &HeuristicTextMeasurer).unwrap();
    assert_eq!(a, b);
    let (_, commands) = render(&engine);
    assert_eq!(a.plan.commands(), commands.as_slice());
}

#[test]
fn extreme_finite_samples_map_to_finite_geometry() {
    let cases: [&[f64]; 3] = [&[-1e308, 1e308], &[f64::MAX], &[f64::MIN, 0.0, f64::MAX]];
    for values in cases {
        let engine = SparklineEngine::from_data(values)
            .with_config(SparklineConfig::new().with_current_value_format("%g"));
        let (frame, commands) = render(&engine);
        assert!(
            frame.axis.min.is_finite() && frame.axis.max.is_finite(),
            "axis {:?}",
            frame.axis
        );
        assert!(frame.axis.min < frame.axis.max, "axis {:?}", frame.axis);
        for c in &commands {
            let finite = match c {
                DrawCommand::StrokePolyline { points, .. } => {
                    points.iter().all(|p| p.x.is_finite() && p.y.is_finite())
                }
                DrawCommand::FillDisc { center, .. } => center.x.is_finite() && center.y.is_finite(),
                DrawCommand::DrawText { origin, .. } => origin.x.is_finite() && origin.y.is_finite(),
                _ => true,
            };
            assert!(finite, "non-finite geometry in {c:?} for {values:?}");
        }
    }
}

#[test]
fn degenerate_rects_do_not_panic() {
    let engine = SparklineEngine::from_data_with_label([1.0, 2.0, 3.0], "CPU");
    for rect in [
        Rect::ZERO,
        Rect::new(0.0, 0.0, 2.0, 2.0),
        Rect::new(50.0, 10.0, 0.0, 0.0),
    ] {
        let frame = engine.plan(rect, &HeuristicTextMeasurer).unwrap();
        assert!(frame.layout.plot.width() >= 0.0 && frame.layout.plot.height() >= 0.0);
    }
}

/// Fails to measure text containing a digit.
#[derive(Debug)]
struct NoDigitFont;

impl TextMeasurer for NoDigitFont {
    type Error = &'static str;

    fn measure(&self, text: &str, style: &TextStyle) -> Result<TextMetrics, Self::Error> {
        if text.chars().any(|c| c.is_ascii_digit()) {
            return Err("font unavailable");
        }
        Ok(HeuristicTextMeasurer.measure(text, style).unwrap_or_default())
    }
}

/// Records like [`RecordingRenderer`] but refuses to fill discs.
#[derive(Debug)]
struct NoDiscs(RecordingRenderer<HeuristicTextMeasurer>);

impl TextMeasurer for NoDiscs {
    type Error = String;

    fn measure(&self, text: &str, style: &TextStyle) -> Result<TextMetrics, Self::Error> {
        Ok(HeuristicTextMeasurer.measure(text, style).unwrap_or_default())
    }
}

impl Renderer for NoDiscs {
    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        style: &TextStyle,
        anchor: TextAnchor,
        baseline: TextBaseline,
        color: Color,
    ) -> Result<(), Self::Error> {
        let _ = self.0.draw_text(text, origin, style, anchor, baseline, color);
        Ok(())
    }

    fn stroke_polyline(
        &mut self,
        points: &[Point],
        color: Color,
        width: f64,
    ) -> Result<(), Self::Error> {
        let _ = self.0.stroke_polyline(points, color, width);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), Self::Error> {
        let _ = self.0.fill_rect(rect, color);
        Ok(())
    }

    fn fill_disc(&mut self, _: Point, _: f64, _: Color) -> Result<(), Self::Error> {
        Err(String::from("discs unsupported"))
    }

    fn push_clip(&mut self, rect: Rect) -> Result<(), Self::Error> {
        let _ = self.0.push_clip(rect);
        Ok(())
    }

    fn pop_clip(&mut self) -> Result<(), Self::Error> {
        let _ = self.0.pop_clip();
        Ok(())
    }
}

#[test]
fn measurer_failures_propagate_unchanged() {
    let engine = SparklineEngine::from_data_with_label([1.0, 2.0], "CPU");
    assert_eq!(
        engine.plan(RECT, &NoDigitFont),
        Err(SparklineError::Renderer("font unavailable"))
    );

    // Without the readout nothing numeric is measured.
    let quiet = engine
        .clone()
        .with_config(engine.config().clone().with_show_current_value(false));
    assert!(quiet.plan(RECT, &NoDigitFont).is_ok());
}

#[test]
fn renderer_failures_stop_the_replay() {
    let engine = SparklineEngine::from_data([1.0, 2.0]);
    let mut renderer = NoDiscs(RecordingRenderer::new(HeuristicTextMeasurer));
    let err = engine.render(RECT, &mut renderer).unwrap_err();
    assert_eq!(err, SparklineError::Renderer(String::from("discs unsupported")));
    let kinds: Vec<_> = renderer.0.commands().iter().map(kind).collect();
    assert_eq!(kinds, ["push_clip", "stroke_polyline"]);
}
