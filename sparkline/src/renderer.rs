// Copyright 2025 the Sparkline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The drawing surface a sparkline is rendered onto.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Color;
use sparkline_text::{TextMeasurer, TextMetrics, TextStyle};

use crate::plan::{DrawCommand, TextAnchor, TextBaseline};

/// A host drawing surface.
///
/// The engine never touches pixels; it measures text and issues these calls.
/// Every call may fail with the surface's own error type, which is surfaced to
/// the caller unchanged.
pub trait Renderer: TextMeasurer {
    /// Draw a single line of text.
    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        style: &TextStyle,
        anchor: TextAnchor,
        baseline: TextBaseline,
        color: Color,
    ) -> Result<(), Self::Error>;

    /// Stroke an open polyline.
    fn stroke_polyline(&mut self, points: &[Point], color: Color, width: f64)
    -> Result<(), Self::Error>;

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), Self::Error>;

    /// Fill a circle.
    fn fill_disc(&mut self, center: Point, radius: f64, color: Color) -> Result<(), Self::Error>;

    /// Restrict drawing to `rect` (intersected with any enclosing clip).
    fn push_clip(&mut self, rect: Rect) -> Result<(), Self::Error>;

    /// Release the most recent clip.
    fn pop_clip(&mut self) -> Result<(), Self::Error>;
}

/// A [`Renderer`] that records every call as a [`DrawCommand`].
///
/// Text measurement is delegated to the wrapped measurer. This is the fake used
/// to test rendering without a real backend; hosts can also use it to capture a
/// frame and replay it later.
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer<M> {
    measurer: M,
    commands: Vec<DrawCommand>,
    clip_depth: usize,
    max_clip_depth: usize,
}

impl<M: TextMeasurer> RecordingRenderer<M> {
    /// Creates a recorder that measures text with `measurer`.
    pub fn new(measurer: M) -> Self {
        Self {
            measurer,
            commands: Vec::new(),
            clip_depth: 0,
            max_clip_depth: 0,
        }
    }

    /// Returns the recorded calls in order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Takes the recorded calls, leaving the recorder empty.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        self.clip_depth = 0;
        self.max_clip_depth = 0;
        core::mem::take(&mut self.commands)
    }

    /// Returns the number of clips currently pushed.
    pub fn clip_depth(&self) -> usize {
        self.clip_depth
    }

    /// Returns the deepest clip nesting seen since creation or the last take.
    pub fn max_clip_depth(&self) -> usize {
        self.max_clip_depth
    }
}

impl<M: TextMeasurer> TextMeasurer for RecordingRenderer<M> {
    type Error = M::Error;

    fn measure(&self, text: &str, style: &TextStyle) -> Result<TextMetrics, Self::Error> {
        self.measurer.measure(text, style)
    }
}

impl<M: TextMeasurer> Renderer for RecordingRenderer<M> {
    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        style: &TextStyle,
        anchor: TextAnchor,
        baseline: TextBaseline,
        color: Color,
    ) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::DrawText {
            text: String::from(text),
            origin,
            style: style.clone(),
            anchor,
            baseline,
            color,
        });
        Ok(())
    }

    fn stroke_polyline(
        &mut self,
        points: &[Point],
        color: Color,
        width: f64,
    ) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::StrokePolyline {
            points: points.to_vec(),
            color,
            width,
        });
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::FillRect { rect, color });
        Ok(())
    }

    fn fill_disc(&mut self, center: Point, radius: f64, color: Color) -> Result<(), Self::Error> {
        self.commands.push(DrawCommand::FillDisc {
            center,
            radius,
            color,
        });
        Ok(())
    }

    fn push_clip(&mut self, rect: Rect) -> Result<(), Self::Error> {
        self.clip_depth += 1;
        self.max_clip_depth = self.max_clip_depth.max(self.clip_depth);
        self.commands.push(DrawCommand::PushClip(rect));
        Ok(())
    }

    fn pop_clip(&mut self) -> Result<(), Self::Error> {
        self.clip_depth = self.clip_depth.saturating_sub(1);
        self.commands.push(DrawCommand::PopClip);
        Ok(())
    }
}
