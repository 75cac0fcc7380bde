// Copyright 2025 the Sparkline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw commands produced by one planning pass.
//!
//! A [`DrawPlan`] is an ordered list: later commands paint over earlier ones.
//! The engine emits the label first, then (clipped to the plot area) the range
//! band, the polyline, the marker disc and finally the readout text, so the
//! marker and readout are never hidden by the series.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use peniko::Color;
use sparkline_text::TextStyle;

use crate::renderer::Renderer;

/// Horizontal text anchor relative to the text origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// The origin is at the start of the text.
    Start,
    /// The origin is at the horizontal center of the text.
    Middle,
    /// The origin is at the end of the text.
    End,
}

/// Vertical text placement relative to the text origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// The origin is at the vertical middle of the line box.
    Middle,
    /// The origin is on the alphabetic baseline.
    Alphabetic,
}

/// A single primitive drawing operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Restrict subsequent drawing to `rect` until the matching [`DrawCommand::PopClip`].
    PushClip(Rect),
    /// Release the most recent clip.
    PopClip,
    /// Fill an axis-aligned rectangle.
    FillRect {
        /// Rectangle in scene coordinates.
        rect: Rect,
        /// Fill color.
        color: Color,
    },
    /// Stroke an open polyline through `points`.
    StrokePolyline {
        /// Vertices in drawing order.
        points: Vec<Point>,
        /// Stroke color.
        color: Color,
        /// Stroke width.
        width: f64,
    },
    /// Fill a circle.
    FillDisc {
        /// Circle center.
        center: Point,
        /// Circle radius.
        radius: f64,
        /// Fill color.
        color: Color,
    },
    /// Draw a single line of text.
    DrawText {
        /// Text content (unshaped).
        text: String,
        /// Anchor point, interpreted through `anchor` and `baseline`.
        origin: Point,
        /// Font used for measurement and drawing.
        style: TextStyle,
        /// Horizontal anchor.
        anchor: TextAnchor,
        /// Vertical placement.
        baseline: TextBaseline,
        /// Text color.
        color: Color,
    },
}

impl DrawCommand {
    /// Issues this command against `renderer`.
    pub fn apply<R: Renderer + ?Sized>(&self, renderer: &mut R) -> Result<(), R::Error> {
        match self {
            Self::PushClip(rect) => renderer.push_clip(*rect),
            Self::PopClip => renderer.pop_clip(),
            Self::FillRect { rect, color } => renderer.fill_rect(*rect, *color),
            Self::StrokePolyline {
                points,
                color,
                width,
            } => renderer.stroke_polyline(points, *color, *width),
            Self::FillDisc {
                center,
                radius,
                color,
            } => renderer.fill_disc(*center, *radius, *color),
            Self::DrawText {
                text,
                origin,
                style,
                anchor,
                baseline,
                color,
            } => renderer.draw_text(text, *origin, style, *anchor, *baseline, *color),
        }
    }
}

/// An ordered list of draw commands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawPlan {
    commands: Vec<DrawCommand>,
}

impl DrawPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Returns the commands in paint order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Returns an iterator over the commands in paint order.
    pub fn iter(&self) -> core::slice::Iter<'_, DrawCommand> {
        self.commands.iter()
    }

    /// Returns the number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` if nothing would be drawn.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Issues every command, in order, against `renderer`.
    ///
    /// Stops at the first renderer error and returns it unchanged.
    pub fn replay<R: Renderer + ?Sized>(&self, renderer: &mut R) -> Result<(), R::Error> {
        for command in &self.commands {
            command.apply(renderer)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a DrawPlan {
    type Item = &'a DrawCommand;
    type IntoIter = core::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

impl From<DrawPlan> for Vec<DrawCommand> {
    fn from(plan: DrawPlan) -> Self {
        plan.commands
    }
}
