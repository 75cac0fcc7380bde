// Copyright 2025 the Sparkline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parley-backed text measurement adapter.
//!
//! This crate implements [`sparkline_text::TextMeasurer`] using Parley, giving
//! the sparkline layout planner shaping-aware label widths.
//!
//! Unlike the heuristic measurer, this one can fail: when no installed font
//! produces glyphs for a non-blank label the measurement is reported as
//! [`ParleyMeasureError::FontUnavailable`] instead of a silent zero width.

#![no_std]

extern crate alloc;

use alloc::borrow::Cow;
use core::cell::RefCell;
use core::fmt;

use parley::style::{FontFamily as ParleyFontFamily, FontStack, GenericFamily, StyleProperty};
use parley::{Alignment, AlignmentOptions, FontContext, FontStyle as ParleyFontStyle, FontWeight};
use sparkline_text::{FontFamily, FontStyle, TextMeasurer, TextMetrics, TextStyle};

/// Errors reported by [`ParleyTextMeasurer`].
#[derive(Clone, Debug, PartialEq)]
pub enum ParleyMeasureError {
    /// The requested font size is not a positive finite number.
    InvalidFontSize(f64),
    /// No font could be resolved for the requested family and text.
    FontUnavailable,
}

impl fmt::Display for ParleyMeasureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFontSize(size) => write!(f, "invalid font size {size}"),
            Self::FontUnavailable => f.write_str("no font available to shape text"),
        }
    }
}

impl core::error::Error for ParleyMeasureError {}

/// A [`TextMeasurer`] backed by Parley.
///
/// Only the first line of the input is measured; sparkline labels are single-line.
pub struct ParleyTextMeasurer {
    font_cx: RefCell<FontContext>,
    layout_cx: RefCell<parley::LayoutContext<()>>,
    display_scale: f32,
    quantize: bool,
}

impl fmt::Debug for ParleyTextMeasurer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParleyTextMeasurer")
            .field("display_scale", &self.display_scale)
            .field("quantize", &self.quantize)
            .finish_non_exhaustive()
    }
}

impl ParleyTextMeasurer {
    /// Creates a new Parley-backed text measurer using the system font collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            font_cx: RefCell::new(FontContext::new()),
            layout_cx: RefCell::new(parley::LayoutContext::new()),
            display_scale: 1.0,
            quantize: true,
        }
    }

    /// Sets the display scale passed to Parley.
    ///
    /// This is typically a device pixel ratio. Measurements are scaled back into
    /// logical coordinates.
    #[must_use]
    pub fn with_display_scale(mut self, display_scale: f32) -> Self {
        self.display_scale = display_scale.max(0.0);
        self
    }

    /// Sets whether Parley should quantize layout coordinates to pixel boundaries.
    #[must_use]
    pub fn with_quantize(mut self, quantize: bool) -> Self {
        self.quantize = quantize;
        self
    }

    fn parley_font_stack(family: &FontFamily) -> FontStack<'_> {
        let family = match family {
            FontFamily::Serif => ParleyFontFamily::Generic(GenericFamily::Serif),
            FontFamily::SansSerif => ParleyFontFamily::Generic(GenericFamily::SansSerif),
            FontFamily::Monospace => ParleyFontFamily::Generic(GenericFamily::Monospace),
            FontFamily::Named(name) => ParleyFontFamily::Named(Cow::Borrowed(name.as_ref())),
        };
        FontStack::from(family)
    }

    fn parley_font_style(style: FontStyle) -> ParleyFontStyle {
        match style {
            FontStyle::Normal => ParleyFontStyle::Normal,
            FontStyle::Italic => ParleyFontStyle::Italic,
            FontStyle::Oblique => ParleyFontStyle::Oblique(None),
        }
    }

    fn font_size_f32(font_size: f64) -> Result<f32, ParleyMeasureError> {
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(ParleyMeasureError::InvalidFontSize(font_size));
        }
        if font_size >= f64::from(f32::MAX) {
            Ok(f32::MAX)
        } else {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Value is clamped to f32::MAX above"
            )]
            {
                Ok(font_size as f32)
            }
        }
    }
}

impl Default for ParleyTextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for ParleyTextMeasurer {
    type Error = ParleyMeasureError;

    fn measure(&self, text: &str, style: &TextStyle) -> Result<TextMetrics, Self::Error> {
        let font_size = Self::font_size_f32(style.font_size)?;
        let text = text.split('\n').next().unwrap_or("");
        if text.is_empty() {
            return Ok(TextMetrics::EMPTY);
        }

        let scale = self.display_scale.max(1.0e-6);

        let mut font_cx = self.font_cx.borrow_mut();
        let mut layout_cx = self.layout_cx.borrow_mut();

        let mut builder = layout_cx.ranged_builder(&mut font_cx, text, scale, self.quantize);
        builder.push_default(StyleProperty::FontSize(font_size));
        builder.push_default(StyleProperty::FontStack(Self::parley_font_stack(
            &style.font_family,
        )));
        builder.push_default(StyleProperty::FontStyle(Self::parley_font_style(
            style.font_style,
        )));
        builder.push_default(StyleProperty::FontWeight(FontWeight::new(f32::from(
            style.font_weight.0,
        ))));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(None, Alignment::Start, AlignmentOptions::default());

        let Some(line) = layout.lines().next() else {
            return Err(ParleyMeasureError::FontUnavailable);
        };

        let m = line.metrics();
        let blank = text.chars().all(char::is_whitespace);
        if !blank && m.advance <= 0.0 {
            return Err(ParleyMeasureError::FontUnavailable);
        }

        let scale = f64::from(scale);
        Ok(TextMetrics {
            advance_width: f64::from(m.advance) / scale,
            ascent: f64::from(m.ascent) / scale,
            descent: f64::from(m.descent) / scale,
            leading: f64::from(m.leading) / scale,
        })
    }
}
