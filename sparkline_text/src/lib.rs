// Copyright 2025 the Sparkline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for sparkline layout.
//!
//! A sparkline shares its rectangle with a text label, so the layout pass has
//! to know how wide that label renders before it can place the plot. Glyph
//! shaping stays downstream in the host's text stack; layout code depends only
//! on the tiny measurement interface defined here.
//!
//! This crate is intentionally:
//! - small and dependency-light,
//! - `no_std`-friendly (it uses `alloc` for owned font family names), and
//! - renderer-agnostic (a shaping engine, a canvas, or a test fake can all
//!   implement the same trait).
//!
//! Measurement is fallible: a backend may be unable to resolve a font. Such
//! failures are reported through [`TextMeasurer::Error`] and are expected to be
//! surfaced to the caller unchanged.

#![no_std]

extern crate alloc;

use alloc::sync::Arc;
use core::convert::Infallible;

/// A minimal text measurement interface used by the layout planner.
///
/// Implementations can be:
/// - heuristic (fast, but inaccurate), see [`HeuristicTextMeasurer`],
/// - backed by a shaping engine (e.g. Parley), or
/// - backed by the host platform's own text metrics.
pub trait TextMeasurer {
    /// The error reported when a measurement cannot be made.
    type Error;

    /// Measure a single line of text.
    ///
    /// `text` is treated as a single line; callers should split on `\n` if they
    /// want multi-line layout.
    fn measure(&self, text: &str, style: &TextStyle) -> Result<TextMetrics, Self::Error>;
}

impl<T: TextMeasurer + ?Sized> TextMeasurer for &T {
    type Error = T::Error;

    fn measure(&self, text: &str, style: &TextStyle) -> Result<TextMetrics, Self::Error> {
        (**self).measure(text, style)
    }
}

/// Text styling inputs relevant to measurement.
///
/// This is intentionally minimal: it’s just enough to make sparkline layout
/// consistent between measurement and drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in the sparkline’s coordinate system (typically pixels).
    pub font_size: f64,
    /// The preferred font family.
    pub font_family: FontFamily,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub font_weight: FontWeight,
    /// Font style (normal/italic/oblique).
    pub font_style: FontStyle,
}

impl TextStyle {
    /// Creates a default `TextStyle` with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
        }
    }

    /// Returns a copy of this style at a different font size.
    #[must_use]
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the font family.
    #[must_use]
    pub fn with_family(mut self, family: FontFamily) -> Self {
        self.font_family = family;
        self
    }

    /// Sets the font weight.
    #[must_use]
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.font_weight = weight;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Font family selection for measurement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A generic serif family (CSS `serif`).
    Serif,
    /// A generic sans-serif family (CSS `sans-serif`).
    SansSerif,
    /// A generic monospace family (CSS `monospace`).
    Monospace,
    /// A named family (e.g. `"Helvetica"`, `"Inter"`).
    Named(Arc<str>),
}

impl FontFamily {
    /// Returns the font family string for CSS-style font declarations.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

/// CSS-style font styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Normal style.
    Normal,
    /// Italic style.
    Italic,
    /// Oblique style.
    Oblique,
}

/// Measured metrics for a single line of text.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    /// The advance width (useful for horizontal layout).
    pub advance_width: f64,
    /// Distance from baseline to the top of typical glyphs.
    pub ascent: f64,
    /// Distance from baseline to the bottom of typical glyphs.
    pub descent: f64,
    /// Additional line spacing beyond ascent+descent.
    pub leading: f64,
}

impl TextMetrics {
    /// Metrics of an empty string.
    pub const EMPTY: Self = Self {
        advance_width: 0.0,
        ascent: 0.0,
        descent: 0.0,
        leading: 0.0,
    };

    /// Returns `ascent + descent + leading`.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent + self.leading
    }
}

/// A tiny heuristic text measurer suitable for tests, demos and early layout.
///
/// It assumes an average glyph width of ~0.6em and a baseline at ~0.8em.
/// Measurement never fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    type Error = Infallible;

    fn measure(&self, text: &str, style: &TextStyle) -> Result<TextMetrics, Self::Error> {
        let advance_width = 0.6 * style.font_size * text.chars().count() as f64;
        let ascent = 0.8 * style.font_size;
        let descent = 0.2 * style.font_size;
        Ok(TextMetrics {
            advance_width,
            ascent,
            descent,
            leading: 0.0,
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn heuristic_width_scales_with_chars_and_size() {
        let m = HeuristicTextMeasurer;
        let small = m.measure("CPU", &TextStyle::new(10.0)).unwrap();
        let large = m.measure("CPU", &TextStyle::new(20.0)).unwrap();
        assert!((small.advance_width - 18.0).abs() < 1e-9, "0.6em per glyph");
        assert!(
            (large.advance_width - 2.0 * small.advance_width).abs() < 1e-9,
            "width is linear in font size"
        );
        assert!((small.line_height() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn reference_measurer_delegates() {
        let m = HeuristicTextMeasurer;
        let by_ref: &dyn TextMeasurer<Error = Infallible> = &m;
        let direct = m.measure("abc", &TextStyle::default()).unwrap();
        let delegated = (&by_ref).measure("abc", &TextStyle::default()).unwrap();
        assert_eq!(direct, delegated);
    }
}
