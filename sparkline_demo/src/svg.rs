// Copyright 2025 the Sparkline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An SVG backend for `sparkline::Renderer`.

use std::fmt::Write as _;

use kurbo::{Point, Rect};
use peniko::Color;
use sparkline::{
    FontStyle, Renderer, TextAnchor, TextBaseline, TextMeasurer, TextMetrics, TextStyle,
};

/// Writes every draw call as an SVG element.
///
/// Clips become `<clipPath>` definitions wrapping a `<g>` group, so nesting
/// follows the push/pop order.
#[derive(Debug)]
pub(crate) struct SvgRenderer<M> {
    measurer: M,
    body: String,
    next_clip_id: usize,
    open_groups: usize,
}

impl<M: TextMeasurer> SvgRenderer<M> {
    pub(crate) fn new(measurer: M) -> Self {
        Self {
            measurer,
            body: String::new(),
            next_clip_id: 0,
            open_groups: 0,
        }
    }

    /// Closes any unbalanced groups and wraps the body in an `<svg>` element.
    pub(crate) fn finish(mut self, view_box: Rect) -> String {
        for _ in 0..self.open_groups {
            self.body.push_str("</g>\n");
        }
        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        let _ = writeln!(
            out,
            r#"viewBox="{} {} {} {}" width="{}" height="{}">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        );
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

impl<M: TextMeasurer> TextMeasurer for SvgRenderer<M> {
    type Error = M::Error;

    fn measure(&self, text: &str, style: &TextStyle) -> Result<TextMetrics, Self::Error> {
        self.measurer.measure(text, style)
    }
}

impl<M: TextMeasurer> Renderer for SvgRenderer<M> {
    fn draw_text(
        &mut self,
        text: &str,
        origin: Point,
        style: &TextStyle,
        anchor: TextAnchor,
        baseline: TextBaseline,
        color: Color,
    ) -> Result<(), Self::Error> {
        let baseline = match baseline {
            TextBaseline::Middle => "middle",
            TextBaseline::Alphabetic => "alphabetic",
        };
        let anchor = match anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        let _ = write!(
            self.body,
            r#"<text x="{}" y="{}" font-size="{}" font-family="{}" font-weight="{}" dominant-baseline="{baseline}" text-anchor="{anchor}""#,
            origin.x,
            origin.y,
            style.font_size,
            escape_xml(style.font_family.as_css_family()),
            style.font_weight.0,
        );
        match style.font_style {
            FontStyle::Normal => {}
            FontStyle::Italic => self.body.push_str(r#" font-style="italic""#),
            FontStyle::Oblique => self.body.push_str(r#" font-style="oblique""#),
        }
        write_paint_attr(&mut self.body, "fill", color);
        self.body.push('>');
        self.body.push_str(&escape_xml(text));
        self.body.push_str("</text>\n");
        Ok(())
    }

    fn stroke_polyline(
        &mut self,
        points: &[Point],
        color: Color,
        width: f64,
    ) -> Result<(), Self::Error> {
        self.body.push_str(r#"<polyline points=""#);
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                self.body.push(' ');
            }
            let _ = write!(self.body, "{},{}", p.x, p.y);
        }
        self.body.push_str(r#"" fill="none""#);
        write_paint_attr(&mut self.body, "stroke", color);
        let _ = writeln!(
            self.body,
            r#" stroke-width="{width}" stroke-linejoin="round" stroke-linecap="round"/>"#
        );
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), Self::Error> {
        let _ = write!(
            self.body,
            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height(),
        );
        write_paint_attr(&mut self.body, "fill", color);
        self.body.push_str("/>\n");
        Ok(())
    }

    fn fill_disc(&mut self, center: Point, radius: f64, color: Color) -> Result<(), Self::Error> {
        let _ = write!(
            self.body,
            r#"<circle cx="{}" cy="{}" r="{radius}""#,
            center.x, center.y
        );
        write_paint_attr(&mut self.body, "fill", color);
        self.body.push_str("/>\n");
        Ok(())
    }

    fn push_clip(&mut self, rect: Rect) -> Result<(), Self::Error> {
        let id = self.next_clip_id;
        self.next_clip_id += 1;
        let _ = writeln!(
            self.body,
            r#"<clipPath id="clip{id}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height(),
        );
        let _ = writeln!(self.body, r#"<g clip-path="url(#clip{id})">"#);
        self.open_groups += 1;
        Ok(())
    }

    fn pop_clip(&mut self) -> Result<(), Self::Error> {
        if self.open_groups > 0 {
            self.open_groups -= 1;
            self.body.push_str("</g>\n");
        }
        Ok(())
    }
}

fn write_paint_attr(out: &mut String, name: &str, color: Color) {
    let rgba = color.to_rgba8();
    let _ = write!(
        out,
        r##" {name}="#{:02x}{:02x}{:02x}""##,
        rgba.r, rgba.g, rgba.b
    );
    if rgba.a != 255 {
        let _ = write!(out, r#" {name}-opacity="{}""#, f64::from(rgba.a) / 255.0);
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use peniko::color::palette::css;
    use sparkline::{HeuristicTextMeasurer, SparklineEngine};

    use super::*;

    #[test]
    fn clips_wrap_groups_and_close() {
        let engine = SparklineEngine::from_data_with_label([1.0, 3.0, 2.0], "A&B");
        let mut svg = SvgRenderer::new(HeuristicTextMeasurer);
        let rect = Rect::new(0.0, 0.0, 120.0, 20.0);
        engine.render(rect, &mut svg).unwrap();
        let out = svg.finish(rect);
        assert!(out.starts_with("<svg"));
        assert_eq!(out.matches("<g ").count(), out.matches("</g>").count());
        assert!(out.contains("A&amp;B"), "label escaped: {out}");
        assert!(out.contains("<polyline"));
        assert!(out.contains("<circle"));
    }

    #[test]
    fn translucent_colors_get_an_opacity_attribute() {
        let mut out = String::new();
        write_paint_attr(&mut out, "fill", css::BLUE.with_alpha(0.5));
        assert!(out.starts_with(r##" fill="#0000ff""##), "{out}");
        assert!(out.contains("fill-opacity="));
    }
}
