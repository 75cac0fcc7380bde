// Copyright 2025 the Sparkline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! printf-style formatting of the current-value readout.
//!
//! Hosts configure the readout with a C-style pattern such as `"%.1f"` or
//! `"%.0f%%"`. A pattern holds literal text, `%%` escapes, and at most one
//! numeric conversion:
//!
//! `%[flags][width][.precision][length]conversion`
//!
//! - flags: `-` (left-justify), `+` (always sign), space, `0` (zero pad), `#` (alternate form)
//! - length: `l`, `L`, `h` are accepted and ignored
//! - conversion: `f F e E g G d i`
//!
//! Patterns are parsed once into a [`NumberFormat`] and then applied to values.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};
use core::fmt;

/// Errors produced while parsing a format pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormatError {
    /// The pattern ends in the middle of a `%` directive.
    Unterminated,
    /// The directive uses a conversion character that is not supported.
    UnsupportedConversion(char),
    /// The pattern contains more than one numeric conversion.
    MultipleConversions,
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unterminated => f.write_str("pattern ends inside a % directive"),
            Self::UnsupportedConversion(c) => write!(f, "unsupported conversion `%{c}`"),
            Self::MultipleConversions => f.write_str("pattern has more than one conversion"),
        }
    }
}

impl core::error::Error for FormatError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ConversionKind {
    Fixed { upper: bool },
    Exponent { upper: bool },
    General { upper: bool },
    Integer,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Flags {
    left: bool,
    plus: bool,
    space: bool,
    zero: bool,
    alternate: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Conversion {
    flags: Flags,
    width: usize,
    precision: Option<usize>,
    kind: ConversionKind,
}

/// A parsed printf-style number format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberFormat {
    prefix: String,
    conversion: Option<Conversion>,
    suffix: String,
}

impl Default for NumberFormat {
    /// The `"%.1f"` format.
    fn default() -> Self {
        Self {
            prefix: String::new(),
            conversion: Some(Conversion {
                flags: Flags::default(),
                width: 0,
                precision: Some(1),
                kind: ConversionKind::Fixed { upper: false },
            }),
            suffix: String::new(),
        }
    }
}

impl NumberFormat {
    /// Parses a printf-style pattern.
    ///
    /// A pattern without any conversion is valid and formats every value as its
    /// literal text.
    pub fn parse(pattern: &str) -> Result<Self, FormatError> {
        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut conversion = None;

        let mut chars = pattern.chars().peekable();
        while let Some(c) = chars.next() {
            let literal = if conversion.is_some() {
                &mut suffix
            } else {
                &mut prefix
            };
            if c != '%' {
                literal.push(c);
                continue;
            }
            if chars.peek() == Some(&'%') {
                chars.next();
                literal.push('%');
                continue;
            }

            let mut flags = Flags::default();
            while let Some(&f) = chars.peek() {
                match f {
                    '-' => flags.left = true,
                    '+' => flags.plus = true,
                    ' ' => flags.space = true,
                    '0' => flags.zero = true,
                    '#' => flags.alternate = true,
                    _ => break,
                }
                chars.next();
            }

            let mut width = 0_usize;
            while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
                width = width.saturating_mul(10).saturating_add(d as usize);
                chars.next();
            }

            let mut precision = None;
            if chars.peek() == Some(&'.') {
                chars.next();
                let mut p = 0_usize;
                while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
                    p = p.saturating_mul(10).saturating_add(d as usize);
                    chars.next();
                }
                precision = Some(p);
            }

            while matches!(chars.peek(), Some('l' | 'L' | 'h')) {
                chars.next();
            }

            let kind = match chars.next() {
                None => return Err(FormatError::Unterminated),
                Some('f') => ConversionKind::Fixed { upper: false },
                Some('F') => ConversionKind::Fixed { upper: true },
                Some('e') => ConversionKind::Exponent { upper: false },
                Some('E') => ConversionKind::Exponent { upper: true },
                Some('g') => ConversionKind::General { upper: false },
                Some('G') => ConversionKind::General { upper: true },
                Some('d' | 'i') => ConversionKind::Integer,
                Some(other) => return Err(FormatError::UnsupportedConversion(other)),
            };

            if conversion.is_some() {
                return Err(FormatError::MultipleConversions);
            }
            conversion = Some(Conversion {
                flags,
                width,
                precision,
                kind,
            });
        }

        Ok(Self {
            prefix,
            conversion,
            suffix,
        })
    }

    /// Formats `value` according to this pattern.
    pub fn format(&self, value: f64) -> String {
        let mut out = self.prefix.clone();
        if let Some(conversion) = &self.conversion {
            out.push_str(&conversion.render(value));
            out.push_str(&self.suffix);
        }
        out
    }
}

impl Conversion {
    fn render(&self, value: f64) -> String {
        let negative = !value.is_nan() && value.is_sign_negative();
        let magnitude = if negative { -value } else { value };

        let body = if value.is_finite() {
            match self.kind {
                ConversionKind::Fixed { .. } => {
                    let precision = self.precision.unwrap_or(6);
                    let mut s = format!("{magnitude:.precision$}");
                    if self.flags.alternate && precision == 0 {
                        s.push('.');
                    }
                    s
                }
                ConversionKind::Exponent { upper } => exponent_form(
                    magnitude,
                    self.precision.unwrap_or(6),
                    upper,
                    self.flags.alternate,
                ),
                ConversionKind::General { upper } => {
                    general_form(magnitude, self.precision, upper, self.flags.alternate)
                }
                ConversionKind::Integer => format!("{magnitude:.0}"),
            }
        } else {
            let upper = matches!(
                self.kind,
                ConversionKind::Fixed { upper: true }
                    | ConversionKind::Exponent { upper: true }
                    | ConversionKind::General { upper: true }
            );
            let s = if value.is_nan() { "nan" } else { "inf" };
            if upper {
                s.to_ascii_uppercase()
            } else {
                s.to_string()
            }
        };

        let sign = if negative {
            "-"
        } else if self.flags.plus {
            "+"
        } else if self.flags.space {
            " "
        } else {
            ""
        };

        let len = sign.len() + body.chars().count();
        let pad = self.width.saturating_sub(len);
        let mut out = String::with_capacity(len + pad);
        if pad == 0 {
            out.push_str(sign);
            out.push_str(&body);
        } else if self.flags.left {
            out.push_str(sign);
            out.push_str(&body);
            out.extend(core::iter::repeat_n(' ', pad));
        } else if self.flags.zero && value.is_finite() {
            out.push_str(sign);
            out.extend(core::iter::repeat_n('0', pad));
            out.push_str(&body);
        } else {
            out.extend(core::iter::repeat_n(' ', pad));
            out.push_str(sign);
            out.push_str(&body);
        }
        out
    }
}

/// Splits Rust's `{:e}` output into mantissa and decimal exponent.
fn split_exponent(magnitude: f64, precision: usize) -> (String, i32) {
    let s = format!("{magnitude:.precision$e}");
    match s.split_once('e') {
        Some((mantissa, exp)) => (mantissa.to_string(), exp.parse().unwrap_or(0)),
        None => (s, 0),
    }
}

fn exponent_form(magnitude: f64, precision: usize, upper: bool, alternate: bool) -> String {
    let (mut mantissa, exp) = split_exponent(magnitude, precision);
    if alternate && precision == 0 {
        mantissa.push('.');
    }
    let e = if upper { 'E' } else { 'e' };
    let sign = if exp < 0 { '-' } else { '+' };
    format!("{mantissa}{e}{sign}{:02}", exp.unsigned_abs())
}

/// C's `%g`: pick fixed or exponent form from the decimal exponent, then drop
/// trailing zeros unless `#` is set.
fn general_form(magnitude: f64, precision: Option<usize>, upper: bool, alternate: bool) -> String {
    let p = precision.unwrap_or(6).max(1);
    let (_, exp) = split_exponent(magnitude, p - 1);
    let p_i = i32::try_from(p).unwrap_or(i32::MAX);

    if exp >= -4 && exp < p_i {
        let decimals = usize::try_from(p_i - 1 - exp).unwrap_or(0);
        let s = format!("{magnitude:.decimals$}");
        if alternate {
            if decimals == 0 {
                return s + ".";
            }
            s
        } else {
            strip_fraction_zeros(&s).to_string()
        }
    } else {
        let s = exponent_form(magnitude, p - 1, upper, alternate);
        if alternate {
            return s;
        }
        let split = s.find(['e', 'E']).unwrap_or(s.len());
        let (mantissa, exp_part) = s.split_at(split);
        let mut out = strip_fraction_zeros(mantissa).to_string();
        out.push_str(exp_part);
        out
    }
}

fn strip_fraction_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
