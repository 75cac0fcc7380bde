// Copyright 2025 the Sparkline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for sparkline planning and rendering.

use core::fmt;

use crate::format::FormatError;

/// Which forced range limit an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LimitSide {
    /// `range_overlay_lower_limit`.
    Lower,
    /// `range_overlay_upper_limit`.
    Upper,
}

impl fmt::Display for LimitSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lower => "lower",
            Self::Upper => "upper",
        })
    }
}

/// Inputs that are rejected instead of producing misleading geometry.
///
/// Callers are expected to sanitize data upstream; these are contract violations.
#[derive(Clone, Debug, PartialEq)]
pub enum InputError {
    /// A sample is NaN or infinite.
    NonFiniteSample {
        /// Position of the offending sample in the series.
        index: usize,
        /// The offending value.
        value: f64,
    },
    /// A forced range limit is NaN or infinite.
    NonFiniteLimit {
        /// Which limit.
        side: LimitSide,
        /// The offending value.
        value: f64,
    },
    /// Both range limits are present and `lower > upper`.
    InvertedLimits {
        /// The configured lower limit.
        lower: f64,
        /// The configured upper limit.
        upper: f64,
    },
    /// The destination rectangle has a non-finite coordinate.
    NonFiniteBounds,
    /// The current-value format pattern could not be parsed.
    InvalidFormat(FormatError),
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteSample { index, value } => {
                write!(f, "sample {index} is not finite ({value})")
            }
            Self::NonFiniteLimit { side, value } => {
                write!(f, "{side} range limit is not finite ({value})")
            }
            Self::InvertedLimits { lower, upper } => {
                write!(f, "lower range limit {lower} exceeds upper range limit {upper}")
            }
            Self::NonFiniteBounds => f.write_str("destination rectangle is not finite"),
            Self::InvalidFormat(err) => write!(f, "invalid current value format: {err}"),
        }
    }
}

impl core::error::Error for InputError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::InvalidFormat(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FormatError> for InputError {
    fn from(err: FormatError) -> Self {
        Self::InvalidFormat(err)
    }
}

/// Errors returned by [`crate::SparklineEngine::plan`] and [`crate::SparklineEngine::render`].
///
/// `E` is the error type of the text measurer or renderer in use; its failures
/// are passed through unmodified.
#[derive(Clone, Debug, PartialEq)]
pub enum SparklineError<E> {
    /// The data or configuration was rejected.
    InvalidInput(InputError),
    /// The text measurer or renderer failed.
    Renderer(E),
}

impl<E> From<InputError> for SparklineError<E> {
    fn from(err: InputError) -> Self {
        Self::InvalidInput(err)
    }
}

impl<E: fmt::Display> fmt::Display for SparklineError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "invalid input: {err}"),
            Self::Renderer(err) => write!(f, "renderer failed: {err}"),
        }
    }
}

impl<E: core::error::Error + 'static> core::error::Error for SparklineError<E> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::Renderer(err) => Some(err),
        }
    }
}
