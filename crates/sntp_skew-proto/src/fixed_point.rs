// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Conversions between floating-point seconds and the NTP fixed-point formats.
//!
//! Reading a fixed-point value as seconds is always `integer + fraction / 2^bits`. Writing one
//! from a float needs a rule for splitting off the fractional part, and two are offered through
//! [`FractionEncoding`]:
//!
//! - [`FractionEncoding::Binary`] takes the binary remainder `t - trunc(t)`.
//! - [`FractionEncoding::DecimalText`] formats `t` as text and reads the digits after the decimal
//!   point as `0.<digits>`. This matches responders that split timestamps on their printed form
//!   and produces slightly different low-order fraction bits.
//!
//! Both truncate `fraction * 2^bits` toward zero, and both reject values that are negative,
//! non-finite, or too large for the integer half of the format.

use core::fmt::{self, Write};

use crate::error::ParseError;
use crate::protocol::{ShortFormat, TimestampFormat};

const TIMESTAMP_SCALE: f64 = 4_294_967_296.0; // 2^32
const SHORT_SCALE: f64 = 65_536.0; // 2^16

/// How the fractional part of a float is split off before scaling.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum FractionEncoding {
    /// Binary remainder of the value.
    #[default]
    Binary,
    /// Digits after the decimal point of the value's textual form.
    DecimalText,
}

impl TimestampFormat {
    /// The timestamp as seconds since the NTP epoch.
    pub fn as_seconds_f64(&self) -> f64 {
        self.seconds as f64 + self.fraction as f64 / TIMESTAMP_SCALE
    }

    /// Encode seconds since the NTP epoch into 32.32 fixed point.
    ///
    /// Fails with [`ParseError::OutOfRange`] unless `0 <= t < 2^32`.
    pub fn from_seconds_f64(t: f64, encoding: FractionEncoding) -> Result<Self, ParseError> {
        let (seconds, fraction) = split(t, TIMESTAMP_SCALE, encoding, "timestamp")?;
        Ok(TimestampFormat {
            seconds: seconds as u32,
            fraction: fraction as u32,
        })
    }
}

impl ShortFormat {
    /// The value as seconds.
    pub fn as_seconds_f64(&self) -> f64 {
        self.seconds as f64 + self.fraction as f64 / SHORT_SCALE
    }

    /// Encode seconds into 16.16 fixed point.
    ///
    /// Fails with [`ParseError::OutOfRange`] unless `0 <= t < 2^16`.
    pub fn from_seconds_f64(t: f64, encoding: FractionEncoding) -> Result<Self, ParseError> {
        let (seconds, fraction) = split(t, SHORT_SCALE, encoding, "short format value")?;
        Ok(ShortFormat {
            seconds: seconds as u16,
            fraction: fraction as u16,
        })
    }
}

// Returns (integer, scaled fraction), both guaranteed below `scale`.
fn split(
    t: f64,
    scale: f64,
    encoding: FractionEncoding,
    field: &'static str,
) -> Result<(u64, u64), ParseError> {
    if !t.is_finite() || t < 0.0 || t >= scale {
        return Err(ParseError::OutOfRange { field });
    }
    let (integer, fraction) = match encoding {
        FractionEncoding::Binary => {
            let integer = t as u64;
            (integer, t - integer as f64)
        }
        FractionEncoding::DecimalText => split_decimal(t).ok_or(ParseError::OutOfRange { field })?,
    };
    let scaled = (fraction * scale) as u64;
    if integer as f64 >= scale || scaled as f64 >= scale {
        return Err(ParseError::OutOfRange { field });
    }
    Ok((integer, scaled))
}

fn split_decimal(t: f64) -> Option<(u64, f64)> {
    let mut text = TextBuf::new();
    write!(text, "{}", t).ok()?;
    let text = text.as_str()?;
    match text.find('.') {
        Some(dot) => {
            let integer = text[..dot].parse::<u64>().ok()?;
            // ".<digits>" parses as 0.<digits>.
            let fraction = text[dot..].parse::<f64>().ok()?;
            Some((integer, fraction))
        }
        None => Some((text.parse::<u64>().ok()?, 0.0)),
    }
}

// Fits the longest `{}` rendering of a non-negative f64 below 2^32, which is a subnormal
// written out in full.
const TEXT_CAPACITY: usize = 400;

struct TextBuf {
    buf: [u8; TEXT_CAPACITY],
    len: usize,
}

impl TextBuf {
    fn new() -> Self {
        TextBuf {
            buf: [0; TEXT_CAPACITY],
            len: 0,
        }
    }

    fn as_str(&self) -> Option<&str> {
        core::str::from_utf8(&self.buf[..self.len]).ok()
    }
}

impl fmt::Write for TextBuf {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        let dst = self.buf.get_mut(self.len..end).ok_or(fmt::Error)?;
        dst.copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}
