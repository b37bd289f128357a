// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Custom error types for buffer-based packet parsing and serialization.
//!
//! [`ParseError`] is designed to be `no_std`-compatible, using no heap allocation.
//! When the `std` feature is enabled, it also implements [`std::error::Error`] and
//! can be converted to [`std::io::Error`].

use core::fmt;

/// Errors that can occur during packet parsing, serialization, or fixed-point conversion.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseError {
    /// The buffer is too short for the expected data.
    BufferTooShort {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        available: usize,
    },
    /// The buffer is not exactly the length of a packet.
    InvalidLength {
        /// Number of bytes a packet occupies.
        expected: usize,
        /// Number of bytes supplied.
        actual: usize,
    },
    /// A numeric value does not fit the bit-field it is destined for.
    InvalidField {
        /// Name of the field that was invalid.
        field: &'static str,
        /// The invalid value.
        value: u32,
    },
    /// A text field does not hold valid UTF-8.
    InvalidUtf8 {
        /// Name of the field that was invalid.
        field: &'static str,
    },
    /// A reference identifier does not encode to exactly four bytes.
    InvalidReferenceIdLength {
        /// Encoded length of the rejected identifier.
        len: usize,
    },
    /// A floating value cannot be represented in the fixed-point format of a field.
    OutOfRange {
        /// Name of the field being encoded.
        field: &'static str,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::BufferTooShort { needed, available } => {
                write!(
                    f,
                    "buffer too short: needed {} bytes, got {}",
                    needed, available
                )
            }
            ParseError::InvalidLength { expected, actual } => {
                write!(
                    f,
                    "invalid packet length: expected {} bytes, got {}",
                    expected, actual
                )
            }
            ParseError::InvalidField { field, value } => {
                write!(f, "invalid {} value: {}", field, value)
            }
            ParseError::InvalidUtf8 { field } => {
                write!(f, "{} is not valid UTF-8", field)
            }
            ParseError::InvalidReferenceIdLength { len } => {
                write!(f, "reference identifier must be 4 bytes, got {}", len)
            }
            ParseError::OutOfRange { field } => {
                write!(f, "{} is outside the representable fixed-point range", field)
            }
        }
    }
}

#[cfg(feature = "std")]
impl From<ParseError> for std::io::Error {
    fn from(err: ParseError) -> std::io::Error {
        let kind = match &err {
            ParseError::BufferTooShort { .. } => std::io::ErrorKind::UnexpectedEof,
            ParseError::InvalidLength { .. } => std::io::ErrorKind::InvalidData,
            ParseError::InvalidField { .. } => std::io::ErrorKind::InvalidData,
            ParseError::InvalidUtf8 { .. } => std::io::ErrorKind::InvalidData,
            ParseError::InvalidReferenceIdLength { .. } => std::io::ErrorKind::InvalidInput,
            ParseError::OutOfRange { .. } => std::io::ErrorKind::InvalidInput,
        };
        std::io::Error::new(kind, err)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}
