// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Startup configuration for the responder.
//!
//! [`ServerConfig`] is built once and handed to the
//! [`Responder`](super::Responder) by value; nothing changes it afterwards.

use crate::error::ConfigError;
use crate::fixed_point::FractionEncoding;

/// How replies are skewed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ServerConfig {
    /// Seconds added to the receive and transmit timestamps of every reply.
    /// May be negative.
    pub offset_seconds: f64,
    /// How reply timestamps are converted to fixed point.
    pub fraction_encoding: FractionEncoding,
}

impl ServerConfig {
    /// A configuration with the given offset and the default fraction encoding.
    pub fn with_offset(offset_seconds: f64) -> Self {
        ServerConfig {
            offset_seconds,
            ..ServerConfig::default()
        }
    }
}

/// Parse a user-supplied offset in seconds.
///
/// Surrounding whitespace is ignored. Anything that is not a finite number is
/// rejected, including `inf` and `NaN`.
///
/// ```
/// use sntp_server::server_common::parse_offset;
///
/// assert_eq!(parse_offset(" -2.5\n").unwrap(), -2.5);
/// assert!(parse_offset("soon").is_err());
/// ```
pub fn parse_offset(input: &str) -> Result<f64, ConfigError> {
    let invalid = || ConfigError::InvalidOffset {
        input: input.trim().to_string(),
    };
    let offset: f64 = input.trim().parse().map_err(|_| invalid())?;
    if !offset.is_finite() {
        return Err(invalid());
    }
    Ok(offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_offset_values() {
        assert_eq!(parse_offset("10"), Ok(10.0));
        assert_eq!(parse_offset("10.0"), Ok(10.0));
        assert_eq!(parse_offset("-3600"), Ok(-3600.0));
        assert_eq!(parse_offset("0"), Ok(0.0));
        assert_eq!(parse_offset("  1.25\r\n"), Ok(1.25));
        assert_eq!(parse_offset("1e3"), Ok(1000.0));
    }

    #[test]
    fn test_parse_offset_rejects_garbage() {
        assert_eq!(
            parse_offset("ten"),
            Err(ConfigError::InvalidOffset {
                input: "ten".to_string()
            })
        );
        assert!(parse_offset("").is_err());
        assert!(parse_offset("1,5").is_err());
    }

    #[test]
    fn test_parse_offset_rejects_non_finite() {
        assert!(parse_offset("inf").is_err());
        assert!(parse_offset("-infinity").is_err());
        assert!(parse_offset("NaN").is_err());
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.offset_seconds, 0.0);
        assert_eq!(config.fraction_encoding, FractionEncoding::Binary);
        assert_eq!(ServerConfig::with_offset(10.0).offset_seconds, 10.0);
    }
}
