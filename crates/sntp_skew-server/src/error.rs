// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Custom error types for the SNTP responder.
//!
//! Public async APIs return `io::Result<T>`. Internally, errors are constructed as
//! `SntpServerError` variants and converted to `io::Error` automatically via
//! `From<SntpServerError> for io::Error`.
//!
//! Users who want programmatic error matching can downcast via
//! `io::Error::get_ref()`:
//!
//! ```no_run
//! use sntp_server::error::SntpServerError;
//!
//! # fn example(result: std::io::Result<()>) {
//! match result {
//!     Ok(()) => println!("server running"),
//!     Err(e) => {
//!         if let Some(srv_err) = e.get_ref()
//!             .and_then(|inner| inner.downcast_ref::<SntpServerError>())
//!         {
//!             match srv_err {
//!                 SntpServerError::Config(c) => eprintln!("bad configuration: {c}"),
//!                 _ => eprintln!("server error: {srv_err}"),
//!             }
//!         }
//!     }
//! }
//! # }
//! ```

pub use sntp_proto::error::ParseError;

use std::fmt;
use std::io;

/// Errors that can occur while answering requests or setting up the responder.
#[derive(Debug)]
pub enum SntpServerError {
    /// The request datagram is not a well-formed packet.
    Protocol(ProtocolError),
    /// The reply could not be encoded (a timestamp left the representable range).
    Encoding(ParseError),
    /// Invalid configuration (bad address, offset or reference identifier).
    Config(ConfigError),
    /// Underlying I/O error (socket bind, send/recv, etc.).
    Io(io::Error),
}

/// Protocol errors for incoming requests.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ProtocolError {
    /// The request could not be decoded.
    Malformed(ParseError),
}

/// Server configuration errors.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// Invalid listen address.
    InvalidListenAddress {
        /// The address that was invalid.
        address: String,
        /// Detail about why it is invalid.
        detail: String,
    },
    /// The offset is not a finite number of seconds.
    InvalidOffset {
        /// The rejected input.
        input: String,
    },
    /// The reference identifier does not encode to four bytes.
    InvalidReferenceId {
        /// The rejected code.
        code: String,
    },
    /// Generic configuration error.
    Other(String),
}

impl fmt::Display for SntpServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SntpServerError::Protocol(e) => write!(f, "SNTP protocol error: {e}"),
            SntpServerError::Encoding(e) => write!(f, "failed to encode reply: {e}"),
            SntpServerError::Config(e) => write!(f, "SNTP server config error: {e}"),
            SntpServerError::Io(e) => write!(f, "{e}"),
        }
    }
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Malformed(e) => write!(f, "malformed packet: {e}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidListenAddress { address, detail } => {
                write!(f, "invalid listen address '{address}': {detail}")
            }
            ConfigError::InvalidOffset { input } => {
                write!(f, "offset must be a number, got '{input}'")
            }
            ConfigError::InvalidReferenceId { code } => {
                write!(f, "reference identifier must be exactly 4 bytes, got '{code}'")
            }
            ConfigError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for SntpServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SntpServerError::Protocol(ProtocolError::Malformed(e)) => Some(e),
            SntpServerError::Encoding(e) => Some(e),
            SntpServerError::Io(e) => Some(e),
            SntpServerError::Config(_) => None,
        }
    }
}

impl std::error::Error for ProtocolError {}
impl std::error::Error for ConfigError {}

impl From<SntpServerError> for io::Error {
    fn from(err: SntpServerError) -> io::Error {
        let kind = match &err {
            SntpServerError::Protocol(_) => io::ErrorKind::InvalidData,
            SntpServerError::Encoding(_) => io::ErrorKind::InvalidData,
            SntpServerError::Config(_) => io::ErrorKind::InvalidInput,
            SntpServerError::Io(e) => e.kind(),
        };
        // Preserve the original io::Error directly for the Io variant.
        if let SntpServerError::Io(e) = err {
            return e;
        }
        io::Error::new(kind, err)
    }
}

impl From<io::Error> for SntpServerError {
    fn from(err: io::Error) -> SntpServerError {
        SntpServerError::Io(err)
    }
}

impl From<ProtocolError> for SntpServerError {
    fn from(err: ProtocolError) -> SntpServerError {
        SntpServerError::Protocol(err)
    }
}

impl From<ConfigError> for SntpServerError {
    fn from(err: ConfigError) -> SntpServerError {
        SntpServerError::Config(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_display() {
        let e = ProtocolError::Malformed(ParseError::InvalidLength {
            expected: 48,
            actual: 10,
        });
        assert_eq!(
            e.to_string(),
            "malformed packet: invalid packet length: expected 48 bytes, got 10"
        );
    }

    #[test]
    fn test_encoding_error_display() {
        let e = SntpServerError::Encoding(ParseError::OutOfRange {
            field: "receive timestamp",
        });
        assert_eq!(
            e.to_string(),
            "failed to encode reply: receive timestamp is outside the representable fixed-point range"
        );
    }

    #[test]
    fn test_config_error_display() {
        let e = ConfigError::InvalidListenAddress {
            address: "bad:addr".to_string(),
            detail: "not a valid socket address".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "invalid listen address 'bad:addr': not a valid socket address"
        );
        let e = ConfigError::InvalidOffset {
            input: "ten".to_string(),
        };
        assert_eq!(e.to_string(), "offset must be a number, got 'ten'");
        let e = ConfigError::InvalidReferenceId {
            code: "GPS".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "reference identifier must be exactly 4 bytes, got 'GPS'"
        );
    }

    #[test]
    fn test_server_error_to_io_error_kind() {
        let cases: Vec<(SntpServerError, io::ErrorKind)> = vec![
            (
                SntpServerError::Protocol(ProtocolError::Malformed(ParseError::InvalidUtf8 {
                    field: "reference identifier",
                })),
                io::ErrorKind::InvalidData,
            ),
            (
                SntpServerError::Encoding(ParseError::OutOfRange { field: "timestamp" }),
                io::ErrorKind::InvalidData,
            ),
            (
                SntpServerError::Config(ConfigError::Other("test".to_string())),
                io::ErrorKind::InvalidInput,
            ),
        ];
        for (srv_err, expected_kind) in cases {
            let io_err: io::Error = srv_err.into();
            assert_eq!(io_err.kind(), expected_kind);
        }
    }

    #[test]
    fn test_server_error_downcast_roundtrip() {
        let err = SntpServerError::Config(ConfigError::InvalidOffset {
            input: "nan".to_string(),
        });
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::InvalidInput);

        let inner = io_err
            .get_ref()
            .unwrap()
            .downcast_ref::<SntpServerError>()
            .unwrap();
        assert!(matches!(
            inner,
            SntpServerError::Config(ConfigError::InvalidOffset { .. })
        ));
    }

    #[test]
    fn test_io_error_passthrough() {
        let orig = io::Error::new(io::ErrorKind::AddrInUse, "in use");
        let srv_err = SntpServerError::Io(orig);
        let io_err: io::Error = srv_err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::AddrInUse);
        assert_eq!(io_err.to_string(), "in use");
    }

    #[test]
    fn test_from_conversions() {
        let srv_err: SntpServerError = io::Error::new(io::ErrorKind::BrokenPipe, "broken").into();
        assert!(matches!(srv_err, SntpServerError::Io(_)));

        let srv_err: SntpServerError =
            ProtocolError::Malformed(ParseError::InvalidLength { expected: 48, actual: 0 }).into();
        assert!(matches!(srv_err, SntpServerError::Protocol(_)));

        let srv_err: SntpServerError = ConfigError::Other("test".to_string()).into();
        assert!(matches!(srv_err, SntpServerError::Config(_)));
    }

    #[test]
    fn test_error_source() {
        let srv_err = SntpServerError::Encoding(ParseError::OutOfRange { field: "timestamp" });
        assert!(std::error::Error::source(&srv_err).is_some());

        let cfg_err = SntpServerError::Config(ConfigError::Other("x".to_string()));
        assert!(std::error::Error::source(&cfg_err).is_none());
    }
}
