// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use crate::error::{ParseError, SntpServerError};
use crate::protocol::{self, ConstPackedSizeBytes, Packet, TimestampFormat};
use crate::unix_time::Instant;

use super::{
    Clock, ServerConfig, ServerSystemState, SystemClock, build_server_response,
    echo_origin_timestamp, validate_request,
};

/// Answers requests with timestamps shifted by a fixed offset.
///
/// A `Responder` is immutable once built and performs no I/O, so one instance
/// can be shared between any number of receive loops.
///
/// # Examples
///
/// ```
/// use sntp_server::protocol::{self, Packet, TimestampFormat};
/// use sntp_server::server_common::Responder;
/// use sntp_server::unix_time::Instant;
///
/// let responder = Responder::with_offset(10.0);
/// let request = protocol::encode(&Packet::client_request(TimestampFormat {
///     seconds: 3_754_000_000,
///     fraction: 0x8000_0000,
/// }));
/// let reply = responder.respond(&request, Instant::now()).unwrap();
/// assert_eq!(reply[24..32], request[40..48]);
/// ```
#[derive(Clone, Debug)]
pub struct Responder<C = SystemClock> {
    config: ServerConfig,
    state: ServerSystemState,
    clock: C,
}

impl Responder<SystemClock> {
    /// A responder on the system clock with default header values.
    pub fn with_offset(offset_seconds: f64) -> Self {
        Responder::new(
            ServerConfig::with_offset(offset_seconds),
            ServerSystemState::default(),
            SystemClock,
        )
    }
}

impl<C: Clock> Responder<C> {
    /// Create a responder.
    pub fn new(config: ServerConfig, state: ServerSystemState, clock: C) -> Self {
        Responder {
            config,
            state,
            clock,
        }
    }

    /// The configuration replies are skewed with.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// The header values stamped into every reply.
    pub fn state(&self) -> &ServerSystemState {
        &self.state
    }

    /// Offset in seconds applied to reply timestamps.
    pub fn offset_seconds(&self) -> f64 {
        self.config.offset_seconds
    }

    /// Answer one request datagram.
    ///
    /// `received_at` is the clock reading taken when the datagram arrived; the
    /// transmit timestamp is read from the clock just before encoding. Both are
    /// shifted by the configured offset. The reply's originate field is a raw
    /// copy of bytes 40..48 of `request`.
    ///
    /// # Errors
    ///
    /// - [`SntpServerError::Protocol`] if `request` is not exactly one valid packet
    /// - [`SntpServerError::Encoding`] if a skewed timestamp falls outside the
    ///   era representable on the wire
    pub fn respond(
        &self,
        request: &[u8],
        received_at: Instant,
    ) -> Result<[u8; Packet::PACKED_SIZE_BYTES], SntpServerError> {
        let (request_packet, raw_request) = validate_request(request)?;

        let receive = self.skewed_timestamp(received_at, "receive timestamp")?;
        let transmit = self.skewed_timestamp(self.clock.now(), "transmit timestamp")?;

        let reply = build_server_response(&request_packet, &self.state, receive, transmit);
        let mut buf = protocol::encode(&reply);
        echo_origin_timestamp(&mut buf, raw_request);
        Ok(buf)
    }

    fn skewed_timestamp(
        &self,
        instant: Instant,
        field: &'static str,
    ) -> Result<TimestampFormat, SntpServerError> {
        let seconds = instant.ntp_seconds() + self.config.offset_seconds;
        TimestampFormat::from_seconds_f64(seconds, self.config.fraction_encoding)
            .map_err(|_| SntpServerError::Encoding(ParseError::OutOfRange { field }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;
    use crate::fixed_point::FractionEncoding;
    use crate::protocol::{LeapIndicator, Mode, ReferenceIdentifier, Stratum, Version};
    use crate::unix_time::EPOCH_DELTA;

    struct FixedClock(Instant);

    impl Clock for FixedClock {
        fn now(&self) -> Instant {
            self.0
        }
    }

    // NTP 3_754_000_000.
    const BASE_UNIX: i64 = 3_754_000_000 - EPOCH_DELTA;

    fn responder(offset: f64, encoding: FractionEncoding, now: Instant) -> Responder<FixedClock> {
        Responder::new(
            ServerConfig {
                offset_seconds: offset,
                fraction_encoding: encoding,
            },
            ServerSystemState::default(),
            FixedClock(now),
        )
    }

    fn request_bytes() -> [u8; 48] {
        protocol::encode(&Packet::client_request(TimestampFormat {
            seconds: 3_754_000_000,
            fraction: 0x8000_0000,
        }))
    }

    #[test]
    fn test_reply_header() {
        let now = Instant::new(BASE_UNIX, 0);
        let r = responder(10.0, FractionEncoding::Binary, now);
        let reply = protocol::parse(&r.respond(&request_bytes(), now).unwrap()).unwrap();
        assert_eq!(reply.leap_indicator, LeapIndicator::NoWarning);
        assert_eq!(reply.version, Version::V4);
        assert_eq!(reply.mode, Mode::Server);
        assert_eq!(reply.stratum, Stratum::PRIMARY);
        assert_eq!(reply.poll, 0);
        assert_eq!(reply.precision, 0);
        assert_eq!(reply.root_delay, protocol::ShortFormat::default());
        assert_eq!(reply.root_dispersion, protocol::ShortFormat::default());
        assert_eq!(reply.reference_id, ReferenceIdentifier::GOES);
        assert_eq!(reply.reference_timestamp, TimestampFormat::default());
    }

    #[test]
    fn test_offset_applied_to_receive_and_transmit() {
        let received = Instant::new(BASE_UNIX, 0);
        let sent = Instant::new(BASE_UNIX + 1, 500_000_000);
        let r = responder(10.0, FractionEncoding::Binary, sent);
        let reply = protocol::parse(&r.respond(&request_bytes(), received).unwrap()).unwrap();
        assert_eq!(
            reply.receive_timestamp,
            TimestampFormat {
                seconds: 3_754_000_010,
                fraction: 0
            }
        );
        assert_eq!(
            reply.transmit_timestamp,
            TimestampFormat {
                seconds: 3_754_000_011,
                fraction: 0x8000_0000
            }
        );
    }

    #[test]
    fn test_negative_offset() {
        let now = Instant::new(BASE_UNIX, 0);
        let r = responder(-3600.0, FractionEncoding::Binary, now);
        let reply = protocol::parse(&r.respond(&request_bytes(), now).unwrap()).unwrap();
        assert_eq!(reply.receive_timestamp.seconds, 3_754_000_000 - 3600);
        assert_eq!(reply.transmit_timestamp.seconds, 3_754_000_000 - 3600);
    }

    #[test]
    fn test_origin_echoed_verbatim() {
        let now = Instant::new(BASE_UNIX, 0);
        let r = responder(0.0, FractionEncoding::Binary, now);
        let mut request = request_bytes();
        request[40..48].copy_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF, 0x01, 0x23, 0x45, 0x67]);
        let reply = r.respond(&request, now).unwrap();
        assert_eq!(reply[24..32], request[40..48]);
    }

    #[test]
    fn test_version_echoed() {
        let now = Instant::new(BASE_UNIX, 0);
        let r = responder(0.0, FractionEncoding::Binary, now);
        let mut request = request_bytes();
        request[0] = 0b00_011_011;
        let reply = r.respond(&request, now).unwrap();
        assert_eq!(reply[0], 0b00_011_100);
    }

    #[test]
    fn test_decimal_fraction_encoding() {
        let now = Instant::new(BASE_UNIX, 0);
        let r = responder(0.1, FractionEncoding::DecimalText, now);
        let reply = protocol::parse(&r.respond(&request_bytes(), now).unwrap()).unwrap();
        assert_eq!(reply.receive_timestamp.seconds, 3_754_000_000);
        assert_eq!(reply.receive_timestamp.fraction, 429_496_729);
    }

    #[test]
    fn test_malformed_request() {
        let now = Instant::new(BASE_UNIX, 0);
        let r = responder(0.0, FractionEncoding::Binary, now);
        match r.respond(&request_bytes()[..20], now) {
            Err(SntpServerError::Protocol(ProtocolError::Malformed(ParseError::InvalidLength {
                expected: 48,
                actual: 20,
            }))) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_out_of_era_is_encoding_error() {
        let now = Instant::new(BASE_UNIX, 0);
        let r = responder(1.0e12, FractionEncoding::Binary, now);
        match r.respond(&request_bytes(), now) {
            Err(SntpServerError::Encoding(ParseError::OutOfRange { field })) => {
                assert_eq!(field, "receive timestamp");
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let r = responder(-1.0e10, FractionEncoding::DecimalText, now);
        assert!(matches!(
            r.respond(&request_bytes(), now),
            Err(SntpServerError::Encoding(_))
        ));
    }

    #[test]
    fn test_accessors() {
        let r = Responder::with_offset(2.5);
        assert_eq!(r.offset_seconds(), 2.5);
        assert_eq!(r.config().fraction_encoding, FractionEncoding::Binary);
        assert_eq!(r.state(), &ServerSystemState::default());
    }
}
