use proptest::prelude::*;

use sntp_server::fixed_point::FractionEncoding;
use sntp_server::protocol::{self, Mode};
use sntp_server::server_common::{Clock, Responder, ServerConfig, ServerSystemState};
use sntp_server::unix_time::{EPOCH_DELTA, Instant};

struct FixedClock(Instant);

impl Clock for FixedClock {
    fn now(&self) -> Instant {
        self.0
    }
}

fn arb_encoding() -> impl Strategy<Value = FractionEncoding> {
    prop_oneof![
        Just(FractionEncoding::Binary),
        Just(FractionEncoding::DecimalText),
    ]
}

// Unix seconds for NTP times in [3_000_000_000, 4_000_000_000).
fn arb_instant() -> impl Strategy<Value = Instant> {
    (
        (3_000_000_000i64 - EPOCH_DELTA)..(4_000_000_000i64 - EPOCH_DELTA),
        0i32..1_000_000_000,
    )
        .prop_map(|(secs, nanos)| Instant::new(secs, nanos))
}

/// A 48-byte datagram whose reference identifier bytes are valid UTF-8.
fn arb_request() -> impl Strategy<Value = Vec<u8>> {
    (proptest::collection::vec(any::<u8>(), 48), "[A-Z]{4}").prop_map(|(mut bytes, id)| {
        bytes[12..16].copy_from_slice(id.as_bytes());
        bytes
    })
}

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

proptest! {
    #[test]
    fn originate_is_a_raw_copy(
        request in arb_request(),
        now in arb_instant(),
        encoding in arb_encoding(),
    ) {
        let reply = responder(0.0, encoding, now).respond(&request, now).unwrap();
        prop_assert_eq!(&reply[24..32], &request[40..48]);
    }

    #[test]
    fn reply_header_is_fixed(request in arb_request(), now in arb_instant()) {
        let reply = responder(1.0, FractionEncoding::Binary, now)
            .respond(&request, now)
            .unwrap();
        let parsed = protocol::parse(&reply).unwrap();
        prop_assert_eq!(reply[0] & 0b1100_0000, 0);
        prop_assert_eq!(reply[0] & 0b0011_1000, request[0] & 0b0011_1000);
        prop_assert_eq!(parsed.mode, Mode::Server);
        prop_assert_eq!(reply[1], 1);
        prop_assert_eq!(&reply[12..16], b"GOES");
        prop_assert_eq!(&reply[16..24], &[0u8; 8]);
    }

    #[test]
    fn offset_is_applied(
        request in arb_request(),
        received in arb_instant(),
        offset in -100_000_000.0f64..100_000_000.0,
        encoding in arb_encoding(),
    ) {
        let sent = Instant::new(received.secs() + 1, received.subsec_nanos());
        let reply = responder(offset, encoding, sent).respond(&request, received).unwrap();
        let parsed = protocol::parse(&reply).unwrap();

        let expected_receive = received.ntp_seconds() + offset;
        let expected_transmit = sent.ntp_seconds() + offset;
        // f64 near 4e9 resolves to ~5e-7 s; the wire format is finer.
        prop_assert!((parsed.receive_timestamp.as_seconds_f64() - expected_receive).abs() < 1e-5);
        prop_assert!((parsed.transmit_timestamp.as_seconds_f64() - expected_transmit).abs() < 1e-5);
    }

    #[test]
    fn wrong_length_never_answered(
        bytes in proptest::collection::vec(any::<u8>(), 0..200usize),
        now in arb_instant(),
    ) {
        prop_assume!(bytes.len() != 48);
        prop_assert!(responder(0.0, FractionEncoding::Binary, now).respond(&bytes, now).is_err());
    }
}
