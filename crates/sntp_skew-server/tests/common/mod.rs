// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Shared test helpers for server integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use sntp_server::protocol::{self, ConstPackedSizeBytes, Packet, TimestampFormat};
use tokio::net::UdpSocket;

/// Spawn a test server on an ephemeral loopback port and return its bound address.
///
/// The server runs in a background tokio task. It will shut down when the
/// tokio runtime is dropped at the end of the test.
pub(crate) async fn spawn_test_server(
    builder: sntp_server::server::SntpServerBuilder,
) -> SocketAddr {
    let server = builder
        .listen("127.0.0.1:0")
        .build()
        .await
        .expect("failed to bind test server");
    let addr = server.local_addr().expect("failed to get local addr");
    tokio::spawn(async move {
        let _ = server.run().await;
    });
    // Small yield to ensure the server task is running.
    tokio::time::sleep(Duration::from_millis(10)).await;
    addr
}

/// Build a client request carrying the given transmit timestamp.
pub(crate) fn build_client_packet(transmit: TimestampFormat) -> [u8; Packet::PACKED_SIZE_BYTES] {
    protocol::encode(&Packet::client_request(transmit))
}

/// Send a raw UDP datagram to `addr` and receive the reply with a timeout.
///
/// Returns `None` if the server doesn't respond within the timeout.
pub(crate) async fn send_receive_raw(
    addr: SocketAddr,
    packet: &[u8],
    timeout: Duration,
) -> Option<Vec<u8>> {
    let sock = UdpSocket::bind("127.0.0.1:0").await.expect("bind failed");
    sock.send_to(packet, addr).await.expect("send failed");

    let mut buf = vec![0u8; 2048];
    match tokio::time::timeout(timeout, sock.recv_from(&mut buf)).await {
        Ok(Ok((len, _))) => {
            buf.truncate(len);
            Some(buf)
        }
        _ => None,
    }
}

/// Parse a reply buffer into a Packet.
pub(crate) fn parse_response(buf: &[u8]) -> Packet {
    protocol::parse(buf).expect("failed to parse response")
}

/// Current time in NTP seconds.
pub(crate) fn ntp_now() -> f64 {
    sntp_server::unix_time::Instant::now().ntp_seconds()
}
