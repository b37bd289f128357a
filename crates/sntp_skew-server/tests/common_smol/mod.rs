// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Shared test helpers for smol server integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use sntp_server::protocol::{self, ConstPackedSizeBytes, Packet, TimestampFormat};
use smol::net::UdpSocket;

/// Spawn a test server on an ephemeral loopback port and return its bound address.
///
/// The server runs in a background smol task. It will shut down when the
/// smol executor is dropped.
pub(crate) async fn spawn_test_server(
    builder: sntp_server::smol_server::SntpServerBuilder,
) -> SocketAddr {
    let server = builder
        .listen("127.0.0.1:0")
        .build()
        .await
        .expect("failed to bind test server");
    let addr = server.local_addr().expect("failed to get local addr");
    smol::spawn(async move {
        let _ = server.run().await;
    })
    .detach();
    // Small yield to ensure the server task is running.
    smol::Timer::after(Duration::from_millis(10)).await;
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
    smol::future::or(
        async {
            match sock.recv_from(&mut buf).await {
                Ok((len, _)) => {
                    buf.truncate(len);
                    Some(buf)
                }
                Err(_) => None,
            }
        },
        async {
            smol::Timer::after(timeout).await;
            None
        },
    )
    .await
}

/// Parse a reply buffer into a Packet.
pub(crate) fn parse_response(buf: &[u8]) -> Packet {
    protocol::parse(buf).expect("failed to parse response")
}
