// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use std::net::SocketAddr;

use crate::error::SntpServerError;
use crate::protocol::{ConstPackedSizeBytes, Packet};
use crate::unix_time::Instant;

use super::{Clock, Responder, ServerMetrics};

/// Result of handling a single request datagram.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HandleResult {
    /// Send this reply to the client.
    Response([u8; Packet::PACKED_SIZE_BYTES]),
    /// Drop the request silently.
    Drop,
}

/// Run one received datagram through the responder.
///
/// Malformed requests are logged at debug level and dropped. A reply whose
/// timestamps cannot be encoded is logged as a warning and dropped. Neither
/// stops the server.
pub fn handle_request<C: Clock>(
    responder: &Responder<C>,
    recv_buf: &[u8],
    src_addr: SocketAddr,
    received_at: Instant,
    metrics: Option<&ServerMetrics>,
) -> HandleResult {
    if let Some(m) = metrics {
        m.inc_requests_received();
    }

    match responder.respond(recv_buf, received_at) {
        Ok(reply) => {
            log::info!("request from {}", src_addr);
            HandleResult::Response(reply)
        }
        Err(SntpServerError::Encoding(e)) => {
            log::warn!("dropping reply to {}: {}", src_addr, e);
            if let Some(m) = metrics {
                m.inc_encoding_failures();
            }
            HandleResult::Drop
        }
        Err(e) => {
            log::debug!("dropping invalid request from {}: {}", src_addr, e);
            if let Some(m) = metrics {
                m.inc_requests_dropped();
            }
            HandleResult::Drop
        }
    }
}
