// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use crate::protocol::{self, ConstPackedSizeBytes, Packet};

use super::ServerSystemState;

const ORIGIN_OFFSET: usize = 24;
const TRANSMIT_OFFSET: usize = 40;

/// Build a server-mode reply for a request.
///
/// - `version` echoes the client's version
/// - `mode` is `Server`
/// - header values come from `server_state`
/// - `origin_timestamp` is the client's `transmit_timestamp`
/// - `receive_timestamp` and `transmit_timestamp` are taken as given
pub(crate) fn build_server_response(
    request: &Packet,
    server_state: &ServerSystemState,
    receive: protocol::TimestampFormat,
    transmit: protocol::TimestampFormat,
) -> Packet {
    Packet {
        leap_indicator: server_state.leap_indicator,
        version: request.version,
        mode: protocol::Mode::Server,
        stratum: server_state.stratum,
        poll: server_state.poll,
        precision: server_state.precision,
        root_delay: server_state.root_delay,
        root_dispersion: server_state.root_dispersion,
        reference_id: server_state.reference_id,
        reference_timestamp: server_state.reference_timestamp,
        origin_timestamp: request.transmit_timestamp,
        receive_timestamp: receive,
        transmit_timestamp: transmit,
    }
}

/// Copy the request's raw transmit timestamp into the reply's originate field.
///
/// Clients match the originate timestamp bit-for-bit, so the echo is taken
/// from the request bytes rather than from any decoded value.
pub(crate) fn echo_origin_timestamp(
    reply: &mut [u8; Packet::PACKED_SIZE_BYTES],
    request: &[u8; Packet::PACKED_SIZE_BYTES],
) {
    reply[ORIGIN_OFFSET..ORIGIN_OFFSET + 8]
        .copy_from_slice(&request[TRANSMIT_OFFSET..TRANSMIT_OFFSET + 8]);
}
