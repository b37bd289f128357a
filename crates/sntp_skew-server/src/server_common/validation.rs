// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use crate::error::{ParseError, ProtocolError};
use crate::protocol::{self, ConstPackedSizeBytes, Packet};

/// Validate an incoming request datagram.
///
/// The datagram must be exactly one packet long and decode cleanly; every
/// header value a well-sized packet can carry is accepted, whatever its mode
/// or version. Returns the decoded packet together with the raw bytes it was
/// decoded from.
pub(crate) fn validate_request(
    recv_buf: &[u8],
) -> Result<(Packet, &[u8; Packet::PACKED_SIZE_BYTES]), ProtocolError> {
    let raw: &[u8; Packet::PACKED_SIZE_BYTES] = recv_buf.try_into().map_err(|_| {
        ProtocolError::Malformed(ParseError::InvalidLength {
            expected: Packet::PACKED_SIZE_BYTES,
            actual: recv_buf.len(),
        })
    })?;
    let request = protocol::parse(raw).map_err(ProtocolError::Malformed)?;
    Ok((request, raw))
}
