// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use crate::error::ParseError;

use super::{
    ConstPackedSizeBytes, FromBytes, HeaderByte, Packet, ReferenceIdentifier, ShortFormat,
    Stratum, TimestampFormat, ToBytes,
};

/// Parse a packet from a datagram payload.
///
/// The buffer must be exactly [`Packet::PACKED_SIZE_BYTES`] long; shorter or longer buffers fail
/// with [`ParseError::InvalidLength`].
pub fn parse(buf: &[u8]) -> Result<Packet, ParseError> {
    if buf.len() != Packet::PACKED_SIZE_BYTES {
        return Err(ParseError::InvalidLength {
            expected: Packet::PACKED_SIZE_BYTES,
            actual: buf.len(),
        });
    }
    let (packet, _) = Packet::from_bytes(buf)?;
    Ok(packet)
}

/// Serialize a packet into its 48-byte wire form.
pub fn encode(packet: &Packet) -> [u8; Packet::PACKED_SIZE_BYTES] {
    let mut buf = [0u8; Packet::PACKED_SIZE_BYTES];
    packet.write_into(&mut buf);
    buf
}

impl FromBytes for ShortFormat {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        if buf.len() < Self::PACKED_SIZE_BYTES {
            return Err(ParseError::BufferTooShort {
                needed: Self::PACKED_SIZE_BYTES,
                available: buf.len(),
            });
        }
        let seconds = u16::from_be_bytes([buf[0], buf[1]]);
        let fraction = u16::from_be_bytes([buf[2], buf[3]]);
        Ok((ShortFormat { seconds, fraction }, Self::PACKED_SIZE_BYTES))
    }
}

impl FromBytes for TimestampFormat {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        if buf.len() < Self::PACKED_SIZE_BYTES {
            return Err(ParseError::BufferTooShort {
                needed: Self::PACKED_SIZE_BYTES,
                available: buf.len(),
            });
        }
        let seconds = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
        let fraction = u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]);
        Ok((
            TimestampFormat { seconds, fraction },
            Self::PACKED_SIZE_BYTES,
        ))
    }
}

impl FromBytes for Stratum {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        if buf.is_empty() {
            return Err(ParseError::BufferTooShort {
                needed: 1,
                available: 0,
            });
        }
        Ok((Stratum(buf[0]), 1))
    }
}

impl FromBytes for HeaderByte {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        if buf.is_empty() {
            return Err(ParseError::BufferTooShort {
                needed: 1,
                available: 0,
            });
        }
        Ok((HeaderByte::unpack(buf[0])?, 1))
    }
}

impl FromBytes for ReferenceIdentifier {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        if buf.len() < Self::PACKED_SIZE_BYTES {
            return Err(ParseError::BufferTooShort {
                needed: Self::PACKED_SIZE_BYTES,
                available: buf.len(),
            });
        }
        let id = ReferenceIdentifier::from_wire([buf[0], buf[1], buf[2], buf[3]])?;
        Ok((id, Self::PACKED_SIZE_BYTES))
    }
}

impl FromBytes for Packet {
    /// Parse a packet from the front of `buf`. Trailing bytes are left unconsumed; use
    /// [`parse`] to require an exact-length datagram.
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        if buf.len() < Self::PACKED_SIZE_BYTES {
            return Err(ParseError::BufferTooShort {
                needed: Self::PACKED_SIZE_BYTES,
                available: buf.len(),
            });
        }

        let mut offset = 0;

        let (header, n) = HeaderByte::from_bytes(&buf[offset..])?;
        offset += n;

        let (stratum, n) = Stratum::from_bytes(&buf[offset..])?;
        offset += n;

        let poll = buf[offset];
        offset += 1;

        let precision = buf[offset];
        offset += 1;

        let (root_delay, n) = ShortFormat::from_bytes(&buf[offset..])?;
        offset += n;

        let (root_dispersion, n) = ShortFormat::from_bytes(&buf[offset..])?;
        offset += n;

        let (reference_id, n) = ReferenceIdentifier::from_bytes(&buf[offset..])?;
        offset += n;

        let (reference_timestamp, n) = TimestampFormat::from_bytes(&buf[offset..])?;
        offset += n;

        let (origin_timestamp, n) = TimestampFormat::from_bytes(&buf[offset..])?;
        offset += n;

        let (receive_timestamp, n) = TimestampFormat::from_bytes(&buf[offset..])?;
        offset += n;

        let (transmit_timestamp, n) = TimestampFormat::from_bytes(&buf[offset..])?;
        offset += n;

        Ok((
            Packet {
                leap_indicator: header.leap_indicator,
                version: header.version,
                mode: header.mode,
                stratum,
                poll,
                precision,
                root_delay,
                root_dispersion,
                reference_id,
                reference_timestamp,
                origin_timestamp,
                receive_timestamp,
                transmit_timestamp,
            },
            offset,
        ))
    }
}

// Buffer-based writer implementations (io-independent).

impl Packet {
    fn write_into(&self, buf: &mut [u8; Packet::PACKED_SIZE_BYTES]) {
        buf[0] = self.header().pack();
        buf[1] = self.stratum.0;
        buf[2] = self.poll;
        buf[3] = self.precision;
        write_short(&mut buf[4..8], self.root_delay);
        write_short(&mut buf[8..12], self.root_dispersion);
        buf[12..16].copy_from_slice(&self.reference_id.as_bytes());
        write_timestamp(&mut buf[16..24], self.reference_timestamp);
        write_timestamp(&mut buf[24..32], self.origin_timestamp);
        write_timestamp(&mut buf[32..40], self.receive_timestamp);
        write_timestamp(&mut buf[40..48], self.transmit_timestamp);
    }
}

fn write_short(buf: &mut [u8], short: ShortFormat) {
    buf[..2].copy_from_slice(&short.seconds.to_be_bytes());
    buf[2..4].copy_from_slice(&short.fraction.to_be_bytes());
}

fn write_timestamp(buf: &mut [u8], ts: TimestampFormat) {
    buf[..4].copy_from_slice(&ts.seconds.to_be_bytes());
    buf[4..8].copy_from_slice(&ts.fraction.to_be_bytes());
}

impl ToBytes for ShortFormat {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        if buf.len() < Self::PACKED_SIZE_BYTES {
            return Err(ParseError::BufferTooShort {
                needed: Self::PACKED_SIZE_BYTES,
                available: buf.len(),
            });
        }
        write_short(buf, *self);
        Ok(Self::PACKED_SIZE_BYTES)
    }
}

impl ToBytes for TimestampFormat {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        if buf.len() < Self::PACKED_SIZE_BYTES {
            return Err(ParseError::BufferTooShort {
                needed: Self::PACKED_SIZE_BYTES,
                available: buf.len(),
            });
        }
        write_timestamp(buf, *self);
        Ok(Self::PACKED_SIZE_BYTES)
    }
}

impl ToBytes for Stratum {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        if buf.is_empty() {
            return Err(ParseError::BufferTooShort {
                needed: 1,
                available: 0,
            });
        }
        buf[0] = self.0;
        Ok(1)
    }
}

impl ToBytes for HeaderByte {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        if buf.is_empty() {
            return Err(ParseError::BufferTooShort {
                needed: 1,
                available: 0,
            });
        }
        buf[0] = self.pack();
        Ok(1)
    }
}

impl ToBytes for ReferenceIdentifier {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        if buf.len() < Self::PACKED_SIZE_BYTES {
            return Err(ParseError::BufferTooShort {
                needed: Self::PACKED_SIZE_BYTES,
                available: buf.len(),
            });
        }
        buf[..4].copy_from_slice(&self.as_bytes());
        Ok(Self::PACKED_SIZE_BYTES)
    }
}

impl ToBytes for Packet {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        let available = buf.len();
        let out: &mut [u8; Self::PACKED_SIZE_BYTES] = buf
            .get_mut(..Self::PACKED_SIZE_BYTES)
            .and_then(|head| head.try_into().ok())
            .ok_or(ParseError::BufferTooShort {
                needed: Self::PACKED_SIZE_BYTES,
                available,
            })?;
        self.write_into(out);
        Ok(Self::PACKED_SIZE_BYTES)
    }
}
