// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use core::fmt;

use super::ConstPackedSizeBytes;
use crate::error::ParseError;

/// **NTP Short Format** - Used in delay and dispersion header fields where the full resolution and
/// range of the other formats are not justified. It includes a 16-bit unsigned seconds field and a
/// 16-bit fraction field.
///
/// ### Layout
///
/// ```ignore
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |          Seconds              |           Fraction            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ShortFormat {
    /// Seconds component (16-bit unsigned).
    pub seconds: u16,
    /// Fractional seconds component (16-bit unsigned, units of 2^-16 s).
    pub fraction: u16,
}

/// **NTP Timestamp Format** - Used in packet headers. It includes a 32-bit unsigned seconds field
/// spanning 136 years and a 32-bit fraction field resolving 232 picoseconds.
///
/// The prime epoch is 0 h 1 January 1900 UTC, when all bits are zero.
///
/// ### Layout
///
/// ```ignore
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                            Seconds                            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                            Fraction                           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TimestampFormat {
    /// Seconds since 1900-01-01 00:00:00 UTC (32-bit unsigned).
    pub seconds: u32,
    /// Fractional seconds (32-bit unsigned, units of 2^-32 s).
    pub fraction: u32,
}

/// A 2-bit integer warning of an impending leap second to be inserted or deleted in the last
/// minute of the current month.
///
/// Note that this field is packed in the actual header. All four values a 2-bit field can hold
/// have a variant, so decoding never fails.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum LeapIndicator {
    /// No leap required.
    #[default]
    NoWarning = 0,
    /// Last minute of the day has 61 seconds.
    AddOne = 1,
    /// Last minute of the day has 59 seconds.
    SubOne = 2,
    /// Clock unsynchronized.
    Unknown = 3,
}

impl TryFrom<u8> for LeapIndicator {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LeapIndicator::NoWarning),
            1 => Ok(LeapIndicator::AddOne),
            2 => Ok(LeapIndicator::SubOne),
            3 => Ok(LeapIndicator::Unknown),
            _ => Err(ParseError::InvalidField {
                field: "leap indicator",
                value: value as u32,
            }),
        }
    }
}

/// A 3-bit integer representing the protocol version number.
///
/// Note that while this struct is 8-bits, this field is packed to 3 in the actual header. Any
/// 3-bit value is carried as-is: the responder echoes whatever version the client sent.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Version(pub(super) u8);

/// A 3-bit integer representing the association mode.
///
/// Note that while this enum is 8-bits, this field is packed to 3 in the actual header. All eight
/// values a 3-bit field can hold have a variant, so decoding never fails.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq)]
pub enum Mode {
    /// Reserved mode (value 0).
    Reserved = 0,
    /// Symmetric active mode (value 1).
    SymmetricActive = 1,
    /// Symmetric passive mode (value 2).
    SymmetricPassive = 2,
    /// Client mode (value 3).
    #[default]
    Client = 3,
    /// Server mode (value 4).
    Server = 4,
    /// Broadcast mode (value 5).
    Broadcast = 5,
    /// NTP control message mode (value 6).
    NtpControlMessage = 6,
    /// Reserved for private use (value 7).
    ReservedForPrivateUse = 7,
}

impl TryFrom<u8> for Mode {
    type Error = ParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Mode::Reserved),
            1 => Ok(Mode::SymmetricActive),
            2 => Ok(Mode::SymmetricPassive),
            3 => Ok(Mode::Client),
            4 => Ok(Mode::Server),
            5 => Ok(Mode::Broadcast),
            6 => Ok(Mode::NtpControlMessage),
            7 => Ok(Mode::ReservedForPrivateUse),
            _ => Err(ParseError::InvalidField {
                field: "association mode",
                value: value as u32,
            }),
        }
    }
}

/// An 8-bit integer representing the stratum.
///
/// ```ignore
/// +--------+-----------------------------------------------------+
/// | Value  | Meaning                                             |
/// +--------+-----------------------------------------------------+
/// | 0      | unspecified or invalid                              |
/// | 1      | primary server (e.g., equipped with a GPS receiver) |
/// | 2-15   | secondary server (via NTP)                          |
/// | 16     | unsynchronized                                      |
/// | 17-255 | reserved                                            |
/// +--------+-----------------------------------------------------+
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Stratum(pub u8);

/// A four-byte code identifying the reference clock, carried as text.
///
/// The identifier is always exactly four bytes of valid UTF-8. Shorter codes are not padded and
/// longer ones are not truncated: [`ReferenceIdentifier::new`] rejects any string whose UTF-8
/// encoding is not four bytes long. Decoding a packet whose identifier bytes are not valid UTF-8
/// fails with [`ParseError::InvalidUtf8`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct ReferenceIdentifier([u8; 4]);

/// The three sub-fields packed into the first header byte.
///
/// ```ignore
///  0 1 2 3 4 5 6 7
/// +-+-+-+-+-+-+-+-+
/// |LI | VN  |Mode |
/// +-+-+-+-+-+-+-+-+
/// ```
///
/// `leap_indicator` occupies the 2 most significant bits, `version` the next 3 and `mode` the 3
/// least significant bits.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct HeaderByte {
    /// Leap indicator (2 bits).
    pub leap_indicator: LeapIndicator,
    /// Version number (3 bits).
    pub version: Version,
    /// Association mode (3 bits).
    pub mode: Mode,
}

/// **Packet Header** - the SNTP message, in parsed form.
///
/// The packet consists of 12 words in network byte order. SNTP responders built on this crate do
/// not carry extension fields or a MAC, so a packet is exactly 48 bytes.
///
/// ```ignore
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |LI | VN  |Mode |    Stratum     |     Poll      |  Precision   |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                         Root Delay                            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                         Root Dispersion                       |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                          Reference ID                         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                     Reference Timestamp (64)                  +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                      Origin Timestamp (64)                    +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                      Receive Timestamp (64)                   +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                      Transmit Timestamp (64)                  +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Packet {
    /// Leap indicator warning of impending leap second.
    pub leap_indicator: LeapIndicator,
    /// Protocol version number (0-7 on the wire).
    pub version: Version,
    /// Association mode (client, server, broadcast, etc.).
    pub mode: Mode,
    /// Stratum level of the time source.
    pub stratum: Stratum,
    /// Poll interval exponent, carried as a raw byte.
    pub poll: u8,
    /// Clock precision exponent, carried as a raw byte (a signed log2 value in full NTP).
    pub precision: u8,
    /// Total round-trip delay to the reference clock, in NTP short format.
    pub root_delay: ShortFormat,
    /// Total dispersion to the reference clock, in NTP short format.
    pub root_dispersion: ShortFormat,
    /// Reference identifier (four-character clock source code).
    pub reference_id: ReferenceIdentifier,
    /// Time when the system clock was last set or corrected.
    pub reference_timestamp: TimestampFormat,
    /// Time at the client when the request departed for the server.
    pub origin_timestamp: TimestampFormat,
    /// Time at the server when the request arrived from the client.
    pub receive_timestamp: TimestampFormat,
    /// Time at the server when the response left for the client.
    pub transmit_timestamp: TimestampFormat,
}

// Inherent implementations.

impl ReferenceIdentifier {
    /// Geosynchronous Orbit Environment Satellite.
    pub const GOES: Self = ReferenceIdentifier(*b"GOES");
    /// Uncalibrated local clock.
    pub const LOCL: Self = ReferenceIdentifier(*b"LOCL");
    /// Global Positioning System (zero padded).
    pub const GPS: Self = ReferenceIdentifier(*b"GPS\0");

    /// Create a reference identifier from a code whose UTF-8 encoding is exactly four bytes.
    ///
    /// No padding or truncation is performed.
    pub fn new(code: &str) -> Result<Self, ParseError> {
        let bytes = code.as_bytes();
        let arr: [u8; 4] = bytes
            .try_into()
            .map_err(|_| ParseError::InvalidReferenceIdLength { len: bytes.len() })?;
        Ok(ReferenceIdentifier(arr))
    }

    /// Decode a reference identifier from its four wire bytes.
    ///
    /// Fails if the bytes are not valid UTF-8.
    pub fn from_wire(bytes: [u8; 4]) -> Result<Self, ParseError> {
        core::str::from_utf8(&bytes).map_err(|_| ParseError::InvalidUtf8 {
            field: "reference identifier",
        })?;
        Ok(ReferenceIdentifier(bytes))
    }

    /// Returns the raw 4-byte representation of the reference identifier.
    pub fn as_bytes(&self) -> [u8; 4] {
        self.0
    }

    /// Returns the identifier as text, including any NUL padding.
    pub fn as_str(&self) -> &str {
        // Both constructors validate UTF-8.
        core::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl HeaderByte {
    /// Pack the three sub-fields into a single byte.
    pub fn pack(&self) -> u8 {
        ((self.leap_indicator as u8) << 6) | ((self.version.0 & 0b111) << 3) | self.mode as u8
    }

    /// Split a header byte into its three sub-fields.
    ///
    /// Every byte value decodes: the masked values always fall in range.
    pub fn unpack(byte: u8) -> Result<Self, ParseError> {
        let leap_indicator = LeapIndicator::try_from(byte >> 6)?;
        let version = Version((byte >> 3) & 0b111);
        let mode = Mode::try_from(byte & 0b111)?;
        Ok(HeaderByte {
            leap_indicator,
            version,
            mode,
        })
    }
}

impl Version {
    /// NTP version 1.
    pub const V1: Self = Version(1);
    /// NTP version 2.
    pub const V2: Self = Version(2);
    /// NTP version 3.
    pub const V3: Self = Version(3);
    /// NTP version 4 (current standard).
    pub const V4: Self = Version(4);
    /// The largest value the 3-bit field can hold.
    pub const MAX: Self = Version(7);

    /// Create a `Version` from a raw version number.
    ///
    /// Returns `None` if the value does not fit in 3 bits.
    pub fn new(v: u8) -> Option<Self> {
        if v <= Self::MAX.0 {
            Some(Version(v))
        } else {
            None
        }
    }

    /// Returns the raw version number as a `u8`.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl Stratum {
    /// Unspecified or invalid.
    pub const UNSPECIFIED: Self = Stratum(0);
    /// The primary server (e.g. equipped with a GPS receiver).
    pub const PRIMARY: Self = Stratum(1);
    /// An unsynchronized stratum.
    pub const UNSYNCHRONIZED: Self = Stratum(16);
}

impl Packet {
    /// The first header byte of this packet.
    pub fn header(&self) -> HeaderByte {
        HeaderByte {
            leap_indicator: self.leap_indicator,
            version: self.version,
            mode: self.mode,
        }
    }

    /// A client-mode request carrying `transmit` as its transmit timestamp.
    pub fn client_request(transmit: TimestampFormat) -> Self {
        Packet {
            transmit_timestamp: transmit,
            ..Packet::default()
        }
    }
}

// Size implementations.

impl ConstPackedSizeBytes for ShortFormat {
    const PACKED_SIZE_BYTES: usize = 4;
}

impl ConstPackedSizeBytes for TimestampFormat {
    const PACKED_SIZE_BYTES: usize = 8;
}

impl ConstPackedSizeBytes for Stratum {
    const PACKED_SIZE_BYTES: usize = 1;
}

impl ConstPackedSizeBytes for ReferenceIdentifier {
    const PACKED_SIZE_BYTES: usize = 4;
}

impl ConstPackedSizeBytes for HeaderByte {
    const PACKED_SIZE_BYTES: usize = 1;
}

impl ConstPackedSizeBytes for Packet {
    const PACKED_SIZE_BYTES: usize = HeaderByte::PACKED_SIZE_BYTES
        + Stratum::PACKED_SIZE_BYTES
        + 2
        + ShortFormat::PACKED_SIZE_BYTES * 2
        + ReferenceIdentifier::PACKED_SIZE_BYTES
        + TimestampFormat::PACKED_SIZE_BYTES * 4;
}

// Default implementations.

impl Default for Version {
    /// Defaults to NTPv4, the current standard (RFC 5905).
    fn default() -> Self {
        Version::V4
    }
}

impl Default for Packet {
    /// Defaults to a valid NTPv4 client request template.
    ///
    /// All timestamp and delay fields are zeroed. Set `transmit_timestamp`
    /// before sending.
    fn default() -> Self {
        Packet {
            leap_indicator: LeapIndicator::default(),
            version: Version::default(),
            mode: Mode::default(),
            stratum: Stratum::default(),
            poll: 0,
            precision: 0,
            root_delay: ShortFormat::default(),
            root_dispersion: ShortFormat::default(),
            reference_id: ReferenceIdentifier::default(),
            reference_timestamp: TimestampFormat::default(),
            origin_timestamp: TimestampFormat::default(),
            receive_timestamp: TimestampFormat::default(),
            transmit_timestamp: TimestampFormat::default(),
        }
    }
}

// Display implementations.

impl fmt::Display for ReferenceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str().trim_end_matches('\0'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_byte_packs_msb_first() {
        let header = HeaderByte {
            leap_indicator: LeapIndicator::Unknown,
            version: Version::V4,
            mode: Mode::Client,
        };
        // 11 100 011
        assert_eq!(header.pack(), 0b1110_0011);
    }

    #[test]
    fn header_byte_unpack_client_v4() {
        let header = HeaderByte::unpack(0x23).unwrap();
        assert_eq!(header.leap_indicator, LeapIndicator::NoWarning);
        assert_eq!(header.version, Version::V4);
        assert_eq!(header.mode, Mode::Client);
    }

    #[test]
    fn header_byte_all_values_decode() {
        for byte in 0..=u8::MAX {
            let header = HeaderByte::unpack(byte).unwrap();
            assert_eq!(header.pack(), byte);
        }
    }

    #[test]
    fn leap_indicator_out_of_range() {
        assert_eq!(
            LeapIndicator::try_from(4),
            Err(ParseError::InvalidField {
                field: "leap indicator",
                value: 4
            })
        );
    }

    #[test]
    fn mode_out_of_range() {
        assert!(Mode::try_from(8).is_err());
        assert_eq!(Mode::try_from(4), Ok(Mode::Server));
    }

    #[test]
    fn version_new_bounds() {
        assert_eq!(Version::new(0).map(|v| v.value()), Some(0));
        assert_eq!(Version::new(7), Some(Version::MAX));
        assert_eq!(Version::new(8), None);
    }

    #[test]
    fn reference_id_requires_four_bytes() {
        assert_eq!(ReferenceIdentifier::new("GOES"), Ok(ReferenceIdentifier::GOES));
        assert_eq!(
            ReferenceIdentifier::new("GPS"),
            Err(ParseError::InvalidReferenceIdLength { len: 3 })
        );
        assert_eq!(
            ReferenceIdentifier::new("GOESX"),
            Err(ParseError::InvalidReferenceIdLength { len: 5 })
        );
        // Two 2-byte characters encode to four bytes.
        assert!(ReferenceIdentifier::new("éé").is_ok());
    }

    #[test]
    fn reference_id_rejects_invalid_utf8() {
        assert_eq!(
            ReferenceIdentifier::from_wire([0xff, b'O', b'E', b'S']),
            Err(ParseError::InvalidUtf8 {
                field: "reference identifier"
            })
        );
        assert_eq!(
            ReferenceIdentifier::from_wire(*b"LOCL"),
            Ok(ReferenceIdentifier::LOCL)
        );
    }

    #[test]
    fn reference_id_as_str() {
        assert_eq!(ReferenceIdentifier::GOES.as_str(), "GOES");
        assert_eq!(ReferenceIdentifier::GPS.as_str(), "GPS\0");
    }

    #[test]
    fn packed_size_is_48() {
        assert_eq!(Packet::PACKED_SIZE_BYTES, 48);
    }

    #[test]
    fn client_request_template() {
        let ts = TimestampFormat {
            seconds: 1,
            fraction: 2,
        };
        let pkt = Packet::client_request(ts);
        assert_eq!(pkt.mode, Mode::Client);
        assert_eq!(pkt.version, Version::V4);
        assert_eq!(pkt.transmit_timestamp, ts);
        assert_eq!(pkt.origin_timestamp, TimestampFormat::default());
    }
}
