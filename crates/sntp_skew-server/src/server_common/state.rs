// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use crate::protocol;

/// Header values stamped into every reply.
///
/// The responder has no upstream source, so these never change after startup.
/// The defaults describe a primary server with a perfect clock: stratum 1,
/// zero poll and precision, zero root delay and dispersion, reference
/// identifier `GOES`, and a zero reference timestamp.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerSystemState {
    /// Leap indicator warning of impending leap second.
    pub leap_indicator: protocol::LeapIndicator,
    /// Stratum level of this server.
    pub stratum: protocol::Stratum,
    /// Poll interval exponent.
    pub poll: u8,
    /// Precision of the server's clock.
    pub precision: u8,
    /// Total round-trip delay to the primary reference source.
    pub root_delay: protocol::ShortFormat,
    /// Total dispersion to the primary reference source.
    pub root_dispersion: protocol::ShortFormat,
    /// Reference clock identifier.
    pub reference_id: protocol::ReferenceIdentifier,
    /// Time when the system clock was last set or corrected.
    pub reference_timestamp: protocol::TimestampFormat,
}

impl Default for ServerSystemState {
    fn default() -> Self {
        ServerSystemState {
            leap_indicator: protocol::LeapIndicator::NoWarning,
            stratum: protocol::Stratum::PRIMARY,
            poll: 0,
            precision: 0,
            root_delay: protocol::ShortFormat::default(),
            root_dispersion: protocol::ShortFormat::default(),
            reference_id: protocol::ReferenceIdentifier::GOES,
            reference_timestamp: protocol::TimestampFormat::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_header_values() {
        let state = ServerSystemState::default();
        assert_eq!(state.leap_indicator, protocol::LeapIndicator::NoWarning);
        assert_eq!(state.stratum, protocol::Stratum(1));
        assert_eq!(state.poll, 0);
        assert_eq!(state.precision, 0);
        assert_eq!(state.reference_id.as_str(), "GOES");
        assert_eq!(state.reference_timestamp, protocol::TimestampFormat::default());
    }
}
