// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Wall-clock readings relative to the Unix epoch and their NTP-epoch views.

use crate::protocol;
#[cfg(feature = "std")]
use std::time;

/// The number of seconds from 1st January 1900 UTC to the start of the Unix epoch.
pub const EPOCH_DELTA: i64 = 2_208_988_800;

// The NTP fractional scale (32-bit).
const NTP_SCALE: f64 = 4_294_967_296.0;

/// Describes an instant relative to the `UNIX_EPOCH` - 00:00:00 Coordinated Universal Time (UTC),
/// Thursday, 1 January 1970 in seconds with the fractional part in nanoseconds.
///
/// If the **Instant** describes some moment prior to `UNIX_EPOCH`, both the `secs` and
/// `subsec_nanos` components will be negative.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Instant {
    secs: i64,
    subsec_nanos: i32,
}

impl Instant {
    /// Create a new **Instant** given its `secs` and `subsec_nanos` components.
    ///
    /// To indicate a time following `UNIX_EPOCH`, both `secs` and `subsec_nanos` must be positive.
    /// To indicate a time prior to `UNIX_EPOCH`, both `secs` and `subsec_nanos` must be negative.
    /// Violating these invariants will result in a **panic!**.
    pub fn new(secs: i64, subsec_nanos: i32) -> Instant {
        if secs > 0 && subsec_nanos < 0 {
            panic!("invalid instant: secs was positive but subsec_nanos was negative");
        }
        if secs < 0 && subsec_nanos > 0 {
            panic!("invalid instant: secs was negative but subsec_nanos was positive");
        }
        Instant { secs, subsec_nanos }
    }

    /// Reads the system clock.
    ///
    /// ## Example
    ///
    /// ```
    /// println!("{:?}", sntp_proto::unix_time::Instant::now());
    /// ```
    #[cfg(feature = "std")]
    pub fn now() -> Self {
        Self::from(time::SystemTime::now())
    }

    /// The "seconds" component of the **Instant**.
    pub fn secs(&self) -> i64 {
        self.secs
    }

    /// The fractional component of the **Instant** in nanoseconds.
    pub fn subsec_nanos(&self) -> i32 {
        self.subsec_nanos
    }

    /// Seconds elapsed from the NTP epoch (1900-01-01 00:00:00 UTC) to this instant.
    ///
    /// ```
    /// use sntp_proto::unix_time::Instant;
    ///
    /// assert_eq!(Instant::new(0, 500_000_000).ntp_seconds(), 2_208_988_800.5);
    /// ```
    pub fn ntp_seconds(&self) -> f64 {
        (self.secs + EPOCH_DELTA) as f64 + self.subsec_nanos as f64 / 1e9
    }
}

#[cfg(feature = "std")]
impl From<time::SystemTime> for Instant {
    fn from(t: time::SystemTime) -> Self {
        match t.duration_since(time::UNIX_EPOCH) {
            Ok(duration) => {
                let secs = duration.as_secs() as i64;
                let subsec_nanos = duration.subsec_nanos() as i32;
                Instant::new(secs, subsec_nanos)
            }
            Err(sys_time_err) => {
                let duration_pre_unix_epoch = sys_time_err.duration();
                let secs = -(duration_pre_unix_epoch.as_secs() as i64);
                let subsec_nanos = -(duration_pre_unix_epoch.subsec_nanos() as i32);
                Instant::new(secs, subsec_nanos)
            }
        }
    }
}

impl From<Instant> for protocol::TimestampFormat {
    /// Converts a Unix [`Instant`] to a 32-bit NTP timestamp.
    ///
    /// **Note**: This truncates to 32 bits, losing era information.
    fn from(t: Instant) -> Self {
        let sec = t.secs() + EPOCH_DELTA;
        let frac = t.subsec_nanos() as f64 * NTP_SCALE / 1e9;
        protocol::TimestampFormat {
            seconds: sec as u32,
            fraction: frac as u32,
        }
    }
}
