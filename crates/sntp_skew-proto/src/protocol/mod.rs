// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Types and constants that precisely match the packet layout.
//!
//! Provides `FromBytes`/`ToBytes` implementations over plain byte slices, plus (with the `std`
//! feature) `ReadBytes` and `WriteBytes` implementations which extend the byteorder crate
//! `ReadBytesExt` and `WriteBytesExt` traits with the ability to read and write the packet types.
//!
//! The [`parse`] and [`encode`] functions are the codec entry points used by the responder: they
//! enforce that a packet on the wire is exactly 48 bytes.
//!
//! Documentation is largely derived from IETF RFC 4330 and RFC 5905.

/// NTP/SNTP well-known port number.
pub const PORT: u16 = 123;

mod bytes;
#[cfg(feature = "std")]
mod io;
mod traits;
mod types;

pub use self::bytes::{encode, parse};
pub use self::traits::*;
pub use self::types::*;
