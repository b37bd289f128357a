// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! SNTP packet types, the 48-byte wire codec, and fixed-point time conversions.
//!
//! This crate provides the foundational types and parsing logic for the
//! Simple Network Time Protocol (RFC 4330) header, which shares its layout with
//! the NTPv4 header of RFC 5905. Extension fields and MACs are not supported:
//! a packet on the wire is exactly [`Packet::PACKED_SIZE_BYTES`] long.
//!
//! [`Packet::PACKED_SIZE_BYTES`]: protocol::ConstPackedSizeBytes::PACKED_SIZE_BYTES

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

/// Custom error types for buffer-based packet parsing and serialization.
pub mod error;

/// Conversions between floating seconds and the NTP fixed-point formats.
pub mod fixed_point;

/// SNTP protocol types, constants, and the wire codec.
pub mod protocol;

/// Unix time conversion utilities for NTP timestamps.
pub mod unix_time;
