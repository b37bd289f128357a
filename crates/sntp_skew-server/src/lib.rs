// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! SNTP responder that deliberately skews the time it serves.
//!
//! Every reply carries receive and transmit timestamps shifted by a fixed
//! offset chosen at startup, while the originate timestamp echoes the client's
//! transmit timestamp byte-for-byte. Useful for exercising clients against a
//! server whose clock is known to be wrong.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `tokio` | yes | Responder and `sntp-skewd` binary on the tokio runtime. |
//! | `smol-runtime` | no | Responder on the smol runtime. |

#![warn(missing_docs)]

// Re-export protocol types from sntp_proto for convenience.
pub use sntp_proto::{fixed_point, protocol, unix_time};

pub mod error;

/// Default listen address for a port.
///
/// Binds the loopback interface only; pass an explicit address to
/// [`listen`](crate::server::SntpServerBuilder::listen) to serve other hosts.
pub fn default_listen_addr(port: u16) -> String {
    format!("127.0.0.1:{port}")
}

/// Shared types and logic for the responder.
///
/// Provides configuration, the clock abstraction, the [`Responder`](server_common::Responder)
/// itself, and the per-datagram pipeline used by both runtimes.
pub mod server_common;

/// SNTP responder using the Tokio runtime.
#[cfg(feature = "tokio")]
pub mod server;

/// SNTP responder using the smol runtime.
///
/// Provides the same functionality as [`server`] but using the smol
/// async runtime.
#[cfg(feature = "smol-runtime")]
pub mod smol_server;
