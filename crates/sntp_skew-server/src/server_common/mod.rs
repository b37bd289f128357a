// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Shared types and logic for the responder, used by both the
//! tokio-based [`crate::server`] and smol-based [`crate::smol_server`] modules.
//!
//! The [`Responder`] turns a request datagram plus a receive-time reading into
//! a reply datagram and performs no I/O, so it can be driven from any loop.

#[cfg(any(feature = "tokio", feature = "smol-runtime"))]
mod builder;
mod clock;
mod config;
mod metrics;
mod pipeline;
mod responder;
mod response;
mod state;
mod validation;

pub use self::clock::{Clock, SystemClock};
pub use self::config::{ServerConfig, parse_offset};
pub use self::metrics::{MetricsSnapshot, ServerMetrics};
pub use self::pipeline::{HandleResult, handle_request};
pub use self::responder::Responder;
pub use self::state::ServerSystemState;

#[cfg(any(feature = "tokio", feature = "smol-runtime"))]
pub(crate) use self::builder::{ServerBuildConfig, define_server_builder};
pub(crate) use self::response::{build_server_response, echo_origin_timestamp};
pub(crate) use self::validation::validate_request;
