// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Shared responder builder infrastructure.
//!
//! Provides the [`define_server_builder!`] macro and [`ServerBuildConfig`]
//! struct used by both the tokio and smol server implementations.

use std::sync::Arc;

use crate::error::ConfigError;

use super::{Clock, Responder, ServerMetrics};

/// Runtime-independent configuration produced by `SntpServerBuilder::into_config`.
///
/// Contains everything needed to create a server except the runtime-specific
/// socket binding.
pub(crate) struct ServerBuildConfig {
    pub(crate) responder: Responder<Arc<dyn Clock>>,
    pub(crate) metrics: Option<Arc<ServerMetrics>>,
    pub(crate) listen_addr: String,
}

impl ServerBuildConfig {
    /// Reject configurations no socket should be opened for.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let offset = self.responder.offset_seconds();
        if !offset.is_finite() {
            return Err(ConfigError::InvalidOffset {
                input: offset.to_string(),
            });
        }
        let port_ok = self
            .listen_addr
            .rsplit_once(':')
            .is_some_and(|(host, port)| !host.is_empty() && port.parse::<u16>().is_ok());
        if !port_ok {
            return Err(ConfigError::InvalidListenAddress {
                address: self.listen_addr.clone(),
                detail: "expected host:port".to_string(),
            });
        }
        Ok(())
    }
}

/// Define an `SntpServerBuilder` struct with the shared configuration methods.
///
/// Both the tokio [`crate::server`] and smol [`crate::smol_server`] modules
/// invoke this macro to generate their own `SntpServerBuilder` type with
/// identical configuration methods. Each module then adds a runtime-specific
/// `build()` method.
macro_rules! define_server_builder {
    (
        $(#[$struct_meta:meta])*
    ) => {
        $(#[$struct_meta])*
        pub struct SntpServerBuilder {
            listen_addr: String,
            server_config: $crate::server_common::ServerConfig,
            system_state: $crate::server_common::ServerSystemState,
            clock: ::std::sync::Arc<dyn $crate::server_common::Clock>,
            metrics: Option<::std::sync::Arc<$crate::server_common::ServerMetrics>>,
        }

        impl SntpServerBuilder {
            fn new() -> Self {
                SntpServerBuilder {
                    listen_addr: $crate::default_listen_addr($crate::protocol::PORT),
                    server_config: <$crate::server_common::ServerConfig
                        as ::std::default::Default>::default(),
                    system_state: <$crate::server_common::ServerSystemState
                        as ::std::default::Default>::default(),
                    clock: ::std::sync::Arc::new($crate::server_common::SystemClock),
                    metrics: None,
                }
            }

            /// Set the listen address (default: `"127.0.0.1:123"`).
            pub fn listen(mut self, addr: impl Into<String>) -> Self {
                self.listen_addr = addr.into();
                self
            }

            /// Set the number of seconds added to reply timestamps (default: 0).
            pub fn offset(mut self, seconds: f64) -> Self {
                self.server_config.offset_seconds = seconds;
                self
            }

            /// Set how reply timestamps are converted to fixed point.
            pub fn fraction_encoding(
                mut self,
                encoding: $crate::fixed_point::FractionEncoding,
            ) -> Self {
                self.server_config.fraction_encoding = encoding;
                self
            }

            /// Set the stratum advertised in replies.
            pub fn stratum(mut self, stratum: $crate::protocol::Stratum) -> Self {
                self.system_state.stratum = stratum;
                self
            }

            /// Set the reference identifier advertised in replies.
            pub fn reference_id(
                mut self,
                id: $crate::protocol::ReferenceIdentifier,
            ) -> Self {
                self.system_state.reference_id = id;
                self
            }

            /// Set the leap indicator advertised in replies.
            pub fn leap_indicator(
                mut self,
                li: $crate::protocol::LeapIndicator,
            ) -> Self {
                self.system_state.leap_indicator = li;
                self
            }

            /// Replace the clock transmit timestamps are read from.
            pub fn clock(mut self, clock: impl $crate::server_common::Clock + 'static) -> Self {
                self.clock = ::std::sync::Arc::new(clock);
                self
            }

            /// Attach a shared metrics instance for runtime counter tracking.
            ///
            /// The server will increment atomic counters on every request. Pass the
            /// same `Arc<ServerMetrics>` to other tasks to read snapshots via
            /// [`ServerMetrics::snapshot()`].
            pub fn metrics(
                mut self,
                metrics: ::std::sync::Arc<$crate::server_common::ServerMetrics>,
            ) -> Self {
                self.metrics = Some(metrics);
                self
            }

            /// Convert this builder into a runtime-independent build
            /// configuration.
            pub(crate) fn into_config(
                self,
            ) -> $crate::server_common::ServerBuildConfig {
                $crate::server_common::ServerBuildConfig {
                    responder: $crate::server_common::Responder::new(
                        self.server_config,
                        self.system_state,
                        self.clock,
                    ),
                    metrics: self.metrics,
                    listen_addr: self.listen_addr,
                }
            }
        }
    };
}
pub(crate) use define_server_builder;
