// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Skewing SNTP responder using the smol runtime.
//!
//! Provides the same functionality as [`crate::server`] but using the smol
//! async runtime. See the tokio-based [`crate::server`] module for full
//! documentation.
//!
//! # Examples
//!
//! ```no_run
//! # fn main() -> std::io::Result<()> {
//! smol::block_on(async {
//!     use sntp_server::smol_server::SntpServer;
//!
//!     let server = SntpServer::builder()
//!         .listen("127.0.0.1:1123")
//!         .offset(-30.0)
//!         .build()
//!         .await?;
//!
//!     server.run().await
//! })
//! # }
//! ```

use log::debug;
use std::io;
use std::sync::Arc;

use crate::error::SntpServerError;
use crate::server_common::{Clock, HandleResult, Responder, ServerMetrics, handle_request};
use crate::unix_time::Instant;

crate::server_common::define_server_builder! {
    /// Builder for configuring and creating an [`SntpServer`] on smol.
}

impl SntpServerBuilder {
    /// Bind the listening socket and create the server.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the offset is not finite or the listen
    /// address has no usable port, or the underlying error if the socket
    /// cannot be bound.
    pub async fn build(self) -> io::Result<SntpServer> {
        let cfg = self.into_config();
        cfg.validate().map_err(SntpServerError::Config)?;

        let sock = smol::net::UdpSocket::bind(cfg.listen_addr.as_str()).await?;
        debug!("SNTP responder (smol) listening on {}", cfg.listen_addr);

        Ok(SntpServer {
            sock,
            responder: cfg.responder,
            metrics: cfg.metrics,
        })
    }
}

/// An SNTP responder that serves skewed time using the smol runtime.
///
/// Created via [`SntpServer::builder()`]. Call [`run()`](SntpServer::run) to start
/// serving requests.
pub struct SntpServer {
    sock: smol::net::UdpSocket,
    responder: Responder<Arc<dyn Clock>>,
    metrics: Option<Arc<ServerMetrics>>,
}

impl SntpServer {
    /// Create a builder for configuring the server.
    pub fn builder() -> SntpServerBuilder {
        SntpServerBuilder::new()
    }

    /// The responder replies are built with.
    pub fn responder(&self) -> &Responder<Arc<dyn Clock>> {
        &self.responder
    }

    /// Get the attached metrics instance, if any.
    pub fn metrics(&self) -> Option<&Arc<ServerMetrics>> {
        self.metrics.as_ref()
    }

    /// Get the local address the server is bound to.
    pub fn local_addr(&self) -> io::Result<std::net::SocketAddr> {
        self.sock.local_addr()
    }

    /// Run the server, answering requests indefinitely.
    ///
    /// This future runs until receiving from the socket fails.
    pub async fn run(self) -> io::Result<()> {
        let mut recv_buf = [0u8; 2048];

        loop {
            let (recv_len, src_addr) = self.sock.recv_from(&mut recv_buf).await?;
            let received_at = Instant::now();

            match handle_request(
                &self.responder,
                &recv_buf[..recv_len],
                src_addr,
                received_at,
                self.metrics.as_deref(),
            ) {
                HandleResult::Response(resp_buf) => {
                    if let Err(e) = self.sock.send_to(&resp_buf, src_addr).await {
                        debug!("failed to send reply to {}: {}", src_addr, e);
                        if let Some(m) = &self.metrics {
                            m.inc_send_failures();
                        }
                    } else if let Some(m) = &self.metrics {
                        m.inc_responses_sent();
                    }
                }
                HandleResult::Drop => {
                    debug!("dropped packet from {}", src_addr);
                }
            }
        }
    }
}
