// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Skewing SNTP responder using the Tokio runtime.
//!
//! Every datagram is answered on a single async task: the receive time is read
//! as soon as `recv_from` completes, the [`Responder`] builds the reply, and
//! the reply is sent back to the source address. Malformed datagrams and
//! failed sends are logged and skipped.
//!
//! # Examples
//!
//! ```no_run
//! # async fn example() -> std::io::Result<()> {
//! use sntp_server::server::SntpServer;
//!
//! let server = SntpServer::builder()
//!     .listen("127.0.0.1:1123")
//!     .offset(3600.0)
//!     .build()
//!     .await?;
//!
//! server.run().await
//! # }
//! ```

use std::io;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::debug;

use crate::error::SntpServerError;
use crate::server_common::{Clock, HandleResult, Responder, ServerMetrics, handle_request};
use crate::unix_time::Instant;

// Generate the shared SntpServerBuilder struct and config methods.
crate::server_common::define_server_builder! {
    /// Builder for configuring and creating an [`SntpServer`].
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

        let sock = UdpSocket::bind(&cfg.listen_addr).await?;
        debug!("SNTP responder listening on {}", cfg.listen_addr);

        Ok(SntpServer {
            sock,
            responder: cfg.responder,
            metrics: cfg.metrics,
        })
    }
}

/// An SNTP responder that serves skewed time.
///
/// Created via [`SntpServer::builder()`]. Call [`run()`](SntpServer::run) to start
/// serving requests.
pub struct SntpServer {
    sock: UdpSocket,
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
    /// This future runs until receiving from the socket fails. Use
    /// `tokio::select!` or a shutdown signal to stop the server gracefully.
    pub async fn run(self) -> io::Result<()> {
        let mut recv_buf = [0u8; 2048];

        loop {
            let (recv_len, src_addr) = self.sock.recv_from(&mut recv_buf).await?;
            let received_at = Instant::now();

            let result = handle_request(
                &self.responder,
                &recv_buf[..recv_len],
                src_addr,
                received_at,
                self.metrics.as_deref(),
            );

            match result {
                HandleResult::Response(resp_buf) => {
                    match self.sock.send_to(&resp_buf, src_addr).await {
                        Ok(_) => {
                            if let Some(m) = &self.metrics {
                                m.inc_responses_sent();
                            }
                        }
                        Err(e) => {
                            debug!("failed to send reply to {}: {}", src_addr, e);
                            if let Some(m) = &self.metrics {
                                m.inc_send_failures();
                            }
                        }
                    }
                }
                HandleResult::Drop => {
                    debug!("dropped packet from {}", src_addr);
                }
            }
        }
    }
}
