// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Lock-free server metrics using atomic counters.
//!
//! All counters use relaxed ordering. Values read while the server is running
//! are individually accurate but not a consistent cut across counters.

use std::sync::atomic::{AtomicU64, Ordering};

/// Runtime server metrics, updated atomically on every request.
///
/// Create an instance with [`ServerMetrics::new()`], wrap in `Arc`, and pass
/// to [`SntpServerBuilder::metrics()`](crate::server::SntpServerBuilder::metrics).
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> std::io::Result<()> {
/// use std::sync::Arc;
/// use sntp_server::server::SntpServer;
/// use sntp_server::server_common::ServerMetrics;
///
/// let metrics = Arc::new(ServerMetrics::new());
/// let server = SntpServer::builder()
///     .listen("127.0.0.1:1234")
///     .metrics(metrics.clone())
///     .build()
///     .await?;
///
/// // Read metrics from another task
/// let snap = metrics.snapshot();
/// println!("requests: {}", snap.requests_received);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ServerMetrics {
    /// Total datagrams received (valid + invalid).
    pub requests_received: AtomicU64,
    /// Total replies sent.
    pub responses_sent: AtomicU64,
    /// Datagrams dropped because they were not valid packets.
    pub requests_dropped: AtomicU64,
    /// Replies dropped because a timestamp could not be encoded.
    pub encoding_failures: AtomicU64,
    /// Replies that failed to send.
    pub send_failures: AtomicU64,
}

impl ServerMetrics {
    /// Create a new metrics instance with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a point-in-time snapshot of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests_received: self.requests_received.load(Ordering::Relaxed),
            responses_sent: self.responses_sent.load(Ordering::Relaxed),
            requests_dropped: self.requests_dropped.load(Ordering::Relaxed),
            encoding_failures: self.encoding_failures.load(Ordering::Relaxed),
            send_failures: self.send_failures.load(Ordering::Relaxed),
        }
    }

    #[inline]
    pub(crate) fn inc_requests_received(&self) {
        self.requests_received.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    #[cfg_attr(
        not(any(feature = "tokio", feature = "smol-runtime")),
        allow(dead_code)
    )]
    pub(crate) fn inc_responses_sent(&self) {
        self.responses_sent.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn inc_requests_dropped(&self) {
        self.requests_dropped.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn inc_encoding_failures(&self) {
        self.encoding_failures.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    #[cfg_attr(
        not(any(feature = "tokio", feature = "smol-runtime")),
        allow(dead_code)
    )]
    pub(crate) fn inc_send_failures(&self) {
        self.send_failures.fetch_add(1, Ordering::Relaxed);
    }
}

/// A point-in-time snapshot of server metrics (non-atomic, copyable).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct MetricsSnapshot {
    /// Total datagrams received (valid + invalid).
    pub requests_received: u64,
    /// Total replies sent.
    pub responses_sent: u64,
    /// Datagrams dropped because they were not valid packets.
    pub requests_dropped: u64,
    /// Replies dropped because a timestamp could not be encoded.
    pub encoding_failures: u64,
    /// Replies that failed to send.
    pub send_failures: u64,
}
