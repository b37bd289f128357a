// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Example responder that runs one hour fast, then queries itself.
//!
//! Run with: `cargo run -p sntp_skew-server --example server`

use std::time::Duration;

use sntp_server::protocol::{self, Packet};
use sntp_server::server::SntpServer;
use sntp_server::unix_time::Instant;
use tokio::net::UdpSocket;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let server = SntpServer::builder()
        .listen("127.0.0.1:1123")
        .offset(3600.0)
        .build()
        .await?;
    let addr = server.local_addr()?;
    println!("SNTP responder listening on {}", addr);
    tokio::spawn(server.run());

    let sock = UdpSocket::bind("127.0.0.1:0").await?;
    let request = protocol::encode(&Packet::client_request(Instant::now().into()));
    sock.send_to(&request, addr).await?;

    let mut buf = [0u8; 2048];
    let (len, _) = tokio::time::timeout(Duration::from_secs(2), sock.recv_from(&mut buf))
        .await
        .map_err(|_| std::io::Error::new(std::io::ErrorKind::TimedOut, "no reply"))??;
    let reply = protocol::parse(&buf[..len])?;

    let skew = reply.transmit_timestamp.as_seconds_f64() - Instant::now().ntp_seconds();
    println!("server clock is {:.3} s ahead", skew);
    Ok(())
}
