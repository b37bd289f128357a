// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! `sntp-skewd`: answer SNTP requests with time shifted by a fixed offset.
//!
//! ```text
//! sntp-skewd --offset 3600 --listen 0.0.0.0:123
//! sntp-skewd --port 1123          # prompts for the offset
//! RUST_LOG=debug sntp-skewd -o -2.5
//! ```

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use sntp_server::error::ConfigError;
use sntp_server::fixed_point::FractionEncoding;
use sntp_server::protocol::{self, ReferenceIdentifier};
use sntp_server::server::SntpServer;
use sntp_server::server_common::parse_offset;

/// Exit status for unusable command-line or prompted input.
const EXIT_USAGE: u8 = 2;

#[derive(Parser)]
#[command(name = "sntp-skewd")]
#[command(version, about = "SNTP responder that serves time shifted by a fixed offset")]
struct Cli {
    /// Seconds added to every served timestamp, may be negative (prompted for when omitted)
    #[arg(short, long, allow_hyphen_values = true)]
    offset: Option<String>,

    /// Address to listen on, as host:port (overrides --port)
    #[arg(short, long)]
    listen: Option<String>,

    /// Port to listen on at 127.0.0.1
    #[arg(short, long, default_value_t = protocol::PORT)]
    port: u16,

    /// Four-character reference identifier advertised in replies
    #[arg(short, long, default_value = "GOES")]
    reference_id: String,

    /// Derive timestamp fractions from the decimal rendering of the seconds
    #[arg(long)]
    decimal_fraction: bool,
}

fn prompt_offset() -> io::Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "Please, input offset of time in sec: ")?;
    stdout.flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let raw_offset = match cli.offset {
        Some(offset) => offset,
        None => match prompt_offset() {
            Ok(line) => line,
            Err(e) => {
                error!("failed to read offset: {e}");
                return ExitCode::from(EXIT_USAGE);
            }
        },
    };
    let offset = match parse_offset(&raw_offset) {
        Ok(offset) => offset,
        Err(e) => {
            error!("{e}");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let reference_id = match ReferenceIdentifier::new(&cli.reference_id) {
        Ok(id) => id,
        Err(_) => {
            error!(
                "{}",
                ConfigError::InvalidReferenceId {
                    code: cli.reference_id
                }
            );
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let fraction_encoding = if cli.decimal_fraction {
        FractionEncoding::DecimalText
    } else {
        FractionEncoding::Binary
    };
    let listen = cli
        .listen
        .unwrap_or_else(|| sntp_server::default_listen_addr(cli.port));

    let server = match SntpServer::builder()
        .listen(listen.clone())
        .offset(offset)
        .fraction_encoding(fraction_encoding)
        .reference_id(reference_id)
        .build()
        .await
    {
        Ok(server) => server,
        Err(e) => {
            error!("failed to start responder on {listen}: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!("serving time skewed by {offset} s");
    match server.local_addr() {
        Ok(addr) => info!("listening on {addr}"),
        Err(_) => info!("listening on {listen}"),
    }

    if let Err(e) = server.run().await {
        error!("responder stopped: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
