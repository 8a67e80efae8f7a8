//! httplink (v1)
//!
//! Sends a single report or desire message through the http link and prints
//! the response content.
//!
//! # Architecture Overview
//!
//! ```text
//!     payload (file/stdin)          ┌──────────────────────────────────────────┐
//!     ──────────────────────────────┼─▶ Message ──▶ HttpLink ──▶ Transport ────┼──▶ addr[0]
//!                                   │                  │        (reqwest +     │    addr[1] ...
//!                                   │                  │         rustls)       │
//!     response JSON (stdout)        │                  ▼                       │
//!     ◀─────────────────────────────┼── Message ◀── envsubst ◀── bytes ◀───────┼──── first success
//!                                   │                                          │
//!                                   │  config (TOML) · tracing · metrics       │
//!                                   └──────────────────────────────────────────┘
//! ```

use std::io::Read;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use httplink::config::load_config;
use httplink::observability::logging;
use httplink::{HttpLink, Link, Message, MessageKind};

#[derive(Parser)]
#[command(name = "httplink")]
#[command(about = "Send a message through the http link", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, env = "HTTPLINK_CONFIG")]
    config: PathBuf,

    /// Override the configured log level.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a state report
    Report(SendArgs),
    /// Request desired state
    Desire(SendArgs),
}

#[derive(Args)]
struct SendArgs {
    /// JSON payload file; reads stdin when omitted.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Extra request header as key=value (repeatable).
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    headers: Vec<(String, String)>,
}

fn parse_header(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{}'", raw))
}

fn read_payload(file: Option<&PathBuf>) -> Result<Value, Box<dyn std::error::Error>> {
    let raw = match file {
        Some(path) => std::fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_slice(&raw)?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)?;
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }
    logging::init(&config.observability)?;

    tracing::info!(config = %cli.config.display(), "httplink v0.1.0 starting");

    let (kind, args) = match cli.command {
        Commands::Report(args) => (MessageKind::Report, args),
        Commands::Desire(args) => (MessageKind::Desire, args),
    };

    let mut msg = Message::new(kind, read_payload(args.file.as_ref())?);
    for (key, value) in args.headers {
        msg = msg.with_metadata(key, value);
    }

    let link = HttpLink::new(config)?;
    let response = link.request(&msg).await;
    link.close()?;

    let response = response?;
    println!("{}", serde_json::to_string_pretty(&response.content.into_value())?);
    Ok(())
}
