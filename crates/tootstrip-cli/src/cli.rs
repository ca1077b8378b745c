//! CLI entry: argument parsing, logging init, and the stream run loop.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use tootstrip_core::config::Config;
use tootstrip_core::decode::EventFilter;
use tootstrip_core::feed::{create_post_channel, drive_display, pump_frames};
use tootstrip_core::ring::RotatingDisplay;
use tootstrip_core::stream::{StreamClient, StreamConfig};

use crate::strip::LineStrip;

#[derive(Parser)]
#[command(name = "tootstrip")]
#[command(version)]
#[command(about = "Scrolling timeline strip for a Mastodon public feed")]
struct Cli {
    /// Bearer token for the streaming API
    #[arg(value_name = "ACCESS_TOKEN")]
    access_token: String,

    /// Override the instance base URL from config
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Override the number of display slots from config
    #[arg(long, value_name = "N")]
    capacity: Option<usize>,
}

/// Parses arguments, loads config, and runs the stream until it ends.
///
/// # Errors
/// Returns an error on config problems or when the connection fails or
/// breaks; the transport is not reconnected here.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging();

    let mut config = Config::load().context("load config")?;
    if let Some(url) = cli.url {
        config.base_url = url;
    }
    if let Some(capacity) = cli.capacity {
        config.capacity = capacity;
    }
    // Covers both the flag and config.toml; the ring rejects 0 with a panic,
    // so catch it here as a plain config error.
    anyhow::ensure!(
        config.capacity > 0,
        "capacity must be at least 1 (from --capacity or config.toml)"
    );

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { stream_to_strip(&config, cli.access_token).await })
}

/// Logs to stderr so the strip output on stdout stays clean.
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("tootstrip=info,tootstrip_core=info")
        }))
        .with_writer(std::io::stderr)
        .init();
}

/// Connects, then pumps frames into the display until the stream ends.
async fn stream_to_strip(config: &Config, access_token: String) -> Result<()> {
    let client = StreamClient::new(StreamConfig {
        base_url: config.base_url.clone(),
        access_token,
    });
    let frames = client.connect().await.context("open event stream")?;

    let filter = EventFilter::new(&config.event);
    let (tx, rx) = create_post_channel();

    // Single consumer: the only writer of the display for its lifetime.
    let capacity = config.capacity;
    let consumer = tokio::spawn(async move {
        let mut display = RotatingDisplay::new(capacity);
        let mut strip = LineStrip::stdout();
        drive_display(rx, &mut display, &mut strip).await;
    });

    let outcome = pump_frames(frames, &filter, tx).await;

    consumer.await.context("display task panicked")?;

    match outcome {
        Ok(()) => {
            info!("event stream ended");
            Ok(())
        }
        Err(e) => {
            // Terminal for this connection; reconnecting is not our call.
            error!(kind = %e.kind, error = %e, "event stream failed");
            Err(e).context("event stream failed")
        }
    }
}
