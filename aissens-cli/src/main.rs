//! Replay captured AISSENS payloads through the decode pipeline without a
//! broker: read a packet from a file or hex string, dispatch it, write the
//! record to a registry-selected sink.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, bail};
use bytes::Bytes;
use clap::Parser;
use tracing::info;

use aissens_lib::dispatch::{Dispatch, Dispatcher};
use aissens_lib::sink;

mod config;
use config::FileConfig;

#[derive(Parser, Debug)]
#[command(
    name = "aissens-cli",
    about = "Decode a captured AISSENS packet and write it to a sink"
)]
struct Args {
    /// Path to a captured binary payload
    #[arg(long, conflicts_with = "hex")]
    file: Option<PathBuf>,

    /// Payload as a hex string
    #[arg(long)]
    hex: Option<String>,

    /// Topic the payload would have arrived on (first segment names the
    /// sensor)
    #[arg(long, default_value = "sensor/report")]
    topic: String,

    /// Output sink key (stdout, null)
    #[arg(long)]
    sink: Option<String>,

    /// Record name handed to the sink
    #[arg(long)]
    record_name: Option<String>,

    /// Optional YAML config providing record_name and sink
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let file_config = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let sink_key = args
        .sink
        .or(file_config.sink)
        .unwrap_or_else(|| "stdout".to_string());
    let record_name = args
        .record_name
        .or(file_config.record_name)
        .unwrap_or_else(|| "data".to_string());

    // Unknown sink keys abort here, before any message handling.
    let sink = sink::create(&sink_key)?;

    let payload = match (&args.file, &args.hex) {
        (Some(path), None) => Bytes::from(
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?,
        ),
        (None, Some(hex_str)) => {
            Bytes::from(hex::decode(hex_str.trim()).context("payload is not valid hex")?)
        }
        _ => bail!("exactly one of --file or --hex is required"),
    };

    info!(
        topic = %args.topic,
        bytes = payload.len(),
        sink = %sink_key,
        record = %record_name,
        "dispatching payload"
    );

    let mut dispatcher = Dispatcher::new(record_name, sink);
    match dispatcher.dispatch(&args.topic, payload) {
        Dispatch::Decoded(data_type) => {
            info!(code = u8::from(data_type), "payload decoded and written");
        }
        Dispatch::Unsupported(data_type) => {
            info!(code = u8::from(data_type), "unsupported data type, nothing written");
        }
        Dispatch::Failed(err) => bail!("decode failed: {err}"),
    }
    Ok(())
}
