use anyhow::Result;
use audio2text::{Config, FsObjectStore, Pipeline};
use clap::Parser;
use std::sync::Arc;
use tracing::info;

/// Transcribe one uploaded audio blob into a text blob
///
/// One invocation processes exactly one `<name>.wav` from the audio
/// container and uploads `<name>.txt` to the text container. The trigger
/// mechanism that notices new blobs lives outside this binary.
#[derive(Debug, Parser)]
#[command(name = "audio2text")]
struct Args {
    /// Blob name without the `.wav` suffix
    name: String,

    /// Config file path (settings also come from A2T__* env vars)
    #[arg(short, long, default_value = "config/audio2text")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("audio2text v0.1.0");
    info!("Store root: {}", cfg.storage.connection);
    info!("Recognition language: {}", cfg.speech.language);

    let store = Arc::new(FsObjectStore::new(&cfg.storage.connection)?);
    let pipeline = Pipeline::new(cfg, store)?;

    let report = pipeline.process(&args.name).await?;

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
