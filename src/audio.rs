use anyhow::{Context, Result};
use hound::WavReader;
use std::path::Path;
use tracing::info;

/// Metadata of a downloaded WAV blob, read without loading the samples
#[derive(Debug, Clone)]
pub struct WavInfo {
    pub duration_seconds: f64,
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
}

impl WavInfo {
    pub fn probe(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let reader = WavReader::open(path)
            .with_context(|| format!("Failed to open WAV file: {}", path.display()))?;

        let spec = reader.spec();
        // duration() counts inter-channel frames, not individual samples
        let duration_seconds = reader.duration() as f64 / spec.sample_rate as f64;

        info!(
            "Audio file probed: {} ({:.1}s, {}Hz, {} channels)",
            path.display(),
            duration_seconds,
            spec.sample_rate,
            spec.channels
        );

        Ok(Self {
            duration_seconds,
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            bits_per_sample: spec.bits_per_sample,
        })
    }
}
