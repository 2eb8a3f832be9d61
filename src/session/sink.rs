use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Transcript output sink
///
/// Opened by the session before recognition starts and written only by the
/// session's reaction task (single-writer discipline). Closed exactly once
/// on session termination; the Drop guard flushes if the backend never
/// delivered a stopped event.
pub struct TranscriptSink {
    writer: Option<BufWriter<File>>,
    path: PathBuf,
}

impl TranscriptSink {
    /// Create (or truncate) the transcript file at `path`
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let file = File::create(&path)
            .with_context(|| format!("Failed to create transcript file: {}", path.display()))?;

        Ok(Self {
            writer: Some(BufWriter::new(file)),
            path,
        })
    }

    /// Append recognized text, in arrival order, with no separators
    pub fn append(&mut self, text: &str) -> Result<()> {
        match &mut self.writer {
            Some(writer) => writer
                .write_all(text.as_bytes())
                .with_context(|| format!("Failed to write transcript: {}", self.path.display())),
            None => bail!("transcript sink already closed: {}", self.path.display()),
        }
    }

    /// Flush and close the sink; a second close is a no-op
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            writer
                .flush()
                .with_context(|| format!("Failed to flush transcript: {}", self.path.display()))?;
        }

        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.writer.is_none()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TranscriptSink {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            if let Err(e) = writer.flush() {
                warn!("Failed to flush transcript sink on drop: {}", e);
            }
        }
    }
}
