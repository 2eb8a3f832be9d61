use super::job::Job;
use super::report::{JobOutcome, JobReport, LocalIoStage, TransferStage};
use crate::audio::WavInfo;
use crate::config::Config;
use crate::session::RecognitionSession;
use crate::speech::{AzureRestBackend, SpeechBackend};
use crate::storage::ObjectStore;
use anyhow::{Context, Result};
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Orchestrates one job: fetch -> transcribe -> store -> cleanup
///
/// Failures never escape as panics or unhandled errors: every path reaches
/// the cleanup step and yields a `JobReport` the caller can assert on.
pub struct Pipeline {
    config: Config,
    store: Arc<dyn ObjectStore>,
}

impl Pipeline {
    pub fn new(config: Config, store: Arc<dyn ObjectStore>) -> Result<Self> {
        std::fs::create_dir_all(&config.job.temp_dir).with_context(|| {
            format!(
                "Failed to create temp directory: {}",
                config.job.temp_dir.display()
            )
        })?;

        Ok(Self { config, store })
    }

    /// Process one job end to end with the configured speech backend
    ///
    /// Errors only when the backend cannot be constructed from the
    /// configuration; everything downstream is reported in the outcome.
    pub async fn process(&self, name: &str) -> Result<JobReport> {
        let backend =
            AzureRestBackend::new(&self.config.speech).context("Failed to create speech backend")?;

        Ok(self.process_with_backend(name, Box::new(backend)).await)
    }

    /// Process one job end to end with an injected speech backend
    pub async fn process_with_backend(
        &self,
        name: &str,
        backend: Box<dyn SpeechBackend>,
    ) -> JobReport {
        let started_at = Utc::now();
        let job = Job::new(name, &self.config.job.temp_dir);

        info!("Processing job: {}", job.name);

        let outcome = self.run(&job, backend).await;

        // Cleanup always runs, regardless of outcome
        self.remove_working_file(&job.local_audio).await;
        self.remove_working_file(&job.local_text).await;

        let duration = Utc::now().signed_duration_since(started_at);
        let report = JobReport {
            name: job.name,
            started_at,
            duration_secs: duration.num_milliseconds() as f64 / 1000.0,
            outcome,
        };

        info!(
            "Job {} finished in {:.1}s: {:?}",
            report.name, report.duration_secs, report.outcome
        );

        report
    }

    async fn run(&self, job: &Job, backend: Box<dyn SpeechBackend>) -> JobOutcome {
        // Step 1: fetch the audio blob into a local working file
        match self
            .store
            .download(
                &self.config.storage.audio_container,
                &job.audio_blob,
                &job.local_audio,
            )
            .await
        {
            Ok(bytes) => info!("Name: {} Size: {} bytes", job.name, bytes),
            Err(e) => {
                error!("Download failed for {}: {:#}", job.audio_blob, e);
                return JobOutcome::TransferFailed {
                    stage: TransferStage::Download,
                };
            }
        }

        // Informational only; the backend decides whether it can decode
        if let Err(e) = WavInfo::probe(&job.local_audio) {
            warn!("Could not probe audio file: {:#}", e);
        }

        // Step 2: transcribe, blocking until the session fully terminates
        let mut session = RecognitionSession::new(backend);
        let session_outcome = match session.transcribe(&job.local_audio, &job.local_text).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Could not open transcript sink: {:#}", e);
                return JobOutcome::LocalIoFailed {
                    stage: LocalIoStage::SinkOpen,
                };
            }
        };

        // Step 3: upload the transcript, even when the session was canceled
        // (a degraded or empty transcript is still a valid output)
        if let Err(e) = self
            .store
            .upload(
                &self.config.storage.text_container,
                &job.text_blob,
                &job.local_text,
            )
            .await
        {
            error!("Upload failed for {}: {:#}", job.text_blob, e);
            return JobOutcome::TransferFailed {
                stage: TransferStage::Upload,
            };
        }

        session_outcome.into()
    }

    async fn remove_working_file(&self, path: &Path) {
        if !path.exists() {
            return;
        }

        if let Err(e) = tokio::fs::remove_file(path).await {
            warn!("Failed to delete working file {}: {}", path.display(), e);
        }
    }
}
