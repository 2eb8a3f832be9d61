use super::outcome::{SessionOutcome, SessionState};
use super::sink::TranscriptSink;
use crate::speech::{CancellationReason, SpeechBackend, SpeechEvent};
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{info, warn};

/// A recognition session that bridges event-driven continuous recognition
/// into one blocking-from-the-caller's-view call
///
/// The backend delivers events on its own task; a reaction task owns the
/// transcript sink and appends recognized segments in arrival order. The
/// caller suspends on a counting completion signal that any terminal
/// reaction (cancellation or session-stopped) may release; both may fire,
/// so the signal tolerates more than one release.
pub struct RecognitionSession {
    backend: Box<dyn SpeechBackend>,
    state: SessionState,
}

impl RecognitionSession {
    pub fn new(backend: Box<dyn SpeechBackend>) -> Self {
        Self {
            backend,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Transcribe `audio_path` into `text_path`, returning only after the
    /// session has fully terminated
    ///
    /// Fail-fast: if the sink cannot be opened, no session is started and
    /// the error propagates. Start/stop failures are caught and logged; the
    /// session always returns control with a (possibly empty) transcript.
    pub async fn transcribe(
        &mut self,
        audio_path: &Path,
        text_path: &Path,
    ) -> Result<SessionOutcome> {
        // Sink first: no partial session without an output destination
        let mut sink = TranscriptSink::create(text_path)?;

        let mut events = match self.backend.start_continuous(audio_path).await {
            Ok(rx) => rx,
            Err(e) => {
                warn!("Failed to start recognition: {:#}", e);
                if let Err(e) = sink.close() {
                    warn!("Failed to close transcript sink: {:#}", e);
                }
                self.state = SessionState::Done;
                return Ok(SessionOutcome::CanceledError {
                    code: "StartFailed".to_string(),
                    details: format!("{:#}", e),
                });
            }
        };

        self.state = SessionState::Running;

        // Zero permits until a terminal reaction releases one
        let completion = Arc::new(Semaphore::new(0));
        let signal = Arc::clone(&completion);

        let reactions = tokio::spawn(async move {
            let mut outcome: Option<SessionOutcome> = None;

            while let Some(event) = events.recv().await {
                match event {
                    SpeechEvent::Recognized { text } => {
                        info!("Recognized: {}", text);
                        if let Err(e) = sink.append(&text) {
                            warn!("Failed to append transcript segment: {:#}", e);
                        }
                    }
                    SpeechEvent::NoMatch => {
                        warn!("NoMatch: speech could not be recognized");
                    }
                    SpeechEvent::Canceled { reason } => {
                        match &reason {
                            CancellationReason::Error { code, details } => {
                                warn!("Canceled: ErrorCode={}", code);
                                warn!("Canceled: ErrorDetails={}", details);
                                warn!("Canceled: check the speech service key and endpoint");
                            }
                            CancellationReason::EndOfStream => {
                                info!("Canceled: end of audio stream");
                            }
                        }

                        if outcome.is_none() {
                            outcome = Some(match reason {
                                CancellationReason::Error { code, details } => {
                                    SessionOutcome::CanceledError { code, details }
                                }
                                CancellationReason::EndOfStream => SessionOutcome::CanceledClean,
                            });
                        }

                        // Sink closure belongs to the stopped reaction only
                        signal.add_permits(1);
                    }
                    SpeechEvent::SessionStopped => {
                        info!("Session stopped event");
                        if let Err(e) = sink.close() {
                            warn!("Failed to close transcript sink: {:#}", e);
                        }
                        signal.add_permits(1);
                    }
                }
            }

            // Channel closed: release once more in case the backend never
            // emitted a terminal event; the signal is saturating, extra
            // permits are harmless
            signal.add_permits(1);

            if !sink.is_closed() {
                warn!(
                    "Backend closed the event stream without a stopped event; closing sink: {}",
                    sink.path().display()
                );
                if let Err(e) = sink.close() {
                    warn!("Failed to close transcript sink: {:#}", e);
                }
            }

            outcome.unwrap_or(SessionOutcome::Completed)
        });

        // Wait for completion. No timeout: if the backend never terminates,
        // the job hangs (accepted external-dependency risk).
        completion
            .acquire()
            .await
            .context("Completion signal closed unexpectedly")?
            .forget();

        self.state = SessionState::Terminating;

        // Idempotent: safe even when the session stopped on its own
        if let Err(e) = self.backend.stop_continuous().await {
            warn!("Failed to stop recognition: {:#}", e);
        }

        let outcome = match reactions.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Reaction task panicked: {}", e);
                SessionOutcome::CanceledError {
                    code: "ReactionFailure".to_string(),
                    details: e.to_string(),
                }
            }
        };

        self.state = SessionState::Done;

        Ok(outcome)
    }
}
