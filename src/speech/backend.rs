use anyhow::Result;
use std::path::Path;
use tokio::sync::mpsc;

/// One event emitted during a recognition session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    /// An utterance was recognized; `text` is appended to the transcript
    Recognized { text: String },
    /// Speech was detected but could not be recognized (not an error)
    NoMatch,
    /// The session was canceled by the backend
    Canceled { reason: CancellationReason },
    /// Normal end of the event stream; always the final event
    SessionStopped,
}

/// Why a session was canceled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancellationReason {
    /// Backend-side failure, typically authentication or configuration
    Error { code: String, details: String },
    /// The audio input ran out; a clean cancellation
    EndOfStream,
}

/// Speech recognition backend trait
///
/// Contract:
/// - `start_continuous` begins streaming recognition over the audio file
///   and returns a receiver of events, delivered in emission order on a
///   backend-owned task.
/// - After the terminal events (`Canceled` and/or `SessionStopped`) the
///   backend closes the channel.
/// - `stop_continuous` acknowledges shutdown and must be idempotent: safe
///   to call after the session already stopped on its own.
#[async_trait::async_trait]
pub trait SpeechBackend: Send + Sync {
    /// Start continuous recognition over a local audio file
    async fn start_continuous(&mut self, audio_path: &Path) -> Result<mpsc::Receiver<SpeechEvent>>;

    /// Stop recognition and wait for the backend to acknowledge
    async fn stop_continuous(&mut self) -> Result<()>;
}
