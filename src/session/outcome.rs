use serde::{Deserialize, Serialize};

/// Lifecycle of a recognition session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Created, recognition not started yet
    Idle,
    /// Continuous recognition running, reactions live
    Running,
    /// Completion signaled, stop request in flight
    Terminating,
    /// Stop acknowledged, sink closed
    Done,
}

/// Terminal classification of a recognition session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionOutcome {
    /// The session ran to the end of the audio and stopped normally
    Completed,
    /// The backend canceled with an error (auth/config problems land here)
    CanceledError { code: String, details: String },
    /// The backend canceled without an error reason
    CanceledClean,
}
