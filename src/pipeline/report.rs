use crate::session::SessionOutcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage transfer step that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferStage {
    Download,
    Upload,
}

/// Local I/O step that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocalIoStage {
    SinkOpen,
}

/// Terminal classification of a job, returned to the caller so failures
/// are assertable rather than only logged
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobOutcome {
    /// Transcript produced and uploaded, session stopped normally
    Completed,
    /// Session canceled with a backend error; the (possibly empty)
    /// transcript was still uploaded
    CanceledError { code: String, details: String },
    /// Session canceled cleanly; the transcript was still uploaded
    CanceledClean,
    /// Download or upload failed; fatal to the job, no retry
    TransferFailed { stage: TransferStage },
    /// Local file handling failed before recognition could start
    LocalIoFailed { stage: LocalIoStage },
}

impl From<SessionOutcome> for JobOutcome {
    fn from(outcome: SessionOutcome) -> Self {
        match outcome {
            SessionOutcome::Completed => JobOutcome::Completed,
            SessionOutcome::CanceledError { code, details } => {
                JobOutcome::CanceledError { code, details }
            }
            SessionOutcome::CanceledClean => JobOutcome::CanceledClean,
        }
    }
}

/// Summary of one processed job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobReport {
    /// Logical name of the triggering blob
    pub name: String,

    /// When processing started
    pub started_at: DateTime<Utc>,

    /// Total processing duration in seconds
    pub duration_secs: f64,

    /// Terminal classification
    pub outcome: JobOutcome,
}
