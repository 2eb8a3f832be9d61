pub mod audio;
pub mod config;
pub mod pipeline;
pub mod session;
pub mod speech;
pub mod storage;

pub use audio::WavInfo;
pub use config::{Config, JobConfig, SpeechAuth, SpeechConfig, StorageConfig};
pub use pipeline::{Job, JobOutcome, JobReport, LocalIoStage, Pipeline, TransferStage};
pub use session::{RecognitionSession, SessionOutcome, SessionState, TranscriptSink};
pub use speech::{
    AzureRestBackend, CancellationReason, ScriptedBackend, SpeechBackend, SpeechEvent,
};
pub use storage::{FsObjectStore, ObjectStore};
