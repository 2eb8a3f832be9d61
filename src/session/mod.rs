//! Transcription bridge
//!
//! This module provides the `RecognitionSession` abstraction that turns an
//! asynchronous, event-driven recognition backend into a synchronous,
//! once-through transcription call:
//! - transcript sink ownership and single-writer appends
//! - terminal-event synchronization via a counting completion signal
//! - session state tracking and outcome classification

mod outcome;
mod session;
mod sink;

pub use outcome::{SessionOutcome, SessionState};
pub use session::RecognitionSession;
pub use sink::TranscriptSink;
