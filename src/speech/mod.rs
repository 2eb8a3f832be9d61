//! Speech recognition collaborator
//!
//! Continuous recognition over a local audio file, delivered as an event
//! stream on a backend-owned task. Implementations:
//! - Azure Speech REST (endpoint+key or subscription+region auth)
//! - Scripted replay (for testing and batch processing)

mod azure;
mod backend;
mod scripted;

pub use azure::AzureRestBackend;
pub use backend::{CancellationReason, SpeechBackend, SpeechEvent};
pub use scripted::ScriptedBackend;
