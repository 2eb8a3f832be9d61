use super::backend::{SpeechBackend, SpeechEvent};
use anyhow::{ensure, Context, Result};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Scripted speech backend for testing and batch processing
///
/// Replays a fixed event sequence on its own task, mimicking the delivery
/// model of a real recognition service. Start/stop invocations are counted
/// so callers can assert on the session protocol.
pub struct ScriptedBackend {
    events: Vec<SpeechEvent>,
    fail_start: bool,
    start_calls: Arc<AtomicUsize>,
    stop_calls: Arc<AtomicUsize>,
    event_task: Option<JoinHandle<()>>,
}

impl ScriptedBackend {
    pub fn new(events: Vec<SpeechEvent>) -> Self {
        Self {
            events,
            fail_start: false,
            start_calls: Arc::new(AtomicUsize::new(0)),
            stop_calls: Arc::new(AtomicUsize::new(0)),
            event_task: None,
        }
    }

    /// A backend whose start operation always fails
    pub fn failing() -> Self {
        let mut backend = Self::new(Vec::new());
        backend.fail_start = true;
        backend
    }

    /// Shared counter of `start_continuous` invocations
    pub fn start_calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.start_calls)
    }

    /// Shared counter of `stop_continuous` invocations
    pub fn stop_calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.stop_calls)
    }
}

#[async_trait::async_trait]
impl SpeechBackend for ScriptedBackend {
    async fn start_continuous(&mut self, audio_path: &Path) -> Result<mpsc::Receiver<SpeechEvent>> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_start {
            anyhow::bail!("scripted start failure");
        }
        ensure!(
            audio_path.exists(),
            "audio file not found: {}",
            audio_path.display()
        );

        let (tx, rx) = mpsc::channel(16);
        let events = std::mem::take(&mut self.events);

        self.event_task = Some(tokio::spawn(async move {
            for event in events {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
        }));

        Ok(rx)
    }

    async fn stop_continuous(&mut self) -> Result<()> {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(task) = self.event_task.take() {
            task.await.context("Scripted event task panicked")?;
        }

        Ok(())
    }
}
