use super::backend::{CancellationReason, SpeechBackend, SpeechEvent};
use crate::config::{SpeechAuth, SpeechConfig};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

/// Azure Speech-to-Text backend over the REST recognition endpoint
///
/// Transport and service failures surface as `Canceled` events with the
/// error code and details, never as a crash of the event task; the stream
/// always finishes with `SessionStopped`.
pub struct AzureRestBackend {
    client: reqwest::Client,
    language: String,
    auth: SpeechAuth,
    event_task: Option<JoinHandle<()>>,
}

#[derive(Debug, Deserialize)]
struct RecognitionResponse {
    #[serde(rename = "RecognitionStatus")]
    status: String,
    #[serde(rename = "DisplayText", default)]
    display_text: String,
}

impl AzureRestBackend {
    pub fn new(config: &SpeechConfig) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            language: config.language.clone(),
            auth: config.auth()?,
            event_task: None,
        })
    }

    fn recognize_url(&self) -> String {
        match &self.auth {
            SpeechAuth::Endpoint { endpoint, .. } => {
                format!("{}?language={}", endpoint.trim_end_matches('/'), self.language)
            }
            SpeechAuth::Subscription { region, .. } => format!(
                "https://{}.stt.speech.microsoft.com/speech/recognition/conversation/cognitiveservices/v1?language={}",
                region, self.language
            ),
        }
    }

    fn api_key(&self) -> &str {
        match &self.auth {
            SpeechAuth::Endpoint { key, .. } => key,
            SpeechAuth::Subscription { key, .. } => key,
        }
    }

    async fn recognize(
        client: reqwest::Client,
        url: String,
        key: String,
        audio: Vec<u8>,
    ) -> Result<Vec<SpeechEvent>> {
        let response = client
            .post(&url)
            .header("Ocp-Apim-Subscription-Key", key)
            .header("Content-Type", "audio/wav")
            .header("Accept", "application/json")
            .body(audio)
            .send()
            .await
            .context("Recognition request failed")?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            anyhow::bail!("HTTP {}: {}", status.as_u16(), details);
        }

        let result: RecognitionResponse = response
            .json()
            .await
            .context("Failed to parse recognition response")?;

        info!("Recognition status: {}", result.status);

        let event = match result.status.as_str() {
            "Success" => SpeechEvent::Recognized {
                text: result.display_text,
            },
            "NoMatch" | "InitialSilenceTimeout" => SpeechEvent::NoMatch,
            other => SpeechEvent::Canceled {
                reason: CancellationReason::Error {
                    code: other.to_string(),
                    details: "Recognition did not complete successfully".to_string(),
                },
            },
        };

        Ok(vec![event])
    }
}

#[async_trait::async_trait]
impl SpeechBackend for AzureRestBackend {
    async fn start_continuous(&mut self, audio_path: &Path) -> Result<mpsc::Receiver<SpeechEvent>> {
        let audio = tokio::fs::read(audio_path)
            .await
            .with_context(|| format!("Failed to read audio file: {}", audio_path.display()))?;

        info!(
            "Starting recognition session: {} ({} bytes, language {})",
            audio_path.display(),
            audio.len(),
            self.language
        );

        let (tx, rx) = mpsc::channel(16);
        let client = self.client.clone();
        let url = self.recognize_url();
        let key = self.api_key().to_string();

        self.event_task = Some(tokio::spawn(async move {
            match Self::recognize(client, url, key, audio).await {
                Ok(events) => {
                    for event in events {
                        if tx.send(event).await.is_err() {
                            break;
                        }
                    }
                }
                Err(e) => {
                    let _ = tx
                        .send(SpeechEvent::Canceled {
                            reason: CancellationReason::Error {
                                code: "ConnectionFailure".to_string(),
                                details: format!("{:#}", e),
                            },
                        })
                        .await;
                }
            }

            let _ = tx.send(SpeechEvent::SessionStopped).await;
        }));

        Ok(rx)
    }

    async fn stop_continuous(&mut self) -> Result<()> {
        if let Some(task) = self.event_task.take() {
            task.await.context("Recognition event task panicked")?;
        }

        Ok(())
    }
}
