use anyhow::{bail, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub speech: SpeechConfig,
    #[serde(default)]
    pub job: JobConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Root of the object store (a directory path for the filesystem store)
    pub connection: String,

    /// Container holding incoming `<name>.wav` blobs
    #[serde(default = "default_audio_container")]
    pub audio_container: String,

    /// Container receiving `<name>.txt` blobs
    #[serde(default = "default_text_container")]
    pub text_container: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeechConfig {
    /// Recognition locale, e.g. "ja-JP"
    #[serde(default = "default_language")]
    pub language: String,

    /// Speech service API key (used by both auth modes)
    pub key: String,

    /// Full recognition endpoint URI (endpoint+key auth mode)
    pub endpoint: Option<String>,

    /// Service region, e.g. "japaneast" (subscription+region auth mode)
    pub region: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    /// Directory for local working files (`<name>.wav`, `<name>.txt`)
    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            temp_dir: default_temp_dir(),
        }
    }
}

fn default_audio_container() -> String {
    "audio".to_string()
}

fn default_text_container() -> String {
    "text".to_string()
}

fn default_language() -> String {
    "ja-JP".to_string()
}

fn default_temp_dir() -> PathBuf {
    std::env::temp_dir()
}

/// Resolved speech service authentication, one of the two supported shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechAuth {
    /// Explicit recognition endpoint plus API key
    Endpoint { endpoint: String, key: String },
    /// Subscription key plus service region
    Subscription { key: String, region: String },
}

impl Config {
    /// Load configuration from an optional file plus `A2T__*` environment
    /// variables, then validate. Fails fast on an incomplete auth mode.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("A2T")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let cfg: Config = settings.try_deserialize()?;
        cfg.validate()?;

        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.storage.connection.is_empty() {
            bail!("storage.connection must not be empty");
        }
        if self.speech.language.is_empty() {
            bail!("speech.language must not be empty");
        }
        self.speech.auth()?;
        Ok(())
    }
}

impl SpeechConfig {
    /// Resolve the auth mode: exactly one of `endpoint` / `region` must be set.
    pub fn auth(&self) -> Result<SpeechAuth> {
        if self.key.is_empty() {
            bail!("speech.key must not be empty");
        }

        match (&self.endpoint, &self.region) {
            (Some(endpoint), None) => Ok(SpeechAuth::Endpoint {
                endpoint: endpoint.clone(),
                key: self.key.clone(),
            }),
            (None, Some(region)) => Ok(SpeechAuth::Subscription {
                key: self.key.clone(),
                region: region.clone(),
            }),
            (Some(_), Some(_)) => {
                bail!("speech.endpoint and speech.region are mutually exclusive; set exactly one")
            }
            (None, None) => {
                bail!("speech auth not configured; set speech.endpoint or speech.region")
            }
        }
    }
}
