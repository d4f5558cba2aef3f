//! Rhasspy Client - HTTP client for the Rhasspy speech backend
//!
//! Used by the intent hub to:
//! - Upload the compiled slot dictionary and sentence grammar
//! - Trigger training
//! - Speak responses through text-to-speech
//! - Re-open the microphone for a follow-up command

use async_trait::async_trait;
use intents::{Artifact, GrammarPublisher, PublishError, SlotDictionary, Speaker, SpeakerError};
use reqwest::{Client, RequestBuilder};
use tracing::{debug, info, warn};

pub mod types;
pub use types::*;

/// Error types for Rhasspy client operations
#[derive(Debug, thiserror::Error)]
pub enum RhasspyClientError {
    #[error("Rhasspy not reachable at {url}: {reason}")]
    NotReachable { url: String, reason: String },
    #[error("Rhasspy returned {status} for {endpoint}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Client for the Rhasspy HTTP API
#[derive(Clone)]
pub struct RhasspyClient {
    api_url: String,
    client: Client,
}

impl RhasspyClient {
    /// Create a client for an API root such as `http://localhost:12101/api`
    pub fn new(api_url: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path)
    }

    /// Check if Rhasspy is reachable
    pub async fn is_running(&self) -> bool {
        self.version().await.is_ok()
    }

    /// Backend version string
    pub async fn version(&self) -> Result<String, RhasspyClientError> {
        let url = self.endpoint("version");
        self.send(&url, self.client.get(&url)).await
    }

    // ─── Training ─────────────────────────────────────────────────────────

    /// Replace every slot file with the given dictionary
    pub async fn post_slots(&self, slots: &SlotDictionary) -> Result<(), RhasspyClientError> {
        let url = self.endpoint("slots?overwrite_all=true");
        let body = slots.to_json()?;
        let request = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body);
        self.send(&url, request).await.map(|_| ())
    }

    /// Replace the sentence grammar
    pub async fn post_sentences(&self, sentences: &str) -> Result<(), RhasspyClientError> {
        let url = self.endpoint("sentences");
        let request = self.client.post(&url).body(sentences.to_string());
        self.send(&url, request).await.map(|_| ())
    }

    /// Retrain speech and intent recognition
    pub async fn train(&self) -> Result<String, RhasspyClientError> {
        let url = self.endpoint("train?nocache=true");
        self.send(&url, self.client.post(&url)).await
    }

    // ─── Dialogue ─────────────────────────────────────────────────────────

    /// Speak `text` on this Rhasspy instance
    pub async fn text_to_speech(&self, text: &str) -> Result<(), RhasspyClientError> {
        let url = self.endpoint("text-to-speech");
        let request = self.client.post(&url).body(text.to_string());
        self.send(&url, request).await.map(|_| ())
    }

    /// Wake the microphone without a wake word
    pub async fn listen_for_command(&self) -> Result<(), RhasspyClientError> {
        let url = self.endpoint("listen-for-command");
        self.send(&url, self.client.post(&url)).await.map(|_| ())
    }

    async fn send(&self, url: &str, request: RequestBuilder) -> Result<String, RhasspyClientError> {
        debug!("Rhasspy request: {}", url);
        let resp = request
            .send()
            .await
            .map_err(|e| RhasspyClientError::NotReachable {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(RhasspyClientError::Status {
                endpoint: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl GrammarPublisher for RhasspyClient {
    async fn upload_slots(&self, slots: &SlotDictionary) -> Result<(), PublishError> {
        self.post_slots(slots)
            .await
            .map_err(|e| PublishError::Upload {
                artifact: Artifact::Slots,
                reason: e.to_string(),
            })
    }

    async fn upload_sentences(&self, sentences: &str) -> Result<(), PublishError> {
        self.post_sentences(sentences)
            .await
            .map_err(|e| PublishError::Upload {
                artifact: Artifact::Sentences,
                reason: e.to_string(),
            })
    }

    async fn train(&self) -> Result<(), PublishError> {
        let message = RhasspyClient::train(self)
            .await
            .map_err(|e| PublishError::Train(e.to_string()))?;
        info!("Training finished: {}", message.trim());
        Ok(())
    }
}

#[async_trait]
impl Speaker for RhasspyClient {
    async fn speak_text(&self, text: &str) -> Result<(), SpeakerError> {
        self.text_to_speech(text).await.map_err(|e| match e {
            RhasspyClientError::NotReachable { .. } => SpeakerError::Unavailable(e.to_string()),
            _ => SpeakerError::Output(e.to_string()),
        })
    }
}

/// Try to connect to Rhasspy, returning a client if it answers
pub async fn try_connect_to_rhasspy(api_url: &str) -> Option<RhasspyClient> {
    let client = RhasspyClient::new(api_url);

    match client.version().await {
        Ok(version) => {
            info!("Connected to Rhasspy {} at {}", version.trim(), client.api_url());
            Some(client)
        }
        Err(e) => {
            warn!("Rhasspy not available at {}: {}", api_url, e);
            None
        }
    }
}
