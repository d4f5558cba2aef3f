//! Speech output abstraction

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum SpeakerError {
    #[error("Speech output failed: {0}")]
    Output(String),

    #[error("Speaker not available: {0}")]
    Unavailable(String),
}

/// Anything that can turn a response text into audible speech
#[async_trait]
pub trait Speaker: Send + Sync {
    async fn speak_text(&self, text: &str) -> Result<(), SpeakerError>;
}
