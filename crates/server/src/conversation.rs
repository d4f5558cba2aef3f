//! Conversation mode: after a handler asks to continue, re-open the microphone
//! so the user can answer without the wake word.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use rhasspy_client::RhasspyClient;
use tokio::task::JoinHandle;
use tracing::{debug, error};

#[async_trait]
pub trait CommandListener: Send + Sync {
    async fn listen_for_command(&self) -> anyhow::Result<()>;
}

#[async_trait]
impl CommandListener for RhasspyClient {
    async fn listen_for_command(&self) -> anyhow::Result<()> {
        RhasspyClient::listen_for_command(self).await?;
        Ok(())
    }
}

/// Ask `listener` to listen again once `delay` has passed
pub fn schedule_follow_up(listener: Arc<dyn CommandListener>, delay: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        debug!("Listening for follow-up command");
        if let Err(e) = listener.listen_for_command().await {
            error!("Failed to start listening for a follow-up command: {}", e);
        }
    })
}
