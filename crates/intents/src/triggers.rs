//! Asynchronous voice events
//!
//! Events that originate outside a request/response cycle (a timer firing, a
//! notification arriving) travel over a single-subscriber channel:
//!
//! - exactly one [`TriggerReceiver`] exists per channel, so there is at most
//!   one subscriber;
//! - [`TriggerSender::emit`] never blocks the emitting side;
//! - triggers are delivered in emission order.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::debug;

/// An event that should be spoken without the user asking for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "camelCase")]
pub enum Trigger {
    /// Always delivered immediately (e.g. an expired timer)
    Reminder(String),
    /// May be held back while the user asked for quiet
    Notification(String),
}

impl Trigger {
    pub fn message(&self) -> &str {
        match self {
            Trigger::Reminder(message) | Trigger::Notification(message) => message,
        }
    }
}

/// Receives triggers from a [`TriggerReceiver`]
#[async_trait]
pub trait TriggerListener: Send + Sync {
    async fn trigger(&self, trigger: Trigger);
}

/// Create a trigger channel
pub fn channel() -> (TriggerSender, TriggerReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (TriggerSender { tx }, TriggerReceiver { rx })
}

/// Emitting half; cheap to clone and hand to every event source
#[derive(Debug, Clone)]
pub struct TriggerSender {
    tx: mpsc::UnboundedSender<Trigger>,
}

impl TriggerSender {
    /// Queue a trigger for the subscriber. Returns `false` if the subscriber
    /// is gone and the trigger was discarded.
    pub fn emit(&self, trigger: Trigger) -> bool {
        match self.tx.send(trigger) {
            Ok(()) => true,
            Err(mpsc::error::SendError(trigger)) => {
                debug!("No trigger subscriber, discarding: {}", trigger.message());
                false
            }
        }
    }
}

/// Subscribing half; there is exactly one per channel
#[derive(Debug)]
pub struct TriggerReceiver {
    rx: mpsc::UnboundedReceiver<Trigger>,
}

impl TriggerReceiver {
    pub async fn recv(&mut self) -> Option<Trigger> {
        self.rx.recv().await
    }

    pub fn try_recv(&mut self) -> Option<Trigger> {
        self.rx.try_recv().ok()
    }

    /// Deliver every trigger to `listener` until all senders are dropped
    pub async fn run(mut self, listener: Arc<dyn TriggerListener>) {
        while let Some(trigger) = self.rx.recv().await {
            listener.trigger(trigger).await;
        }
        debug!("Trigger channel closed");
    }
}
