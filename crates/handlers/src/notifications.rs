//! Trigger manager
//!
//! Speaks asynchronous triggers as they arrive. While the user asked to hold
//! notifications they are queued instead; reminders always go through.

use std::{collections::VecDeque, sync::Arc};

use async_trait::async_trait;
use intents::{
    HandlerError, HandlerResult, Intent, IntentDefinition, IntentHandler, IntentResponse, Speaker,
    Trigger, TriggerListener,
};
use tokio::sync::Mutex;
use tracing::{error, info};

pub const HOLD_NOTIFICATIONS: &str = "HoldNotifications";
pub const RESUME_NOTIFICATIONS: &str = "ResumeNotifications";
pub const GET_NUMBER_OF_NOTIFICATIONS: &str = "GetNumberOfNotifications";
pub const GET_FIRST_NOTIFICATION: &str = "GetFirstNotification";

#[derive(Debug, Default)]
struct NotificationState {
    holding: bool,
    queue: VecDeque<String>,
}

pub struct NotificationCenter {
    definitions: Vec<IntentDefinition>,
    speaker: Arc<dyn Speaker>,
    state: Mutex<NotificationState>,
}

impl NotificationCenter {
    pub fn new(speaker: Arc<dyn Speaker>) -> Self {
        Self {
            definitions: vec![
                IntentDefinition::simple(HOLD_NOTIFICATIONS, "Block notifications"),
                IntentDefinition::simple(RESUME_NOTIFICATIONS, "Resume notifications"),
                IntentDefinition::simple(
                    GET_NUMBER_OF_NOTIFICATIONS,
                    "How many notifications are in the queue",
                ),
                IntentDefinition::simple(GET_FIRST_NOTIFICATION, "Tell me the first notification"),
            ],
            speaker,
            state: Mutex::new(NotificationState::default()),
        }
    }

    pub async fn is_holding(&self) -> bool {
        self.state.lock().await.holding
    }

    pub async fn queued(&self) -> usize {
        self.state.lock().await.queue.len()
    }
}

#[async_trait]
impl TriggerListener for NotificationCenter {
    async fn trigger(&self, trigger: Trigger) {
        {
            let mut state = self.state.lock().await;
            if let Trigger::Notification(message) = &trigger {
                if state.holding {
                    info!("Holding notification");
                    state.queue.push_back(message.clone());
                    return;
                }
            }
        }

        if let Err(e) = self.speaker.speak_text(trigger.message()).await {
            error!("Failed to speak trigger: {}", e);
        }
    }
}

#[async_trait]
impl IntentHandler for NotificationCenter {
    fn name(&self) -> &str {
        "notifications"
    }

    fn intent_definitions(&self) -> &[IntentDefinition] {
        &self.definitions
    }

    async fn handle_intent(&self, intent: &Intent) -> HandlerResult<IntentResponse> {
        let mut state = self.state.lock().await;
        let text = match intent.name() {
            HOLD_NOTIFICATIONS => {
                state.holding = true;
                "Holding all notifications".to_string()
            }
            RESUME_NOTIFICATIONS => {
                state.holding = false;
                "Resuming all notifications".to_string()
            }
            GET_NUMBER_OF_NOTIFICATIONS => {
                format!("There are {} notifications in the queue", state.queue.len())
            }
            GET_FIRST_NOTIFICATION => state
                .queue
                .pop_front()
                .ok_or_else(|| HandlerError::Failed("The notification queue is empty".to_string()))?,
            other => return Err(HandlerError::UnsupportedIntent(other.to_string())),
        };
        Ok(IntentResponse::new(text))
    }
}
