//! Intent registry - routes recognized intents to the handler that declared them
//!
//! The registry is filled once during bootstrap and then shared read-only:
//!
//! ```text
//! register(handler) ──► name → handler
//!                          │
//! dispatch(intent) ────────┴──► handler.handle_intent ──► IntentResponse ──► Speaker
//! ```
//!
//! A handler failure (error or panic) never leaves `dispatch`; it is logged and
//! turned into an apology the user can hear.

use std::{any::Any, collections::HashMap, panic::AssertUnwindSafe, sync::Arc};

use futures::FutureExt;
use tracing::{error, info, warn};

use crate::{
    handler::IntentHandler,
    intent::{Intent, IntentResponse},
    model::IntentDefinition,
    publish::DefinitionSource,
    speaker::Speaker,
};

/// Response for an intent nobody registered
pub fn unknown_intent_response(utterance: &str) -> String {
    format!("I do not know how to {}", utterance)
}

/// Response for an intent whose handler failed
pub fn handler_failure_response(utterance: &str) -> String {
    format!(
        "Something went wrong while handling your request: {}",
        utterance
    )
}

/// Maps intent names to handlers and aggregates their definitions
#[derive(Default)]
pub struct IntentRegistry {
    handlers: Vec<Arc<dyn IntentHandler>>,
    routes: HashMap<String, Arc<dyn IntentHandler>>,
    speaker: Option<Arc<dyn Speaker>>,
}

impl IntentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that forwards every non-empty response to `speaker`
    pub fn with_speaker(speaker: Arc<dyn Speaker>) -> Self {
        Self {
            speaker: Some(speaker),
            ..Self::default()
        }
    }

    /// Register every definition the handler exposes.
    ///
    /// A name that is already taken is overwritten: the last registration
    /// wins. Unnamed definitions are aggregated but never routed.
    pub fn register(&mut self, handler: Arc<dyn IntentHandler>) {
        for definition in handler.intent_definitions() {
            if definition.is_unnamed() {
                continue;
            }

            if let Some(previous) = self
                .routes
                .insert(definition.name().to_string(), handler.clone())
            {
                warn!(
                    intent = definition.name(),
                    previous = previous.name(),
                    handler = handler.name(),
                    "Intent already registered, last registration wins"
                );
            } else {
                info!(
                    intent = definition.name(),
                    handler = handler.name(),
                    "Added subscription for intent"
                );
            }
        }

        self.handlers.push(handler);
    }

    /// All definitions of all registered handlers, in registration order.
    /// Duplicates are preserved.
    pub fn collect_definitions(&self) -> Vec<&IntentDefinition> {
        self.handlers
            .iter()
            .flat_map(|handler| handler.intent_definitions().iter())
            .collect()
    }

    pub fn contains(&self, intent_name: &str) -> bool {
        self.routes.contains_key(intent_name)
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Routable intent names, sorted
    pub fn intent_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.routes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Route an intent to its handler. Never fails.
    pub async fn dispatch(&self, intent: &Intent) -> IntentResponse {
        let response = match self.routes.get(intent.name()) {
            Some(handler) => self.invoke(handler.as_ref(), intent).await,
            None => {
                info!(intent = intent.name(), "No intent handler registered");
                IntentResponse::new(unknown_intent_response(intent.text()))
            }
        };

        if let Some(speaker) = &self.speaker {
            if !response.text().is_empty() {
                if let Err(e) = speaker.speak_text(response.text()).await {
                    error!(intent = intent.name(), "Failed to speak response: {}", e);
                }
            }
        }

        response
    }

    async fn invoke(&self, handler: &dyn IntentHandler, intent: &Intent) -> IntentResponse {
        info!(
            intent = intent.name(),
            handler = handler.name(),
            "Dispatching intent"
        );

        match AssertUnwindSafe(handler.handle_intent(intent))
            .catch_unwind()
            .await
        {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                error!(
                    intent = intent.name(),
                    handler = handler.name(),
                    "Error occurred in intent handler: {}",
                    e
                );
                IntentResponse::new(handler_failure_response(intent.text()))
            }
            Err(panic) => {
                error!(
                    intent = intent.name(),
                    handler = handler.name(),
                    "Intent handler panicked: {}",
                    panic_message(panic.as_ref())
                );
                IntentResponse::new(handler_failure_response(intent.text()))
            }
        }
    }
}

impl DefinitionSource for IntentRegistry {
    fn definitions(&self) -> Vec<&IntentDefinition> {
        self.collect_definitions()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown panic"
    }
}
