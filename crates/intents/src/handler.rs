//! Intent handler contract

use async_trait::async_trait;

use crate::{
    intent::{Intent, IntentResponse},
    model::IntentDefinition,
};

/// Errors a handler can report while processing an intent.
///
/// The registry catches every one of these at the dispatch boundary.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("Don't know how to handle an intent of type {0}")]
    UnsupportedIntent(String),

    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid value '{value}' for parameter {name}")]
    InvalidParameter { name: String, value: String },

    #[error("{0}")]
    Failed(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type HandlerResult<T> = Result<T, HandlerError>;

/// Something that understands one or more intents.
///
/// A handler publishes the [`IntentDefinition`]s it can serve; the registry
/// routes every intent with one of those names to [`IntentHandler::handle_intent`].
#[async_trait]
pub trait IntentHandler: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &str;

    /// Definitions of the intents this handler serves, in publication order
    fn intent_definitions(&self) -> &[IntentDefinition];

    async fn handle_intent(&self, intent: &Intent) -> HandlerResult<IntentResponse>;
}
