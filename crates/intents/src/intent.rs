//! Recognized intents and handler responses

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::handler::{HandlerError, HandlerResult};

/// A recognized user request, as delivered by the speech backend
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    name: String,
    text: String,
    #[serde(default)]
    parameters: HashMap<String, String>,
}

impl Intent {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            parameters: HashMap::new(),
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(name.into(), value.into());
        self
    }

    pub fn with_parameters(mut self, parameters: HashMap<String, String>) -> Self {
        self.parameters.extend(parameters);
        self
    }

    /// Intent identifier the registry dispatches on
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full utterance, e.g. "turn the lights in the living room on"
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parameters(&self) -> &HashMap<String, String> {
        &self.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }

    /// Parameter value or [`HandlerError::MissingParameter`]
    pub fn require(&self, name: &str) -> HandlerResult<&str> {
        self.parameter(name)
            .ok_or_else(|| HandlerError::MissingParameter(name.to_string()))
    }
}

/// What a handler answers to an intent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentResponse {
    text: String,
    continue_conversation: bool,
}

impl IntentResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            continue_conversation: false,
        }
    }

    /// Response after which the backend should listen for a follow-up
    /// utterance without waiting for the wake word
    pub fn continuing(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            continue_conversation: true,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn continue_conversation(&self) -> bool {
        self.continue_conversation
    }
}
