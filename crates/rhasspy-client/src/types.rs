//! Payload types exchanged with Rhasspy's remote intent handling

use std::{collections::HashMap, time::Duration};

use intents::Intent;
use serde::{Deserialize, Serialize};

/// Intent recognition result as posted by Rhasspy
///
/// Only the fields the hub uses are modelled; everything else is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RhasspyIntentPayload {
    #[serde(default)]
    pub intent: RecognizedIntent,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub slots: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecognizedIntent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub confidence: f64,
}

impl RhasspyIntentPayload {
    pub fn intent_name(&self) -> &str {
        self.intent.name.as_deref().unwrap_or_default()
    }

    /// Whether this payload should be dispatched at all
    pub fn is_recognized(&self) -> bool {
        !self.intent_name().is_empty() && !self.text.is_empty()
    }

    /// Convert into the hub's [`Intent`]. Numeric and boolean slot values are
    /// stringified, null values are dropped.
    pub fn into_intent(self) -> Intent {
        let name = self.intent.name.unwrap_or_default();
        let parameters = self
            .slots
            .into_iter()
            .filter_map(|(slot, value)| match value {
                serde_json::Value::Null => None,
                serde_json::Value::String(s) => Some((slot, s)),
                other => Some((slot, other.to_string())),
            })
            .collect();

        Intent::new(name, self.text).with_parameters(parameters)
    }
}

/// Body returned to Rhasspy after handling an intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentReplyBody {
    pub intent: String,
    pub time_sec: f64,
    pub response: String,
}

impl IntentReplyBody {
    pub fn new(intent: impl Into<String>, elapsed: Duration, response: impl Into<String>) -> Self {
        Self {
            intent: intent.into(),
            time_sec: (elapsed.as_secs_f64() * 100.0).round() / 100.0,
            response: response.into(),
        }
    }
}
