use std::sync::Arc;

use async_trait::async_trait;
use intents::{
    HandlerError, HandlerResult, Intent, IntentDefinition, IntentHandler, IntentResponse, Sentence,
    SetParameter, Speaker, SpeakerError,
};
use tokio::sync::RwLock;
use tracing::info;

pub const SELECT_SPEAKER: &str = "SelectSpeaker";

const SPEAKER: &str = "Speaker";

/// Owns the named speech outputs and which one is currently in use.
///
/// Acts as the hub's [`Speaker`] by forwarding to the current output, and as
/// the handler for "Talk to me on the ..." to switch outputs.
pub struct SpeakerSelector {
    outputs: Vec<(String, Arc<dyn Speaker>)>,
    current: RwLock<usize>,
    definitions: Vec<IntentDefinition>,
}

impl SpeakerSelector {
    /// Selector whose initial output is `name`
    pub fn new(name: impl Into<String>, speaker: Arc<dyn Speaker>) -> Self {
        let mut selector = Self {
            outputs: vec![(name.into(), speaker)],
            current: RwLock::new(0),
            definitions: Vec::new(),
        };
        selector.rebuild_definitions();
        selector
    }

    /// Add another selectable output. A repeated name replaces the output.
    pub fn with_output(mut self, name: impl Into<String>, speaker: Arc<dyn Speaker>) -> Self {
        let name = name.into();
        match self.outputs.iter_mut().find(|(existing, _)| *existing == name) {
            Some(output) => output.1 = speaker,
            None => self.outputs.push((name, speaker)),
        }
        self.rebuild_definitions();
        self
    }

    fn rebuild_definitions(&mut self) {
        let names: Vec<&str> = self.outputs.iter().map(|(name, _)| name.as_str()).collect();
        let sentence = Sentence::builder()
            .text("Talk to me on")
            .optional_text("the")
            .part(SetParameter::new(SPEAKER, true, names))
            .build();
        self.definitions = vec![IntentDefinition::new(SELECT_SPEAKER).with_sentence(sentence)];
    }

    pub fn output_names(&self) -> Vec<&str> {
        self.outputs.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub async fn current_name(&self) -> &str {
        let index = *self.current.read().await;
        &self.outputs[index].0
    }

    /// Switch to the output called `name` (case-insensitive)
    pub async fn select(&self, name: &str) -> bool {
        match self
            .outputs
            .iter()
            .position(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        {
            Some(index) => {
                *self.current.write().await = index;
                info!(speaker = %self.outputs[index].0, "Selected speaker");
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl Speaker for SpeakerSelector {
    async fn speak_text(&self, text: &str) -> Result<(), SpeakerError> {
        let index = *self.current.read().await;
        self.outputs[index].1.speak_text(text).await
    }
}

#[async_trait]
impl IntentHandler for SpeakerSelector {
    fn name(&self) -> &str {
        "speaker-select"
    }

    fn intent_definitions(&self) -> &[IntentDefinition] {
        &self.definitions
    }

    async fn handle_intent(&self, intent: &Intent) -> HandlerResult<IntentResponse> {
        let name = intent.require(SPEAKER)?;
        if !self.select(name).await {
            return Err(HandlerError::InvalidParameter {
                name: SPEAKER.to_string(),
                value: name.to_string(),
            });
        }
        Ok(IntentResponse::new("I'm here"))
    }
}
