//! Rhasspy grammar compiler
//!
//! Turns [`IntentDefinition`]s into the two artifacts the speech backend
//! trains on:
//!
//! 1. a slot dictionary (`name → values`), uploaded as JSON before the text;
//! 2. the sentence grammar text (`sentences.ini` dialect).
//!
//! Compilation runs in two passes. Pass one extracts every choice parameter
//! with more than [`INLINE_CHOICE_LIMIT`] values into a named slot, resolving
//! name collisions. Pass two renders the text, referencing those slots.
//! Unnamed definitions are skipped by both passes.

mod render;
mod slots;

use serde::Serialize;

pub use slots::SlotDictionary;

use crate::model::IntentDefinition;

/// Choices with more values than this become `$slot` references
pub const INLINE_CHOICE_LIMIT: usize = 5;

pub(crate) fn requires_slot(values: &[String]) -> bool {
    values.len() > INLINE_CHOICE_LIMIT
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    /// The renamed slot `<Intent>_<Param>` is itself taken by different values
    #[error("Slot '{slot}' for intent '{intent}' collides with an existing slot holding different values")]
    SlotCollision { slot: String, intent: String },
}

/// Output of one compilation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledGrammar {
    pub slots: SlotDictionary,
    pub sentences: String,
}

impl CompiledGrammar {
    /// Nothing to upload
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty() && self.sentences.is_empty()
    }
}

/// Pure compiler from definitions to [`CompiledGrammar`]
#[derive(Debug, Clone, Copy, Default)]
pub struct GrammarCompiler;

impl GrammarCompiler {
    pub fn new() -> Self {
        Self
    }

    pub fn compile<'a, I>(&self, definitions: I) -> Result<CompiledGrammar, GrammarError>
    where
        I: IntoIterator<Item = &'a IntentDefinition>,
    {
        let definitions: Vec<&IntentDefinition> = definitions
            .into_iter()
            .filter(|definition| !definition.is_unnamed())
            .collect();

        let slots = SlotDictionary::extract(&definitions)?;
        let sentences = render::render_definitions(&definitions, &slots);

        Ok(CompiledGrammar { slots, sentences })
    }
}
