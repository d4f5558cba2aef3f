use indexmap::IndexMap;
use serde::Serialize;

use super::{requires_slot, GrammarError};
use crate::model::{IntentDefinition, Sentence, SentencePart, SetParameter};

/// Slot name → ordered literal values, in insertion order.
///
/// Serializes as the flat JSON object Rhasspy expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SlotDictionary {
    slots: IndexMap<String, Vec<String>>,
}

impl SlotDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pass one: collect a slot for every choice that is too large to inline.
    ///
    /// The slot is named after the parameter. If that name already holds the
    /// same values it is shared; if it holds different values the slot is
    /// registered as `<Intent>_<Param>` instead.
    pub(crate) fn extract(definitions: &[&IntentDefinition]) -> Result<Self, GrammarError> {
        let mut dictionary = Self::new();
        for definition in definitions {
            for parameter in choice_parameters(definition) {
                if requires_slot(parameter.possible_values()) {
                    dictionary.insert_for(definition.name(), parameter)?;
                }
            }
        }
        Ok(dictionary)
    }

    fn insert_for(&mut self, intent: &str, parameter: &SetParameter) -> Result<(), GrammarError> {
        let values = parameter.possible_values();

        let slot_name = match self.slots.get(parameter.name()) {
            None => parameter.name().to_string(),
            Some(existing) if existing.as_slice() == values => return Ok(()),
            Some(_) => {
                let renamed = composite_name(intent, parameter.name());
                match self.slots.get(&renamed) {
                    Some(existing) if existing.as_slice() != values => {
                        return Err(GrammarError::SlotCollision {
                            slot: renamed,
                            intent: intent.to_string(),
                        });
                    }
                    _ => renamed,
                }
            }
        };

        self.slots.insert(slot_name, values.to_vec());
        Ok(())
    }

    /// Slot name pass one chose for `parameter` inside definition `intent`
    pub fn resolve(&self, intent: &str, parameter: &SetParameter) -> Option<String> {
        let values = parameter.possible_values();
        if self.get(parameter.name()) == Some(values) {
            return Some(parameter.name().to_string());
        }

        let renamed = composite_name(intent, parameter.name());
        (self.get(&renamed) == Some(values)).then_some(renamed)
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.slots.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.slots
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn composite_name(intent: &str, parameter: &str) -> String {
    format!("{}_{}", intent, parameter)
}

/// Choice parameters of the definition's sentences, then of its variables
fn choice_parameters(definition: &IntentDefinition) -> impl Iterator<Item = &SetParameter> {
    definition
        .sentences()
        .iter()
        .chain(
            definition
                .variables()
                .iter()
                .flat_map(|variable| variable.sentences().iter()),
        )
        .flat_map(Sentence::iter)
        .filter_map(|part| match part {
            SentencePart::Choice(parameter) => Some(parameter),
            _ => None,
        })
}
