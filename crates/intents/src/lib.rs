//! # Intents - voice intent model, grammar compiler and dispatch
//!
//! Handlers declare the utterances they understand as [`IntentDefinition`]s.
//! The [`IntentRegistry`] aggregates those definitions, the [`GrammarCompiler`]
//! turns them into the slot dictionary and sentence grammar a Rhasspy backend
//! trains on, and recognized intents are routed back to the declaring handler.

pub mod grammar;
pub mod handler;
pub mod intent;
pub mod model;
pub mod publish;
pub mod registry;
pub mod speaker;
pub mod triggers;

#[cfg(test)]
mod grammar_tests;
#[cfg(test)]
mod registry_tests;

pub use grammar::{CompiledGrammar, GrammarCompiler, GrammarError, SlotDictionary, INLINE_CHOICE_LIMIT};
pub use handler::{HandlerError, HandlerResult, IntentHandler};
pub use intent::{Intent, IntentResponse};
pub use model::{
    IntentDefinition, Literal, NumberRangeParameter, Sentence, SentenceBuilder, SentencePart,
    SetParameter, Variable, VariableParameter,
};
pub use publish::{
    publish_grammar, Artifact, DefinitionSource, GrammarPublisher, GrammarUpdater, PublishError,
    PublishReport, StepOutcome,
};
pub use registry::{handler_failure_response, unknown_intent_response, IntentRegistry};
pub use speaker::{Speaker, SpeakerError};
pub use triggers::{Trigger, TriggerListener, TriggerReceiver, TriggerSender};
