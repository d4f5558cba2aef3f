//! Publishing compiled grammar to the speech backend
//!
//! Upload order is fixed: slots (if any) → sentences (if any) → train.
//! Failures are logged and reported, never retried, and one failed upload does
//! not cancel the next step.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use serde::Serialize;
use tracing::{error, info};

use crate::{
    grammar::{CompiledGrammar, GrammarCompiler, GrammarError, SlotDictionary},
    model::IntentDefinition,
};

/// Which compiled artifact an upload carried
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Artifact {
    Slots,
    Sentences,
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Artifact::Slots => write!(f, "slots"),
            Artifact::Sentences => write!(f, "sentences"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("Failed to upload {artifact}: {reason}")]
    Upload { artifact: Artifact, reason: String },

    #[error("Training failed: {0}")]
    Train(String),
}

/// Sink for compiled grammar (the speech backend's training API)
#[async_trait]
pub trait GrammarPublisher: Send + Sync {
    async fn upload_slots(&self, slots: &SlotDictionary) -> Result<(), PublishError>;

    async fn upload_sentences(&self, sentences: &str) -> Result<(), PublishError>;

    async fn train(&self) -> Result<(), PublishError>;
}

/// Anything that can hand out the current set of intent definitions
pub trait DefinitionSource: Send + Sync {
    fn definitions(&self) -> Vec<&IntentDefinition>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StepOutcome {
    Skipped,
    Succeeded,
    Failed,
}

/// Outcome of every publish step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishReport {
    pub slots: StepOutcome,
    pub sentences: StepOutcome,
    pub training: StepOutcome,
    pub errors: Vec<String>,
}

impl PublishReport {
    fn skipped() -> Self {
        Self {
            slots: StepOutcome::Skipped,
            sentences: StepOutcome::Skipped,
            training: StepOutcome::Skipped,
            errors: Vec::new(),
        }
    }

    /// No step failed
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    fn record(&mut self, result: Result<(), PublishError>) -> StepOutcome {
        match result {
            Ok(()) => StepOutcome::Succeeded,
            Err(e) => {
                error!("{}", e);
                self.errors.push(e.to_string());
                StepOutcome::Failed
            }
        }
    }
}

/// Upload a compiled grammar and trigger training
pub async fn publish_grammar(
    grammar: &CompiledGrammar,
    publisher: &dyn GrammarPublisher,
) -> PublishReport {
    let mut report = PublishReport::skipped();
    if grammar.is_empty() {
        info!("Grammar is empty, nothing to publish");
        return report;
    }

    if !grammar.slots.is_empty() {
        info!(count = grammar.slots.len(), "Uploading slots");
        let result = publisher.upload_slots(&grammar.slots).await;
        report.slots = report.record(result);
    }

    if !grammar.sentences.is_empty() {
        info!(bytes = grammar.sentences.len(), "Uploading sentences");
        let result = publisher.upload_sentences(&grammar.sentences).await;
        report.sentences = report.record(result);
    }

    info!("Triggering training");
    let result = publisher.train().await;
    report.training = report.record(result);

    report
}

/// Collects definitions, compiles them and publishes the result
pub struct GrammarUpdater {
    source: Arc<dyn DefinitionSource>,
    publisher: Arc<dyn GrammarPublisher>,
    compiler: GrammarCompiler,
}

impl GrammarUpdater {
    pub fn new(source: Arc<dyn DefinitionSource>, publisher: Arc<dyn GrammarPublisher>) -> Self {
        Self {
            source,
            publisher,
            compiler: GrammarCompiler::new(),
        }
    }

    /// Compile the current definitions without publishing
    pub fn compile(&self) -> Result<CompiledGrammar, GrammarError> {
        self.compiler.compile(self.source.definitions())
    }

    /// Compile and publish. A compile error uploads nothing.
    pub async fn update(&self) -> Result<PublishReport, GrammarError> {
        let grammar = self.compile()?;
        info!(
            slots = grammar.slots.len(),
            "Compiled grammar for {} definitions",
            self.source.definitions().len()
        );
        Ok(publish_grammar(&grammar, self.publisher.as_ref()).await)
    }
}
