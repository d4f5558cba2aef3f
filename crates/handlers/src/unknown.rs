use async_trait::async_trait;
use intents::{HandlerResult, Intent, IntentDefinition, IntentHandler, IntentResponse};

/// Fallback handler. Publishes only the unnamed definition, so it contributes
/// nothing to the grammar and is never routed to by name.
pub struct UnknownIntentHandler {
    definitions: Vec<IntentDefinition>,
}

impl UnknownIntentHandler {
    pub fn new() -> Self {
        Self {
            definitions: vec![IntentDefinition::new("")],
        }
    }
}

impl Default for UnknownIntentHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IntentHandler for UnknownIntentHandler {
    fn name(&self) -> &str {
        "unknown"
    }

    fn intent_definitions(&self) -> &[IntentDefinition] {
        &self.definitions
    }

    async fn handle_intent(&self, _intent: &Intent) -> HandlerResult<IntentResponse> {
        Ok(IntentResponse::new(
            "I'm sorry, but I could not understand what you asked.",
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use intents::{GrammarCompiler, IntentRegistry};

    use super::*;

    #[test]
    fn test_contributes_nothing_to_grammar() {
        let handler = UnknownIntentHandler::new();

        let grammar = GrammarCompiler::new()
            .compile(handler.intent_definitions())
            .unwrap();

        assert!(grammar.is_empty());
    }

    #[tokio::test]
    async fn test_is_never_routed() {
        let mut registry = IntentRegistry::new();
        registry.register(Arc::new(UnknownIntentHandler::new()));

        assert_eq!(registry.collect_definitions().len(), 1);
        assert!(registry.intent_names().is_empty());

        let response = registry.dispatch(&Intent::new("", "mumble")).await;
        assert_eq!(response.text(), "I do not know how to mumble");
    }

    #[tokio::test]
    async fn test_apology() {
        let response = UnknownIntentHandler::new()
            .handle_intent(&Intent::new("", "mumble"))
            .await
            .unwrap();

        assert_eq!(
            response.text(),
            "I'm sorry, but I could not understand what you asked."
        );
    }
}
