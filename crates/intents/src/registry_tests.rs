//! Unit tests for intent dispatch

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use crate::{
        handler::{HandlerError, HandlerResult, IntentHandler},
        intent::{Intent, IntentResponse},
        model::IntentDefinition,
        registry::IntentRegistry,
        speaker::{Speaker, SpeakerError},
    };

    enum Behavior {
        Reply(&'static str),
        Fail,
        Panic,
    }

    struct FakeHandler {
        name: &'static str,
        definitions: Vec<IntentDefinition>,
        behavior: Behavior,
    }

    impl FakeHandler {
        fn new(name: &'static str, intents: &[&str], behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                name,
                definitions: intents
                    .iter()
                    .map(|intent| IntentDefinition::simple(*intent, format!("do {}", intent)))
                    .collect(),
                behavior,
            })
        }
    }

    #[async_trait]
    impl IntentHandler for FakeHandler {
        fn name(&self) -> &str {
            self.name
        }

        fn intent_definitions(&self) -> &[IntentDefinition] {
            &self.definitions
        }

        async fn handle_intent(&self, intent: &Intent) -> HandlerResult<IntentResponse> {
            match self.behavior {
                Behavior::Reply(text) => Ok(IntentResponse::new(text)),
                Behavior::Fail => Err(HandlerError::Failed(format!("cannot {}", intent.name()))),
                Behavior::Panic => panic!("handler exploded"),
            }
        }
    }

    #[derive(Default)]
    struct RecordingSpeaker {
        spoken: Mutex<Vec<String>>,
        broken: bool,
    }

    #[async_trait]
    impl Speaker for RecordingSpeaker {
        async fn speak_text(&self, text: &str) -> Result<(), SpeakerError> {
            self.spoken.lock().await.push(text.to_string());
            if self.broken {
                return Err(SpeakerError::Unavailable("muted".to_string()));
            }
            Ok(())
        }
    }

    /// Unregistered intents get an apology containing the utterance
    #[tokio::test]
    async fn test_dispatch_unknown_intent() {
        let registry = IntentRegistry::new();

        let response = registry
            .dispatch(&Intent::new("Fly", "fly me to the moon"))
            .await;

        assert_eq!(response.text(), "I do not know how to fly me to the moon");
        assert!(!response.continue_conversation());
    }

    #[tokio::test]
    async fn test_dispatch_routes_to_declaring_handler() {
        let mut registry = IntentRegistry::new();
        registry.register(FakeHandler::new("time", &["GetTime"], Behavior::Reply("It is noon")));
        registry.register(FakeHandler::new("other", &["Other"], Behavior::Reply("other")));

        let response = registry
            .dispatch(&Intent::new("GetTime", "What time is it"))
            .await;

        assert_eq!(response.text(), "It is noon");
    }

    #[tokio::test]
    async fn test_handler_error_is_contained() {
        let mut registry = IntentRegistry::new();
        registry.register(FakeHandler::new("broken", &["Broken"], Behavior::Fail));

        let response = registry
            .dispatch(&Intent::new("Broken", "break something"))
            .await;

        assert_eq!(
            response.text(),
            "Something went wrong while handling your request: break something"
        );
    }

    #[tokio::test]
    async fn test_handler_panic_is_contained() {
        let mut registry = IntentRegistry::new();
        registry.register(FakeHandler::new("panicky", &["Panic"], Behavior::Panic));

        let response = registry.dispatch(&Intent::new("Panic", "panic now")).await;
        assert!(response.text().contains("panic now"));

        // The registry keeps serving after a panic
        let response = registry.dispatch(&Intent::new("Panic", "again")).await;
        assert!(response.text().contains("again"));
    }

    #[tokio::test]
    async fn test_last_registration_wins() {
        let mut registry = IntentRegistry::new();
        registry.register(FakeHandler::new("first", &["Shared"], Behavior::Reply("first")));
        registry.register(FakeHandler::new("second", &["Shared"], Behavior::Reply("second")));

        let response = registry.dispatch(&Intent::new("Shared", "shared")).await;

        assert_eq!(response.text(), "second");
        assert_eq!(registry.intent_names(), vec!["Shared"]);
        assert_eq!(registry.handler_count(), 2);
    }

    #[tokio::test]
    async fn test_collect_definitions_keeps_order_and_duplicates() {
        let mut registry = IntentRegistry::new();
        registry.register(FakeHandler::new("a", &["One", "Two"], Behavior::Reply("")));
        registry.register(FakeHandler::new("b", &["", "One"], Behavior::Reply("")));

        let names: Vec<&str> = registry
            .collect_definitions()
            .iter()
            .map(|definition| definition.name())
            .collect();

        assert_eq!(names, vec!["One", "Two", "", "One"]);
        assert!(!registry.contains(""));
        assert_eq!(registry.intent_names(), vec!["One", "Two"]);
    }

    #[tokio::test]
    async fn test_non_empty_responses_are_spoken() {
        let speaker = Arc::new(RecordingSpeaker::default());
        let mut registry = IntentRegistry::with_speaker(speaker.clone());
        registry.register(FakeHandler::new("loud", &["Loud"], Behavior::Reply("hello")));
        registry.register(FakeHandler::new("quiet", &["Quiet"], Behavior::Reply("")));

        registry.dispatch(&Intent::new("Loud", "say hello")).await;
        registry.dispatch(&Intent::new("Quiet", "stay quiet")).await;
        registry.dispatch(&Intent::new("Missing", "dance")).await;

        let spoken = speaker.spoken.lock().await;
        assert_eq!(
            *spoken,
            vec!["hello".to_string(), "I do not know how to dance".to_string()]
        );
    }

    #[tokio::test]
    async fn test_speaker_failure_does_not_affect_response() {
        let speaker = Arc::new(RecordingSpeaker {
            broken: true,
            ..RecordingSpeaker::default()
        });
        let mut registry = IntentRegistry::with_speaker(speaker);
        registry.register(FakeHandler::new("loud", &["Loud"], Behavior::Reply("hello")));

        let response = registry.dispatch(&Intent::new("Loud", "say hello")).await;

        assert_eq!(response.text(), "hello");
    }
}
