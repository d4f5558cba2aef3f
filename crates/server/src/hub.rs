//! Bootstrap: wires handlers, the registry, the speech backend and the
//! trigger channel together.

use std::{sync::Arc, time::Duration};

use handlers::{
    NotificationCenter, SpeakerSelector, TimeOfDayHandler, TimerHandler, UnknownIntentHandler,
};
use intents::{GrammarUpdater, IntentRegistry, TriggerReceiver, triggers};
use rhasspy_client::RhasspyClient;
use tracing::info;

use crate::{config::HubConfig, conversation::CommandListener};

/// Shared state of the HTTP routes
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<IntentRegistry>,
    pub updater: Arc<GrammarUpdater>,
    pub listener: Arc<dyn CommandListener>,
    pub conversation_delay: Duration,
}

/// Everything `main` needs to run the hub
pub struct Hub {
    pub state: AppState,
    pub notifications: Arc<NotificationCenter>,
    pub triggers: TriggerReceiver,
}

impl Hub {
    pub fn build(config: &HubConfig) -> Self {
        let rhasspy = Arc::new(RhasspyClient::new(&config.rhasspy_api_url));

        let mut selector = SpeakerSelector::new(config.default_speaker.clone(), rhasspy.clone());
        for (name, api_url) in &config.speakers {
            selector = selector.with_output(name.clone(), Arc::new(RhasspyClient::new(api_url)));
        }
        let selector = Arc::new(selector);

        let (trigger_sender, trigger_receiver) = triggers::channel();
        let notifications = Arc::new(NotificationCenter::new(selector.clone()));

        let mut registry = IntentRegistry::with_speaker(selector.clone());
        registry.register(Arc::new(TimeOfDayHandler::new()));
        registry.register(Arc::new(TimerHandler::new(trigger_sender)));
        registry.register(notifications.clone());
        registry.register(selector.clone());
        registry.register(Arc::new(UnknownIntentHandler::new()));
        info!(
            handlers = registry.handler_count(),
            "Registered intents: {}",
            registry.intent_names().join(", ")
        );

        let registry = Arc::new(registry);
        let updater = Arc::new(GrammarUpdater::new(registry.clone(), rhasspy.clone()));

        Self {
            state: AppState {
                registry,
                updater,
                listener: rhasspy,
                conversation_delay: config.conversation_delay(),
            },
            notifications,
            triggers: trigger_receiver,
        }
    }
}
