use std::time::Duration;

use async_trait::async_trait;
use intents::{
    HandlerError, HandlerResult, Intent, IntentDefinition, IntentHandler, IntentResponse,
    NumberRangeParameter, Sentence, SetParameter, Trigger, TriggerSender,
};
use tracing::info;

pub const SET_TIMER: &str = "SetTimer";

const AMOUNT: &str = "Amount";
const TIME_UNIT: &str = "TimeUnit";
const SECONDS: &str = "seconds";
const MINUTES: &str = "minutes";

/// Sets countdown timers that fire a [`Trigger::Reminder`] when they expire
pub struct TimerHandler {
    definitions: Vec<IntentDefinition>,
    triggers: TriggerSender,
}

impl TimerHandler {
    pub fn new(triggers: TriggerSender) -> Self {
        let sentence = Sentence::builder()
            .text("Set a timer for")
            .part(NumberRangeParameter::new(AMOUNT, true, 0, 60))
            .part(SetParameter::new(TIME_UNIT, true, [SECONDS, MINUTES]))
            .optional_text("from now")
            .build();

        Self {
            definitions: vec![IntentDefinition::new(SET_TIMER).with_sentence(sentence)],
            triggers,
        }
    }

    fn requested_duration(intent: &Intent) -> HandlerResult<Duration> {
        let amount = intent.require(AMOUNT)?;
        let amount: u64 = amount.parse().map_err(|_| HandlerError::InvalidParameter {
            name: AMOUNT.to_string(),
            value: amount.to_string(),
        })?;

        let seconds = match intent.require(TIME_UNIT)? {
            SECONDS => amount,
            MINUTES => amount * 60,
            other => {
                return Err(HandlerError::InvalidParameter {
                    name: TIME_UNIT.to_string(),
                    value: other.to_string(),
                });
            }
        };
        Ok(Duration::from_secs(seconds))
    }
}

#[async_trait]
impl IntentHandler for TimerHandler {
    fn name(&self) -> &str {
        "timer"
    }

    fn intent_definitions(&self) -> &[IntentDefinition] {
        &self.definitions
    }

    async fn handle_intent(&self, intent: &Intent) -> HandlerResult<IntentResponse> {
        let duration = Self::requested_duration(intent)?;
        let triggers = self.triggers.clone();

        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            info!(seconds = duration.as_secs(), "Timer expired");
            triggers.emit(Trigger::Reminder("Timer expired".to_string()));
        });

        Ok(IntentResponse::new(format!(
            "I've set a timer for {} seconds from now",
            duration.as_secs()
        )))
    }
}
