use async_trait::async_trait;
use chrono::{Local, NaiveTime};
use intents::{HandlerResult, Intent, IntentDefinition, IntentHandler, IntentResponse};

pub const GET_TIME: &str = "GetTime";

/// Answers "What time is it" with the local wall clock
pub struct TimeOfDayHandler {
    definitions: Vec<IntentDefinition>,
}

impl TimeOfDayHandler {
    pub fn new() -> Self {
        Self {
            definitions: vec![IntentDefinition::simple(GET_TIME, "What time is it")],
        }
    }

    pub fn response_for(time: NaiveTime) -> String {
        format!("It is currently {} o'clock", time.format("%H:%M"))
    }
}

impl Default for TimeOfDayHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IntentHandler for TimeOfDayHandler {
    fn name(&self) -> &str {
        "time"
    }

    fn intent_definitions(&self) -> &[IntentDefinition] {
        &self.definitions
    }

    async fn handle_intent(&self, _intent: &Intent) -> HandlerResult<IntentResponse> {
        Ok(IntentResponse::new(Self::response_for(Local::now().time())))
    }
}
