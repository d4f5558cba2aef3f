//! Built-in intent handlers for the intent hub

pub mod notifications;
pub mod speaker_select;
pub mod time;
pub mod timer;
pub mod unknown;

pub use notifications::NotificationCenter;
pub use speaker_select::SpeakerSelector;
pub use time::TimeOfDayHandler;
pub use timer::TimerHandler;
pub use unknown::UnknownIntentHandler;
