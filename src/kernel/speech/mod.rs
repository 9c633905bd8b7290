pub mod queue;
pub mod voice;

pub use queue::{split_sentences, SpeechQueue, UtteranceId, UtteranceSettings, UtteranceUnit};
pub use voice::{select_voice, Voice};
