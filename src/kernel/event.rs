use std::time::Duration;

use super::speech::UtteranceId;
use crate::error::{RecognitionErrorCode, VoiceError};

/// Everything the engine bindings report back to the controller.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Recognition(RecognitionEvent),
    Synthesis(SynthesisEvent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    Result { transcript: String, is_final: bool },
    End,
    Error(RecognitionErrorCode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisEvent {
    Finished(UtteranceId),
    Failed { id: UtteranceId, reason: String },
    VoicesChanged,
}

// Helpers for engine bindings
impl SessionEvent {
    pub fn transcript(text: &str) -> Self {
        SessionEvent::Recognition(RecognitionEvent::Result {
            transcript: text.to_string(),
            is_final: true,
        })
    }

    pub fn interim(text: &str) -> Self {
        SessionEvent::Recognition(RecognitionEvent::Result {
            transcript: text.to_string(),
            is_final: false,
        })
    }

    pub fn ended() -> Self {
        SessionEvent::Recognition(RecognitionEvent::End)
    }

    pub fn recognition_error(code: RecognitionErrorCode) -> Self {
        SessionEvent::Recognition(RecognitionEvent::Error(code))
    }

    pub fn finished(id: UtteranceId) -> Self {
        SessionEvent::Synthesis(SynthesisEvent::Finished(id))
    }

    pub fn failed(id: UtteranceId, reason: &str) -> Self {
        SessionEvent::Synthesis(SynthesisEvent::Failed {
            id,
            reason: reason.to_string(),
        })
    }

    pub fn voices_changed() -> Self {
        SessionEvent::Synthesis(SynthesisEvent::VoicesChanged)
    }
}

/// What the controller tells the UI layer. Returned from `tick_step`.
#[derive(Debug)]
pub enum SessionNotice {
    /// Debounced final transcript, ready for classification.
    Transcript(String),
    /// The recognition engine reported end of session.
    Ended,
    /// Transient fault; a restart is scheduled.
    Reconnecting {
        attempt: u32,
        delay: Duration,
        cause: Option<RecognitionErrorCode>,
    },
    /// Non-fatal, user-visible status text.
    Warning(String),
    /// Needs user action: permission denied, unsupported engine, or the
    /// reconnect budget ran out.
    Error(VoiceError),
}
