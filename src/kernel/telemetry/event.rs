use serde::{Deserialize, Serialize};

use crate::error::RecognitionErrorCode;
use crate::kernel::speech::UtteranceId;
use crate::kernel::state::SessionPhase;
use crate::kernel::time::Tick;

// Allowed: ids, ticks, durations, counts, enums
// Forbidden: transcript text, spoken text, engine error messages

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TelemetryEvent {
    PhaseTransition {
        from: SessionPhase,
        to: SessionPhase,
        tick: Tick,
    },

    ReconnectScheduled {
        attempt: u32,
        delay_ms: u64,
    },

    ReconnectExhausted {
        attempts: u32,
    },

    RecognitionFault {
        kind: FaultKind,
    },

    TranscriptDelivered {
        /// Time from the final result to delivery.
        latency_ms: u64,
    },

    TranscriptSuppressed,

    UtteranceStarted {
        id: UtteranceId,
    },

    UtteranceCompleted {
        id: UtteranceId,
    },

    UtteranceFailed {
        id: UtteranceId,
    },

    /// A new `speak` or a mute cut playback short.
    SpeechPreempted {
        dropped_units: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaultKind {
    Network,
    PermissionDenied,
    NoSpeech,
    Other,
    StartFailed,
}

impl From<&RecognitionErrorCode> for FaultKind {
    fn from(code: &RecognitionErrorCode) -> Self {
        match code {
            RecognitionErrorCode::Network => FaultKind::Network,
            RecognitionErrorCode::PermissionDenied => FaultKind::PermissionDenied,
            RecognitionErrorCode::NoSpeech => FaultKind::NoSpeech,
            RecognitionErrorCode::Other(_) => FaultKind::Other, // Content STRIPPED
        }
    }
}
