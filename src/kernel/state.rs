use serde::{Deserialize, Serialize};

/// Recognition lifecycle phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Not listening, nothing pending.
    #[default]
    Idle,
    /// Recognition active (or restarting after the settle delay).
    Listening,
    /// Backoff timer pending.
    Reconnecting,
    /// Reconnect budget exhausted or permanent fault. Needs a manual start.
    Error,
}

/// Strict state delta. This is the ONLY way the session mutates.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionDelta {
    Started,
    Stopped,
    PhaseChanged(SessionPhase),
    AutoRestart(bool),
    AttemptFailed { max: u32 },
    AttemptsReset,
    Muted(bool),
    TranscriptAccepted(String),
    TranscriptCleared,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecognitionSession {
    pub listening: bool,
    pub muted: bool,
    pub reconnect_attempts: u32,
    pub auto_restart: bool,
    pub last_transcript: String,
    pub phase: SessionPhase,
    /// Monotonic mutation counter.
    pub version: u64,
}

impl RecognitionSession {
    pub fn new() -> Self {
        Self {
            auto_restart: true,
            ..Default::default()
        }
    }

    pub fn reduce(&mut self, delta: SessionDelta) {
        self.version += 1;

        match delta {
            SessionDelta::Started => self.listening = true,
            SessionDelta::Stopped => self.listening = false,
            SessionDelta::PhaseChanged(phase) => self.phase = phase,
            SessionDelta::AutoRestart(on) => self.auto_restart = on,
            SessionDelta::AttemptFailed { max } => {
                self.reconnect_attempts = (self.reconnect_attempts + 1).min(max);
            }
            SessionDelta::AttemptsReset => self.reconnect_attempts = 0,
            SessionDelta::Muted(muted) => self.muted = muted,
            SessionDelta::TranscriptAccepted(text) => self.last_transcript = text,
            SessionDelta::TranscriptCleared => self.last_transcript.clear(),
        }
    }
}

/// Read-only view handed to the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub listening: bool,
    pub muted: bool,
    pub speaking: bool,
    pub reconnect_attempts: u32,
    pub phase: SessionPhase,
}
