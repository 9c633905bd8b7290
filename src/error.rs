use thiserror::Error;

/// Recognition error codes reported by the engine binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionErrorCode {
    Network,
    /// `not-allowed` / `permission-denied`.
    PermissionDenied,
    NoSpeech,
    Other(String),
}

impl RecognitionErrorCode {
    /// Permanent faults need user action; everything else is retried.
    pub fn is_permanent(&self) -> bool {
        matches!(self, RecognitionErrorCode::PermissionDenied)
    }

    pub fn as_str(&self) -> &str {
        match self {
            RecognitionErrorCode::Network => "network",
            RecognitionErrorCode::PermissionDenied => "not-allowed",
            RecognitionErrorCode::NoSpeech => "no-speech",
            RecognitionErrorCode::Other(code) => code,
        }
    }
}

impl From<&str> for RecognitionErrorCode {
    fn from(code: &str) -> Self {
        match code {
            "network" => Self::Network,
            "not-allowed" | "permission-denied" => Self::PermissionDenied,
            "no-speech" => Self::NoSpeech,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("Microphone access denied. Please allow microphone access to use voice features.")]
    PermissionDenied,

    #[error("Speech engine unsupported: {0}")]
    Unsupported(String),

    #[error("Failed to reconnect after {attempts} attempts. Please check your network connection and restart listening.")]
    ReconnectExhausted { attempts: u32 },

    #[error("Engine failure: {0}")]
    Engine(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl VoiceError {
    pub fn is_permanent(&self) -> bool {
        matches!(self, VoiceError::PermissionDenied | VoiceError::Unsupported(_))
    }
}

impl From<serde_json::Error> for VoiceError {
    fn from(err: serde_json::Error) -> Self {
        VoiceError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VoiceError>;
