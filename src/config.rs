use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, VoiceError};

/// Top-level configuration. Every field has a default so partial JSON works.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    pub recognition: RecognitionConfig,
    pub speech: SpeechConfig,
    pub resolver: ResolverConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionConfig {
    pub lang: String,
    pub max_reconnect_attempts: u32,
    /// Linear backoff step per attempt.
    pub backoff_step_ms: u64,
    /// Upper bound on a single backoff delay.
    pub backoff_max_ms: u64,
    /// Pause between stopping a live engine and starting it again.
    pub settle_delay_ms: u64,
    /// Quiet period before a transcript is delivered.
    pub debounce_ms: u64,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            lang: "en-US".to_string(),
            max_reconnect_attempts: 10,
            backoff_step_ms: 1000,
            backoff_max_ms: 5000,
            settle_delay_ms: 100,
            debounce_ms: 300,
        }
    }
}

impl RecognitionConfig {
    /// Linear-capped backoff for the given (1-based) attempt.
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let ms = self
            .backoff_step_ms
            .saturating_mul(attempt as u64)
            .min(self.backoff_max_ms);
        Duration::from_millis(ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    pub inter_unit_pause_ms: u64,
    /// Substrings matched against voice names, in priority order.
    pub preferred_voices: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            rate: 1.1,
            pitch: 1.0,
            volume: 1.0,
            inter_unit_pause_ms: 50,
            preferred_voices: vec![
                "Google US English".to_string(),
                "Microsoft David".to_string(),
                "Microsoft Zira".to_string(),
                "Samantha".to_string(),
                "Daniel".to_string(),
            ],
        }
    }
}

impl SpeechConfig {
    pub fn inter_unit_pause(&self) -> Duration {
        Duration::from_millis(self.inter_unit_pause_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Hard ceiling on accepted edit distance for fuzzy product matches.
    pub fuzzy_ceiling: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self { fuzzy_ceiling: 4 }
    }
}

impl VoiceConfig {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: VoiceConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.recognition.max_reconnect_attempts == 0 {
            return Err(VoiceError::Config(
                "recognition.max_reconnect_attempts must be at least 1".to_string(),
            ));
        }
        if self.recognition.backoff_max_ms < self.recognition.backoff_step_ms {
            return Err(VoiceError::Config(
                "recognition.backoff_max_ms must not be below backoff_step_ms".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.speech.volume) {
            return Err(VoiceError::Config("speech.volume must be within 0.0..=1.0".to_string()));
        }
        Ok(())
    }
}
