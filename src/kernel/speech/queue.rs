use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

use super::voice::Voice;

pub type UtteranceId = Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtteranceSettings {
    pub voice: Option<Voice>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for UtteranceSettings {
    fn default() -> Self {
        Self {
            voice: None,
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// One sentence-sized chunk handed to the synthesis engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtteranceUnit {
    pub id: UtteranceId,
    pub text: String,
    pub settings: UtteranceSettings,
}

impl UtteranceUnit {
    pub fn new(text: impl Into<String>, settings: UtteranceSettings) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            settings,
        }
    }
}

/// Splits on runs of `.`, `!` or `?` that are followed by whitespace or the
/// end of text. Terminal punctuation stays with its sentence; decimal points
/// like "$2.99" do not split. Blank pieces are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        while let Some(&next) = chars.peek() {
            if matches!(next, '.' | '!' | '?') {
                current.push(next);
                chars.next();
            } else {
                break;
            }
        }
        let boundary = chars.peek().map_or(true, |next| next.is_whitespace());
        if boundary {
            push_trimmed(&mut sentences, &current);
            current.clear();
        }
    }
    push_trimmed(&mut sentences, &current);
    sentences
}

fn push_trimmed(out: &mut Vec<String>, piece: &str) {
    let piece = piece.trim();
    if !piece.is_empty() {
        out.push(piece.to_string());
    }
}

/// FIFO of pending units plus the one currently in flight.
#[derive(Debug, Clone, Default)]
pub struct SpeechQueue {
    pending: VecDeque<UtteranceUnit>,
    current: Option<UtteranceUnit>,
}

impl SpeechQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops everything, including the in-flight unit, and queues `units`.
    pub fn replace(&mut self, units: Vec<UtteranceUnit>) {
        self.clear();
        self.pending.extend(units);
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.current = None;
    }

    /// Moves the next pending unit in flight. No-op while one is in flight.
    pub fn advance(&mut self) -> Option<UtteranceUnit> {
        if self.current.is_some() {
            return None;
        }
        let next = self.pending.pop_front()?;
        self.current = Some(next.clone());
        Some(next)
    }

    /// Clears the in-flight unit if `id` is it. Stale ids return false.
    pub fn complete(&mut self, id: UtteranceId) -> bool {
        match &self.current {
            Some(unit) if unit.id == id => {
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&UtteranceUnit> {
        self.current.as_ref()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some() || !self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len() + usize::from(self.current.is_some())
    }

    pub fn is_empty(&self) -> bool {
        !self.is_active()
    }
}
