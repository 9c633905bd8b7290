//! Scripted engines for driving the controller without audio hardware.
//! They record every call; tests feed completion events by hand.

use std::collections::VecDeque;

use super::{RecognitionEngine, SynthesisEngine};
use crate::error::{Result, VoiceError};
use crate::kernel::speech::{UtteranceUnit, Voice};

#[derive(Debug, Default)]
pub struct ScriptedRecognizer {
    pub starts: u32,
    pub stops: u32,
    pub disposed: bool,
    /// Errors returned by upcoming `start` calls, front first.
    pub start_failures: VecDeque<VoiceError>,
}

impl ScriptedRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_next_start(&mut self, err: VoiceError) {
        self.start_failures.push_back(err);
    }
}

impl RecognitionEngine for ScriptedRecognizer {
    fn start(&mut self) -> Result<()> {
        if let Some(err) = self.start_failures.pop_front() {
            return Err(err);
        }
        self.starts += 1;
        Ok(())
    }

    fn stop(&mut self) {
        self.stops += 1;
    }

    fn dispose(&mut self) {
        self.disposed = true;
    }
}

#[derive(Debug, Default)]
pub struct ScriptedSynthesizer {
    pub spoken: Vec<UtteranceUnit>,
    pub cancels: u32,
    pub voices: Vec<Voice>,
    pub disposed: bool,
    pub speak_failures: VecDeque<VoiceError>,
}

impl ScriptedSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_voices(voices: Vec<Voice>) -> Self {
        Self {
            voices,
            ..Self::default()
        }
    }

    pub fn last_spoken(&self) -> Option<&UtteranceUnit> {
        self.spoken.last()
    }

    pub fn spoken_texts(&self) -> Vec<&str> {
        self.spoken.iter().map(|u| u.text.as_str()).collect()
    }
}

impl SynthesisEngine for ScriptedSynthesizer {
    fn speak(&mut self, unit: &UtteranceUnit) -> Result<()> {
        if let Some(err) = self.speak_failures.pop_front() {
            return Err(err);
        }
        self.spoken.push(unit.clone());
        Ok(())
    }

    fn cancel_all(&mut self) {
        self.cancels += 1;
    }

    fn list_available_voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn dispose(&mut self) {
        self.disposed = true;
    }
}
