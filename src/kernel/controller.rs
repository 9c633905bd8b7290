use tracing::{debug, info, warn};

use super::event::{RecognitionEvent, SessionEvent, SessionNotice, SynthesisEvent};
use super::speech::{select_voice, split_sentences, SpeechQueue, UtteranceSettings, UtteranceUnit, Voice};
use super::state::{RecognitionSession, SessionDelta, SessionPhase, SessionStatus};
use super::telemetry::{FaultKind, TelemetryEvent, TelemetryRecorder};
use super::time::Tick;
use super::timer::TimerSlot;
use crate::config::VoiceConfig;
use crate::engine::{RecognitionEngine, SynthesisEngine};
use crate::error::{RecognitionErrorCode, Result, VoiceError};

/// Upper bound on timer cascades inside one step.
const MAX_TIMER_ROUNDS: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingTranscript {
    text: String,
    heard_at: Tick,
}

/// Owns both engines and every timer of a voice session. Synchronous: the
/// driver feeds engine events and the current tick into `tick_step`, and
/// collects the notices it returns.
pub struct SessionController<R, S> {
    config: VoiceConfig,
    recognizer: R,
    synthesizer: S,
    session: RecognitionSession,
    queue: SpeechQueue,
    voice: Option<Voice>,

    settle: TimerSlot,
    backoff: TimerSlot,
    debounce: TimerSlot<PendingTranscript>,
    speech_gap: TimerSlot,

    now: Tick,
    /// Ends we expect because we stopped the engine ourselves.
    stop_acks: u32,
    /// Set once an error needing user action has been surfaced.
    error_latched: bool,
    last_heard_at: Option<Tick>,
    notices: Vec<SessionNotice>,
    telemetry: TelemetryRecorder,
}

impl<R: RecognitionEngine, S: SynthesisEngine> SessionController<R, S> {
    pub fn new(config: VoiceConfig, recognizer: R, synthesizer: S) -> Self {
        Self {
            config,
            recognizer,
            synthesizer,
            session: RecognitionSession::new(),
            queue: SpeechQueue::new(),
            voice: None,
            settle: TimerSlot::new(),
            backoff: TimerSlot::new(),
            debounce: TimerSlot::new(),
            speech_gap: TimerSlot::new(),
            now: Tick::new(),
            stop_acks: 0,
            error_latched: false,
            last_heard_at: None,
            notices: Vec::new(),
            telemetry: TelemetryRecorder::new(),
        }
    }

    pub fn init(&mut self) -> Result<()> {
        self.recognizer.init()?;
        self.synthesizer.init()?;
        self.refresh_voices();
        info!("Session controller ready");
        Ok(())
    }

    pub fn dispose(&mut self) {
        self.stop_listening();
        self.preempt_speech();
        self.recognizer.dispose();
        self.synthesizer.dispose();
        info!("Session controller disposed");
    }

    // --- Recognition ---

    pub fn start_listening(&mut self) {
        self.backoff.cancel();
        self.session.reduce(SessionDelta::AttemptsReset);
        self.session.reduce(SessionDelta::AutoRestart(true));
        self.session.reduce(SessionDelta::TranscriptCleared);
        self.error_latched = false;
        self.last_heard_at = None;

        if self.session.listening {
            // Restart a live engine: stop now, start after the settle delay.
            self.stop_acks += 1;
            self.recognizer.stop();
            self.session.reduce(SessionDelta::Stopped);
            let deadline = self.now.after(self.config.recognition.settle_delay());
            self.settle.arm(deadline, ());
            self.set_phase(SessionPhase::Listening);
            debug!("Recognition restart in {}ms", self.config.recognition.settle_delay_ms);
        } else {
            self.settle.cancel();
            self.begin_recognition();
        }
    }

    pub fn stop_listening(&mut self) {
        self.session.reduce(SessionDelta::AutoRestart(false));
        self.backoff.cancel();
        self.settle.cancel();
        self.debounce.cancel();

        if self.session.listening {
            self.stop_acks += 1;
            self.recognizer.stop();
            self.session.reduce(SessionDelta::Stopped);
        }
        self.set_phase(SessionPhase::Idle);
    }

    // --- Speech ---

    /// Replaces whatever is playing with `text`, one sentence per unit.
    pub fn speak(&mut self, text: &str) {
        if self.session.muted {
            debug!("Muted, speech dropped");
            return;
        }
        let sentences = split_sentences(text);
        if sentences.is_empty() {
            return;
        }

        self.preempt_speech();
        let settings = self.utterance_settings();
        let units = sentences
            .into_iter()
            .map(|s| UtteranceUnit::new(s, settings.clone()))
            .collect();
        self.queue.replace(units);
        self.play_next();
    }

    /// Flips mute and returns the new value. Muting silences playback.
    pub fn toggle_mute(&mut self) -> bool {
        let muted = !self.session.muted;
        self.session.reduce(SessionDelta::Muted(muted));
        if muted {
            self.preempt_speech();
        }
        info!("Mute: {}", muted);
        muted
    }

    pub fn is_speaking(&self) -> bool {
        self.queue.is_active()
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            listening: self.session.listening,
            muted: self.session.muted,
            speaking: self.is_speaking(),
            reconnect_attempts: self.session.reconnect_attempts,
            phase: self.session.phase,
        }
    }

    // --- Step ---

    /// Advances logical time to `now`, applies `events` in arrival order, then
    /// fires every timer that has come due.
    pub fn tick_step(&mut self, now: Tick, events: Vec<SessionEvent>) -> Vec<SessionNotice> {
        self.now = self.now.max(now);

        for event in events {
            match event {
                SessionEvent::Recognition(ev) => self.on_recognition(ev),
                SessionEvent::Synthesis(ev) => self.on_synthesis(ev),
            }
        }

        self.fire_due_timers();
        std::mem::take(&mut self.notices)
    }

    pub fn advance_to(&mut self, now: Tick) -> Vec<SessionNotice> {
        self.tick_step(now, Vec::new())
    }

    /// Notices raised by direct calls since the last step.
    pub fn drain_notices(&mut self) -> Vec<SessionNotice> {
        std::mem::take(&mut self.notices)
    }

    fn on_recognition(&mut self, event: RecognitionEvent) {
        match event {
            RecognitionEvent::Result { transcript, is_final } => {
                self.on_result(transcript, is_final)
            }
            RecognitionEvent::End => self.on_end(),
            RecognitionEvent::Error(code) => self.on_error(code),
        }
    }

    fn on_result(&mut self, transcript: String, is_final: bool) {
        if matches!(self.session.phase, SessionPhase::Idle | SessionPhase::Error) {
            debug!("Result outside an active session ignored");
            return;
        }

        let window = self.config.recognition.debounce();
        if !is_final {
            // Speech is still coming in; hold back delivery.
            self.debounce.reschedule(self.now.after(window));
            return;
        }

        let text = transcript.trim().to_string();
        if text.is_empty() {
            return;
        }

        let duplicate = self.session.last_transcript == text
            && self
                .last_heard_at
                .is_some_and(|at| self.now.since(at) < window);
        if duplicate {
            debug!("Duplicate transcript suppressed");
            self.telemetry.record(TelemetryEvent::TranscriptSuppressed);
            return;
        }

        self.session.reduce(SessionDelta::TranscriptAccepted(text.clone()));
        self.last_heard_at = Some(self.now);
        self.debounce.arm(
            self.now.after(window),
            PendingTranscript {
                text,
                heard_at: self.now,
            },
        );
    }

    fn on_end(&mut self) {
        if self.session.listening {
            self.session.reduce(SessionDelta::Stopped);
        }
        self.notices.push(SessionNotice::Ended);

        if self.stop_acks > 0 {
            self.stop_acks -= 1;
            debug!("Solicited end");
            return;
        }
        if !self.session.auto_restart
            || self.session.phase != SessionPhase::Listening
            || self.settle.is_armed()
        {
            return;
        }
        self.schedule_reconnect(None);
    }

    fn on_error(&mut self, code: RecognitionErrorCode) {
        warn!("Recognition error: {}", code.as_str());
        self.telemetry.record(TelemetryEvent::RecognitionFault {
            kind: FaultKind::from(&code),
        });

        if code.is_permanent() {
            self.fail_permanently(VoiceError::PermissionDenied);
            return;
        }
        if !self.session.auto_restart || self.session.phase != SessionPhase::Listening {
            return;
        }

        match &code {
            RecognitionErrorCode::Network => self.notices.push(SessionNotice::Warning(
                "Network connection issue. Trying to reconnect...".to_string(),
            )),
            RecognitionErrorCode::Other(c) => self.notices.push(SessionNotice::Warning(format!(
                "Error: {}. Trying to reconnect...",
                c
            ))),
            // no-speech restarts silently
            RecognitionErrorCode::NoSpeech | RecognitionErrorCode::PermissionDenied => {}
        }

        if self.session.listening {
            self.session.reduce(SessionDelta::Stopped);
        }
        self.schedule_reconnect(Some(code));
    }

    fn on_synthesis(&mut self, event: SynthesisEvent) {
        match event {
            SynthesisEvent::Finished(id) => {
                if !self.queue.complete(id) {
                    debug!("Stale completion for {}", id);
                    return;
                }
                self.telemetry.record(TelemetryEvent::UtteranceCompleted { id });
                if self.queue.has_pending() {
                    let deadline = self.now.after(self.config.speech.inter_unit_pause());
                    self.speech_gap.arm(deadline, ());
                }
            }
            SynthesisEvent::Failed { id, reason } => {
                if !self.queue.complete(id) {
                    debug!("Stale failure for {}", id);
                    return;
                }
                warn!("Speech synthesis failed: {}", reason);
                self.telemetry.record(TelemetryEvent::UtteranceFailed { id });
                self.play_next();
            }
            SynthesisEvent::VoicesChanged => self.refresh_voices(),
        }
    }

    fn fire_due_timers(&mut self) {
        for _ in 0..MAX_TIMER_ROUNDS {
            let mut fired = false;

            if self.settle.fire(self.now).is_some() {
                fired = true;
                if self.session.auto_restart && self.session.phase == SessionPhase::Listening {
                    self.begin_recognition();
                }
            }

            if self.backoff.fire(self.now).is_some() {
                fired = true;
                if self.session.auto_restart {
                    info!(
                        "Attempting to reconnect speech recognition (attempt {})",
                        self.session.reconnect_attempts
                    );
                    self.begin_recognition();
                }
            }

            if let Some(pending) = self.debounce.fire(self.now) {
                fired = true;
                self.deliver(pending);
            }

            if self.speech_gap.fire(self.now).is_some() {
                fired = true;
                self.play_next();
            }

            if !fired {
                return;
            }
        }
        warn!("Timer cascade cut off after {} rounds", MAX_TIMER_ROUNDS);
    }

    fn deliver(&mut self, pending: PendingTranscript) {
        let latency_ms = self.now.since(pending.heard_at).as_millis() as u64;
        self.telemetry.record(TelemetryEvent::TranscriptDelivered { latency_ms });
        self.session.reduce(SessionDelta::AttemptsReset);
        info!("Transcript delivered after {}ms", latency_ms);
        self.notices.push(SessionNotice::Transcript(pending.text));
    }

    fn begin_recognition(&mut self) {
        match self.recognizer.start() {
            Ok(()) => {
                self.session.reduce(SessionDelta::Started);
                self.set_phase(SessionPhase::Listening);
            }
            Err(err) if err.is_permanent() => self.fail_permanently(err),
            Err(err) => {
                warn!("Failed to start recognition: {}", err);
                self.telemetry.record(TelemetryEvent::RecognitionFault {
                    kind: FaultKind::StartFailed,
                });
                self.notices.push(SessionNotice::Warning(format!(
                    "Error: {}. Trying to reconnect...",
                    err
                )));
                self.set_phase(SessionPhase::Listening);
                self.schedule_reconnect(None);
            }
        }
    }

    fn schedule_reconnect(&mut self, cause: Option<RecognitionErrorCode>) {
        let max = self.config.recognition.max_reconnect_attempts;
        self.session.reduce(SessionDelta::AttemptFailed { max });
        let attempt = self.session.reconnect_attempts;

        if attempt >= max {
            self.exhaust(attempt);
            return;
        }

        let delay = self.config.recognition.backoff_for(attempt);
        self.backoff.arm(self.now.after(delay), ());
        self.set_phase(SessionPhase::Reconnecting);
        self.telemetry.record(TelemetryEvent::ReconnectScheduled {
            attempt,
            delay_ms: delay.as_millis() as u64,
        });
        info!("Reconnect {} of {} in {:?}", attempt, max, delay);
        self.notices.push(SessionNotice::Reconnecting { attempt, delay, cause });
    }

    fn exhaust(&mut self, attempts: u32) {
        warn!("Reconnect budget exhausted after {} attempts", attempts);
        self.telemetry.record(TelemetryEvent::ReconnectExhausted { attempts });
        self.halt_recognition();
        self.surface(VoiceError::ReconnectExhausted { attempts });
    }

    fn fail_permanently(&mut self, err: VoiceError) {
        warn!("Recognition unavailable: {}", err);
        self.halt_recognition();
        self.surface(err);
    }

    fn halt_recognition(&mut self) {
        self.session.reduce(SessionDelta::AutoRestart(false));
        self.backoff.cancel();
        self.settle.cancel();
        if self.session.listening {
            self.stop_acks += 1;
            self.recognizer.stop();
            self.session.reduce(SessionDelta::Stopped);
        }
        self.set_phase(SessionPhase::Error);
    }

    fn surface(&mut self, err: VoiceError) {
        if self.error_latched {
            debug!("Error already surfaced: {}", err);
            return;
        }
        self.error_latched = true;
        self.notices.push(SessionNotice::Error(err));
    }

    fn set_phase(&mut self, to: SessionPhase) {
        let from = self.session.phase;
        if from == to {
            return;
        }
        info!("Session phase {:?} -> {:?}", from, to);
        self.telemetry.record(TelemetryEvent::PhaseTransition {
            from,
            to,
            tick: self.now,
        });
        self.session.reduce(SessionDelta::PhaseChanged(to));
    }

    fn play_next(&mut self) {
        while let Some(unit) = self.queue.advance() {
            match self.synthesizer.speak(&unit) {
                Ok(()) => {
                    self.telemetry.record(TelemetryEvent::UtteranceStarted { id: unit.id });
                    return;
                }
                Err(err) => {
                    warn!("Speech synthesis failed: {}", err);
                    self.telemetry.record(TelemetryEvent::UtteranceFailed { id: unit.id });
                    self.queue.complete(unit.id);
                }
            }
        }
    }

    fn preempt_speech(&mut self) {
        let dropped_units = self.queue.len();
        self.synthesizer.cancel_all();
        self.queue.clear();
        self.speech_gap.cancel();
        if dropped_units > 0 {
            self.telemetry.record(TelemetryEvent::SpeechPreempted { dropped_units });
        }
    }

    fn refresh_voices(&mut self) {
        let voices = self.synthesizer.list_available_voices();
        if voices.is_empty() {
            return;
        }
        self.voice = select_voice(&voices, &self.config.speech.preferred_voices);
        if let Some(voice) = &self.voice {
            info!("Selected voice: {}", voice.name);
        }
    }

    fn utterance_settings(&self) -> UtteranceSettings {
        UtteranceSettings {
            voice: self.voice.clone(),
            rate: self.config.speech.rate,
            pitch: self.config.speech.pitch,
            volume: self.config.speech.volume,
        }
    }

    // --- Accessors ---

    pub fn config(&self) -> &VoiceConfig {
        &self.config
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn session(&self) -> &RecognitionSession {
        &self.session
    }

    pub fn voice(&self) -> Option<&Voice> {
        self.voice.as_ref()
    }

    pub fn telemetry(&self) -> &TelemetryRecorder {
        &self.telemetry
    }

    pub fn recognizer(&self) -> &R {
        &self.recognizer
    }

    pub fn recognizer_mut(&mut self) -> &mut R {
        &mut self.recognizer
    }

    pub fn synthesizer(&self) -> &S {
        &self.synthesizer
    }

    pub fn synthesizer_mut(&mut self) -> &mut S {
        &mut self.synthesizer
    }
}
