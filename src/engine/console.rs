//! Terminal engines: typed lines stand in for recognized speech and spoken
//! output is printed.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::{RecognitionEngine, SynthesisEngine};
use crate::error::{RecognitionErrorCode, Result, VoiceError};
use crate::kernel::event::SessionEvent;
use crate::kernel::speech::{UtteranceUnit, Voice};

/// Reads stdin lines as final transcripts while listening. EOF ends the
/// session and cancels `shutdown`.
pub struct StdinRecognizer {
    events: mpsc::Sender<SessionEvent>,
    shutdown: CancellationToken,
    listening: Arc<AtomicBool>,
    reader_started: bool,
}

impl StdinRecognizer {
    pub fn new(events: mpsc::Sender<SessionEvent>, shutdown: CancellationToken) -> Self {
        Self {
            events,
            shutdown,
            listening: Arc::new(AtomicBool::new(false)),
            reader_started: false,
        }
    }

    fn spawn_reader(&mut self) {
        if self.reader_started {
            return;
        }
        self.reader_started = true;

        let tx = self.events.clone();
        let shutdown = self.shutdown.clone();
        let listening = Arc::clone(&self.listening);

        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    line = lines.next_line() => match line {
                        Ok(Some(line)) => {
                            if !listening.load(Ordering::SeqCst) {
                                debug!("Dropped input while not listening");
                                continue;
                            }
                            if tx.send(SessionEvent::transcript(&line)).await.is_err() {
                                break;
                            }
                        }
                        Ok(None) => {
                            listening.store(false, Ordering::SeqCst);
                            let _ = tx.send(SessionEvent::ended()).await;
                            shutdown.cancel();
                            break;
                        }
                        Err(e) => {
                            warn!("stdin read failed: {}", e);
                            let code = RecognitionErrorCode::Other(e.to_string());
                            let _ = tx.send(SessionEvent::recognition_error(code)).await;
                            break;
                        }
                    }
                }
            }
        });
    }
}

impl RecognitionEngine for StdinRecognizer {
    fn init(&mut self) -> Result<()> {
        self.spawn_reader();
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        if self.shutdown.is_cancelled() {
            return Err(VoiceError::Unsupported("input closed".to_string()));
        }
        self.spawn_reader();
        self.listening.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&mut self) {
        if self.listening.swap(false, Ordering::SeqCst) {
            let _ = self.events.try_send(SessionEvent::ended());
        }
    }

    fn dispose(&mut self) {
        self.listening.store(false, Ordering::SeqCst);
    }
}

/// Prints each unit and reports completion after a reading-speed delay.
pub struct ConsoleSynthesizer {
    events: mpsc::Sender<SessionEvent>,
    playback: Option<CancellationToken>,
    ms_per_word: u64,
}

impl ConsoleSynthesizer {
    pub fn new(events: mpsc::Sender<SessionEvent>) -> Self {
        Self {
            events,
            playback: None,
            ms_per_word: 60,
        }
    }
}

impl SynthesisEngine for ConsoleSynthesizer {
    fn speak(&mut self, unit: &UtteranceUnit) -> Result<()> {
        self.cancel_all();
        println!("[speech] {}", unit.text);

        let words = unit.text.split_whitespace().count() as u64;
        let rate = f64::from(unit.settings.rate.max(0.1));
        let delay = Duration::from_millis(words * self.ms_per_word).div_f64(rate);

        let token = CancellationToken::new();
        self.playback = Some(token.clone());
        let tx = self.events.clone();
        let id = unit.id;

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let _ = tx.send(SessionEvent::finished(id)).await;
                }
            }
        });
        Ok(())
    }

    fn cancel_all(&mut self) {
        if let Some(token) = self.playback.take() {
            token.cancel();
        }
    }

    fn list_available_voices(&self) -> Vec<Voice> {
        vec![Voice::new("Console", "en-US")]
    }

    fn dispose(&mut self) {
        self.cancel_all();
    }
}
