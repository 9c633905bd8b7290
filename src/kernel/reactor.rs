use std::time::Instant; // Only for the loop driver

use tokio::sync::mpsc;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::controller::SessionController;
use super::event::{SessionEvent, SessionNotice};
use super::time::{Tick, TICK_MS};
use crate::catalog::CatalogProvider;
use crate::dispatch::{DispatchOutcome, ShoppingSession};
use crate::engine::{RecognitionEngine, SynthesisEngine};
use crate::intent::{CommandClassifier, IntentResult};

/// One handled voice command.
#[derive(Debug, Clone)]
pub struct Turn {
    pub intent: IntentResult,
    pub outcome: DispatchOutcome,
    /// What was actually spoken back.
    pub reply: String,
}

/// Drives the session controller from engine events and turns each delivered
/// transcript into a classified, dispatched and spoken turn.
pub struct Reactor<R, S, C> {
    pub receiver: mpsc::Receiver<SessionEvent>,
    pub controller: SessionController<R, S>,
    pub classifier: CommandClassifier,
    pub shop: ShoppingSession,
    catalog: C,
    shutdown: CancellationToken,
}

impl<R, S, C> Reactor<R, S, C>
where
    R: RecognitionEngine,
    S: SynthesisEngine,
    C: CatalogProvider,
{
    pub fn new(
        receiver: mpsc::Receiver<SessionEvent>,
        controller: SessionController<R, S>,
        catalog: C,
        shutdown: CancellationToken,
    ) -> Self {
        let classifier = CommandClassifier::new(controller.config().resolver.clone());
        Self {
            receiver,
            controller,
            classifier,
            shop: ShoppingSession::new(),
            catalog,
            shutdown,
        }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Pure step: no awaiting. Transcripts are handled in delivery order.
    pub fn tick_step(&mut self, now: Tick, events: Vec<SessionEvent>) -> Vec<Turn> {
        let mut notices = self.controller.drain_notices();
        notices.extend(self.controller.tick_step(now, events));

        let mut turns = Vec::new();
        for notice in notices {
            match notice {
                SessionNotice::Transcript(text) => turns.push(self.handle_transcript(&text)),
                SessionNotice::Ended => debug!("Recognition session ended"),
                SessionNotice::Reconnecting { attempt, delay, cause } => {
                    info!(
                        "Reconnecting (attempt {}) in {:?}, cause: {:?}",
                        attempt, delay, cause
                    );
                }
                SessionNotice::Warning(msg) => warn!("{}", msg),
                SessionNotice::Error(err) => {
                    warn!("{}", err);
                    self.controller.speak(&err.to_string());
                }
            }
        }
        turns
    }

    fn handle_transcript(&mut self, text: &str) -> Turn {
        let catalog = self.catalog.get_all();
        let intent = self.classifier.classify(text, &catalog);
        let outcome = self.shop.apply(&intent, &self.catalog);

        let reply = outcome
            .announcement()
            .map(str::to_string)
            .unwrap_or_else(|| intent.spoken_response.clone());
        self.controller.speak(&reply);

        Turn {
            intent,
            outcome,
            reply,
        }
    }

    /// Async Driver Loop
    pub async fn run(&mut self) {
        info!("Reactor started. Tick: {}ms", TICK_MS);

        let started = Instant::now();
        let mut cadence = interval(Duration::from_millis(TICK_MS));
        cadence.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                _ = cadence.tick() => {}
            }

            let mut events = Vec::new();
            while let Ok(event) = self.receiver.try_recv() {
                events.push(event);
            }

            let now = Tick::from_millis(started.elapsed().as_millis() as u64);
            for turn in self.tick_step(now, events) {
                info!(
                    "Turn: {} -> {:?}",
                    turn.intent.action.as_str(),
                    turn.outcome
                );
            }
        }

        info!("Reactor shutting down");
        self.controller.dispose();
    }
}
