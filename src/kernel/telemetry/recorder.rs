use std::collections::VecDeque;

use super::event::TelemetryEvent;
use super::metrics::{compute_snapshot, TelemetrySnapshot};

const MAX_EVENTS: usize = 10_000;

#[derive(Debug, Default)]
pub struct TelemetryRecorder {
    buffer: VecDeque<TelemetryEvent>,
}

impl TelemetryRecorder {
    pub fn new() -> Self {
        Self {
            buffer: VecDeque::with_capacity(MAX_EVENTS),
        }
    }

    pub fn record(&mut self, event: TelemetryEvent) {
        if self.buffer.len() >= MAX_EVENTS {
            self.buffer.pop_front();
        }
        self.buffer.push_back(event);
    }

    pub fn events(&self) -> impl Iterator<Item = &TelemetryEvent> {
        self.buffer.iter()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn capacity_limit() -> usize {
        MAX_EVENTS
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        compute_snapshot(&self.buffer)
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}
