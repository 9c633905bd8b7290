use std::collections::VecDeque;

use super::event::{FaultKind, TelemetryEvent};
use crate::kernel::state::SessionPhase;

#[derive(Debug, Clone, Default)]
pub struct TelemetrySnapshot {
    pub session_stats: SessionStats,
    pub reconnect_stats: ReconnectStats,
    pub transcript_stats: TranscriptStats,
    pub speech_stats: SpeechStats,
}

#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    pub transitions: u64,
    pub errors_entered: u64,
}

#[derive(Debug, Clone, Default)]
pub struct ReconnectStats {
    pub scheduled: u64,
    pub exhausted: u64,
    pub network_faults: u64,
    pub permanent_faults: u64,
    pub max_delay_ms: u64,
}

#[derive(Debug, Clone, Default)]
pub struct TranscriptStats {
    pub delivered: u64,
    pub suppressed: u64,
    pub total_latency_ms: u64,
    pub avg_latency_ms: f64,
}

#[derive(Debug, Clone, Default)]
pub struct SpeechStats {
    pub started: u64,
    pub completed: u64,
    pub failed: u64,
    pub preemptions: u64,
    pub dropped_units: u64,
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    for event in events {
        match event {
            TelemetryEvent::PhaseTransition { to, .. } => {
                snap.session_stats.transitions += 1;
                if *to == SessionPhase::Error {
                    snap.session_stats.errors_entered += 1;
                }
            }
            TelemetryEvent::ReconnectScheduled { delay_ms, .. } => {
                snap.reconnect_stats.scheduled += 1;
                snap.reconnect_stats.max_delay_ms = snap.reconnect_stats.max_delay_ms.max(*delay_ms);
            }
            TelemetryEvent::ReconnectExhausted { .. } => snap.reconnect_stats.exhausted += 1,
            TelemetryEvent::RecognitionFault { kind } => match kind {
                FaultKind::Network => snap.reconnect_stats.network_faults += 1,
                FaultKind::PermissionDenied => snap.reconnect_stats.permanent_faults += 1,
                _ => {}
            },
            TelemetryEvent::TranscriptDelivered { latency_ms } => {
                snap.transcript_stats.delivered += 1;
                snap.transcript_stats.total_latency_ms += latency_ms;
            }
            TelemetryEvent::TranscriptSuppressed => snap.transcript_stats.suppressed += 1,
            TelemetryEvent::UtteranceStarted { .. } => snap.speech_stats.started += 1,
            TelemetryEvent::UtteranceCompleted { .. } => snap.speech_stats.completed += 1,
            TelemetryEvent::UtteranceFailed { .. } => snap.speech_stats.failed += 1,
            TelemetryEvent::SpeechPreempted { dropped_units } => {
                snap.speech_stats.preemptions += 1;
                snap.speech_stats.dropped_units += *dropped_units as u64;
            }
        }
    }

    if snap.transcript_stats.delivered > 0 {
        snap.transcript_stats.avg_latency_ms =
            snap.transcript_stats.total_latency_ms as f64 / snap.transcript_stats.delivered as f64;
    }

    snap
}
