//! Session telemetry.
//!
//! # SAFETY INVARIANT
//! Telemetry is a READ-ONLY side-effect layer.
//! It must **NEVER** be read inside decision logic (controller, classifier or dispatcher).
//! It exists solely for observability and verification.
//!
//! # PRIVACY INVARIANT
//! Telemetry events must **NEVER** contain user content (transcripts, spoken text, product names).
//! Only ids, ticks, durations, counts and enums are allowed.

pub mod event;
pub mod metrics;
pub mod recorder;

pub use event::{FaultKind, TelemetryEvent};
pub use metrics::{compute_snapshot, TelemetrySnapshot};
pub use recorder::TelemetryRecorder;
