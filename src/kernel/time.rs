use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Logical controller time in milliseconds. The controller never reads a
/// wall clock; the driver passes the current tick into every step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Tick {
    pub ms: u64,
}

/// Driver cadence.
pub const TICK_MS: u64 = 20;

impl Tick {
    pub fn new() -> Self {
        Tick { ms: 0 }
    }

    pub fn from_millis(ms: u64) -> Self {
        Tick { ms }
    }

    pub fn next(&self) -> Self {
        Tick { ms: self.ms + TICK_MS }
    }

    pub fn after(&self, delay: Duration) -> Self {
        Tick {
            ms: self.ms.saturating_add(delay.as_millis() as u64),
        }
    }

    /// Elapsed time since `earlier`; zero if `earlier` is in the future.
    pub fn since(&self, earlier: Tick) -> Duration {
        Duration::from_millis(self.ms.saturating_sub(earlier.ms))
    }
}
