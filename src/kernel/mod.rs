//! Session kernel: logical time, timers, the recognition/speech controller and
//! the async driver around it.

pub mod controller;
pub mod event;
pub mod reactor;
pub mod speech;
pub mod state;
pub mod telemetry;
pub mod time;
pub mod timer;

pub use controller::SessionController;
pub use event::{RecognitionEvent, SessionEvent, SessionNotice, SynthesisEvent};
pub use reactor::{Reactor, Turn};
pub use state::{SessionPhase, SessionStatus};
pub use time::{Tick, TICK_MS};
