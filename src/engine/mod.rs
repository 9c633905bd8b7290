//! Engine seams. The controller only ever talks to recognition and synthesis
//! through these traits; results come back as `SessionEvent`s.

pub mod console;
pub mod mock;
pub mod say;

use crate::error::Result;
use crate::kernel::speech::{UtteranceUnit, Voice};

pub trait RecognitionEngine {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Begin a recognition session. An `End` event follows every session,
    /// whether or not `stop` was called.
    fn start(&mut self) -> Result<()>;

    fn stop(&mut self);

    fn dispose(&mut self) {}
}

pub trait SynthesisEngine {
    fn init(&mut self) -> Result<()> {
        Ok(())
    }

    /// Play one unit. Completion is reported as `Finished(unit.id)` or
    /// `Failed { id, .. }`.
    fn speak(&mut self, unit: &UtteranceUnit) -> Result<()>;

    /// Stop playback and drop anything the engine queued itself.
    fn cancel_all(&mut self);

    fn list_available_voices(&self) -> Vec<Voice> {
        Vec::new()
    }

    fn dispose(&mut self) {}
}

pub use console::{ConsoleSynthesizer, StdinRecognizer};
pub use mock::{ScriptedRecognizer, ScriptedSynthesizer};
pub use say::SayCommandSynthesizer;
