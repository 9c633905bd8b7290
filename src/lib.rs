pub mod catalog;
pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod intent;
pub mod kernel;

pub use catalog::{CatalogEntry, CatalogProvider, StaticCatalog};
pub use config::VoiceConfig;
pub use error::{Result, VoiceError};
pub use intent::{classify, Action, CommandClassifier, IntentResult};
pub use kernel::reactor::Reactor;
pub use kernel::SessionController;
