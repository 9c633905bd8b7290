//! Voice command interpretation: transcript -> structured shopping intent.

pub mod classifier;
pub mod extract;
pub mod fuzzy;
pub mod resolver;
pub mod rules;
pub mod types;

pub use classifier::{classify, CommandClassifier};
pub use resolver::{MatchTier, ProductResolver};
pub use types::{Action, IntentParameters, IntentResult};
