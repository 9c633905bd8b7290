use tracing::{debug, info};

use super::resolver::ProductResolver;
use super::rules::{unknown, Utterance, RULES};
use super::types::IntentResult;
use crate::catalog::CatalogEntry;
use crate::config::ResolverConfig;

/// Maps a transcript to a shopping intent against a catalog snapshot.
///
/// Pure: the same (transcript, catalog) pair always yields the same result and
/// nothing is mutated. Unmatched input degrades to `Action::Unknown`.
#[derive(Debug, Clone, Default)]
pub struct CommandClassifier {
    resolver: ProductResolver,
}

impl CommandClassifier {
    pub fn new(config: ResolverConfig) -> Self {
        Self {
            resolver: ProductResolver::new(config),
        }
    }

    pub fn resolver(&self) -> &ProductResolver {
        &self.resolver
    }

    pub fn classify(&self, transcript: &str, catalog: &[CatalogEntry]) -> IntentResult {
        let utterance = Utterance::new(transcript, catalog, &self.resolver);

        for rule in RULES {
            if !(rule.matches)(&utterance.text) {
                continue;
            }
            match (rule.build)(&utterance) {
                Some(result) => {
                    info!(
                        "Classified '{}' via {} -> {}",
                        utterance.text,
                        rule.name,
                        result.action.as_str()
                    );
                    return result;
                }
                None => debug!("Rule {} ({:?}) declined '{}'", rule.name, rule.action, utterance.text),
            }
        }

        info!("Classified '{}' -> unknown", utterance.text);
        unknown(&utterance.text)
    }
}

/// Classify with the default resolver settings.
pub fn classify(transcript: &str, catalog: &[CatalogEntry]) -> IntentResult {
    CommandClassifier::default().classify(transcript, catalog)
}
