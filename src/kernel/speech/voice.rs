use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voice {
    pub name: String,
    pub lang: String,
}

impl Voice {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
        }
    }
}

/// Preferred name match first (in preference order), then the first English
/// voice, then whatever comes first.
pub fn select_voice(voices: &[Voice], preferred: &[String]) -> Option<Voice> {
    preferred
        .iter()
        .find_map(|want| voices.iter().find(|v| v.name.contains(want.as_str())))
        .or_else(|| voices.iter().find(|v| v.lang.to_lowercase().starts_with("en")))
        .or_else(|| voices.first())
        .cloned()
}
