use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Search,
    Add,
    Remove,
    Checkout,
    Describe,
    Contrast,
    Emergency,
    Cart,
    Help,
    Unknown,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Search => "search",
            Action::Add => "add",
            Action::Remove => "remove",
            Action::Checkout => "checkout",
            Action::Describe => "describe",
            Action::Contrast => "contrast",
            Action::Emergency => "emergency",
            Action::Cart => "cart",
            Action::Help => "help",
            Action::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IntentParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<CatalogEntry>,
    /// Always >= 1 when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contrast_mode: Option<bool>,
}

/// Classifier output for one transcript. Consumed once by the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentResult {
    pub raw_command: String,
    pub action: Action,
    pub parameters: IntentParameters,
    pub spoken_response: String,
}

impl IntentResult {
    pub fn new(raw_command: &str, action: Action, response: impl Into<String>) -> Self {
        Self {
            raw_command: raw_command.to_string(),
            action,
            parameters: IntentParameters::default(),
            spoken_response: response.into(),
        }
    }

    pub fn with_parameters(mut self, parameters: IntentParameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn product(&self) -> Option<&CatalogEntry> {
        self.parameters.product.as_ref()
    }

    pub fn quantity(&self) -> u32 {
        self.parameters.quantity.unwrap_or(1)
    }
}
