//! Applies classified intents to the shopping session. The classifier never
//! mutates anything; this is where intents take effect.

pub mod cart;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use cart::{Cart, CartLine};

use crate::catalog::{CatalogEntry, CatalogProvider, ProductId};
use crate::intent::{Action, IntentResult};

pub const EMPTY_CHECKOUT_RESPONSE: &str =
    "Your cart is empty. Please add items before checking out.";

/// What the shopper is looking at.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum View {
    #[default]
    Home,
    Browse {
        category: Option<String>,
        query: Option<String>,
        results: Vec<CatalogEntry>,
    },
    Cart,
    Checkout,
}

/// Effect of one intent on the session.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Results { count: usize },
    Added { id: ProductId, quantity: u32 },
    Removed { id: ProductId, quantity: u32 },
    NotInCart { id: ProductId },
    ShowCart { items: u32, total: Decimal },
    Checkout { total: Decimal },
    CheckoutEmpty,
    ContrastChanged(bool),
    EmergencyRaised,
    NoChange,
}

impl DispatchOutcome {
    /// Replacement for the intent's own spoken response, when the outcome
    /// contradicts it.
    pub fn announcement(&self) -> Option<&'static str> {
        match self {
            DispatchOutcome::CheckoutEmpty => Some(EMPTY_CHECKOUT_RESPONSE),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShoppingSession {
    pub cart: Cart,
    pub view: View,
    pub high_contrast: bool,
    pub emergency_requested: bool,
}

impl ShoppingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, intent: &IntentResult, catalog: &dyn CatalogProvider) -> DispatchOutcome {
        let params = &intent.parameters;
        let outcome = match intent.action {
            Action::Search => {
                let results = match (&params.category, &params.query) {
                    (Some(category), _) => catalog.find_by_category(category),
                    (None, Some(query)) => catalog.find_by_name(query),
                    (None, None) => catalog.get_all(),
                };
                let count = results.len();
                self.view = View::Browse {
                    category: params.category.clone(),
                    query: params.query.clone(),
                    results,
                };
                DispatchOutcome::Results { count }
            }
            Action::Add => match intent.product() {
                Some(product) => {
                    let quantity = intent.quantity();
                    self.cart.add(product, quantity);
                    DispatchOutcome::Added {
                        id: product.id,
                        quantity,
                    }
                }
                None => DispatchOutcome::NoChange,
            },
            Action::Remove => match intent.product() {
                Some(product) => match self.cart.remove(product.id, params.quantity) {
                    0 => DispatchOutcome::NotInCart { id: product.id },
                    quantity => DispatchOutcome::Removed {
                        id: product.id,
                        quantity,
                    },
                },
                None => DispatchOutcome::NoChange,
            },
            Action::Checkout if self.cart.is_empty() => DispatchOutcome::CheckoutEmpty,
            Action::Checkout => {
                self.view = View::Checkout;
                DispatchOutcome::Checkout {
                    total: self.cart.total(),
                }
            }
            Action::Cart => {
                self.view = View::Cart;
                DispatchOutcome::ShowCart {
                    items: self.cart.item_count(),
                    total: self.cart.total(),
                }
            }
            Action::Contrast => {
                self.high_contrast = params.contrast_mode.unwrap_or(true);
                DispatchOutcome::ContrastChanged(self.high_contrast)
            }
            Action::Emergency => {
                self.emergency_requested = true;
                DispatchOutcome::EmergencyRaised
            }
            Action::Describe | Action::Help | Action::Unknown => DispatchOutcome::NoChange,
        };

        match &outcome {
            DispatchOutcome::NoChange => debug!("{} left the session unchanged", intent.action.as_str()),
            other => info!("Dispatched {}: {:?}", intent.action.as_str(), other),
        }
        outcome
    }
}
