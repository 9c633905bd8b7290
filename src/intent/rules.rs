//! Ordered intent rule table.
//!
//! Each rule is a cheap predicate on the normalized utterance plus a builder.
//! Rules are tried top to bottom; a builder returning `None` falls through to
//! the next rule, so adding a rule never reorders the existing ones.

use regex::Regex;
use std::sync::LazyLock;

use super::extract::{self, QuantityHint};
use super::fuzzy::singular;
use super::resolver::ProductResolver;
use super::types::{Action, IntentParameters, IntentResult};
use crate::catalog::store::matching_query;
use crate::catalog::{CatalogEntry, ALL_CATEGORIES};

static EMERGENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"emergency|help me now").expect("valid emergency regex"));
static CART_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:cart|basket|shopping bag)\b|\b(?:show|open|go to) (?:my )?(?:cart|basket)\b")
        .expect("valid cart regex")
});
static CART_VERB_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:add|remove|delete)\b").expect("valid verb regex"));
static CONTRAST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"high contrast|contrast mode|toggle contrast").expect("valid contrast regex")
});
static NEGATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:off|disable|remove)\b").expect("valid negation regex"));
static DESCRIBE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"describe|tell me about|what is|details of").expect("valid describe regex")
});
static SEARCH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"search for|\bfind\b|look for").expect("valid search regex"));
static BROWSE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bshow\b").expect("valid browse regex"));
static ADD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\badd\b").expect("valid add regex"));
static DEMONSTRATIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\badd (?:this|these|it|them)\b").expect("valid demonstrative regex"));
static REMOVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:remove|delete)\b").expect("valid remove regex"));
static CHECKOUT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:check ?out|pay|purchas|buy)").expect("valid checkout regex")
});
static HELP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bhelp\b").expect("valid help regex"));

/// Short product words checked before fuzzy matching.
const COMMON_ITEMS: &[&str] = &["apple", "banana", "milk", "bread", "egg", "cheese", "yogurt"];

const WILDCARD_CATEGORIES: &[&str] = &["all", "all products", "everything"];

pub const UNKNOWN_RESPONSE: &str = "I didn't understand that command. Try saying 'help' to see what I can do.";

const HELP_RESPONSE: &str = "You can say things like: search for apples, or show me dairy products. \
Say describe apples to hear product details. \
Say add 3 apples to my cart, or remove bananas from my cart. \
Say go to cart to open your shopping cart. \
Say toggle high contrast mode for better visibility. \
Say emergency to call our helpline immediately, or checkout to complete your purchase.";

/// Everything a rule may look at for one transcript.
pub struct Utterance<'a> {
    /// Lowercased and trimmed transcript.
    pub text: String,
    pub quantity: QuantityHint,
    pub catalog: &'a [CatalogEntry],
    pub resolver: &'a ProductResolver,
}

impl<'a> Utterance<'a> {
    pub fn new(transcript: &str, catalog: &'a [CatalogEntry], resolver: &'a ProductResolver) -> Self {
        let text = transcript.trim().to_lowercase();
        let quantity = extract::quantity_and_hint(&text);
        Self {
            text,
            quantity,
            catalog,
            resolver,
        }
    }

    fn reply(&self, action: Action, response: impl Into<String>) -> IntentResult {
        IntentResult::new(&self.text, action, response)
    }
}

pub struct Rule {
    pub name: &'static str,
    pub action: Action,
    pub matches: fn(&str) -> bool,
    pub build: fn(&Utterance<'_>) -> Option<IntentResult>,
}

/// Priority order is significant.
pub static RULES: &[Rule] = &[
    Rule {
        name: "emergency",
        action: Action::Emergency,
        matches: |t| EMERGENCY_RE.is_match(t),
        build: build_emergency,
    },
    Rule {
        name: "cart",
        action: Action::Cart,
        matches: |t| CART_RE.is_match(t) && !CART_VERB_RE.is_match(t),
        build: build_cart,
    },
    Rule {
        name: "contrast",
        action: Action::Contrast,
        matches: |t| CONTRAST_RE.is_match(t),
        build: build_contrast,
    },
    Rule {
        name: "describe",
        action: Action::Describe,
        matches: |t| DESCRIBE_RE.is_match(t),
        build: build_describe,
    },
    Rule {
        name: "search",
        action: Action::Search,
        matches: |t| SEARCH_RE.is_match(t),
        build: build_search,
    },
    Rule {
        name: "browse",
        action: Action::Search,
        matches: |t| BROWSE_RE.is_match(t),
        build: build_browse,
    },
    Rule {
        name: "add",
        action: Action::Add,
        matches: |t| ADD_RE.is_match(t),
        build: build_add,
    },
    Rule {
        name: "remove",
        action: Action::Remove,
        matches: |t| REMOVE_RE.is_match(t),
        build: build_remove,
    },
    Rule {
        name: "checkout",
        action: Action::Checkout,
        matches: |t| CHECKOUT_RE.is_match(t),
        build: build_checkout,
    },
    Rule {
        name: "help",
        action: Action::Help,
        matches: |t| HELP_RE.is_match(t),
        build: build_help,
    },
];

pub fn unknown(text: &str) -> IntentResult {
    IntentResult::new(text, Action::Unknown, UNKNOWN_RESPONSE)
}

fn build_emergency(u: &Utterance<'_>) -> Option<IntentResult> {
    Some(u.reply(
        Action::Emergency,
        "Calling helpline number. Please stay on the line for immediate assistance.",
    ))
}

fn build_cart(u: &Utterance<'_>) -> Option<IntentResult> {
    Some(u.reply(Action::Cart, "Opening your shopping cart."))
}

fn build_contrast(u: &Utterance<'_>) -> Option<IntentResult> {
    let enable = !NEGATION_RE.is_match(&u.text);
    let response = if enable {
        "High contrast mode enabled."
    } else {
        "High contrast mode disabled."
    };
    Some(u.reply(Action::Contrast, response).with_parameters(IntentParameters {
        contrast_mode: Some(enable),
        ..Default::default()
    }))
}

fn build_describe(u: &Utterance<'_>) -> Option<IntentResult> {
    let target = extract::describe_target(&u.text);
    let found = u.resolver.resolve(&target, u.catalog, None);

    match found {
        Some(product) => Some(
            u.reply(
                Action::Describe,
                format!(
                    "{}: {} Price: ${}.",
                    product.name, product.description, product.price
                ),
            )
            .with_parameters(IntentParameters {
                product: Some(product.clone()),
                ..Default::default()
            }),
        ),
        None => Some(u.reply(
            Action::Unknown,
            "I couldn't find information about that product. Try searching for it first.",
        )),
    }
}

fn build_search(u: &Utterance<'_>) -> Option<IntentResult> {
    let query = extract::search_query(&u.text)?;
    let hits = matching_query(u.catalog, &query).len();
    let category = u.resolver.resolve_category(&query, u.catalog).map(str::to_string);

    let response = if hits > 0 {
        format!("I found {} products matching \"{}\".", hits, query)
    } else {
        format!("Sorry, I couldn't find any products matching \"{}\".", query)
    };
    Some(u.reply(Action::Search, response).with_parameters(IntentParameters {
        query: Some(query),
        category,
        ..Default::default()
    }))
}

fn build_browse(u: &Utterance<'_>) -> Option<IntentResult> {
    let spoken = extract::browse_category(&u.text)?;

    if WILDCARD_CATEGORIES.contains(&spoken.as_str()) {
        return Some(
            u.reply(Action::Search, "Showing all products.")
                .with_parameters(IntentParameters {
                    category: Some(ALL_CATEGORIES.to_string()),
                    ..Default::default()
                }),
        );
    }

    let category = u
        .resolver
        .resolve_category(&spoken, u.catalog)
        .map(str::to_string)
        .unwrap_or_else(|| spoken.clone());
    Some(
        u.reply(Action::Search, format!("Showing {} products.", spoken))
            .with_parameters(IntentParameters {
                category: Some(category),
                ..Default::default()
            }),
    )
}

fn build_add(u: &Utterance<'_>) -> Option<IntentResult> {
    if let Some(product) = resolve_product(u) {
        let quantity = u.quantity.quantity;
        return Some(
            u.reply(
                Action::Add,
                format!("Added {} {} to your cart.", quantity, product.name),
            )
            .with_parameters(IntentParameters {
                product: Some(product.clone()),
                quantity: Some(quantity),
                ..Default::default()
            }),
        );
    }

    if DEMONSTRATIVE_RE.is_match(&u.text) {
        return Some(u.reply(
            Action::Add,
            "Please select a specific product to add to your cart.",
        ));
    }
    None
}

fn build_remove(u: &Utterance<'_>) -> Option<IntentResult> {
    let product = resolve_product(u)?;
    Some(
        u.reply(
            Action::Remove,
            format!("Removed {} from your cart.", product.name),
        )
        .with_parameters(IntentParameters {
            product: Some(product.clone()),
            // Without a number the whole line goes.
            quantity: extract::explicit_quantity(&u.text).map(|_| u.quantity.quantity),
            ..Default::default()
        }),
    )
}

fn build_checkout(u: &Utterance<'_>) -> Option<IntentResult> {
    Some(u.reply(Action::Checkout, "Taking you to checkout."))
}

fn build_help(u: &Utterance<'_>) -> Option<IntentResult> {
    Some(u.reply(Action::Help, HELP_RESPONSE))
}

/// Product binding for add/remove: the quantity hint first, then names found
/// verbatim in the cleaned command, then common grocery words, then the full
/// resolver (fuzzy included) on the cleaned command.
fn resolve_product<'a>(u: &Utterance<'a>) -> Option<&'a CatalogEntry> {
    let resolver = u.resolver;
    let catalog = u.catalog;

    let hint = &u.quantity.hint;
    if !hint.is_empty() {
        let cleaned_hint = extract::clean_command(hint);
        if let Some(p) = resolver
            .resolve(hint, catalog, None)
            .or_else(|| resolver.resolve(&cleaned_hint, catalog, None))
        {
            return Some(p);
        }
    }

    let cleaned = extract::clean_command(&u.text);
    if cleaned.is_empty() {
        return None;
    }

    let direct = catalog.iter().find(|p| {
        let name = p.name_lower();
        !name.is_empty() && (cleaned.contains(&name) || cleaned.contains(singular(&name)))
    });
    if direct.is_some() {
        return direct;
    }

    for item in COMMON_ITEMS {
        if !cleaned.contains(item) {
            continue;
        }
        let plural = format!("{}s", item);
        let found = catalog.iter().find(|p| {
            let name = p.name_lower();
            name == *item || name == plural || name.contains(item)
        });
        if found.is_some() {
            return found;
        }
    }

    resolver.resolve(&cleaned, catalog, None)
}
