//! Parameter extraction shared by the classifier rules.

use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

/// Leading integer followed by a word run: "3 green apples".
static QUANTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s+([a-z][a-z\s'&-]*)").expect("valid quantity regex"));

static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid number regex"));

static DESCRIBE_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"describe\s+(?:the\s+)?(.+?)(?:\s+to me|\s+for me)?$",
        r"tell me about\s+(?:the\s+)?(.+?)(?:\s+please|\s+now|\?)?$",
        r"what is\s+(?:a\s+)?(?:the\s+)?(.+?)\??$",
        r"details of\s+(?:the\s+)?(.+?)(?:\s+please|\s+now|\?)?$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid describe regex"))
    .collect()
});

const DESCRIBE_PHRASES: &[&str] = &["describe", "tell me about", "what is", "details of"];

static SEARCH_RES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"search for (.*?)(?: in| from| please| now|\?|$)",
        r"find (.*?)(?: in| from| please| now|\?|$)",
        r"look for (.*?)(?: in| from| please| now|\?|$)",
        r"show me (.*?)(?: please| now|\?|$)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid search regex"))
    .collect()
});

static BROWSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bshow (?:me )?(.*?)(?: products)?$").expect("valid browse regex"));

static DESCRIBE_FILLER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:a|an|the|this|these|those|please|some)\b").expect("valid filler regex")
});

static COMMAND_FILLER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:to|from|the|my|cart|basket|add|remove|delete|please|this|these|those|it|them|some|of)\b")
        .expect("valid filler regex")
});

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Quantity and product-name hint pulled from one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityHint {
    pub quantity: u32,
    pub hint: String,
}

/// A leading integer is taken as the quantity even when it belongs to the
/// product name ("7 grain bread"). Defaults to 1; never returns 0.
pub fn quantity_and_hint(text: &str) -> QuantityHint {
    if let Some(caps) = QUANTITY_RE.captures(text) {
        let quantity = parse_count(&caps[1]);
        return QuantityHint {
            quantity,
            hint: caps[2].trim().to_string(),
        };
    }

    let quantity = NUMBER_RE.find(text).map_or(1, |m| parse_count(m.as_str()));
    QuantityHint {
        quantity,
        hint: String::new(),
    }
}

/// The first number spoken, if any.
pub fn explicit_quantity(text: &str) -> Option<u32> {
    NUMBER_RE.find(text).map(|m| parse_count(m.as_str()))
}

/// Parses a run of digits, saturating at `u32::MAX`. Never returns 0.
fn parse_count(digits: &str) -> u32 {
    match digits.parse::<u32>() {
        Ok(n) => n.max(1),
        Err(_) => {
            warn!("Spoken quantity {} out of range, capped at {}", digits, u32::MAX);
            u32::MAX
        }
    }
}

/// Product fragment named by a describe request, filler words removed.
pub fn describe_target(text: &str) -> String {
    for re in DESCRIBE_RES.iter() {
        if let Some(caps) = re.captures(text) {
            if let Some(m) = caps.get(1) {
                return collapse(&DESCRIBE_FILLER_RE.replace_all(m.as_str(), ""));
            }
        }
    }

    for phrase in DESCRIBE_PHRASES {
        if let Some(idx) = text.find(phrase) {
            return text[idx + phrase.len()..].trim().to_string();
        }
    }
    String::new()
}

/// Search query after "search for" / "find" / "look for", up to a stop word.
pub fn search_query(text: &str) -> Option<String> {
    SEARCH_RES
        .iter()
        .filter_map(|re| re.captures(text))
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
        .find(|q| !q.is_empty())
}

/// Category named by "show (me) X (products)".
pub fn browse_category(text: &str) -> Option<String> {
    BROWSE_RE
        .captures(text)
        .and_then(|caps| caps.get(1).map(|m| m.as_str().trim().to_string()))
        .filter(|c| !c.is_empty())
}

/// Command text with verbs, pronouns, cart words and the first number removed.
pub fn clean_command(text: &str) -> String {
    let stripped = COMMAND_FILLER_RE.replace_all(text, "");
    let stripped = NUMBER_RE.replace(&stripped, "");
    collapse(&stripped)
}

fn collapse(text: &str) -> String {
    WHITESPACE_RE.replace_all(text.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_defaults_to_one() {
        let q = quantity_and_hint("add apples");
        assert_eq!(q.quantity, 1);
        assert!(q.hint.is_empty());
    }

    #[test]
    fn test_quantity_with_hint() {
        let q = quantity_and_hint("add 3 green apples to my cart");
        assert_eq!(q.quantity, 3);
        assert_eq!(q.hint, "green apples to my cart");
    }

    #[test]
    fn test_zero_quantity_is_clamped() {
        assert_eq!(quantity_and_hint("add 0 milk").quantity, 1);
    }

    #[test]
    fn test_oversized_quantity_saturates() {
        let q = quantity_and_hint("add 99999999999 milk");
        assert_eq!(q.quantity, u32::MAX);
        assert_eq!(q.hint, "milk");
        assert_eq!(explicit_quantity("remove 99999999999 milk"), Some(u32::MAX));
    }

    #[test]
    fn test_describe_target_strips_filler() {
        assert_eq!(describe_target("describe the apples to me"), "apples");
        assert_eq!(describe_target("what is a broccoli?"), "broccoli");
        assert_eq!(describe_target("tell me about these carrots please"), "carrots");
    }

    #[test]
    fn test_search_query_stops_at_stop_word() {
        assert_eq!(search_query("search for milk in dairy"), Some("milk".to_string()));
        assert_eq!(search_query("find bread please"), Some("bread".to_string()));
        assert_eq!(search_query("find"), None);
    }

    #[test]
    fn test_clean_command() {
        assert_eq!(clean_command("add 3 apples to my cart"), "apples");
        assert_eq!(clean_command("add it"), "");
    }
}
