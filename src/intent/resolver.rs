use tracing::debug;

use super::fuzzy::{distance, singular};
use crate::catalog::CatalogEntry;
use crate::config::ResolverConfig;

/// Irregular or explicitly enumerated singular/plural pairs.
const VARIANTS: &[(&str, &str)] = &[
    ("apple", "apples"),
    ("banana", "bananas"),
    ("tomato", "tomatoes"),
    ("potato", "potatoes"),
    ("strawberry", "strawberries"),
    ("berry", "berries"),
    ("cherry", "cherries"),
    ("avocado", "avocados"),
    ("egg", "eggs"),
    ("onion", "onions"),
    ("carrot", "carrots"),
    ("peach", "peaches"),
    ("loaf", "loaves"),
];

/// Which tier bound a fragment. Useful for logs and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Exact,
    Substring,
    Variant,
    Category,
    Fuzzy,
}

/// Resolves a noisy product fragment to a catalog entry.
///
/// Tiers run in priority order over the whole catalog: exact name, substring,
/// plural variant, category, then bounded edit distance. The first tier that
/// produces a hit wins and ties inside a tier go to catalog order.
#[derive(Debug, Clone, Default)]
pub struct ProductResolver {
    config: ResolverConfig,
}

impl ProductResolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn fuzzy_ceiling(&self) -> usize {
        self.config.fuzzy_ceiling
    }

    pub fn resolve<'a>(
        &self,
        fragment: &str,
        catalog: &'a [CatalogEntry],
        category_hint: Option<&str>,
    ) -> Option<&'a CatalogEntry> {
        self.resolve_with_tier(fragment, catalog, category_hint)
            .map(|(entry, _)| entry)
    }

    pub fn resolve_with_tier<'a>(
        &self,
        fragment: &str,
        catalog: &'a [CatalogEntry],
        category_hint: Option<&str>,
    ) -> Option<(&'a CatalogEntry, MatchTier)> {
        let fragment = fragment.trim().to_lowercase();
        if fragment.is_empty() {
            return None;
        }

        let hint = category_hint.map(|c| c.trim().to_lowercase());
        let candidates: Vec<&CatalogEntry> = catalog
            .iter()
            .filter(|p| match &hint {
                Some(c) => &p.category_lower() == c,
                None => true,
            })
            .collect();

        let hit = exact(&fragment, &candidates)
            .map(|p| (p, MatchTier::Exact))
            .or_else(|| substring(&fragment, &candidates).map(|p| (p, MatchTier::Substring)))
            .or_else(|| variant(&fragment, &candidates).map(|p| (p, MatchTier::Variant)))
            .or_else(|| by_category(&fragment, &candidates).map(|p| (p, MatchTier::Category)))
            .or_else(|| {
                nearest(&fragment, &candidates, self.config.fuzzy_ceiling)
                    .map(|p| (p, MatchTier::Fuzzy))
            });

        if let Some((entry, tier)) = &hit {
            debug!("Resolved '{}' -> {} ({:?})", fragment, entry.name, tier);
        }
        hit
    }

    /// Catalog spelling of the category `fragment` refers to, if any.
    pub fn resolve_category<'a>(&self, fragment: &str, catalog: &'a [CatalogEntry]) -> Option<&'a str> {
        let fragment = fragment.trim().to_lowercase();
        if fragment.is_empty() {
            return None;
        }
        catalog
            .iter()
            .find(|p| {
                let category = p.category_lower();
                category == fragment || singular(&category) == singular(&fragment)
            })
            .map(|p| p.category.as_str())
    }
}

fn exact<'a>(fragment: &str, candidates: &[&'a CatalogEntry]) -> Option<&'a CatalogEntry> {
    let single = singular(fragment);
    candidates
        .iter()
        .copied()
        .find(|p| {
            let name = p.name_lower();
            name == fragment || name == single
        })
}

fn substring<'a>(fragment: &str, candidates: &[&'a CatalogEntry]) -> Option<&'a CatalogEntry> {
    candidates.iter().copied().find(|p| {
        let name = p.name_lower();
        !name.is_empty() && (fragment.contains(&name) || name.contains(fragment))
    })
}

fn variant<'a>(fragment: &str, candidates: &[&'a CatalogEntry]) -> Option<&'a CatalogEntry> {
    for &(one, many) in VARIANTS {
        if !(fragment.contains(one) || fragment.contains(many)) {
            continue;
        }
        let found = candidates.iter().copied().find(|p| {
            let name = p.name_lower();
            name.contains(one) || name.contains(many)
        });
        if found.is_some() {
            return found;
        }
    }
    None
}

fn by_category<'a>(fragment: &str, candidates: &[&'a CatalogEntry]) -> Option<&'a CatalogEntry> {
    candidates.iter().copied().find(|p| {
        let category = p.category_lower();
        if category.is_empty() {
            return false;
        }
        let single = singular(&category);
        fragment == category || fragment.contains(&category) || fragment == single || fragment.contains(single)
    })
}

fn nearest<'a>(fragment: &str, candidates: &[&'a CatalogEntry], ceiling: usize) -> Option<&'a CatalogEntry> {
    let mut best: Option<(&CatalogEntry, usize)> = None;
    for p in candidates.iter().copied() {
        let d = distance(fragment, &p.name_lower());
        // Strict less-than keeps the first minimum in catalog order.
        if best.map_or(true, |(_, best_d)| d < best_d) {
            best = Some((p, d));
        }
    }
    best.filter(|&(_, d)| d <= ceiling).map(|(p, _)| p)
}
