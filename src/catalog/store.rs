use rust_decimal::Decimal;
use std::path::Path;

use super::entry::CatalogEntry;
use crate::error::Result;

/// Wildcard category used by "show me everything".
pub const ALL_CATEGORIES: &str = "all";

/// Synchronous catalog access. The core only ever reads a snapshot.
pub trait CatalogProvider {
    fn get_all(&self) -> Vec<CatalogEntry>;

    /// Entries whose name, category or description contains `query`.
    fn find_by_name(&self, query: &str) -> Vec<CatalogEntry> {
        matching_query(&self.get_all(), query).into_iter().cloned().collect()
    }

    /// Entries of exactly `category`; `all` returns everything.
    fn find_by_category(&self, category: &str) -> Vec<CatalogEntry> {
        in_category(&self.get_all(), category).into_iter().cloned().collect()
    }
}

pub fn matching_query<'a>(entries: &'a [CatalogEntry], query: &str) -> Vec<&'a CatalogEntry> {
    let query = query.trim().to_lowercase();
    entries
        .iter()
        .filter(|p| {
            p.name_lower().contains(&query)
                || p.category_lower().contains(&query)
                || p.description.to_lowercase().contains(&query)
        })
        .collect()
}

pub fn in_category<'a>(entries: &'a [CatalogEntry], category: &str) -> Vec<&'a CatalogEntry> {
    let category = category.trim().to_lowercase();
    if category == ALL_CATEGORIES {
        return entries.iter().collect();
    }
    entries.iter().filter(|p| p.category_lower() == category).collect()
}

/// In-memory catalog backed by a fixed list.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: Vec<CatalogEntry>,
}

impl StaticCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(raw)?;
        Ok(Self::new(entries))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// The stock grocery list the demo binary ships with.
    pub fn demo() -> Self {
        let p = |id, name: &str, cents, category: &str, description: &str| {
            CatalogEntry::new(id, name, Decimal::new(cents, 2), category, description)
        };
        Self::new(vec![
            p(1, "Fresh Organic Apples", 299, "fruits", "Sweet and crisp organic apples, perfect for snacking or baking."),
            p(2, "Whole Wheat Bread", 349, "bakery", "Hearty whole wheat bread made with organic flour."),
            p(3, "Free Range Eggs", 499, "dairy", "Farm fresh free-range eggs from happy chickens."),
            p(4, "Organic Milk", 379, "dairy", "Creamy organic milk from grass-fed cows."),
            p(5, "Ripe Bananas", 199, "fruits", "Sweet and ripe bananas, perfect for smoothies or snacking."),
            p(6, "Fresh Tomatoes", 249, "vegetables", "Juicy red tomatoes perfect for salads and sauces."),
            p(7, "Greek Yogurt", 599, "dairy", "Creamy authentic Greek yogurt, high in protein."),
            p(8, "Organic Chicken Breast", 999, "meat", "Free-range organic chicken breast, perfect for healthy meals."),
            p(9, "Fresh Atlantic Salmon", 1299, "seafood", "Wild-caught Atlantic salmon, rich in omega-3."),
            p(10, "Baby Spinach", 329, "vegetables", "Fresh and tender baby spinach, perfect for salads and cooking."),
            p(11, "Sweet Potatoes", 279, "vegetables", "Nutritious sweet potatoes great for roasting or mashing."),
            p(12, "Avocados", 449, "fruits", "Ripe and creamy avocados, perfect for toast or guacamole."),
            p(13, "Brown Rice", 399, "grains", "Nutritious whole grain brown rice, high in fiber."),
            p(14, "Ground Beef", 799, "meat", "Lean ground beef perfect for burgers, meatballs, and more."),
            p(15, "Carrots", 199, "vegetables", "Fresh crisp carrots ideal for snacking, cooking, or juicing."),
            p(16, "Pasta", 249, "grains", "Italian semolina pasta, perfect for your favorite sauce."),
            p(17, "Onions", 149, "vegetables", "Sweet yellow onions essential for cooking and flavor."),
            p(18, "Cheddar Cheese", 599, "dairy", "Sharp cheddar cheese perfect for sandwiches, burgers, or snacking."),
            p(19, "Broccoli", 299, "vegetables", "Fresh broccoli florets packed with vitamins and nutrients."),
            p(20, "Strawberries", 499, "fruits", "Sweet juicy strawberries, perfect for desserts or smoothies."),
        ])
    }
}

impl CatalogProvider for StaticCatalog {
    fn get_all(&self) -> Vec<CatalogEntry> {
        self.entries.clone()
    }
}
