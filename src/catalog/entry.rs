use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type ProductId = u32;

/// One product as supplied by the catalog provider. Never mutated by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: ProductId,
    pub name: String,
    pub price: Decimal,
    pub category: String,
    pub description: String,
}

impl CatalogEntry {
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Decimal,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            category: category.into(),
            description: description.into(),
        }
    }

    pub fn name_lower(&self) -> String {
        self.name.to_lowercase()
    }

    pub fn category_lower(&self) -> String {
        self.category.to_lowercase()
    }
}
