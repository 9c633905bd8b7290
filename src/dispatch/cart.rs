use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogEntry, ProductId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: CatalogEntry,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Lines keep insertion order; one line per product id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` units, merging with an existing line.
    pub fn add(&mut self, product: &CatalogEntry, quantity: u32) {
        let quantity = quantity.max(1);
        match self.lines.iter_mut().find(|l| l.product.id == product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity),
            None => self.lines.push(CartLine {
                product: product.clone(),
                quantity,
            }),
        }
    }

    /// Takes `quantity` units off the line, or the whole line for `None`.
    /// Returns how many units were removed.
    pub fn remove(&mut self, id: ProductId, quantity: Option<u32>) -> u32 {
        let Some(idx) = self.lines.iter().position(|l| l.product.id == id) else {
            return 0;
        };
        let held = self.lines[idx].quantity;
        let taken = quantity.map_or(held, |q| q.min(held));
        if taken == held {
            self.lines.remove(idx);
        } else {
            self.lines[idx].quantity -= taken;
        }
        taken
    }

    pub fn quantity_of(&self, id: ProductId) -> u32 {
        self.lines
            .iter()
            .find(|l| l.product.id == id)
            .map_or(0, |l| l.quantity)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().fold(0u32, |n, l| n.saturating_add(l.quantity))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
