//! Product catalog: the read-only snapshot the classifier resolves against.

pub mod entry;
pub mod store;

pub use entry::{CatalogEntry, ProductId};
pub use store::{CatalogProvider, StaticCatalog, ALL_CATEGORIES};
