//! Catalog domain types and request payloads.

mod requests;
mod types;

pub use requests::{CategoryInput, CategoryPatch, ProductInput, ProductPatch};
pub use types::{AssociationPair, Category, Product, ProductCategory};
