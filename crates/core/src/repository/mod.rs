//! Repositories over the storage gateway.
//!
//! [`ProductRepository`] and [`CategoryRepository`] cover single-entity CRUD;
//! [`AssociationManager`] owns the bidirectional link records and the
//! hydration read path. All three depend only on the key encoder and the
//! [`StorageGateway`](crate::storage::StorageGateway) trait.

mod associations;
mod categories;
mod products;

pub use associations::AssociationManager;
pub use categories::CategoryRepository;
pub use products::ProductRepository;

use crate::catalog::{Category, Product};
use crate::storage::{CatalogRow, Result, StorageError};

/// Narrows a row to a product, failing on any other shape.
pub(crate) fn into_product(row: CatalogRow) -> Result<Product> {
    match row {
        CatalogRow::Product(product) => Ok(product),
        other => Err(StorageError::InvalidData(format!(
            "expected a Product row, found {}",
            other.entity_name()
        ))),
    }
}

/// Narrows a row to a category, failing on any other shape.
pub(crate) fn into_category(row: CatalogRow) -> Result<Category> {
    match row {
        CatalogRow::Category(category) => Ok(category),
        other => Err(StorageError::InvalidData(format!(
            "expected a Category row, found {}",
            other.entity_name()
        ))),
    }
}
