use std::sync::Arc;

use chrono::Utc;

use crate::catalog::{Product, ProductInput, ProductPatch};
use crate::storage::{keys, CatalogRow, EntityKind, Result, StorageError, StorageGateway};

use super::into_product;

/// CRUD over product rows.
#[derive(Clone)]
pub struct ProductRepository {
    gateway: Arc<dyn StorageGateway>,
}

impl ProductRepository {
    pub fn new(gateway: Arc<dyn StorageGateway>) -> Self {
        Self { gateway }
    }

    /// Creates a product and returns the canonical stored form.
    ///
    /// The row is re-read after the write so the returned value reflects
    /// exactly what the store now holds.
    pub async fn create(&self, store_id: &str, input: ProductInput) -> Result<Product> {
        input.validate()?;

        let product = Product::new(store_id, input.name);
        let id = product.id.clone();

        self.gateway.put(CatalogRow::Product(product)).await?;
        self.read(store_id, &id).await
    }

    /// Applies a partial update and returns the canonical stored form.
    ///
    /// Fields absent from the patch retain their prior values; `updated_at`
    /// is refreshed. Fails with `NotFound` when no row exists — a partial
    /// upsert is never created.
    pub async fn update(&self, store_id: &str, id: &str, patch: ProductPatch) -> Result<Product> {
        patch.validate()?;

        let mut product = self.read(store_id, id).await?;
        patch.apply_to(&mut product);
        product.updated_at = Some(Utc::now());

        self.gateway.put(CatalogRow::Product(product)).await?;
        self.read(store_id, id).await
    }

    /// All products of a store, in sort-key order. Empty when none exist.
    pub async fn list(&self, store_id: &str) -> Result<Vec<Product>> {
        let rows = self
            .gateway
            .query_by_prefix(&keys::store_pk(store_id), keys::PRODUCT_PREFIX)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| match row {
                CatalogRow::Product(product) => Some(product),
                _ => None,
            })
            .collect())
    }

    async fn read(&self, store_id: &str, id: &str) -> Result<Product> {
        let key = keys::entity_key(store_id, EntityKind::Product, id);
        match self.gateway.get(&key).await? {
            Some(row) => into_product(row),
            None => Err(StorageError::NotFound {
                entity_type: "Product",
                id: id.to_string(),
            }),
        }
    }
}
