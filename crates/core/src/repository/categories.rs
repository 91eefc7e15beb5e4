use std::sync::Arc;

use chrono::Utc;

use crate::catalog::{Category, CategoryInput, CategoryPatch};
use crate::storage::{keys, CatalogRow, EntityKind, Result, StorageError, StorageGateway};

use super::into_category;

/// CRUD over category rows. Mirror of
/// [`ProductRepository`](super::ProductRepository).
#[derive(Clone)]
pub struct CategoryRepository {
    gateway: Arc<dyn StorageGateway>,
}

impl CategoryRepository {
    pub fn new(gateway: Arc<dyn StorageGateway>) -> Self {
        Self { gateway }
    }

    /// Creates a category and returns the canonical stored form.
    pub async fn create(&self, store_id: &str, input: CategoryInput) -> Result<Category> {
        input.validate()?;

        let category = Category::new(store_id, input.name);
        let id = category.id.clone();

        self.gateway.put(CatalogRow::Category(category)).await?;
        self.read(store_id, &id).await
    }

    /// Applies a partial update and returns the canonical stored form.
    pub async fn update(
        &self,
        store_id: &str,
        id: &str,
        patch: CategoryPatch,
    ) -> Result<Category> {
        patch.validate()?;

        let mut category = self.read(store_id, id).await?;
        patch.apply_to(&mut category);
        category.updated_at = Utc::now();

        self.gateway.put(CatalogRow::Category(category)).await?;
        self.read(store_id, id).await
    }

    /// All categories of a store, in sort-key order. Empty when none exist.
    pub async fn list(&self, store_id: &str) -> Result<Vec<Category>> {
        let rows = self
            .gateway
            .query_by_prefix(&keys::store_pk(store_id), keys::CATEGORY_PREFIX)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| match row {
                CatalogRow::Category(category) => Some(category),
                _ => None,
            })
            .collect())
    }

    async fn read(&self, store_id: &str, id: &str) -> Result<Category> {
        let key = keys::entity_key(store_id, EntityKind::Category, id);
        match self.gateway.get(&key).await? {
            Some(row) => into_category(row),
            None => Err(StorageError::NotFound {
                entity_type: "Category",
                id: id.to_string(),
            }),
        }
    }
}
