use std::sync::Arc;

use chrono::Utc;

use crate::catalog::{AssociationPair, Category, Product, ProductCategory};
use crate::storage::{
    keys, CatalogRow, EntityKind, ItemKey, LinkDirection, Result, StorageError, StorageGateway,
    WriteOp,
};

/// Owns the bidirectional product-category link records.
///
/// A link exists as exactly two physical rows or none; both are written and
/// deleted inside one transactional batch, so no reader ever observes a
/// half-linked state.
#[derive(Clone)]
pub struct AssociationManager {
    gateway: Arc<dyn StorageGateway>,
}

impl AssociationManager {
    pub fn new(gateway: Arc<dyn StorageGateway>) -> Self {
        Self { gateway }
    }

    /// Links a product and a category, then returns both entities.
    ///
    /// Re-associating an existing pair overwrites its creation timestamp.
    /// Either side of the returned pair is absent when its entity row does
    /// not exist; the link is created regardless.
    pub async fn associate(
        &self,
        store_id: &str,
        product_id: &str,
        category_id: &str,
    ) -> Result<AssociationPair> {
        // One timestamp, shared by both physical rows of the pair.
        let link = ProductCategory::new(product_id, category_id, Utc::now());

        self.gateway
            .transact_write(vec![
                WriteOp::Put(CatalogRow::Link {
                    direction: LinkDirection::ProductToCategory,
                    link: link.clone(),
                }),
                WriteOp::Put(CatalogRow::Link {
                    direction: LinkDirection::CategoryToProduct,
                    link,
                }),
            ])
            .await?;

        self.fetch_pair(store_id, product_id, category_id).await
    }

    /// Unlinks a product and a category, then returns both entities.
    ///
    /// Idempotent: deleting a link that does not exist is a no-op.
    pub async fn disassociate(
        &self,
        store_id: &str,
        product_id: &str,
        category_id: &str,
    ) -> Result<AssociationPair> {
        self.gateway
            .transact_write(vec![
                WriteOp::Delete(keys::link_key(
                    LinkDirection::ProductToCategory,
                    product_id,
                    category_id,
                )),
                WriteOp::Delete(keys::link_key(
                    LinkDirection::CategoryToProduct,
                    product_id,
                    category_id,
                )),
            ])
            .await?;

        self.fetch_pair(store_id, product_id, category_id).await
    }

    /// Reads a product together with its derived `category_ids`, optionally
    /// expanding the full category objects.
    ///
    /// One index query returns the product row and every product-side link
    /// row; the fold routes each row shape to its accumulator. Related ids
    /// keep the index query order, which is not guaranteed stable across
    /// calls. Categories whose row was deleted out from under a live link
    /// stay in `category_ids` but are dropped from the expansion.
    pub async fn product_with_relations(
        &self,
        store_id: &str,
        product_id: &str,
        include_categories: bool,
    ) -> Result<Product> {
        let rows = self
            .gateway
            .query_index(&keys::entity_index_pk(EntityKind::Product, product_id))
            .await?;

        let mut base: Option<Product> = None;
        let mut category_ids = Vec::new();
        for row in rows {
            match row {
                CatalogRow::Product(product) => base = Some(product),
                CatalogRow::Link { link, .. } => category_ids.push(link.category_id),
                CatalogRow::Category(_) => {}
            }
        }

        let mut product = base.ok_or_else(|| StorageError::NotFound {
            entity_type: "Product",
            id: product_id.to_string(),
        })?;
        product.category_ids = category_ids;

        if include_categories && !product.category_ids.is_empty() {
            let entity_keys: Vec<ItemKey> = product
                .category_ids
                .iter()
                .map(|id| keys::entity_key(store_id, EntityKind::Category, id))
                .collect();
            let related = self.gateway.batch_get(&entity_keys).await?;
            product.categories = Some(
                related
                    .into_iter()
                    .filter_map(|row| match row {
                        CatalogRow::Category(category) => Some(category),
                        _ => None,
                    })
                    .collect(),
            );
        }

        Ok(product)
    }

    /// Reads a category together with its derived `product_ids`, optionally
    /// expanding the full product objects. Mirror of
    /// [`product_with_relations`](Self::product_with_relations).
    pub async fn category_with_relations(
        &self,
        store_id: &str,
        category_id: &str,
        include_products: bool,
    ) -> Result<Category> {
        let rows = self
            .gateway
            .query_index(&keys::entity_index_pk(EntityKind::Category, category_id))
            .await?;

        let mut base: Option<Category> = None;
        let mut product_ids = Vec::new();
        for row in rows {
            match row {
                CatalogRow::Category(category) => base = Some(category),
                CatalogRow::Link { link, .. } => product_ids.push(link.product_id),
                CatalogRow::Product(_) => {}
            }
        }

        let mut category = base.ok_or_else(|| StorageError::NotFound {
            entity_type: "Category",
            id: category_id.to_string(),
        })?;
        category.product_ids = product_ids;

        if include_products && !category.product_ids.is_empty() {
            let entity_keys: Vec<ItemKey> = category
                .product_ids
                .iter()
                .map(|id| keys::entity_key(store_id, EntityKind::Product, id))
                .collect();
            let related = self.gateway.batch_get(&entity_keys).await?;
            category.products = Some(
                related
                    .into_iter()
                    .filter_map(|row| match row {
                        CatalogRow::Product(product) => Some(product),
                        _ => None,
                    })
                    .collect(),
            );
        }

        Ok(category)
    }

    /// Batch-fetches the two entity rows of a pair. Missing rows are simply
    /// absent from the result.
    async fn fetch_pair(
        &self,
        store_id: &str,
        product_id: &str,
        category_id: &str,
    ) -> Result<AssociationPair> {
        let entity_keys = [
            keys::entity_key(store_id, EntityKind::Product, product_id),
            keys::entity_key(store_id, EntityKind::Category, category_id),
        ];
        let rows = self.gateway.batch_get(&entity_keys).await?;

        let mut pair = AssociationPair::default();
        for row in rows {
            match row {
                CatalogRow::Product(product) => pair.product = Some(product),
                CatalogRow::Category(category) => pair.category = Some(category),
                CatalogRow::Link { .. } => {}
            }
        }
        Ok(pair)
    }
}
