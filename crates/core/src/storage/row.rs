//! The physical row model for the single table.
//!
//! Three row shapes share one keyspace. [`CatalogRow`] is the tagged union
//! backends exchange with the gateway; hydration folds over its variants
//! instead of inspecting untyped items.

use crate::catalog::{Category, Product, ProductCategory};

use super::keys;

/// A composite primary key addressing one physical row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub pk: String,
    pub sk: String,
}

/// Which traversal direction a physical link row serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDirection {
    /// Keyed under the product: `PRODUCT#<id>` -> `CATEGORY#<id>`.
    ProductToCategory,
    /// Keyed under the category: `CATEGORY#<id>` -> `PRODUCT#<id>`.
    CategoryToProduct,
}

/// One physical row of the catalog table.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogRow {
    Product(Product),
    Category(Category),
    Link {
        direction: LinkDirection,
        link: ProductCategory,
    },
}

impl CatalogRow {
    /// The primary key (`PK`/`SK`) this row is stored under.
    pub fn primary_key(&self) -> ItemKey {
        match self {
            CatalogRow::Product(product) => {
                keys::entity_key(&product.store_id, keys::EntityKind::Product, &product.id)
            }
            CatalogRow::Category(category) => {
                keys::entity_key(&category.store_id, keys::EntityKind::Category, &category.id)
            }
            CatalogRow::Link { direction, link } => {
                keys::link_key(*direction, &link.product_id, &link.category_id)
            }
        }
    }

    /// The secondary-index key (`PK1`/`SK1`) this row projects into.
    pub fn index_key(&self) -> ItemKey {
        match self {
            CatalogRow::Product(product) => keys::entity_index_key(
                &product.store_id,
                keys::EntityKind::Product,
                &product.id,
            ),
            CatalogRow::Category(category) => keys::entity_index_key(
                &category.store_id,
                keys::EntityKind::Category,
                &category.id,
            ),
            CatalogRow::Link { direction, link } => {
                keys::link_index_key(*direction, &link.product_id, &link.category_id)
            }
        }
    }

    /// Row discriminator, as stored in the `entity` attribute.
    pub fn entity_name(&self) -> &'static str {
        match self {
            CatalogRow::Product(_) => "Product",
            CatalogRow::Category(_) => "Category",
            CatalogRow::Link { .. } => "ProductCategory",
        }
    }
}

/// One operation of a transactional write batch.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    Put(CatalogRow),
    Delete(ItemKey),
}
