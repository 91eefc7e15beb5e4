//! Key encoding for the single-table layout.
//!
//! Pure functions mapping logical entity references to the composite primary
//! key (`PK`/`SK`) and the secondary-index key (`PK1`/`SK1`). This layout is
//! the wire contract with existing data and must not change. All functions
//! are sync and have no side effects; identifiers are opaque strings, and an
//! id that never matches anything simply reads as not-found.

use super::row::{ItemKey, LinkDirection};

// ============================================================================
// Key prefixes
// ============================================================================

pub const STORE_PREFIX: &str = "STORE#";
pub const PRODUCT_PREFIX: &str = "PRODUCT#";
pub const CATEGORY_PREFIX: &str = "CATEGORY#";

/// The two entity kinds that live under a store partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Product,
    Category,
}

impl EntityKind {
    /// Key prefix for this kind.
    pub fn prefix(&self) -> &'static str {
        match self {
            EntityKind::Product => PRODUCT_PREFIX,
            EntityKind::Category => CATEGORY_PREFIX,
        }
    }

    /// Row discriminator value stored in the `entity` attribute.
    pub fn entity_name(&self) -> &'static str {
        match self {
            EntityKind::Product => "Product",
            EntityKind::Category => "Category",
        }
    }

    /// The kind on the other side of an association.
    pub fn related(&self) -> EntityKind {
        match self {
            EntityKind::Product => EntityKind::Category,
            EntityKind::Category => EntityKind::Product,
        }
    }
}

// ============================================================================
// Entity keys
// ============================================================================

/// Generate the partition key for a store's entities.
///
/// Pattern: `STORE#<store_id>`
pub fn store_pk(store_id: &str) -> String {
    format!("{STORE_PREFIX}{store_id}")
}

/// Generate the sort key for an entity.
///
/// Pattern: `PRODUCT#<id>` / `CATEGORY#<id>`
pub fn entity_sk(kind: EntityKind, id: &str) -> String {
    format!("{}{id}", kind.prefix())
}

/// Generate the primary key pair for an entity row.
pub fn entity_key(store_id: &str, kind: EntityKind, id: &str) -> ItemKey {
    ItemKey {
        pk: store_pk(store_id),
        sk: entity_sk(kind, id),
    }
}

/// Generate the secondary-index partition key for an entity.
///
/// Pattern: `PRODUCT#<id>` / `CATEGORY#<id>` — keyed by the entity's own
/// identity so that "everything referencing this id" is one index query.
pub fn entity_index_pk(kind: EntityKind, id: &str) -> String {
    format!("{}{id}", kind.prefix())
}

/// Generate the secondary-index key pair for an entity row.
///
/// Pattern: `PK1 = <KIND>#<id>`, `SK1 = STORE#<store_id>`
pub fn entity_index_key(store_id: &str, kind: EntityKind, id: &str) -> ItemKey {
    ItemKey {
        pk: entity_index_pk(kind, id),
        sk: store_pk(store_id),
    }
}

// ============================================================================
// Link keys
// ============================================================================

/// Generate the primary key pair for one direction of a link.
///
/// Pattern: `PRODUCT#<product_id>` / `CATEGORY#<category_id>` for the
/// product-side row, mirrored for the category-side row. No store scoping:
/// link rows are keyed purely by the two entity identities.
pub fn link_key(direction: LinkDirection, product_id: &str, category_id: &str) -> ItemKey {
    match direction {
        LinkDirection::ProductToCategory => ItemKey {
            pk: format!("{PRODUCT_PREFIX}{product_id}"),
            sk: format!("{CATEGORY_PREFIX}{category_id}"),
        },
        LinkDirection::CategoryToProduct => ItemKey {
            pk: format!("{CATEGORY_PREFIX}{category_id}"),
            sk: format!("{PRODUCT_PREFIX}{product_id}"),
        },
    }
}

/// Generate the secondary-index key pair for one direction of a link.
///
/// Identical to the primary key pair: each link row lands in the index
/// partition of the entity it hangs off, next to that entity's own row.
pub fn link_index_key(direction: LinkDirection, product_id: &str, category_id: &str) -> ItemKey {
    link_key(direction, product_id, category_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_pk() {
        assert_eq!(store_pk("store-1"), "STORE#store-1");
    }

    #[test]
    fn test_entity_key_product() {
        let key = entity_key("store-1", EntityKind::Product, "prod-1");
        assert_eq!(key.pk, "STORE#store-1");
        assert_eq!(key.sk, "PRODUCT#prod-1");
    }

    #[test]
    fn test_entity_key_category() {
        let key = entity_key("store-1", EntityKind::Category, "cat-1");
        assert_eq!(key.pk, "STORE#store-1");
        assert_eq!(key.sk, "CATEGORY#cat-1");
    }

    #[test]
    fn test_entity_index_key() {
        let key = entity_index_key("store-1", EntityKind::Product, "prod-1");
        assert_eq!(key.pk, "PRODUCT#prod-1");
        assert_eq!(key.sk, "STORE#store-1");
    }

    #[test]
    fn test_link_key_product_side() {
        let key = link_key(LinkDirection::ProductToCategory, "prod-1", "cat-1");
        assert_eq!(key.pk, "PRODUCT#prod-1");
        assert_eq!(key.sk, "CATEGORY#cat-1");
    }

    #[test]
    fn test_link_key_category_side() {
        let key = link_key(LinkDirection::CategoryToProduct, "prod-1", "cat-1");
        assert_eq!(key.pk, "CATEGORY#cat-1");
        assert_eq!(key.sk, "PRODUCT#prod-1");
    }

    #[test]
    fn test_link_index_key_matches_primary() {
        for direction in [
            LinkDirection::ProductToCategory,
            LinkDirection::CategoryToProduct,
        ] {
            assert_eq!(
                link_index_key(direction, "prod-1", "cat-1"),
                link_key(direction, "prod-1", "cat-1")
            );
        }
    }

    #[test]
    fn test_kind_prefixes() {
        assert_eq!(EntityKind::Product.prefix(), "PRODUCT#");
        assert_eq!(EntityKind::Category.prefix(), "CATEGORY#");
    }

    #[test]
    fn test_kind_related() {
        assert_eq!(EntityKind::Product.related(), EntityKind::Category);
        assert_eq!(EntityKind::Category.related(), EntityKind::Product);
    }
}
