use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product belonging to a store.
///
/// `category_ids` is derived from link rows at read time and never persisted
/// on the product row itself. `categories` is populated only when a read
/// requested expansion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub store_id: String,
    pub name: String,
    #[serde(default)]
    pub category_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
}

impl Product {
    /// Creates a new product with a generated time-sortable id.
    pub fn new(store_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            store_id: store_id.into(),
            name: name.into(),
            category_ids: Vec::new(),
            created_at: Utc::now(),
            updated_at: None,
            categories: None,
        }
    }

    /// Sets a specific id for this product (useful for testing).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// A category belonging to a store.
///
/// Mirror of [`Product`]: `product_ids` is derived from link rows, `products`
/// is filled only on expanded reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub store_id: String,
    pub name: String,
    #[serde(default)]
    pub product_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<Product>>,
}

impl Category {
    /// Creates a new category with a generated time-sortable id.
    pub fn new(store_id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7().to_string(),
            store_id: store_id.into(),
            name: name.into(),
            product_ids: Vec::new(),
            created_at: now,
            updated_at: now,
            products: None,
        }
    }

    /// Sets a specific id for this category (useful for testing).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

/// One product-category association.
///
/// Stored as two physical rows (one per traversal direction) that are always
/// written and deleted together in a single transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCategory {
    pub product_id: String,
    pub category_id: String,
    pub created_at: DateTime<Utc>,
}

impl ProductCategory {
    /// Creates a link stamped with the given creation time.
    ///
    /// The timestamp is taken as an argument so both physical rows of a pair
    /// share the exact same value.
    pub fn new(
        product_id: impl Into<String>,
        category_id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            category_id: category_id.into(),
            created_at,
        }
    }
}

/// The product/category pair returned by associate and disassociate.
///
/// Either side is absent when its entity row does not exist; the link
/// operation itself still succeeds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssociationPair {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_serializes_camel_case() {
        let product = Product::new("store-1", "Mechanical Keyboard");
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json["storeId"], "store-1");
        assert_eq!(json["name"], "Mechanical Keyboard");
        assert_eq!(json["categoryIds"], serde_json::json!([]));
        assert!(json.get("createdAt").is_some());
        // Absent until the first update.
        assert!(json.get("updatedAt").is_none());
        // Only present on expanded reads.
        assert!(json.get("categories").is_none());
    }

    #[test]
    fn test_category_has_updated_at_from_creation() {
        let category = Category::new("store-1", "Peripherals");
        assert_eq!(category.created_at, category.updated_at);

        let json = serde_json::to_value(&category).unwrap();
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["productIds"], serde_json::json!([]));
    }

    #[test]
    fn test_generated_ids_are_time_sortable() {
        let a = Product::new("store-1", "first");
        // UUID v7 ids lead with the millisecond timestamp, so ids minted in
        // different milliseconds sort in creation order.
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = Product::new("store-1", "second");
        assert!(a.id < b.id);
    }

    #[test]
    fn test_association_pair_omits_missing_sides() {
        let pair = AssociationPair {
            product: Some(Product::new("store-1", "Keyboard")),
            category: None,
        };
        let json = serde_json::to_value(&pair).unwrap();

        assert!(json.get("product").is_some());
        assert!(json.get("category").is_none());
    }
}
