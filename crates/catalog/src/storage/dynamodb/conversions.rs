//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! the row union. Testable in isolation without DynamoDB access.
//!
//! Every item carries the composite keys (`PK`/`SK`/`PK1`/`SK1`) and an
//! `entity` discriminator; the remaining attributes depend on the row shape.
//! Derived fields (`categoryIds`/`productIds`) are never written or read.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};

use catalog_core::catalog::{Category, Product, ProductCategory};
use catalog_core::storage::{keys, CatalogRow, LinkDirection, StorageError};

/// Convert a row to a DynamoDB item.
pub fn row_to_item(row: &CatalogRow) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    // Keys
    let primary = row.primary_key();
    let index = row.index_key();
    item.insert("PK".to_string(), AttributeValue::S(primary.pk));
    item.insert("SK".to_string(), AttributeValue::S(primary.sk));
    item.insert("PK1".to_string(), AttributeValue::S(index.pk));
    item.insert("SK1".to_string(), AttributeValue::S(index.sk));

    // Entity discriminator
    item.insert(
        "entity".to_string(),
        AttributeValue::S(row.entity_name().to_string()),
    );

    // Data
    match row {
        CatalogRow::Product(product) => {
            item.insert("id".to_string(), AttributeValue::S(product.id.clone()));
            item.insert(
                "storeId".to_string(),
                AttributeValue::S(product.store_id.clone()),
            );
            item.insert("name".to_string(), AttributeValue::S(product.name.clone()));
            item.insert(
                "createdAt".to_string(),
                AttributeValue::S(product.created_at.to_rfc3339()),
            );
            if let Some(updated_at) = product.updated_at {
                item.insert(
                    "updatedAt".to_string(),
                    AttributeValue::S(updated_at.to_rfc3339()),
                );
            }
        }
        CatalogRow::Category(category) => {
            item.insert("id".to_string(), AttributeValue::S(category.id.clone()));
            item.insert(
                "storeId".to_string(),
                AttributeValue::S(category.store_id.clone()),
            );
            item.insert("name".to_string(), AttributeValue::S(category.name.clone()));
            item.insert(
                "createdAt".to_string(),
                AttributeValue::S(category.created_at.to_rfc3339()),
            );
            item.insert(
                "updatedAt".to_string(),
                AttributeValue::S(category.updated_at.to_rfc3339()),
            );
        }
        CatalogRow::Link { link, .. } => {
            item.insert(
                "productId".to_string(),
                AttributeValue::S(link.product_id.clone()),
            );
            item.insert(
                "categoryId".to_string(),
                AttributeValue::S(link.category_id.clone()),
            );
            item.insert(
                "createdAt".to_string(),
                AttributeValue::S(link.created_at.to_rfc3339()),
            );
        }
    }

    item
}

/// Convert a DynamoDB item to a row, discriminating on the `entity`
/// attribute.
pub fn item_to_row(item: &HashMap<String, AttributeValue>) -> Result<CatalogRow, StorageError> {
    match get_string(item, "entity")?.as_str() {
        "Product" => Ok(CatalogRow::Product(Product {
            id: get_string(item, "id")?,
            store_id: get_string(item, "storeId")?,
            name: get_string(item, "name")?,
            category_ids: Vec::new(),
            created_at: get_datetime(item, "createdAt")?,
            updated_at: get_optional_datetime(item, "updatedAt")?,
            categories: None,
        })),
        "Category" => Ok(CatalogRow::Category(Category {
            id: get_string(item, "id")?,
            store_id: get_string(item, "storeId")?,
            name: get_string(item, "name")?,
            product_ids: Vec::new(),
            created_at: get_datetime(item, "createdAt")?,
            updated_at: get_datetime(item, "updatedAt")?,
            products: None,
        })),
        "ProductCategory" => {
            // The partition key prefix tells the two directions apart.
            let direction = if get_string(item, "PK")?.starts_with(keys::PRODUCT_PREFIX) {
                LinkDirection::ProductToCategory
            } else {
                LinkDirection::CategoryToProduct
            };
            Ok(CatalogRow::Link {
                direction,
                link: ProductCategory {
                    product_id: get_string(item, "productId")?,
                    category_id: get_string(item, "categoryId")?,
                    created_at: get_datetime(item, "createdAt")?,
                },
            })
        }
        other => Err(StorageError::InvalidData(format!(
            "unknown entity kind: {other}"
        ))),
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a required string attribute.
fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, StorageError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| StorageError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get a required datetime attribute (RFC 3339 format).
fn get_datetime(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<DateTime<Utc>, StorageError> {
    parse_datetime(&get_string(item, key)?, key)
}

/// Get an optional datetime attribute (RFC 3339 format).
fn get_optional_datetime(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<Option<DateTime<Utc>>, StorageError> {
    match item.get(key).and_then(|v| v.as_s().ok()) {
        Some(s) => Ok(Some(parse_datetime(s, key)?)),
        None => Ok(None),
    }
}

fn parse_datetime(s: &str, key: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::InvalidData(format!("Invalid datetime {}: {}", key, e)))
}
