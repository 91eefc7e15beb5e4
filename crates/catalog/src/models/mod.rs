//! Transport request and response shapes for the HTTP surface.

use serde::{Deserialize, Serialize};

use catalog_core::catalog::{Category, Product};

/// Response envelope for listing a store's products.
#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

/// Response envelope for listing a store's categories.
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: Vec<Category>,
}

/// Body for linking a category to a product.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachCategory {
    pub category_id: String,
}

/// Body for linking a product to a category.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachProduct {
    pub product_id: String,
}

/// Repeatable `?include=` query parameter.
///
/// Unknown include values are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct IncludeQuery {
    #[serde(default)]
    pub include: Vec<String>,
}

impl IncludeQuery {
    pub fn contains(&self, value: &str) -> bool {
        self.include.iter().any(|v| v == value)
    }
}
