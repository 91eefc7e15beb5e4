//! Request payloads for creating and updating catalog entities.
//!
//! Inputs are validated by the repositories before any store call; a schema
//! violation surfaces as [`StorageError::InvalidInput`] and never reaches the
//! storage gateway.

use serde::Deserialize;

use crate::storage::{Result, StorageError};

use super::{Category, Product};

/// Payload for creating a new product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
}

impl ProductInput {
    /// Rejects inputs that violate the product schema.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("name", &self.name)
    }
}

/// Payload for a partial product update.
///
/// Fields left unset retain their stored values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,
}

impl ProductPatch {
    /// Rejects patches that violate the product schema.
    pub fn validate(&self) -> Result<()> {
        match &self.name {
            Some(name) => require_non_empty("name", name),
            None => Ok(()),
        }
    }

    /// Merges the supplied fields over an existing product.
    pub fn apply_to(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
    }
}

/// Payload for creating a new category.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
}

impl CategoryInput {
    /// Rejects inputs that violate the category schema.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("name", &self.name)
    }
}

/// Payload for a partial category update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPatch {
    #[serde(default)]
    pub name: Option<String>,
}

impl CategoryPatch {
    /// Rejects patches that violate the category schema.
    pub fn validate(&self) -> Result<()> {
        match &self.name {
            Some(name) => require_non_empty("name", name),
            None => Ok(()),
        }
    }

    /// Merges the supplied fields over an existing category.
    pub fn apply_to(self, category: &mut Category) {
        if let Some(name) = self.name {
            category.name = name;
        }
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StorageError::InvalidInput(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}
