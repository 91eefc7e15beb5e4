//! Application state shared by all request handlers.

use std::sync::Arc;

use catalog_core::repository::{AssociationManager, CategoryRepository, ProductRepository};
use catalog_core::storage::StorageGateway;

// ============================================================================
// Compile-time feature validation
// ============================================================================

// Storage features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "inmemory", feature = "dynamodb"))]
compile_error!("Cannot enable both 'inmemory' and 'dynamodb' storage features");

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!("Must enable exactly one storage feature: 'inmemory' or 'dynamodb'");

/// Shared application state.
///
/// Cloned for each request handler. All repositories share one storage
/// gateway; there is no other in-process mutable state.
#[derive(Clone)]
pub struct AppState {
    pub products: ProductRepository,
    pub categories: CategoryRepository,
    pub associations: AssociationManager,
}

impl AppState {
    /// Builds the repositories around the given storage gateway.
    pub fn new(gateway: Arc<dyn StorageGateway>) -> Self {
        Self {
            products: ProductRepository::new(gateway.clone()),
            categories: CategoryRepository::new(gateway.clone()),
            associations: AssociationManager::new(gateway),
        }
    }
}
