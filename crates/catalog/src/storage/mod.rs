//! Storage backend implementations.
//!
//! Concrete implementations of `catalog_core::storage::StorageGateway`,
//! selected at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `inmemory` (default): in-process fake store for tests and local runs
//! - `dynamodb`: AWS DynamoDB backend using `aws-sdk-dynamodb`
//!
//! These features are mutually exclusive - only one storage backend can be
//! enabled at a time.
//!
//! Build with DynamoDB:
//! ```bash
//! cargo build -p catalog --no-default-features --features dynamodb
//! ```

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;
