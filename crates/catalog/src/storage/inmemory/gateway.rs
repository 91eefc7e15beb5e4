//! In-memory gateway implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use catalog_core::storage::{CatalogRow, ItemKey, Result, StorageGateway, WriteOp};

/// In-memory storage backend.
///
/// Rows live in a `BTreeMap` keyed by `(PK, SK)`, so prefix queries come out
/// in sort-key lexicographic order for free. The secondary index is a
/// filtered scan over each row's index key. `transact_write` holds the write
/// lock across the whole batch, so concurrent readers observe either none or
/// all of its operations. Data is not persisted and is lost when the gateway
/// is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryGateway {
    rows: Arc<RwLock<BTreeMap<(String, String), CatalogRow>>>,
}

impl InMemoryGateway {
    /// Creates a new empty in-memory gateway.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageGateway for InMemoryGateway {
    async fn get(&self, key: &ItemKey) -> Result<Option<CatalogRow>> {
        let rows = self.rows.read().await;
        Ok(rows.get(&(key.pk.clone(), key.sk.clone())).cloned())
    }

    async fn put(&self, row: CatalogRow) -> Result<()> {
        let key = row.primary_key();
        let mut rows = self.rows.write().await;
        rows.insert((key.pk, key.sk), row);
        Ok(())
    }

    async fn query_by_prefix(
        &self,
        partition_key: &str,
        sort_key_prefix: &str,
    ) -> Result<Vec<CatalogRow>> {
        let rows = self.rows.read().await;
        Ok(rows
            .range((partition_key.to_string(), String::new())..)
            .take_while(|((pk, _), _)| pk.as_str() == partition_key)
            .filter(|((_, sk), _)| sk.starts_with(sort_key_prefix))
            .map(|(_, row)| row.clone())
            .collect())
    }

    async fn query_index(&self, partition_key: &str) -> Result<Vec<CatalogRow>> {
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .filter(|row| row.index_key().pk == partition_key)
            .cloned()
            .collect())
    }

    async fn batch_get(&self, keys: &[ItemKey]) -> Result<Vec<CatalogRow>> {
        let rows = self.rows.read().await;
        Ok(keys
            .iter()
            .filter_map(|key| rows.get(&(key.pk.clone(), key.sk.clone())).cloned())
            .collect())
    }

    async fn transact_write(&self, ops: Vec<WriteOp>) -> Result<()> {
        // One write lock for the whole batch: readers see all or nothing.
        let mut rows = self.rows.write().await;
        for op in ops {
            match op {
                WriteOp::Put(row) => {
                    let key = row.primary_key();
                    rows.insert((key.pk, key.sk), row);
                }
                WriteOp::Delete(key) => {
                    rows.remove(&(key.pk, key.sk));
                }
            }
        }
        Ok(())
    }
}
