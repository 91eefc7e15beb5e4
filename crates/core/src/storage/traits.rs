use async_trait::async_trait;

use super::{CatalogRow, ItemKey, Result, WriteOp};

/// The storage gateway every backend implements.
///
/// This is the only seam that touches the physical store. Repositories and
/// the association manager receive it as `Arc<dyn StorageGateway>`, which
/// lets tests substitute an in-memory fake.
#[async_trait]
pub trait StorageGateway: Send + Sync {
    /// Point lookup by primary key. `None` when no row exists.
    async fn get(&self, key: &ItemKey) -> Result<Option<CatalogRow>>;

    /// Upsert by primary key. Last writer wins; no optimistic-lock check.
    async fn put(&self, row: CatalogRow) -> Result<()>;

    /// All rows under a partition whose sort key starts with the prefix,
    /// in sort-key lexicographic ascending order.
    async fn query_by_prefix(
        &self,
        partition_key: &str,
        sort_key_prefix: &str,
    ) -> Result<Vec<CatalogRow>>;

    /// All rows sharing a secondary-index partition key. For an entity's
    /// identity key this returns the entity row and every link row hanging
    /// off it in one round trip.
    async fn query_index(&self, partition_key: &str) -> Result<Vec<CatalogRow>>;

    /// Unordered batch point lookup. Keys with no matching row are silently
    /// omitted from the result, never an error.
    async fn batch_get(&self, keys: &[ItemKey]) -> Result<Vec<CatalogRow>>;

    /// All-or-nothing multi-item write. Either every operation commits or
    /// none does; readers never observe a partial batch.
    async fn transact_write(&self, ops: Vec<WriteOp>) -> Result<()>;
}
