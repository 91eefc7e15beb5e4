//! DynamoDB gateway implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{
    AttributeValue, Delete, KeysAndAttributes, Put, TransactWriteItem,
};
use aws_sdk_dynamodb::Client;

use catalog_core::storage::{
    CatalogRow, ItemKey, Result, StorageError, StorageGateway, WriteOp,
};

use super::conversions::{item_to_row, row_to_item};
use super::error::{
    map_batch_get_error, map_get_item_error, map_put_item_error, map_query_error,
    map_transact_error,
};

/// DynamoDB-based storage gateway.
///
/// All rows live in one table with a composite primary key (`PK`/`SK`) and
/// one global secondary index `GSI1` over `PK1`/`SK1`.
pub struct DynamoDbGateway {
    client: Client,
    table_name: String,
}

impl DynamoDbGateway {
    /// Creates a new gateway with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a new gateway using the AWS SDK default credential chain.
    pub async fn from_env(table_name: &str) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), table_name)
    }

    /// Get the underlying client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

fn key_attributes(key: &ItemKey) -> HashMap<String, AttributeValue> {
    HashMap::from([
        ("PK".to_string(), AttributeValue::S(key.pk.clone())),
        ("SK".to_string(), AttributeValue::S(key.sk.clone())),
    ])
}

#[async_trait]
impl StorageGateway for DynamoDbGateway {
    async fn get(&self, key: &ItemKey) -> Result<Option<CatalogRow>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(key.pk.clone()))
            .key("SK", AttributeValue::S(key.sk.clone()))
            .consistent_read(true)
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_row(&item)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, row: CatalogRow) -> Result<()> {
        let item = row_to_item(&row);

        // Unconditional upsert: last writer wins, no optimistic-lock check.
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }

    async fn query_by_prefix(
        &self,
        partition_key: &str,
        sort_key_prefix: &str,
    ) -> Result<Vec<CatalogRow>> {
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression("PK = :pk AND begins_with(SK, :prefix)")
            .expression_attribute_values(":pk", AttributeValue::S(partition_key.to_string()))
            .expression_attribute_values(
                ":prefix",
                AttributeValue::S(sort_key_prefix.to_string()),
            )
            .consistent_read(true)
            .send()
            .await
            .map_err(map_query_error)?;

        let items = result.items.unwrap_or_default();
        items.iter().map(item_to_row).collect()
    }

    async fn query_index(&self, partition_key: &str) -> Result<Vec<CatalogRow>> {
        // GSI reads are eventually consistent: a just-written link may be
        // briefly missing from a hydration.
        let result = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name("GSI1")
            .key_condition_expression("PK1 = :pk")
            .expression_attribute_values(":pk", AttributeValue::S(partition_key.to_string()))
            .send()
            .await
            .map_err(map_query_error)?;

        let items = result.items.unwrap_or_default();
        items.iter().map(item_to_row).collect()
    }

    async fn batch_get(&self, keys: &[ItemKey]) -> Result<Vec<CatalogRow>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut rows = Vec::with_capacity(keys.len());
        let mut pending: Vec<HashMap<String, AttributeValue>> =
            keys.iter().map(key_attributes).collect();

        // Keys the store could not serve in one response round come back as
        // unprocessed and are re-requested; missing rows are simply omitted.
        while !pending.is_empty() {
            let request_keys = KeysAndAttributes::builder()
                .set_keys(Some(pending))
                .build()
                .map_err(|e| StorageError::Serialization(e.to_string()))?;

            let result = self
                .client
                .batch_get_item()
                .request_items(&self.table_name, request_keys)
                .send()
                .await
                .map_err(map_batch_get_error)?;

            if let Some(mut responses) = result.responses {
                if let Some(items) = responses.remove(&self.table_name) {
                    for item in &items {
                        rows.push(item_to_row(item)?);
                    }
                }
            }

            pending = result
                .unprocessed_keys
                .unwrap_or_default()
                .remove(&self.table_name)
                .map(|ka| ka.keys().to_vec())
                .unwrap_or_default();
        }

        Ok(rows)
    }

    async fn transact_write(&self, ops: Vec<WriteOp>) -> Result<()> {
        let items = ops
            .into_iter()
            .map(|op| match op {
                WriteOp::Put(row) => {
                    let put = Put::builder()
                        .table_name(&self.table_name)
                        .set_item(Some(row_to_item(&row)))
                        .build()
                        .map_err(|e| StorageError::Serialization(e.to_string()))?;
                    Ok(TransactWriteItem::builder().put(put).build())
                }
                WriteOp::Delete(key) => {
                    let delete = Delete::builder()
                        .table_name(&self.table_name)
                        .key("PK", AttributeValue::S(key.pk))
                        .key("SK", AttributeValue::S(key.sk))
                        .build()
                        .map_err(|e| StorageError::Serialization(e.to_string()))?;
                    Ok(TransactWriteItem::builder().delete(delete).build())
                }
            })
            .collect::<Result<Vec<_>>>()?;

        self.client
            .transact_write_items()
            .set_transact_items(Some(items))
            .send()
            .await
            .map_err(map_transact_error)?;

        Ok(())
    }
}
