//! Table provisioning.
//!
//! Creates the catalog table with its composite primary key (`PK`/`SK`) and
//! the `GSI1` secondary index (`PK1`/`SK1`), then waits for it to become
//! active. Intended for local development and first deploys (`--provision`).

use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, GlobalSecondaryIndex, IndexStatus, KeySchemaElement,
    KeyType, Projection, ProjectionType, ScalarAttributeType, TableStatus,
};
use aws_sdk_dynamodb::Client;

/// Creates the table if it does not exist and waits until it is active.
pub async fn ensure_table(client: &Client, table_name: &str) -> Result<()> {
    match client.describe_table().table_name(table_name).send().await {
        Ok(_) => {
            tracing::info!(table = %table_name, "table already exists");
            return Ok(());
        }
        Err(err) => {
            let service_err = err.into_service_error();
            if !service_err.is_resource_not_found_exception() {
                return Err(anyhow!("DescribeTable failed: {service_err:?}"));
            }
        }
    }

    tracing::info!(table = %table_name, "creating table");
    create_table(client, table_name).await?;
    wait_for_table_active(client, table_name).await
}

async fn create_table(client: &Client, table_name: &str) -> Result<()> {
    let key_schema = vec![
        key_schema_element("PK", KeyType::Hash)?,
        key_schema_element("SK", KeyType::Range)?,
    ];

    let attribute_definitions = ["PK", "SK", "PK1", "SK1"]
        .into_iter()
        .map(string_attribute)
        .collect::<Result<Vec<_>>>()?;

    let gsi1 = GlobalSecondaryIndex::builder()
        .index_name("GSI1")
        .set_key_schema(Some(vec![
            key_schema_element("PK1", KeyType::Hash)?,
            key_schema_element("SK1", KeyType::Range)?,
        ]))
        .projection(
            Projection::builder()
                .projection_type(ProjectionType::All)
                .build(),
        )
        .build()
        .map_err(|e| anyhow!("GSI build failed: {e}"))?;

    client
        .create_table()
        .table_name(table_name)
        .set_key_schema(Some(key_schema))
        .set_attribute_definitions(Some(attribute_definitions))
        .global_secondary_indexes(gsi1)
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await
        .map_err(|e| anyhow!("CreateTable failed: {e}"))?;

    Ok(())
}

async fn wait_for_table_active(client: &Client, table_name: &str) -> Result<()> {
    let max_attempts = 60;
    let delay = Duration::from_secs(2);

    for _ in 0..max_attempts {
        let description = client
            .describe_table()
            .table_name(table_name)
            .send()
            .await
            .map_err(|e| anyhow!("DescribeTable failed: {e}"))?;

        if let Some(table) = description.table {
            let table_active = table.table_status == Some(TableStatus::Active);
            let gsis_active = table
                .global_secondary_indexes
                .unwrap_or_default()
                .iter()
                .all(|gsi| gsi.index_status == Some(IndexStatus::Active));

            if table_active && gsis_active {
                tracing::info!(table = %table_name, "table active");
                return Ok(());
            }
        }

        tokio::time::sleep(delay).await;
    }

    bail!("table {table_name} did not become active in time")
}

fn key_schema_element(name: &str, key_type: KeyType) -> Result<KeySchemaElement> {
    KeySchemaElement::builder()
        .attribute_name(name)
        .key_type(key_type)
        .build()
        .map_err(|e| anyhow!("key schema build failed: {e}"))
}

fn string_attribute(name: &str) -> Result<AttributeDefinition> {
    AttributeDefinition::builder()
        .attribute_name(name)
        .attribute_type(ScalarAttributeType::S)
        .build()
        .map_err(|e| anyhow!("attribute definition build failed: {e}"))
}
