//! AWS DynamoDB storage backend.
//!
//! Implements the storage gateway against the single catalog table
//! (`PK`/`SK` primary key, `GSI1` secondary index over `PK1`/`SK1`).

mod conversions;
mod error;
mod gateway;
mod provision;

pub use gateway::DynamoDbGateway;
pub use provision::ensure_table;
