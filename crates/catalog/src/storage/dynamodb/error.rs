//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `StorageError` from `catalog_core::storage`.
//! Store failures propagate as `Unavailable`; a canceled transaction maps to
//! `TransactionFailed`, which guarantees none of its operations took effect.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::batch_get_item::BatchGetItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::transact_write_items::TransactWriteItemsError;

use catalog_core::storage::StorageError;

/// Map a GetItem SDK error to StorageError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> StorageError {
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => {
            StorageError::Unavailable("Table not found".to_string())
        }
        GetItemError::ProvisionedThroughputExceededException(_) => {
            StorageError::Unavailable("Throughput exceeded, please retry".to_string())
        }
        GetItemError::RequestLimitExceeded(_) => {
            StorageError::Unavailable("Request limit exceeded, please retry".to_string())
        }
        GetItemError::InternalServerError(_) => {
            StorageError::Unavailable("DynamoDB internal server error".to_string())
        }
        err => StorageError::Unavailable(format!("GetItem failed: {:?}", err)),
    }
}

/// Map a PutItem SDK error to StorageError.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
) -> StorageError {
    match err.into_service_error() {
        PutItemError::ResourceNotFoundException(_) => {
            StorageError::Unavailable("Table not found".to_string())
        }
        PutItemError::ProvisionedThroughputExceededException(_) => {
            StorageError::Unavailable("Throughput exceeded, please retry".to_string())
        }
        PutItemError::RequestLimitExceeded(_) => {
            StorageError::Unavailable("Request limit exceeded, please retry".to_string())
        }
        PutItemError::TransactionConflictException(_) => {
            StorageError::Unavailable("Transaction conflict, please retry".to_string())
        }
        PutItemError::InternalServerError(_) => {
            StorageError::Unavailable("DynamoDB internal server error".to_string())
        }
        err => StorageError::Unavailable(format!("PutItem failed: {:?}", err)),
    }
}

/// Map a Query SDK error to StorageError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
) -> StorageError {
    match err.into_service_error() {
        QueryError::ResourceNotFoundException(_) => {
            StorageError::Unavailable("Table not found".to_string())
        }
        QueryError::ProvisionedThroughputExceededException(_) => {
            StorageError::Unavailable("Throughput exceeded, please retry".to_string())
        }
        QueryError::RequestLimitExceeded(_) => {
            StorageError::Unavailable("Request limit exceeded, please retry".to_string())
        }
        QueryError::InternalServerError(_) => {
            StorageError::Unavailable("DynamoDB internal server error".to_string())
        }
        err => StorageError::Unavailable(format!("Query failed: {:?}", err)),
    }
}

/// Map a BatchGetItem SDK error to StorageError.
pub fn map_batch_get_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<BatchGetItemError, R>,
) -> StorageError {
    match err.into_service_error() {
        BatchGetItemError::ResourceNotFoundException(_) => {
            StorageError::Unavailable("Table not found".to_string())
        }
        BatchGetItemError::ProvisionedThroughputExceededException(_) => {
            StorageError::Unavailable("Throughput exceeded, please retry".to_string())
        }
        BatchGetItemError::RequestLimitExceeded(_) => {
            StorageError::Unavailable("Request limit exceeded, please retry".to_string())
        }
        BatchGetItemError::InternalServerError(_) => {
            StorageError::Unavailable("DynamoDB internal server error".to_string())
        }
        err => StorageError::Unavailable(format!("BatchGetItem failed: {:?}", err)),
    }
}

/// Map a TransactWriteItems SDK error to StorageError.
pub fn map_transact_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<TransactWriteItemsError, R>,
) -> StorageError {
    match err.into_service_error() {
        TransactWriteItemsError::TransactionCanceledException(e) => {
            StorageError::TransactionFailed(format!(
                "transaction canceled: {}",
                e.message().unwrap_or("unknown reason")
            ))
        }
        TransactWriteItemsError::TransactionInProgressException(_) => {
            StorageError::TransactionFailed("transaction already in progress".to_string())
        }
        TransactWriteItemsError::IdempotentParameterMismatchException(_) => {
            StorageError::TransactionFailed("idempotent parameter mismatch".to_string())
        }
        TransactWriteItemsError::ResourceNotFoundException(_) => {
            StorageError::Unavailable("Table not found".to_string())
        }
        TransactWriteItemsError::ProvisionedThroughputExceededException(_) => {
            StorageError::Unavailable("Throughput exceeded, please retry".to_string())
        }
        TransactWriteItemsError::RequestLimitExceeded(_) => {
            StorageError::Unavailable("Request limit exceeded, please retry".to_string())
        }
        TransactWriteItemsError::InternalServerError(_) => {
            StorageError::Unavailable("DynamoDB internal server error".to_string())
        }
        err => StorageError::Unavailable(format!("TransactWriteItems failed: {:?}", err)),
    }
}
