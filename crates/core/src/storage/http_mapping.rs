//! Pure function mapping storage errors to HTTP status codes.
//!
//! Status-code selection lives here, next to the error type, so the HTTP
//! layer only renders the result.

use super::StorageError;

/// Maps a [`StorageError`] to an HTTP status code.
///
/// - `InvalidInput` -> 400 (Bad Request)
/// - `NotFound` -> 404 (Not Found)
/// - `Unavailable` -> 503 (Service Unavailable)
/// - `TransactionFailed` -> 500 (Internal Server Error)
/// - `Serialization` -> 500 (Internal Server Error)
/// - `InvalidData` -> 500 (Internal Server Error)
pub fn storage_error_to_status_code(error: &StorageError) -> u16 {
    match error {
        StorageError::InvalidInput(_) => 400,
        StorageError::NotFound { .. } => 404,
        StorageError::Unavailable(_) => 503,
        StorageError::TransactionFailed(_) => 500,
        StorageError::Serialization(_) => 500,
        StorageError::InvalidData(_) => 500,
    }
}
