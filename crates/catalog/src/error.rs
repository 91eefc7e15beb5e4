use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use catalog_core::storage::{storage_error_to_status_code, StorageError};

/// Application error type that wraps [`StorageError`].
///
/// This allows using `?` on functions that return
/// `Result<_, catalog_core::storage::StorageError>` and renders the error as
/// a structured JSON body with the status code from the core mapping.
pub struct ApiError(StorageError);

impl ApiError {
    fn kind(&self) -> &'static str {
        match self.0 {
            StorageError::InvalidInput(_) => "invalid_input",
            StorageError::NotFound { .. } => "not_found",
            StorageError::Unavailable(_) => "store_unavailable",
            StorageError::TransactionFailed(_) => "transaction_failed",
            StorageError::Serialization(_) => "serialization",
            StorageError::InvalidData(_) => "invalid_data",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(storage_error_to_status_code(&self.0))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        } else {
            tracing::debug!(error = %self.0, "request rejected");
        }

        (
            status,
            Json(json!({
                "kind": self.kind(),
                "error": self.0.to_string(),
            })),
        )
            .into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        Self(err)
    }
}
