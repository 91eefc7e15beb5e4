use thiserror::Error;

/// Errors that can occur in the storage layer and the repositories on top
/// of it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// A payload failed schema validation. Raised before any store call.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    /// The underlying store failed (network, throttling). Propagated
    /// unchanged; no retry is attempted.
    #[error("store unavailable: {0}")]
    Unavailable(String),
    /// A multi-item transactional write did not commit. The store guarantees
    /// none of its operations took effect.
    #[error("transaction failed: {0}")]
    TransactionFailed(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    /// A stored row could not be decoded into its entity shape.
    #[error("invalid data: {0}")]
    InvalidData(String),
}

/// Result type for storage and repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let error = StorageError::InvalidInput("name must not be empty".to_string());
        assert_eq!(error.to_string(), "invalid input: name must not be empty");
    }

    #[test]
    fn test_not_found_display() {
        let error = StorageError::NotFound {
            entity_type: "Product",
            id: "abc-123".to_string(),
        };
        assert_eq!(error.to_string(), "Product not found: abc-123");
    }

    #[test]
    fn test_unavailable_display() {
        let error = StorageError::Unavailable("timeout after 30s".to_string());
        assert_eq!(error.to_string(), "store unavailable: timeout after 30s");
    }

    #[test]
    fn test_transaction_failed_display() {
        let error = StorageError::TransactionFailed("transaction canceled".to_string());
        assert_eq!(
            error.to_string(),
            "transaction failed: transaction canceled"
        );
    }

    #[test]
    fn test_invalid_data_display() {
        let error = StorageError::InvalidData("missing field: name".to_string());
        assert_eq!(error.to_string(), "invalid data: missing field: name");
    }
}
