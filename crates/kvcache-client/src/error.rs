//! Cache client error types.

use redis::RedisError;
use thiserror::Error;

/// Cache client errors.
///
/// Each operation wraps the underlying driver failure in its own class so
/// callers can tell which operation on which key failed. A missing key on a
/// read is reported as [`CacheError::NotFound`] rather than folded into the
/// read class.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Liveness probe failed or the connection could not be established
    #[error("cache server unreachable: {0}")]
    Connection(#[source] RedisError),

    /// Key does not exist
    #[error("key not found: '{0}'")]
    NotFound(String),

    /// Read failed for transport or server reasons
    #[error("cache read failed for key '{key}': {source}")]
    Read { key: String, source: RedisError },

    /// Write or delete failed
    #[error("cache write failed for key '{key}': {source}")]
    Write { key: String, source: RedisError },

    /// Closing the connection failed
    #[error("failed to close cache connection: {0}")]
    Shutdown(#[source] RedisError),

    /// Operation invoked after the client was closed
    #[error("cache client is closed")]
    Closed,
}

impl CacheError {
    /// Whether this error is the not-found class.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;
    use redis::ErrorKind;

    fn transport_error() -> RedisError {
        RedisError::from((ErrorKind::IoError, "connection reset"))
    }

    #[test]
    fn test_not_found_classification() {
        let err = CacheError::NotFound("greeting".to_string());
        assert!(err.is_not_found());
        assert!(!CacheError::Closed.is_not_found());
    }

    #[test]
    fn test_read_error_names_key_and_cause() {
        let err = CacheError::Read {
            key: "greeting".to_string(),
            source: transport_error(),
        };
        let message = err.to_string();
        assert!(message.contains("greeting"));
        assert!(message.contains("connection reset"));
    }

    #[test]
    fn test_source_is_preserved() {
        use std::error::Error as _;

        let err = CacheError::Connection(transport_error());
        assert!(err.source().is_some());
        assert!(CacheError::Closed.source().is_none());
    }
}
