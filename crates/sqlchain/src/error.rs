//! Error types for sqlchain

use crate::store::JoinType;
use thiserror::Error;

/// Result type alias for sqlchain operations
pub type QmResult<T> = Result<T, QmError>;

/// Error types for building, compiling and executing queries
#[derive(Debug, Error)]
pub enum QmError {
    /// Builder method called out of order, or an unparsable keyword
    #[error("QueryManager: {0}")]
    InvalidUsage(String),

    /// Join kind without a rendering rule
    #[error("Unsupported join: {kind} JOIN {table} cannot be rendered")]
    UnsupportedJoin { table: String, kind: JoinType },

    /// `execute` needs a Tokio runtime to spawn onto
    #[error("No Tokio runtime available to execute the query")]
    NoRuntime,

    /// Query execution error reported by Postgres
    #[cfg(feature = "postgres")]
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),

    /// Failure reported by a custom executor
    #[error("Execution error: {0}")]
    Execution(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl QmError {
    /// Create an invalid-usage error
    pub fn invalid_usage(message: impl Into<String>) -> Self {
        Self::InvalidUsage(message.into())
    }

    /// Create an execution error
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }

    /// Check if this is an invalid-usage error
    pub fn is_invalid_usage(&self) -> bool {
        matches!(self, Self::InvalidUsage(_))
    }

    /// Check if this is an unsupported-join error
    pub fn is_unsupported_join(&self) -> bool {
        matches!(self, Self::UnsupportedJoin { .. })
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for QmError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}
