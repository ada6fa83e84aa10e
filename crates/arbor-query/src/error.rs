//! Error types for adapters and query evaluation.

use thiserror::Error;

/// Result of a [`NodeAdapter`](crate::NodeAdapter) operation.
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Result of evaluating a pseudo-class or a query.
pub type QueryResult<T> = Result<T, QueryError>;

/// Failure reported by a tree backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdapterError {
    /// The backend cannot represent this operation at all, for example
    /// "next sibling" on a tree whose siblings are never materialized.
    #[error("adapter operation `{operation}` is not supported by this backend")]
    UnsupportedOperation {
        /// Name of the adapter method that was called.
        operation: &'static str,
    },

    /// Backend-defined data error, already translated out of the raw
    /// document representation.
    #[error("backend error: {0}")]
    Backend(String),
}

impl AdapterError {
    /// Shorthand for [`AdapterError::UnsupportedOperation`].
    #[must_use]
    pub const fn unsupported(operation: &'static str) -> Self {
        Self::UnsupportedOperation { operation }
    }
}

/// Failure raised by the evaluator or the query pipeline.
///
/// No partial results accompany an error: evaluation either produces the
/// whole filtered set or fails before returning anything.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The keyword is not one of the eight structural pseudo-classes.
    #[error("unsupported pseudo-class `:{0}`")]
    UnsupportedPseudoClass(String),

    /// A query string that is not a compound `name:keyword...` form.
    #[error("invalid query `{0}`")]
    InvalidQuery(String),

    /// An adapter call failed; the evaluator has no fallback.
    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

impl QueryError {
    /// Whether this error came from a backend that lacks a required operation.
    #[must_use]
    pub const fn is_unsupported_operation(&self) -> bool {
        matches!(
            self,
            Self::Adapter(AdapterError::UnsupportedOperation { .. })
        )
    }
}
