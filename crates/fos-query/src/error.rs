//! Toolkit errors

use fos_dom::DomError;

/// Result type for toolkit operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Toolkit error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// Operation needs a populated collection or a node with a box
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    #[error(transparent)]
    Dom(#[from] DomError),
}
