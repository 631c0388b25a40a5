//! Error types for pod loaders

/// Result type for loader calls
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors a pod source can report while producing declarations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// Two types with the same local name in one pod
    #[error("Duplicate type {pod}::{name}")]
    DuplicateType {
        /// Pod being declared
        pod: String,
        /// Repeated local type name
        name: String,
    },

    /// A name that should be `pod::name` is malformed
    #[error("Invalid qualified name: {0}")]
    InvalidQname(String),

    /// A local name contains the `::` separator or is empty
    #[error("Invalid local name: {0:?}")]
    InvalidName(String),

    /// Loader-specific failure
    #[error("{0}")]
    Loader(String),
}

impl From<String> for LoadError {
    fn from(s: String) -> Self {
        LoadError::Loader(s)
    }
}

impl From<&str> for LoadError {
    fn from(s: &str) -> Self {
        LoadError::Loader(s.to_string())
    }
}
