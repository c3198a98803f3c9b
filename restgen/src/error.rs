//! Error types for restgen

use thiserror::Error;

/// Result type alias for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors that can occur while building the API registry
#[derive(Error, Debug)]
pub enum RegistryError {
    /// An error descriptor reused a name that is already registered
    #[error("Duplicate error name: {0}")]
    DuplicateErrorName(String),

    /// An error descriptor reused a code that is already registered
    #[error("Duplicate error code {code}: used by both {existing} and {new}")]
    DuplicateErrorCode {
        code: i64,
        existing: String,
        new: String,
    },

    /// Two endpoints resolved to the same method + path key
    #[error("Duplicate endpoint: {0}")]
    DuplicateEndpoint(String),

    /// An endpoint referenced a group that was never declared
    #[error("Unknown group '{group}' for endpoint {endpoint}")]
    UnknownGroup { group: String, endpoint: String },
}
