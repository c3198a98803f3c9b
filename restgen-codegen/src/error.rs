//! Error types for restgen-codegen

use thiserror::Error;

/// Result type alias for restgen-codegen operations
pub type Result<T> = std::result::Result<T, CodegenError>;

/// Errors that can occur during code generation
#[derive(Error, Debug)]
pub enum CodegenError {
    #[error("Registry error: {0}")]
    Registry(#[from] restgen::RegistryError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Database error: {0}")]
    DbError(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("YAML error: {0}")]
    YamlError(String),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<mysql_async::Error> for CodegenError {
    fn from(err: mysql_async::Error) -> Self {
        CodegenError::DbError(err.to_string())
    }
}

impl From<config::ConfigError> for CodegenError {
    fn from(err: config::ConfigError) -> Self {
        CodegenError::ConfigError(err.to_string())
    }
}

impl From<serde_yaml::Error> for CodegenError {
    fn from(err: serde_yaml::Error) -> Self {
        CodegenError::YamlError(err.to_string())
    }
}
