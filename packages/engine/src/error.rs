//! Error types for the partial element engine

use thiserror::Error;

/// Main error type for engine operations
#[derive(Error, Debug)]
pub enum EngineError {
    /// A merge strategy received operands it cannot combine
    #[error("Cannot merge '{key}' with strategy {strategy}: parent is {parent}, child is {child}")]
    MergeTypeMismatch {
        key: String,
        strategy: String,
        parent: String,
        child: String,
    },

    /// Unknown merge strategy name
    #[error("Unknown merge strategy: {0}")]
    UnknownStrategy(String),

    /// Malformed node tree document
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// YAML parsing error
    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error (file operations)
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
