//! Error types for mtags

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the mtags application
#[derive(Debug, Error)]
pub enum MtagsError {
    #[error("Invalid tag code: \"{0}\"")]
    InvalidCode(String),

    #[error("Malformed definition line: \"{0}\"")]
    MalformedDefinition(String),

    #[error("Cannot open {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Profile error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
}

impl MtagsError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            MtagsError::SourceUnavailable { .. } => 2,
            MtagsError::InvalidCode(_) => 3,
            MtagsError::Config(_) | MtagsError::TomlDeserialize(_) => 4,
            _ => 1,
        }
    }
}

/// Result type using MtagsError
pub type Result<T> = std::result::Result<T, MtagsError>;
