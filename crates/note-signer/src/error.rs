//! Error types for the provider.

use note_signer_core::Error as CoreError;
use thiserror::Error;

/// Errors that can occur during provider operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Key generation, signing or verification failed.
    #[error(transparent)]
    Note(#[from] CoreError),

    /// Configuration did not match the declared schema.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be converted to or from its model.
    #[error("configuration value error: {0}")]
    Value(#[from] serde_json::Error),

    /// No ephemeral resource with this type name.
    #[error("unknown ephemeral resource type: {0}")]
    UnknownResource(String),
}

/// Result type for provider operations.
pub type Result<T> = std::result::Result<T, ProviderError>;
