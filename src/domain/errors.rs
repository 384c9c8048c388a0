//! Domain error types
//!
//! Business-rule violations are never errors in this crate: they travel as
//! strings inside [`crate::domain::PreparedClaim`]. The types below cover the
//! remaining failure paths (configuration, malformed input, precondition
//! violations and enrichment lookups).

use thiserror::Error;

use super::input::InputErrors;

/// Main Clara error type
#[derive(Debug, Error)]
pub enum ClaraError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed request input, caught before the pipeline runs
    #[error("Invalid input: {0}")]
    Input(#[from] InputErrors),

    /// An operation was called with a value it must never receive
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Entity lookups during enrichment
    #[error("Enrichment error: {0}")]
    Enrichment(#[from] EnrichmentError),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Errors raised by [`crate::core::enrichment::ClaimEnricher`] implementations
///
/// These belong to the entity directory, not to the claim: they never turn a
/// claim `INVALID`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnrichmentError {
    /// Patient, therapist or practice does not exist in the directory
    #[error("{entity_type} not found: {entity_id}")]
    EntityNotFound {
        entity_type: String,
        entity_id: String,
    },
}

impl EnrichmentError {
    /// Shorthand for [`EnrichmentError::EntityNotFound`]
    pub fn not_found(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self::EntityNotFound {
            entity_type: entity_type.into(),
            entity_id: entity_id.into(),
        }
    }
}

impl From<std::io::Error> for ClaraError {
    fn from(err: std::io::Error) -> Self {
        ClaraError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ClaraError {
    fn from(err: serde_json::Error) -> Self {
        ClaraError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for ClaraError {
    fn from(err: toml::de::Error) -> Self {
        ClaraError::Configuration(format!("TOML parse error: {err}"))
    }
}
