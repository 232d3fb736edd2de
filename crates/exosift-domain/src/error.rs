//! Error types for domain-model operations

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown detection status: {0}")]
    UnknownStatus(String),

    #[error("Unknown planet type: {0}")]
    UnknownPlanetType(String),

    #[error("Unknown false-positive type: {0}")]
    UnknownFalsePositiveType(String),

    #[error("Unknown mission: {0}")]
    UnknownMission(String),

    #[error("Unknown quality flag: {0}")]
    UnknownQualityFlag(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for domain-model operations
pub type Result<T> = std::result::Result<T, DomainError>;
