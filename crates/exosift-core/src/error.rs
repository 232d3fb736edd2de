//! Error types for generation and accumulation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// Target identifier was empty or all whitespace
    #[error("Target identifier must not be empty")]
    EmptyTargetId,

    /// Sector/campaign indices start at 1
    #[error("Sector must be >= 1, got {sector}")]
    InvalidSector { sector: u32 },

    /// No accumulated analysis for the requested key
    #[error("No analysis recorded for {target_id} (sector {sector})")]
    NotFound { target_id: String, sector: u32 },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
