//! Error types for Bioforge Core
//!
//! This module defines the error taxonomy of the committee decision engine.
//! Only [`ValidationError`] ever crosses the engine boundary as an `Err`;
//! every [`EngineError`] raised inside a run is converted into a failure
//! envelope by the orchestrator.

use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

/// Malformed or out-of-range sample input. The pipeline never starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Unknown contaminant class: {0:?}")]
    UnknownContaminant(String),

    #[error("Latitude must be in range [-90, 90], got {0}")]
    LatitudeOutOfRange(f64),

    #[error("Longitude must be in range [-180, 180], got {0}")]
    LongitudeOutOfRange(f64),

    #[error("Salinity must be a finite, non-negative value, got {0}")]
    InvalidSalinity(f64),
}

/// Main error type for engine operations
#[derive(Error, Debug)]
pub enum EngineError {
    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Network or call failure of the remote backend (includes timeouts)
    #[error("Remote transport error: {0}")]
    RemoteTransport(String),

    /// Remote response text did not yield a well-formed design payload
    #[error("Remote parse error: {0}")]
    RemoteParse(String),

    /// Unexpected fault inside a local phase
    #[error("Pipeline fault: {0}")]
    PipelineFault(String),

    /// A result would have violated a hard invariant
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl EngineError {
    /// True for the failures the fallback policy recovers from.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            EngineError::RemoteTransport(_) | EngineError::RemoteParse(_)
        )
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::RemoteParse(e.to_string())
    }
}
