//! Structured error types for the Physalia ecosystem.

use thiserror::Error;

/// Unified error type for all Physalia operations.
#[derive(Debug, Error)]
pub enum PhysaliaError {
    /// Invalid input (bad arguments, out-of-range values)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// No residue pair survived alignment and coordinate filtering
    #[error("no alignable residues")]
    NoAlignableResidues,

    /// Inputs contradict each other or a computed intermediate — a caller
    /// contract violation, never recoverable
    #[error("internal consistency violation: {0}")]
    Inconsistent(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the Physalia ecosystem.
pub type Result<T> = core::result::Result<T, PhysaliaError>;
