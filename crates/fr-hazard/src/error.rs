//! Hazard-subsystem error type.

use thiserror::Error;

/// Errors produced by `fr-hazard`.
#[derive(Debug, Error)]
pub enum HazardError {
    #[error("hazard grid has {got} cells, expected {expected} ({rows}×{cols})")]
    DimensionMismatch {
        rows:     usize,
        cols:     usize,
        expected: usize,
        got:      usize,
    },
}

pub type HazardResult<T> = Result<T, HazardError>;
