//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `fr-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("network has no nodes")]
    EmptyNetwork,
}

pub type SpatialResult<T> = Result<T, SpatialError>;
