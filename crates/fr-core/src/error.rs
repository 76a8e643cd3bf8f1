//! Core error type.
//!
//! Sub-crates define their own error enums and either convert into
//! `CoreError` via `From` impls or wrap it as one variant.  Both patterns are
//! acceptable; prefer whichever keeps error sites clean.

use thiserror::Error;

/// Errors produced by `fr-core` validation.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid bounding box: north={north} south={south} east={east} west={west}")]
    InvalidBoundingBox {
        north: f32,
        south: f32,
        east:  f32,
        west:  f32,
    },
}

/// Shorthand result type for `fr-core`.
pub type CoreResult<T> = Result<T, CoreError>;
