//! `fr-hazard` — hazard-grid overlay for the flood_route engine.
//!
//! A flood forecast arrives as a coarse boolean grid over the query's
//! bounding box.  This crate maps coordinates onto that grid and decides
//! whether points and road segments are hazarded.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                  |
//! |------------|-----------------------------------------------------------|
//! | [`grid`]   | `GridIndex`, `Cell` — coordinate ↔ cell mapping           |
//! | [`mask`]   | `HazardMask` — boolean grid + point query                 |
//! | [`sample`] | `EdgeSampler` — arc-length sampling of road geometry      |
//! | [`error`]  | `HazardError`, `HazardResult<T>`                          |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod grid;
pub mod mask;
pub mod sample;


pub use error::{HazardError, HazardResult};
pub use grid::{Cell, GridIndex};
pub use mask::HazardMask;
pub use sample::EdgeSampler;
