//! `fr-core` — foundational types for the `flood_route` routing engine.
//!
//! This crate is a dependency of every other `fr-*` crate.  It intentionally
//! has no `fr-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                             |
//! |-----------|------------------------------------------------------|
//! | [`ids`]   | `NodeId`, `EdgeId`, `SourceId`                       |
//! | [`geo`]   | `GeoPoint`, haversine distance, `BoundingBox`        |
//! | [`error`] | `CoreError`, `CoreResult`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{BoundingBox, GeoPoint};
pub use ids::{EdgeId, NodeId, SourceId};
