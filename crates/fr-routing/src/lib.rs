//! `fr-routing` — hazard-aware route planning over a road network.
//!
//! # Pipeline
//!
//! ```text
//! RoadNetwork + HazardMask
//!   → prune        (drop hazarded nodes, then sample surviving edges)
//!   → select       (single reachable island, anchor or largest component)
//!   → snap         (query coordinates → island nodes)
//!   → A* search    (haversine heuristic, min parallel-edge costs)
//!   → serialize    (Route: coordinates + distance statistics)
//! ```
//!
//! Every stage consumes an immutable network and produces a new one, so
//! concurrent queries share nothing mutable.  [`RoutePlanner`] runs the whole
//! pipeline and reports per-stage events through [`PipelineObserver`].
//!
//! # Crate layout
//!
//! | Module         | Contents                                              |
//! |----------------|-------------------------------------------------------|
//! | [`prune`]      | `prune`, `PruneStats`                                 |
//! | [`components`] | `select`, `SelectOutcome` (union-find islands)        |
//! | [`astar`]      | `PathSearch` trait, `AStarSearch`, `SearchPath`       |
//! | [`route`]      | `Route`, `RouteStatus`, `serialize`                   |
//! | [`pipeline`]   | `RoutePlanner`, `PlanOutcome`                         |
//! | [`observer`]   | `PipelineObserver`, `NoopObserver`                    |
//! | [`cancel`]     | `CancelToken`                                         |
//! | [`error`]      | `RouteError`, `RouteResult<T>`                        |

pub mod astar;
pub mod cancel;
pub mod components;
pub mod error;
pub mod observer;
pub mod pipeline;
pub mod prune;
pub mod route;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use astar::{AStarSearch, PathSearch, SearchPath};
pub use cancel::CancelToken;
pub use components::{select, SelectOutcome};
pub use error::{RouteError, RouteResult};
pub use observer::{NoopObserver, PipelineObserver};
pub use pipeline::{PlanOutcome, RoutePlanner};
pub use prune::{prune, PruneStats};
pub use route::{serialize, Route, RouteStatus};
