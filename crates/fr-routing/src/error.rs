//! Routing-pipeline error type.
//!
//! Every failure is surfaced as a typed result; the transport layer owns the
//! mapping to protocol responses.  `AnchorUnreachable` is deliberately *not*
//! here — it is a non-fatal notice carried on
//! [`SelectOutcome`](crate::SelectOutcome) and
//! [`PlanOutcome`](crate::PlanOutcome).

use thiserror::Error;

use fr_core::NodeId;
use fr_spatial::SpatialError;

/// Errors produced by `fr-routing`.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The provider delivered a network with zero nodes.
    #[error("road network has no nodes")]
    EmptyNetwork,

    /// Pruning/component selection left too few nodes to route between.
    #[error("only {survivors} reachable node(s) after hazard pruning; need at least 2")]
    InsufficientReachableNodes { survivors: usize },

    /// Start and end are not connected within the selected island.
    #[error("no path from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    /// The caller's cancel token fired mid-pipeline.
    #[error("routing cancelled during {stage}")]
    Cancelled { stage: &'static str },

    #[error(transparent)]
    Spatial(#[from] SpatialError),
}

/// Shorthand result type for `fr-routing`.
pub type RouteResult<T> = Result<T, RouteError>;
