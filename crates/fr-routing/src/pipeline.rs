//! The end-to-end planning pipeline.
//!
//! Each query is a pure function of its inputs (network, mask, start/end)
//! with no shared mutable state, so concurrent queries need no
//! coordination.  Failures surface as typed [`RouteError`]s; the transport
//! layer owns the mapping to protocol responses.

use fr_core::{GeoPoint, SourceId};
use fr_hazard::{EdgeSampler, HazardMask};
use fr_spatial::RoadNetwork;

use crate::astar::{AStarSearch, PathSearch};
use crate::cancel::CancelToken;
use crate::components::select;
use crate::error::{RouteError, RouteResult};
use crate::observer::PipelineObserver;
use crate::prune::{prune, PruneStats};
use crate::route::{serialize, Route, RouteStatus};

// ── PlanOutcome ───────────────────────────────────────────────────────────────

/// A successful plan: the route plus per-stage diagnostics.
#[derive(Debug)]
pub struct PlanOutcome {
    pub route: Route,
    /// Prune counts, for observability and status decisions.
    pub stats: PruneStats,
    /// Non-fatal notice: the requested anchor node was gone from the pruned
    /// network and the largest component was used instead.
    pub anchor_unreachable: bool,
}

// ── RoutePlanner ──────────────────────────────────────────────────────────────

/// Runs prune → select → snap → search → serialize for one query at a time.
///
/// The planner holds only configuration (sampler, search engine, cancel
/// token) — no per-query state — so one instance may serve many concurrent
/// queries.
///
/// # Example
///
/// ```rust,ignore
/// use fr_routing::{NoopObserver, RoutePlanner};
///
/// let planner = RoutePlanner::new().with_sample_count(15);
/// let outcome = planner.plan(&network, &mask, start, end, None, &mut NoopObserver)?;
/// println!("{} km", outcome.route.distance_km);
/// ```
pub struct RoutePlanner<S: PathSearch = AStarSearch> {
    sampler: EdgeSampler,
    search:  S,
    cancel:  CancelToken,
}

impl RoutePlanner<AStarSearch> {
    /// Planner with the default A* engine and sample count.
    pub fn new() -> Self {
        Self::with_search(AStarSearch)
    }
}

impl Default for RoutePlanner<AStarSearch> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: PathSearch> RoutePlanner<S> {
    /// Planner with a custom search engine.
    pub fn with_search(search: S) -> Self {
        Self {
            sampler: EdgeSampler::default(),
            search,
            cancel: CancelToken::new(),
        }
    }

    /// Set the per-edge hazard sample count (accuracy/cost dial, min 2).
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sampler = EdgeSampler::new(sample_count);
        self
    }

    /// Attach a cancellation token.  Cancel it from another thread (e.g. a
    /// request-deadline timer) to abandon the pruning stage early.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Plan a hazard-aware route from `start` to `end`.
    ///
    /// `anchor` optionally names a node (by stable `SourceId`) whose
    /// component should be selected; without it the largest surviving
    /// component is used.
    ///
    /// # Errors
    ///
    /// - [`RouteError::EmptyNetwork`] — provider delivered zero nodes.
    /// - [`RouteError::InsufficientReachableNodes`] — fewer than 2 nodes
    ///   survive pruning/selection (checked before search runs).
    /// - [`RouteError::NoRoute`] — endpoints are not connected.
    /// - [`RouteError::Cancelled`] — the cancel token fired.
    pub fn plan(
        &self,
        network:  &RoadNetwork,
        mask:     &HazardMask,
        start:    GeoPoint,
        end:      GeoPoint,
        anchor:   Option<SourceId>,
        observer: &mut dyn PipelineObserver,
    ) -> RouteResult<PlanOutcome> {
        if network.is_empty() {
            return Err(RouteError::EmptyNetwork);
        }

        // ── Prune ─────────────────────────────────────────────────────────
        let (pruned, stats) = prune(network, mask, &self.sampler, &self.cancel)?;
        observer.on_prune(&stats);

        if pruned.node_count() < 2 {
            return Err(RouteError::InsufficientReachableNodes {
                survivors: pruned.node_count(),
            });
        }

        // ── Select island ─────────────────────────────────────────────────
        let sel = select(&pruned, anchor);
        observer.on_select(
            sel.component_count,
            sel.island.node_count(),
            sel.island.edge_count(),
            sel.anchor_unreachable,
        );

        if sel.island.node_count() < 2 {
            return Err(RouteError::InsufficientReachableNodes {
                survivors: sel.island.node_count(),
            });
        }

        // ── Snap endpoints ────────────────────────────────────────────────
        let from = sel.island.snap_to_node(start)?;
        let to   = sel.island.snap_to_node(end)?;
        observer.on_endpoints(from, to);

        // ── Search & serialize ────────────────────────────────────────────
        let path = self.search.search(&sel.island, from, to)?;

        let status = if stats.is_identity() {
            RouteStatus::Clear
        } else {
            RouteStatus::HazardReduced
        };
        let route = serialize(&sel.island, &path, status);
        observer.on_route(&route);

        Ok(PlanOutcome {
            route,
            stats,
            anchor_unreachable: sel.anchor_unreachable,
        })
    }
}
