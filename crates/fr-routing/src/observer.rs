//! Pipeline observer trait for structured stage events.
//!
//! Replaces ad hoc printing inside the pipeline: each stage reports its
//! outcome through a callback, and the caller decides whether that becomes a
//! log line, a metric, or nothing.

use fr_core::NodeId;

use crate::prune::PruneStats;
use crate::route::Route;

/// Callbacks invoked by [`RoutePlanner::plan`][crate::RoutePlanner::plan] as
/// each pipeline stage completes.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — stage printer
///
/// ```rust,ignore
/// struct StagePrinter;
///
/// impl PipelineObserver for StagePrinter {
///     fn on_prune(&mut self, stats: &PruneStats) {
///         println!(
///             "pruned {} nodes, {} edges",
///             stats.hazarded_nodes, stats.hazarded_edges
///         );
///     }
/// }
/// ```
pub trait PipelineObserver {
    /// Called after hazard pruning with node/edge removal counts.
    fn on_prune(&mut self, _stats: &PruneStats) {}

    /// Called after component selection.
    ///
    /// `anchor_unreachable` is `true` when a requested anchor node was
    /// absent from the pruned network and the largest component was used
    /// instead.
    fn on_select(
        &mut self,
        _component_count:   usize,
        _island_nodes:      usize,
        _island_edges:      usize,
        _anchor_unreachable: bool,
    ) {}

    /// Called once the query endpoints have been snapped to island nodes.
    fn on_endpoints(&mut self, _start: NodeId, _end: NodeId) {}

    /// Called with the finished route just before the pipeline returns.
    fn on_route(&mut self, _route: &Route) {}
}

/// A [`PipelineObserver`] that does nothing.  Use when you need to call
/// `plan` but don't want stage callbacks.
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}
