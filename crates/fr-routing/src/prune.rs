//! Hazard pruning: remove flooded nodes and flooded edges.
//!
//! # Order of operations
//!
//! Node-level elimination runs first: any node whose coordinate falls in a
//! hazarded cell is dropped, and every incident edge disappears with it
//! (the builder only accepts edges between surviving nodes, so the closure
//! invariant holds by construction).  Only the edges that survive that cheap
//! pass are then geometry-sampled, which keeps the expensive
//! sample-per-edge work to the minimum.

use fr_core::GeoPoint;
use fr_hazard::{EdgeSampler, HazardMask};
use fr_spatial::{RoadNetwork, RoadNetworkBuilder};

use crate::cancel::CancelToken;
use crate::error::{RouteError, RouteResult};

/// Cancel-check stride for the edge-sampling loop: test the token every
/// `CANCEL_STRIDE` edges rather than on each iteration.
const CANCEL_STRIDE: usize = 1024;

/// Counts reported by [`prune`] for observability.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PruneStats {
    pub input_nodes:    usize,
    pub input_edges:    usize,
    /// Nodes whose own coordinate was hazarded.
    pub hazarded_nodes: usize,
    /// Surviving-endpoint edges removed by geometry sampling.
    pub hazarded_edges: usize,
    pub output_nodes:   usize,
    pub output_edges:   usize,
}

impl PruneStats {
    /// `true` if pruning removed nothing — the output network is identical
    /// to the input.
    pub fn is_identity(&self) -> bool {
        self.hazarded_nodes == 0 && self.hazarded_edges == 0
    }
}

/// Produce a new network containing only non-hazarded nodes and edges.
///
/// The input is untouched; node `SourceId`s carry over so callers can track
/// nodes across the transformation.  `NodeId`s are renumbered densely.
///
/// # Errors
///
/// [`RouteError::Cancelled`] if `cancel` fires during the edge-sampling
/// loop.
pub fn prune(
    network: &RoadNetwork,
    mask:    &HazardMask,
    sampler: &EdgeSampler,
    cancel:  &CancelToken,
) -> RouteResult<(RoadNetwork, PruneStats)> {
    let mut stats = PruneStats {
        input_nodes: network.node_count(),
        input_edges: network.edge_count(),
        ..PruneStats::default()
    };

    // ── Pass 1: drop hazarded nodes ───────────────────────────────────────
    let mut builder = RoadNetworkBuilder::with_capacity(
        network.node_count(),
        network.edge_count(),
    );

    // remap[old] = new NodeId, or None if the node was hazarded.
    let mut remap = Vec::with_capacity(network.node_count());
    for (i, &pos) in network.node_pos.iter().enumerate() {
        if mask.is_hazarded(pos) {
            stats.hazarded_nodes += 1;
            remap.push(None);
        } else {
            remap.push(Some(builder.add_node_with_source(pos, network.node_source[i])));
        }
    }

    // ── Pass 2: sample surviving edges ────────────────────────────────────
    for (i, edge) in network.edges().enumerate() {
        if i % CANCEL_STRIDE == 0 && cancel.is_cancelled() {
            return Err(RouteError::Cancelled { stage: "prune" });
        }

        let old_from = network.edge_from[edge.index()];
        let old_to   = network.edge_to[edge.index()];
        let (Some(from), Some(to)) = (remap[old_from.index()], remap[old_to.index()]) else {
            continue; // incident to a hazarded node; already gone
        };

        let straight: [GeoPoint; 2];
        let polyline: &[GeoPoint] = match network.edge_geometry(edge) {
            Some(g) => g,
            None => {
                straight = [
                    network.node_pos[old_from.index()],
                    network.node_pos[old_to.index()],
                ];
                &straight
            }
        };

        if sampler.is_edge_hazarded(mask, polyline) {
            stats.hazarded_edges += 1;
            continue;
        }

        builder.add_directed_edge(
            from,
            to,
            network.edge_key[edge.index()],
            network.edge_length_m[edge.index()],
            network.edge_geometry[edge.index()].clone(),
        );
    }

    let pruned = builder.build();
    stats.output_nodes = pruned.node_count();
    stats.output_edges = pruned.edge_count();
    Ok((pruned, stats))
}
