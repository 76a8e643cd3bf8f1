//! Heuristic shortest-path search.
//!
//! # Pluggability
//!
//! The pipeline calls search via the [`PathSearch`] trait, so applications
//! can swap in custom implementations (contraction hierarchies, bidirected
//! search) without touching the pipeline.  The default [`AStarSearch`] is
//! sufficient at city scale.
//!
//! # Optimality
//!
//! Edge cost is length in metres; the heuristic is haversine distance to the
//! goal, which never exceeds true network distance, so it is admissible and
//! the returned path is cost-optimal.  Parallel edges are relaxed
//! individually, which means the minimum-length edge of any parallel bundle
//! always sets a node pair's traversal cost.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fr_core::{EdgeId, NodeId};
use fr_spatial::RoadNetwork;

use crate::error::{RouteError, RouteResult};

// ── SearchPath ────────────────────────────────────────────────────────────────

/// The result of a search: nodes in traversal order plus the total cost the
/// search accumulated.
#[derive(Debug, Clone)]
pub struct SearchPath {
    /// Nodes from start to end inclusive.  A trivial start == end query
    /// yields a single node.
    pub nodes: Vec<NodeId>,
    /// Total path cost in metres, as reported by the search.  Must equal the
    /// per-hop minimum parallel-edge recomputation in `route::serialize`.
    pub cost_m: f32,
}

// ── PathSearch trait ──────────────────────────────────────────────────────────

/// Pluggable shortest-path engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so a planner can be shared across
/// request-handling threads.
pub trait PathSearch: Send + Sync {
    /// Compute a minimum-length path from `from` to `to`.
    ///
    /// # Errors
    ///
    /// [`RouteError::NoRoute`] when the two nodes are not connected.
    fn search(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> RouteResult<SearchPath>;
}

// ── AStarSearch ───────────────────────────────────────────────────────────────

/// A* over the CSR road graph with a haversine goal heuristic.
pub struct AStarSearch;

impl PathSearch for AStarSearch {
    fn search(&self, network: &RoadNetwork, from: NodeId, to: NodeId) -> RouteResult<SearchPath> {
        astar(network, from, to)
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

/// Heap entry ordered as a min-heap on `f` (estimated total cost), with
/// `NodeId` as secondary key for deterministic tie-breaking.
struct HeapEntry {
    f: f32,
    g: f32,
    node: NodeId,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want the smallest f first.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.node.0.cmp(&self.node.0))
    }
}

fn astar(network: &RoadNetwork, from: NodeId, to: NodeId) -> RouteResult<SearchPath> {
    let n = network.node_count();
    if from.index() >= n || to.index() >= n {
        return Err(RouteError::NoRoute { from, to });
    }
    if from == to {
        return Ok(SearchPath { nodes: vec![from], cost_m: 0.0 });
    }

    let goal = network.node_pos[to.index()];

    // dist[v] = best known cost (m) to reach v.
    let mut dist = vec![f32::INFINITY; n];
    // prev_edge[v] = EdgeId that reached v; EdgeId::INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeId::INVALID; n];

    dist[from.index()] = 0.0;

    let mut heap = BinaryHeap::new();
    heap.push(HeapEntry {
        f: network.node_pos[from.index()].distance_m(goal),
        g: 0.0,
        node: from,
    });

    while let Some(HeapEntry { g, node, .. }) = heap.pop() {
        if node == to {
            return Ok(reconstruct(network, prev_edge, to, g));
        }

        // Skip stale heap entries.
        if g > dist[node.index()] {
            continue;
        }

        for edge in network.out_edges(node) {
            let neighbor = network.edge_to[edge.index()];
            let new_g = g + network.edge_length_m[edge.index()];

            if new_g < dist[neighbor.index()] {
                dist[neighbor.index()] = new_g;
                prev_edge[neighbor.index()] = edge;
                heap.push(HeapEntry {
                    f: new_g + network.node_pos[neighbor.index()].distance_m(goal),
                    g: new_g,
                    node: neighbor,
                });
            }
        }
    }

    Err(RouteError::NoRoute { from, to })
}

fn reconstruct(
    network: &RoadNetwork,
    prev_edge: Vec<EdgeId>,
    to: NodeId,
    cost_m: f32,
) -> SearchPath {
    let mut nodes = vec![to];
    let mut cur = to;
    loop {
        let e = prev_edge[cur.index()];
        if e == EdgeId::INVALID {
            break;
        }
        cur = network.edge_from[e.index()];
        nodes.push(cur);
    }
    nodes.reverse();
    SearchPath { nodes, cost_m }
}
