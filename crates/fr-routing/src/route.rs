//! Route serialization: package a found path as a distance-annotated line
//! geometry.  This is the sole contract exposed to downstream consumers.

use fr_core::GeoPoint;
use fr_spatial::RoadNetwork;

use crate::astar::SearchPath;

/// How the route was obtained.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RouteStatus {
    /// No hazard adjustments were needed; the full network was routable.
    Clear,
    /// The route was computed on a hazard-reduced network.
    HazardReduced,
}

/// Final pipeline output: an ordered line geometry with distance statistics.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Path node coordinates in traversal order.
    pub coordinates: Vec<GeoPoint>,
    /// Total distance in metres, rounded to 2 decimals.
    pub distance_m: f32,
    /// Total distance in kilometres, rounded to 2 decimals.
    pub distance_km: f32,
    /// Number of nodes on the path.
    pub num_nodes: usize,
    pub status: RouteStatus,
}

/// Build a [`Route`] from a search result.
///
/// The total distance is re-derived independently of the search: for each
/// consecutive node pair it takes the minimum parallel-edge length, which by
/// construction equals the cost A* reported (tested in this crate).
pub fn serialize(network: &RoadNetwork, path: &SearchPath, status: RouteStatus) -> Route {
    let coordinates: Vec<GeoPoint> = path
        .nodes
        .iter()
        .map(|&node| network.node_pos[node.index()])
        .collect();

    let mut total_m = 0.0f32;
    for pair in path.nodes.windows(2) {
        if let Some(len) = network.min_length_between(pair[0], pair[1]) {
            total_m += len;
        } else {
            // A hop not backed by an edge would mean the search and the
            // network disagree; recompute conservatively from geometry.
            debug_assert!(false, "path hop {} → {} has no edge", pair[0], pair[1]);
            total_m += network.node_pos[pair[0].index()]
                .distance_m(network.node_pos[pair[1].index()]);
        }
    }

    Route {
        num_nodes: path.nodes.len(),
        coordinates,
        distance_m: round2(total_m),
        distance_km: round2(total_m / 1000.0),
        status,
    }
}

#[inline]
fn round2(v: f32) -> f32 {
    (v * 100.0).round() / 100.0
}
