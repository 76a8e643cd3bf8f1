//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_from[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays (`edge_from`, `edge_to`, `edge_key`, `edge_length_m`,
//! `edge_geometry`) are sorted by `(source, destination, key)` and indexed by
//! `EdgeId`.  Parallel edges between the same ordered node pair are permitted
//! (multigraph) and distinguished by `edge_key`; iteration over a node's
//! outgoing edges is a contiguous memory scan.
//!
//! # Immutability
//!
//! A built network is never mutated.  Pruning and component selection in
//! `fr-routing` consume a network by reference and emit a *new* network
//! through this builder, so every edge always references nodes present in
//! the same network value.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(lat, lon)` to the nearest `NodeId`.  Used
//! to snap query start/end coordinates to road nodes.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use fr_core::{EdgeId, GeoPoint, NodeId, SourceId};

use crate::error::{SpatialError, SpatialResult};

// ── R-tree node entry ─────────────────────────────────────────────────────────

/// Entry stored in the R-tree spatial index: a 2-D `[lat, lon]` point with
/// the associated `NodeId`.
#[derive(Clone)]
struct NodeEntry {
    point: [f32; 2], // [lat, lon]
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lat/lon space.  Sufficient for
    /// nearest-node queries within a city (error < 0.1 % at ≤ 60° lat).
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed road multigraph in CSR format plus a spatial index for node
/// snapping.
///
/// All fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`RoadNetworkBuilder`].
pub struct RoadNetwork {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    /// Stable provider ID of each node.  `NodeId`s are renumbered by every
    /// pruning/selection pass; `SourceId`s are carried through unchanged.
    pub node_source: Vec<SourceId>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Outgoing edges of node `n` are at EdgeIds
    /// `node_out_start[n] .. node_out_start[n+1]`.
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId = position in sorted order) ──────────
    /// Source node of each edge.  Redundant with CSR but required for
    /// efficient route reconstruction (trace `prev_edge` back to source).
    pub edge_from: Vec<NodeId>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Parallel-edge key: distinguishes multiple edges between the same
    /// ordered node pair.
    pub edge_key: Vec<u32>,

    /// Length of each edge in metres.  The routing cost.
    pub edge_length_m: Vec<f32>,

    /// Optional polyline geometry (ordered, from source to destination).
    /// `None` means the edge is a straight segment between its endpoints.
    pub edge_geometry: Vec<Option<Vec<GeoPoint>>>,

    // ── Spatial index ─────────────────────────────────────────────────────
    spatial_idx: RTree<NodeEntry>,
}

impl RoadNetwork {
    /// Construct an empty network with no nodes or edges.
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`,
    /// parallel edges included.
    ///
    /// This is a contiguous index range — no heap allocation.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Out-degree of `node` (number of outgoing edges).
    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// Iterator over every `EdgeId` in the network.
    #[inline]
    pub fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.edge_count()).map(|i| EdgeId(i as u32))
    }

    /// Explicit polyline of `edge`, or `None` for straight segments.
    #[inline]
    pub fn edge_geometry(&self, edge: EdgeId) -> Option<&[GeoPoint]> {
        self.edge_geometry[edge.index()].as_deref()
    }

    /// Minimum length in metres over all parallel edges `from → to`, or
    /// `None` if no such edge exists.
    ///
    /// Routing and route serialization both cost a node pair by its cheapest
    /// parallel edge; anything else would break search optimality.
    pub fn min_length_between(&self, from: NodeId, to: NodeId) -> Option<f32> {
        self.out_edges(from)
            .filter(|e| self.edge_to[e.index()] == to)
            .map(|e| self.edge_length_m[e.index()])
            .min_by(f32::total_cmp)
    }

    /// Look up a node by its stable provider ID.
    ///
    /// Linear scan — used for anchor resolution once per query, not on hot
    /// paths.
    pub fn node_by_source(&self, source: SourceId) -> Option<NodeId> {
        self.node_source
            .iter()
            .position(|&s| s == source)
            .map(|i| NodeId(i as u32))
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Return the `NodeId` of the nearest road node to `pos`.
    ///
    /// Uses planar lat/lon distance — valid at city/neighbourhood scale.
    ///
    /// # Errors
    ///
    /// [`SpatialError::EmptyNetwork`] if the network has no nodes.
    pub fn snap_to_node(&self, pos: GeoPoint) -> SpatialResult<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lat, pos.lon])
            .map(|e| e.id)
            .ok_or(SpatialError::EmptyNetwork)
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// The builder accepts nodes and directed edges in any order.  `build()`
/// sorts edges by `(source, destination, key)`, constructs the CSR arrays,
/// and bulk-loads the R-tree.
///
/// # Example
///
/// ```
/// use fr_core::GeoPoint;
/// use fr_spatial::RoadNetworkBuilder;
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(GeoPoint::new(12.96, 77.59));
/// let c = b.add_node(GeoPoint::new(12.97, 77.60));
/// b.add_road(a, c, 1_200.0, None); // 1.2 km, straight segment
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
pub struct RoadNetworkBuilder {
    nodes:     Vec<GeoPoint>,
    sources:   Vec<SourceId>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:     NodeId,
    to:       NodeId,
    key:      u32,
    length_m: f32,
    geometry: Option<Vec<GeoPoint>>,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), sources: Vec::new(), raw_edges: Vec::new() }
    }

    /// Pre-allocate for the expected number of nodes and edges to reduce
    /// reallocations when bulk-loading from a provider.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:     Vec::with_capacity(nodes),
            sources:   Vec::with_capacity(nodes),
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a road node and return its `NodeId` (sequential from 0).
    /// The node's `SourceId` defaults to its insertion index.
    pub fn add_node(&mut self, pos: GeoPoint) -> NodeId {
        let seq = SourceId(self.nodes.len() as u64);
        self.add_node_with_source(pos, seq)
    }

    /// Add a road node carrying an explicit provider ID (e.g. an OSM node
    /// ID, or the `SourceId` of the same node in a pre-pruning network).
    pub fn add_node_with_source(&mut self, pos: GeoPoint, source: SourceId) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        self.sources.push(source);
        id
    }

    /// Add a **directed** edge from `from` to `to`.
    ///
    /// - `key`: parallel-edge key; edges sharing `(from, to)` must carry
    ///   distinct keys.
    /// - `length_m`: physical length in metres (the routing cost).
    /// - `geometry`: optional polyline from `from` to `to`; `None` for a
    ///   straight segment.
    pub fn add_directed_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        key: u32,
        length_m: f32,
        geometry: Option<Vec<GeoPoint>>,
    ) {
        self.raw_edges.push(RawEdge { from, to, key, length_m, geometry });
    }

    /// Convenience: add edges in **both directions** for an undirected road
    /// segment (the common case for most road types).  The reverse edge
    /// carries the reversed polyline.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, length_m: f32, geometry: Option<Vec<GeoPoint>>) {
        let reversed = geometry.as_ref().map(|g| {
            let mut r = g.clone();
            r.reverse();
            r
        });
        self.add_directed_edge(a, b, 0, length_m, geometry);
        self.add_directed_edge(b, a, 0, length_m, reversed);
    }

    /// Look up the position of a node added earlier (used by loaders to
    /// compute edge lengths between adjacent nodes).
    pub fn node_pos(&self, id: NodeId) -> GeoPoint {
        self.nodes[id.index()]
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`RoadNetwork`].
    ///
    /// Time complexity: O(E log E) for edge sort + O(N log N) for R-tree bulk
    /// load, where N = nodes, E = edges.
    pub fn build(self) -> RoadNetwork {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        // Sort edges by (from, to, key) for CSR construction.  The full key
        // keeps EdgeId assignment deterministic for any insertion order.
        let mut raw = self.raw_edges;
        raw.sort_unstable_by_key(|e| (e.from.0, e.to.0, e.key));

        // Build edge arrays from sorted raw edges.
        let edge_from:     Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:       Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_key:      Vec<u32>    = raw.iter().map(|e| e.key).collect();
        let edge_length_m: Vec<f32>    = raw.iter().map(|e| e.length_m).collect();

        // Build CSR row pointer (node_out_start).
        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        let edge_geometry: Vec<Option<Vec<GeoPoint>>> =
            raw.into_iter().map(|e| e.geometry).collect();

        // Bulk-load R-tree for O(N log N) construction (faster than N inserts).
        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry {
                point: [pos.lat, pos.lon],
                id: NodeId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        RoadNetwork {
            node_pos: self.nodes,
            node_source: self.sources,
            node_out_start,
            edge_from,
            edge_to,
            edge_key,
            edge_length_m,
            edge_geometry,
            spatial_idx,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
