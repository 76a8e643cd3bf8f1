//! Connected-component selection: restrict a pruned network to the single
//! reachable island relevant to the query.
//!
//! Components are computed in the undirected sense with a union-find over
//! the edge list; the selected island keeps the original directed edges and
//! parallel multiplicities restricted to its node set.

use rustc_hash::FxHashMap;

use fr_core::{NodeId, SourceId};
use fr_spatial::{RoadNetwork, RoadNetworkBuilder};

/// Result of [`select`]: the island plus selection diagnostics.
pub struct SelectOutcome {
    /// The induced subgraph of the chosen component.  Always connected when
    /// viewed undirected.
    pub island: RoadNetwork,

    /// Number of undirected components in the input network.
    pub component_count: usize,

    /// `true` when an anchor was requested but no node with that `SourceId`
    /// exists in the network (e.g. it was removed by pruning), so the
    /// largest component was selected instead.  Non-fatal.
    pub anchor_unreachable: bool,
}

/// Extract one connected component of `network` as a new network value.
///
/// - With `anchor` present in the network: the component containing it.
/// - With `anchor` absent (pruned away): the largest component, and the
///   `anchor_unreachable` notice is set.
/// - Without an anchor: the largest component.
///
/// "Largest" means most nodes; equal-sized components are tie-broken by the
/// one containing the lowest `NodeId`, so selection is reproducible.
pub fn select(network: &RoadNetwork, anchor: Option<SourceId>) -> SelectOutcome {
    let n = network.node_count();

    // ── Union-find over undirected edges ──────────────────────────────────
    let mut uf = UnionFind::new(n);
    for edge in network.edges() {
        uf.union(
            network.edge_from[edge.index()].index(),
            network.edge_to[edge.index()].index(),
        );
    }

    // Component sizes, and each root's lowest member (roots are discovered
    // in ascending node order, so first sighting is the minimum NodeId).
    let mut size: FxHashMap<u32, u32> = FxHashMap::default();
    let mut lowest: FxHashMap<u32, u32> = FxHashMap::default();
    for i in 0..n {
        let root = uf.find(i) as u32;
        *size.entry(root).or_insert(0) += 1;
        lowest.entry(root).or_insert(i as u32);
    }
    let component_count = size.len();

    // ── Choose the component root ─────────────────────────────────────────
    let anchor_node = anchor.and_then(|src| network.node_by_source(src));
    let anchor_unreachable = anchor.is_some() && anchor_node.is_none();

    let chosen_root = match anchor_node {
        Some(node) => uf.find(node.index()) as u32,
        // Largest component; ties go to the lowest contained NodeId.
        None => size
            .iter()
            .map(|(&root, &sz)| (sz, std::cmp::Reverse(lowest[&root]), root))
            .max()
            .map(|(_, _, root)| root)
            .unwrap_or(0),
    };

    // ── Induce the subgraph ───────────────────────────────────────────────
    let mut builder = RoadNetworkBuilder::with_capacity(
        size.get(&chosen_root).copied().unwrap_or(0) as usize,
        network.edge_count(),
    );
    let mut remap: Vec<Option<NodeId>> = vec![None; n];
    for i in 0..n {
        if uf.find(i) as u32 == chosen_root {
            remap[i] = Some(builder.add_node_with_source(
                network.node_pos[i],
                network.node_source[i],
            ));
        }
    }

    for edge in network.edges() {
        let from = network.edge_from[edge.index()];
        let to   = network.edge_to[edge.index()];
        // Union-find puts both endpoints of an edge in one component, so a
        // kept source implies a kept destination.
        if let (Some(f), Some(t)) = (remap[from.index()], remap[to.index()]) {
            builder.add_directed_edge(
                f,
                t,
                network.edge_key[edge.index()],
                network.edge_length_m[edge.index()],
                network.edge_geometry[edge.index()].clone(),
            );
        }
    }

    SelectOutcome {
        island: builder.build(),
        component_count,
        anchor_unreachable,
    }
}

// ── Union-find ────────────────────────────────────────────────────────────────

/// Union-find with union by rank and path halving.
struct UnionFind {
    parent: Vec<u32>,
    rank:   Vec<u8>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n as u32).collect(),
            rank:   vec![0; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] as usize != x {
            // Path halving: point x at its grandparent as we walk up.
            let grand = self.parent[self.parent[x] as usize];
            self.parent[x] = grand;
            x = grand as usize;
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb as u32,
            std::cmp::Ordering::Greater => self.parent[rb] = ra as u32,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra as u32;
                self.rank[ra] += 1;
            }
        }
    }
}
