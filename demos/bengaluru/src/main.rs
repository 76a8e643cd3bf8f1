//! bengaluru — smallest runnable example for the flood_route engine.
//!
//! Routes across a synthetic street lattice over central Bengaluru while a
//! random 20×20 flood grid (~15 % hazarded cells) disables parts of it.
//! Swap the lattice for a real provider network to run at city scale.

use anyhow::{Context, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use fr_core::{BoundingBox, GeoPoint, NodeId};
use fr_hazard::{GridIndex, HazardMask};
use fr_routing::{PipelineObserver, PruneStats, Route, RoutePlanner};
use fr_spatial::{RoadNetwork, RoadNetworkBuilder};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:          u64 = 42;
const GRID_ROWS:     usize = 20;
const GRID_COLS:     usize = 20;
const HAZARD_PROB:   f64 = 0.15;
const SAMPLE_COUNT:  usize = 15;

// Lattice resolution: nodes per axis inside the bounding box.
const LATTICE_ROWS:  usize = 12;
const LATTICE_COLS:  usize = 16;

// ── Stage printer ─────────────────────────────────────────────────────────────

struct StagePrinter;

impl PipelineObserver for StagePrinter {
    fn on_prune(&mut self, stats: &PruneStats) {
        eprintln!(
            "prune: {} → {} nodes ({} flooded), {} → {} edges ({} flooded segments)",
            stats.input_nodes,
            stats.output_nodes,
            stats.hazarded_nodes,
            stats.input_edges,
            stats.output_edges,
            stats.hazarded_edges,
        );
    }

    fn on_select(&mut self, components: usize, nodes: usize, edges: usize, fallback: bool) {
        eprintln!("select: {components} components; island has {nodes} nodes, {edges} edges");
        if fallback {
            eprintln!("select: anchor unreachable, fell back to largest component");
        }
    }

    fn on_endpoints(&mut self, start: NodeId, end: NodeId) {
        eprintln!("snap: start → {start}, end → {end}");
    }

    fn on_route(&mut self, route: &Route) {
        eprintln!(
            "route: {} nodes, {:.2} km",
            route.num_nodes, route.distance_km
        );
    }
}

// ── Lattice network ───────────────────────────────────────────────────────────

/// Rectangular street lattice: nodes on a regular grid inside `bbox`,
/// bidirectional edges between horizontal/vertical neighbours, lengths from
/// haversine.
fn build_lattice(bbox: &BoundingBox) -> RoadNetwork {
    let mut b = RoadNetworkBuilder::with_capacity(
        LATTICE_ROWS * LATTICE_COLS,
        LATTICE_ROWS * LATTICE_COLS * 4,
    );

    let mut ids = Vec::with_capacity(LATTICE_ROWS * LATTICE_COLS);
    for r in 0..LATTICE_ROWS {
        for c in 0..LATTICE_COLS {
            // Offset by half a step so no node sits on the box boundary.
            let lat = bbox.north
                - (r as f32 + 0.5) / LATTICE_ROWS as f32 * bbox.height_deg();
            let lon = bbox.west
                + (c as f32 + 0.5) / LATTICE_COLS as f32 * bbox.width_deg();
            ids.push(b.add_node(GeoPoint::new(lat, lon)));
        }
    }

    for r in 0..LATTICE_ROWS {
        for c in 0..LATTICE_COLS {
            let here = ids[r * LATTICE_COLS + c];
            if c + 1 < LATTICE_COLS {
                let east = ids[r * LATTICE_COLS + c + 1];
                let len = b.node_pos(here).distance_m(b.node_pos(east));
                b.add_road(here, east, len, None);
            }
            if r + 1 < LATTICE_ROWS {
                let south = ids[(r + 1) * LATTICE_COLS + c];
                let len = b.node_pos(here).distance_m(b.node_pos(south));
                b.add_road(here, south, len, None);
            }
        }
    }

    b.build()
}

// ── GeoJSON output ────────────────────────────────────────────────────────────

/// Render the route as a GeoJSON FeatureCollection (coordinates are
/// `[lon, lat]` per the GeoJSON spec).
fn route_geojson(route: &Route) -> serde_json::Value {
    let coords: Vec<[f32; 2]> = route
        .coordinates
        .iter()
        .map(|p| [p.lon, p.lat])
        .collect();

    serde_json::json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {
                "type": "route",
                "distance_meters": route.distance_m,
                "distance_km": route.distance_km,
                "num_nodes": route.num_nodes,
                "status": route.status,
            },
            "geometry": {
                "type": "LineString",
                "coordinates": coords,
            },
        }],
    })
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let bbox = BoundingBox::new(12.98, 12.95, 77.62, 77.58)
        .context("demo bounding box")?;
    let grid = GridIndex::new(bbox, GRID_ROWS, GRID_COLS);

    let mut rng = SmallRng::seed_from_u64(SEED);
    let mask = HazardMask::from_fn(grid, |_, _| rng.gen_bool(HAZARD_PROB));
    eprintln!(
        "flood grid: {}/{} cells hazarded",
        mask.hazarded_cell_count(),
        GRID_ROWS * GRID_COLS
    );

    let network = build_lattice(&bbox);
    eprintln!(
        "lattice: {} nodes, {} edges",
        network.node_count(),
        network.edge_count()
    );

    let start = GeoPoint::new(12.970, 77.585);
    let end   = GeoPoint::new(12.955, 77.610);

    let planner = RoutePlanner::new().with_sample_count(SAMPLE_COUNT);
    let outcome = planner
        .plan(&network, &mask, start, end, None, &mut StagePrinter)
        .context("no passable route")?;

    println!("{}", serde_json::to_string_pretty(&route_geojson(&outcome.route))?);
    Ok(())
}
