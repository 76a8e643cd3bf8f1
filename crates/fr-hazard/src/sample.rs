//! Arc-length sampling of road-segment geometry against the hazard mask.
//!
//! A road edge may dip through a hazarded cell even when both endpoints are
//! clear, so the pruning stage samples points along each surviving edge's
//! polyline.  Sample count is an accuracy/cost dial, not a correctness
//! parameter: more samples catch narrower hazard crossings on long or
//! curved edges at proportional cost.

use fr_core::GeoPoint;

use crate::mask::HazardMask;

/// Samples evenly spaced points along a polyline and tests each against a
/// [`HazardMask`].
#[derive(Copy, Clone, Debug)]
pub struct EdgeSampler {
    sample_count: usize,
}

impl EdgeSampler {
    /// Default sample count — matches the pruning stage's accuracy needs for
    /// city-block-length edges.
    pub const DEFAULT_SAMPLE_COUNT: usize = 10;

    /// Create a sampler taking `sample_count` points per edge.
    ///
    /// Counts below 2 are clamped to 2 so both endpoints are always tested.
    pub fn new(sample_count: usize) -> Self {
        Self { sample_count: sample_count.max(2) }
    }

    #[inline]
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// `true` if any sample point along `polyline` falls in a hazarded cell.
    ///
    /// `polyline` must have at least 2 points; callers synthesize a straight
    /// two-point segment for edges without explicit geometry.
    pub fn is_edge_hazarded(&self, mask: &HazardMask, polyline: &[GeoPoint]) -> bool {
        debug_assert!(polyline.len() >= 2, "edge geometry needs both endpoints");

        let cum = cumulative_lengths(polyline);
        let total = *cum.last().unwrap_or(&0.0);

        // Degenerate zero-length edge: every sample is the first point.
        if total <= 0.0 {
            return mask.is_hazarded(polyline[0]);
        }

        let last = (self.sample_count - 1) as f32;
        (0..self.sample_count).any(|i| {
            let target = total * i as f32 / last;
            mask.is_hazarded(point_at(polyline, &cum, target))
        })
    }

    /// The sample points themselves, evenly spaced by cumulative arc length
    /// and including both endpoints.  Exposed for diagnostics and tests.
    pub fn sample(&self, polyline: &[GeoPoint]) -> Vec<GeoPoint> {
        debug_assert!(polyline.len() >= 2, "edge geometry needs both endpoints");

        let cum = cumulative_lengths(polyline);
        let total = *cum.last().unwrap_or(&0.0);
        if total <= 0.0 {
            return vec![polyline[0]; self.sample_count];
        }

        let last = (self.sample_count - 1) as f32;
        (0..self.sample_count)
            .map(|i| point_at(polyline, &cum, total * i as f32 / last))
            .collect()
    }
}

impl Default for EdgeSampler {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SAMPLE_COUNT)
    }
}

// ── Polyline helpers ──────────────────────────────────────────────────────────

/// Haversine length from the polyline start to each vertex, in metres.
/// `result[0] == 0.0`, `result.last()` is the full length.
fn cumulative_lengths(polyline: &[GeoPoint]) -> Vec<f32> {
    let mut cum = Vec::with_capacity(polyline.len());
    let mut acc = 0.0f32;
    cum.push(0.0);
    for pair in polyline.windows(2) {
        acc += pair[0].distance_m(pair[1]);
        cum.push(acc);
    }
    cum
}

/// The point `target` metres along the polyline (linear interpolation within
/// the containing segment — adequate at sub-kilometre segment lengths).
fn point_at(polyline: &[GeoPoint], cum: &[f32], target: f32) -> GeoPoint {
    // Find the first vertex at or beyond the target distance.
    let idx = match cum.iter().position(|&d| d >= target) {
        Some(0) => return polyline[0],
        Some(i) => i,
        None => return polyline[polyline.len() - 1], // f32 rounding at the tail
    };

    let seg_len = cum[idx] - cum[idx - 1];
    if seg_len <= 0.0 {
        return polyline[idx];
    }
    let t = (target - cum[idx - 1]) / seg_len;
    let a = polyline[idx - 1];
    let b = polyline[idx];
    GeoPoint::new(a.lat + (b.lat - a.lat) * t, a.lon + (b.lon - a.lon) * t)
}
