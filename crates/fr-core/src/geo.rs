//! Geographic coordinate type, haversine distance, and bounding boxes.
//!
//! `GeoPoint` uses `f32` (single-precision) latitude/longitude.  At the
//! equator this gives ~1 m precision — more than sufficient for city-scale
//! routing while halving memory consumption vs. `f64`.

use crate::error::{CoreError, CoreResult};

// ── GeoPoint ──────────────────────────────────────────────────────────────────

/// A WGS-84 geographic coordinate stored as single-precision floats.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f32,
    pub lon: f32,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f32, lon: f32) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in metres.
    ///
    /// Accuracy: ±0.5 % (f32 rounding); suitable for routing at city scale.
    /// Never exceeds the true network distance between two points, which
    /// makes it an admissible A* heuristic.
    pub fn distance_m(self, other: GeoPoint) -> f32 {
        const R: f32 = 6_371_000.0; // mean Earth radius, metres

        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        R * c
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── BoundingBox ───────────────────────────────────────────────────────────────

/// Rectangular geographic region in degree limits.
///
/// Invariant (enforced by [`new`](Self::new)): `north > south` and
/// `east > west`.  Constructed once per routing query and read-only
/// afterwards.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub north: f32,
    pub south: f32,
    pub east:  f32,
    pub west:  f32,
}

impl BoundingBox {
    /// Validate and construct a bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidBoundingBox`] when `north <= south` or
    /// `east <= west`.
    pub fn new(north: f32, south: f32, east: f32, west: f32) -> CoreResult<Self> {
        if north <= south || east <= west {
            return Err(CoreError::InvalidBoundingBox { north, south, east, west });
        }
        Ok(Self { north, south, east, west })
    }

    /// Build a box covering two points, padded by `buffer_deg` on every side.
    ///
    /// Used to derive the query region from a start/end pair when the caller
    /// does not supply an explicit box.
    pub fn around(a: GeoPoint, b: GeoPoint, buffer_deg: f32) -> CoreResult<Self> {
        Self::new(
            a.lat.max(b.lat) + buffer_deg,
            a.lat.min(b.lat) - buffer_deg,
            a.lon.max(b.lon) + buffer_deg,
            a.lon.min(b.lon) - buffer_deg,
        )
    }

    #[inline]
    pub fn height_deg(&self) -> f32 {
        self.north - self.south
    }

    #[inline]
    pub fn width_deg(&self) -> f32 {
        self.east - self.west
    }

    /// `true` if `p` lies inside the box (north and west edges inclusive,
    /// matching the grid-cell clamping rule in `fr-hazard`).
    #[inline]
    pub fn contains(&self, p: GeoPoint) -> bool {
        p.lat <= self.north && p.lat > self.south && p.lon >= self.west && p.lon < self.east
    }
}
