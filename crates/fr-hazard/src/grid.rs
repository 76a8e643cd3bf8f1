//! Bidirectional mapping between coordinates and hazard-grid cells.
//!
//! # Clamping rule
//!
//! The mapping truncates toward zero, so a coordinate exactly on the north
//! or west edge of the box maps to row/col 0, while the south and east edges
//! fall just outside (`row == rows` / `col == cols`).  This rule is relied
//! on by tests and must not change.

use fr_core::{BoundingBox, GeoPoint};

/// A discrete `(row, col)` cell of a hazard grid.  Row 0 is the northern
/// edge; col 0 is the western edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

/// Deterministic, side-effect-free mapping between geographic coordinates
/// and the `rows × cols` cells of a grid laid over a [`BoundingBox`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridIndex {
    bbox: BoundingBox,
    rows: usize,
    cols: usize,
}

impl GridIndex {
    /// Lay a `rows × cols` grid over `bbox`.
    ///
    /// Both dimensions must be non-zero; the bounding box was already
    /// validated at construction.
    pub fn new(bbox: BoundingBox, rows: usize, cols: usize) -> Self {
        debug_assert!(rows > 0 && cols > 0, "grid must have at least one cell");
        Self { bbox, rows, cols }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    /// Map a coordinate to its grid cell, or `None` if it falls outside the
    /// bounding box.
    pub fn to_cell(&self, p: GeoPoint) -> Option<Cell> {
        let row = (self.bbox.north - p.lat) / self.bbox.height_deg() * self.rows as f32;
        let col = (p.lon - self.bbox.west) / self.bbox.width_deg() * self.cols as f32;

        // Reject before casting: a negative f32 `as usize` saturates to 0,
        // which would silently alias out-of-box coordinates onto row/col 0.
        if row < 0.0 || row >= self.rows as f32 || col < 0.0 || col >= self.cols as f32 {
            return None;
        }
        Some(Cell { row: row as usize, col: col as usize })
    }

    /// Inverse mapping: the coordinate of `cell`'s north-west corner.
    ///
    /// Diagnostic helper only.  The corner sits exactly on a cell boundary,
    /// so float rounding may map it back into a neighbouring cell; use
    /// [`center`](Self::center) when a representative interior point is
    /// needed.
    pub fn to_point(&self, cell: Cell) -> GeoPoint {
        GeoPoint::new(
            self.bbox.north - (cell.row as f32 / self.rows as f32) * self.bbox.height_deg(),
            self.bbox.west + (cell.col as f32 / self.cols as f32) * self.bbox.width_deg(),
        )
    }

    /// The coordinate of `cell`'s centre.  Always maps back onto `cell`
    /// under [`to_cell`](Self::to_cell) for in-range cells.
    pub fn center(&self, cell: Cell) -> GeoPoint {
        GeoPoint::new(
            self.bbox.north - (cell.row as f32 + 0.5) / self.rows as f32 * self.bbox.height_deg(),
            self.bbox.west + (cell.col as f32 + 0.5) / self.cols as f32 * self.bbox.width_deg(),
        )
    }

    /// Height of one cell in degrees.
    #[inline]
    pub fn cell_height_deg(&self) -> f32 {
        self.bbox.height_deg() / self.rows as f32
    }

    /// Width of one cell in degrees.
    #[inline]
    pub fn cell_width_deg(&self) -> f32 {
        self.bbox.width_deg() / self.cols as f32
    }
}
