//! Boolean hazard grid and point-in-hazard query.

use fr_core::GeoPoint;

use crate::error::{HazardError, HazardResult};
use crate::grid::{Cell, GridIndex};

/// A `rows × cols` boolean overlay marking impassable cells.
///
/// Built once per routing query from an external forecast and immutable
/// afterwards.  Cells are stored row-major: `(row, col)` lives at
/// `row * cols + col`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HazardMask {
    index: GridIndex,
    cells: Vec<bool>,
}

impl HazardMask {
    /// Wrap a row-major cell vector produced by a forecast service.
    ///
    /// # Errors
    ///
    /// Returns [`HazardError::DimensionMismatch`] if `cells.len()` does not
    /// equal `rows × cols`.
    pub fn new(index: GridIndex, cells: Vec<bool>) -> HazardResult<Self> {
        let expected = index.rows() * index.cols();
        if cells.len() != expected {
            return Err(HazardError::DimensionMismatch {
                rows: index.rows(),
                cols: index.cols(),
                expected,
                got: cells.len(),
            });
        }
        Ok(Self { index, cells })
    }

    /// A mask with every cell passable.
    pub fn all_clear(index: GridIndex) -> Self {
        let cells = vec![false; index.rows() * index.cols()];
        Self { index, cells }
    }

    /// Build a mask by evaluating `f(row, col)` for every cell.
    pub fn from_fn(index: GridIndex, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut cells = Vec::with_capacity(index.rows() * index.cols());
        for row in 0..index.rows() {
            for col in 0..index.cols() {
                cells.push(f(row, col));
            }
        }
        Self { index, cells }
    }

    #[inline]
    pub fn index(&self) -> &GridIndex {
        &self.index
    }

    /// `true` if `cell` is hazarded.
    #[inline]
    pub fn cell(&self, cell: Cell) -> bool {
        self.cells[cell.row * self.index.cols() + cell.col]
    }

    /// `true` if the coordinate falls in a hazarded cell.
    ///
    /// Coordinates outside the bounding box are treated as passable: hazard
    /// is only modeled inside the query region, so the query fails open.
    pub fn is_hazarded(&self, p: GeoPoint) -> bool {
        match self.index.to_cell(p) {
            Some(cell) => self.cell(cell),
            None => false,
        }
    }

    /// Number of hazarded cells (observability helper).
    pub fn hazarded_cell_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}
