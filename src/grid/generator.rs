//! Regular grid generation over a bounding extent
//!
//! Cells are emitted column by column, starting at the lower-left corner
//! of the extent. Positions are advanced by repeated addition of the cell
//! size, and the last column and row are allowed to overshoot the extent
//! instead of being clipped.

use log::debug;

use super::cell::Cell;
use crate::coordinate::{BoundingBox, CoordinateSystem};
use crate::errors::{VectorError, VectorResult};
use crate::layer::Layer;

/// Default cell size in linear units of the layer's CRS (1 km for metric systems)
pub const DEFAULT_CELL_SIZE: f64 = 1000.0;

/// Generator for regular square grids
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGenerator {
    cell_size: f64,
}

impl Default for GridGenerator {
    fn default() -> Self {
        GridGenerator { cell_size: DEFAULT_CELL_SIZE }
    }
}

impl GridGenerator {
    /// Create a generator for a given cell size
    ///
    /// # Errors
    /// `InvalidArgument` if the size is zero, negative or not finite.
    pub fn new(cell_size: f64) -> VectorResult<Self> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(VectorError::InvalidArgument(format!(
                "Cell size must be a positive number, got {}", cell_size)));
        }

        Ok(GridGenerator { cell_size })
    }

    /// The configured cell size
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Check that an extent can be tiled by this generator
    ///
    /// Rejects non-finite or inverted extents, and extents whose coordinate
    /// magnitude is so large that adding the cell size no longer changes the
    /// position.
    fn validate_extent(&self, extent: &BoundingBox) -> VectorResult<()> {
        if !extent.is_valid() {
            return Err(VectorError::InvalidArgument(format!(
                "Extent is not a finite bounding box: ({}, {}, {}, {})",
                extent.min_x, extent.min_y, extent.max_x, extent.max_y)));
        }

        let magnitude_x = extent.min_x.abs().max(extent.max_x.abs());
        let magnitude_y = extent.min_y.abs().max(extent.max_y.abs());
        if magnitude_x + self.cell_size == magnitude_x || magnitude_y + self.cell_size == magnitude_y {
            return Err(VectorError::InvalidArgument(format!(
                "Cell size {} is below the coordinate precision of the extent", self.cell_size)));
        }

        Ok(())
    }

    /// Number of cell start positions from `min` while staying below `max`
    fn steps(&self, min: f64, max: f64) -> usize {
        let mut count = 0;
        let mut position = min;
        while position < max {
            count += 1;
            position += self.cell_size;
        }
        count
    }

    /// Lazily iterate over the cells covering an extent
    ///
    /// # Errors
    /// `InvalidArgument` if the extent cannot be tiled.
    pub fn cells(&self, extent: &BoundingBox) -> VectorResult<GridCells> {
        self.validate_extent(extent)?;

        Ok(GridCells {
            cell_size: self.cell_size,
            min_y: extent.min_y,
            max_x: extent.max_x,
            max_y: extent.max_y,
            x: extent.min_x,
            y: extent.min_y,
            column: 0,
            row: 0,
        })
    }

    /// Number of columns and rows a grid over `extent` will have
    ///
    /// # Errors
    /// `InvalidArgument` if the extent cannot be tiled or the cell count
    /// does not fit in a `usize`.
    pub fn dimensions(&self, extent: &BoundingBox) -> VectorResult<(usize, usize)> {
        self.validate_extent(extent)?;

        let estimate = (extent.width() / self.cell_size).ceil() * (extent.height() / self.cell_size).ceil();
        if estimate >= usize::MAX as f64 {
            return Err(too_large(estimate));
        }

        Ok((self.steps(extent.min_x, extent.max_x), self.steps(extent.min_y, extent.max_y)))
    }

    /// Number of cells a grid over `extent` will have
    pub fn cell_count(&self, extent: &BoundingBox) -> VectorResult<usize> {
        let (columns, rows) = self.dimensions(extent)?;
        columns.checked_mul(rows).ok_or_else(|| too_large(columns as f64 * rows as f64))
    }

    /// Build a grid layer over an explicit extent
    pub fn generate_for_extent(&self, extent: &BoundingBox, crs: Option<CoordinateSystem>) -> VectorResult<Layer> {
        let (columns, rows) = self.dimensions(extent)?;
        let count = columns.checked_mul(rows).ok_or_else(|| too_large(columns as f64 * rows as f64))?;
        debug!("Tiling ({}, {}, {}, {}) with {} x {} cells of size {}",
               extent.min_x, extent.min_y, extent.max_x, extent.max_y, columns, rows, self.cell_size);

        let mut layer = Layer::new(crs);
        layer.features.reserve(count);
        for cell in self.cells(extent)? {
            layer.push(cell.to_feature());
        }

        Ok(layer)
    }

    /// Build a grid layer covering the bounding extent of `layer`
    ///
    /// The result carries the same coordinate system as the input.
    ///
    /// # Errors
    /// `InvalidArgument` if the layer has no computable extent.
    pub fn generate(&self, layer: &Layer) -> VectorResult<Layer> {
        let extent = layer.total_bounds().ok_or_else(|| VectorError::InvalidArgument(
            "Layer has no geometry to compute an extent from".to_string()))?;

        self.generate_for_extent(&extent, layer.crs)
    }
}

fn too_large(cells: f64) -> VectorError {
    VectorError::InvalidArgument(format!("Grid too large: about {:e} cells", cells))
}

/// Build a grid with `cell_size` cells over the extent of `layer`
pub fn grid_for_layer(layer: &Layer, cell_size: f64) -> VectorResult<Layer> {
    GridGenerator::new(cell_size)?.generate(layer)
}

/// Iterator over the cells of a grid, column-major
#[derive(Debug, Clone)]
pub struct GridCells {
    cell_size: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
    x: f64,
    y: f64,
    column: usize,
    row: usize,
}

impl Iterator for GridCells {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        while self.x < self.max_x {
            if self.y < self.max_y {
                let cell = Cell::new(self.column, self.row, self.x, self.y, self.cell_size);
                self.y += self.cell_size;
                self.row += 1;
                return Some(cell);
            }

            // Column exhausted
            self.x += self.cell_size;
            self.column += 1;
            self.y = self.min_y;
            self.row = 0;
        }

        None
    }
}
