//! Square grid cell

use geo::{coord, Geometry, Rect};

use crate::layer::Feature;

/// One square cell of a regular grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Zero-based column index (x direction)
    pub column: usize,
    /// Zero-based row index (y direction)
    pub row: usize,
    /// Cell footprint
    pub rect: Rect<f64>,
}

impl Cell {
    /// Create a cell from its lower-left corner and side length
    pub fn new(column: usize, row: usize, x: f64, y: f64, size: f64) -> Self {
        Cell {
            column,
            row,
            rect: Rect::new(coord! { x: x, y: y }, coord! { x: x + size, y: y + size }),
        }
    }

    /// Cell bounds as (min_x, min_y, max_x, max_y)
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let min = self.rect.min();
        let max = self.rect.max();
        (min.x, min.y, max.x, max.y)
    }

    /// Side length along x
    pub fn width(&self) -> f64 {
        self.rect.width()
    }

    /// Side length along y
    pub fn height(&self) -> f64 {
        self.rect.height()
    }

    /// Convert into a polygon feature tagged with its column and row
    pub fn to_feature(&self) -> Feature {
        Feature::new(Geometry::Polygon(self.rect.to_polygon()))
            .with_property("column", self.column)
            .with_property("row", self.row)
    }
}
