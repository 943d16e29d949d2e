//! Elevation grids read from CSV arrays

use std::fs;
use std::path::Path;
use log::debug;

use crate::errors::{VectorError, VectorResult};

/// Header cell that marks the indexed array layout
const INDEX_HEADER: &str = "row/col";

/// A rectangular grid of elevation values, row-major
///
/// Missing cells are stored as NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationGrid {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Values, `width * height` long
    pub values: Vec<f64>,
}

impl ElevationGrid {
    /// Create a grid from row-major values
    pub fn new(width: usize, height: usize, values: Vec<f64>) -> VectorResult<Self> {
        if values.len() != width * height {
            return Err(VectorError::InvalidArgument(format!(
                "Expected {} values for a {}x{} grid, got {}", width * height, width, height, values.len())));
        }

        Ok(ElevationGrid { width, height, values })
    }

    /// Read a grid from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> VectorResult<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let grid = Self::parse_csv(&content)?;
        debug!("Read {}x{} elevation grid from {}", grid.width, grid.height, path.as_ref().display());
        Ok(grid)
    }

    /// Parse a grid from CSV text
    ///
    /// Two layouts are accepted: the indexed layout, whose header row starts
    /// with `row/col` and whose rows start with their row index, and a plain
    /// layout with values only. Empty cells are missing values.
    pub fn parse_csv(content: &str) -> VectorResult<Self> {
        let mut lines = content.lines().filter(|l| !l.trim().is_empty()).peekable();

        let indexed = lines.peek()
            .map(|first| first.trim_start().starts_with(INDEX_HEADER))
            .unwrap_or(false);
        if indexed {
            lines.next();
        }

        let mut width: Option<usize> = None;
        let mut height = 0;
        let mut values = Vec::new();

        for (line_no, line) in lines.enumerate() {
            let fields = line.split(',').skip(if indexed { 1 } else { 0 });

            let mut row_len = 0;
            for field in fields {
                values.push(parse_cell(field, line_no)?);
                row_len += 1;
            }

            match width {
                Some(w) if w != row_len => {
                    return Err(VectorError::ParseError(format!(
                        "Row {} has {} values, expected {}", line_no, row_len, w)));
                },
                Some(_) => {},
                None => width = Some(row_len),
            }
            height += 1;
        }

        let width = width.unwrap_or(0);
        if width == 0 || height == 0 {
            return Err(VectorError::ParseError("Elevation grid has no values".to_string()));
        }

        Self::new(width, height, values)
    }

    /// Value at a column and row, `None` outside the grid
    pub fn get(&self, column: usize, row: usize) -> Option<f64> {
        if column >= self.width || row >= self.height {
            return None;
        }
        self.values.get(row * self.width + column).copied()
    }
}

fn parse_cell(field: &str, line_no: usize) -> VectorResult<f64> {
    let field = field.trim();
    if field.is_empty() {
        return Ok(f64::NAN);
    }

    field.parse::<f64>()
        .map_err(|_| VectorError::ParseError(format!("Invalid elevation '{}' on row {}", field, line_no)))
}
