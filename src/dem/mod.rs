//! Digital elevation model statistics
//!
//! Elevation grids are read from CSV arrays (the `row/col` layout written by
//! raster array exports) and summarised as histograms.

mod elevation;
mod histogram;

pub use elevation::ElevationGrid;
pub use histogram::{ElevationHistogram, DEFAULT_BINS};
