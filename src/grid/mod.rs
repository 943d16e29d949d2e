//! Regular grid generation
//!
//! Tiles the bounding extent of a layer with square cells of a fixed size,
//! in the same coordinate system as the layer.

mod cell;
mod generator;
#[cfg(test)]
mod tests;

pub use cell::Cell;
pub use generator::{grid_for_layer, GridCells, GridGenerator, DEFAULT_CELL_SIZE};
