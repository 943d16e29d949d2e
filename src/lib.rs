pub mod errors;
pub mod coordinate;
pub mod layer;
pub mod grid;
pub mod merge;
pub mod theme;
pub mod dem;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::VectorKit;

pub use errors::{VectorError, VectorResult};
pub use coordinate::{BoundingBox, CoordinateSystem, CoordinateSystemFactory, CoordinateTransformer};
pub use layer::{Feature, Layer};
pub use grid::{grid_for_layer, Cell, GridGenerator};
pub use merge::{merge_layers, MergeOptions};
pub use theme::{RgbColor, ThematicScheme};
pub use dem::{ElevationGrid, ElevationHistogram};
