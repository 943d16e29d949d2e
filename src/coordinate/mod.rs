//! Coordinate handling for geospatial data
//!
//! This module provides structures and functionality for handling
//! extents, coordinate systems and transformations.

mod bbox;
mod transform;
mod crs;

// Re-export key types
pub use self::bbox::BoundingBox;
pub use self::transform::CoordinateTransformer;
pub use self::crs::{CoordinateSystem, CoordinateSystemFactory};
