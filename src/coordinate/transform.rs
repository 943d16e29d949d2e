//! Coordinate transformation functionality

use geo::{coord, Coord, Geometry, MapCoords};
use std::f64::consts::PI;

use super::bbox::BoundingBox;
use super::crs::CoordinateSystem;
use crate::errors::{VectorError, VectorResult};

/// Earth radius in meters
const EARTH_RADIUS: f64 = 6378137.0;

/// Latitude limit of the Web Mercator projection
const MAX_MERCATOR_LATITUDE: f64 = 85.05;

/// Convert from WGS84 (EPSG:4326) to Web Mercator (EPSG:3857)
fn wgs84_to_web_mercator(c: Coord<f64>) -> Coord<f64> {
    let lat = c.y.clamp(-MAX_MERCATOR_LATITUDE, MAX_MERCATOR_LATITUDE);

    coord! {
        x: c.x * EARTH_RADIUS * PI / 180.0,
        y: f64::ln(f64::tan((90.0 + lat) * PI / 360.0)) * EARTH_RADIUS,
    }
}

/// Convert from Web Mercator (EPSG:3857) to WGS84 (EPSG:4326)
fn web_mercator_to_wgs84(c: Coord<f64>) -> Coord<f64> {
    coord! {
        x: c.x * 180.0 / (EARTH_RADIUS * PI),
        y: 180.0 / PI * (2.0 * f64::atan(f64::exp(c.y / EARTH_RADIUS)) - PI / 2.0),
    }
}

fn identity(c: Coord<f64>) -> Coord<f64> {
    c
}

/// Transformer for converting between coordinate systems
///
/// Only the WGS84 / Web Mercator pair is built in; any other pair of
/// distinct systems is rejected.
pub struct CoordinateTransformer;

impl CoordinateTransformer {
    /// Resolve the per-coordinate function for a pair of systems
    fn coord_fn(from_crs: &CoordinateSystem, to_crs: &CoordinateSystem) -> VectorResult<fn(Coord<f64>) -> Coord<f64>> {
        if from_crs == to_crs {
            return Ok(identity);
        }

        match (from_crs, to_crs) {
            (CoordinateSystem::WGS84, CoordinateSystem::WebMercator) => Ok(wgs84_to_web_mercator),
            (CoordinateSystem::WebMercator, CoordinateSystem::WGS84) => Ok(web_mercator_to_wgs84),
            _ => Err(VectorError::UnsupportedTransform(format!(
                "from {} to {}",
                from_crs.description(), to_crs.description()
            ))),
        }
    }

    /// Check whether a transformation between two systems is available
    pub fn supports(&self, from_crs: &CoordinateSystem, to_crs: &CoordinateSystem) -> bool {
        Self::coord_fn(from_crs, to_crs).is_ok()
    }

    /// Transform a single coordinate between coordinate systems
    pub fn transform_coord(&self, c: Coord<f64>, from_crs: &CoordinateSystem, to_crs: &CoordinateSystem) -> VectorResult<Coord<f64>> {
        let f = Self::coord_fn(from_crs, to_crs)?;
        Ok(f(c))
    }

    /// Transform a bounding box between coordinate systems
    pub fn transform_bbox(&self, bbox: &BoundingBox, from_crs: &CoordinateSystem, to_crs: &CoordinateSystem) -> VectorResult<BoundingBox> {
        let f = Self::coord_fn(from_crs, to_crs)?;

        let min = f(coord! { x: bbox.min_x, y: bbox.min_y });
        let max = f(coord! { x: bbox.max_x, y: bbox.max_y });

        Ok(BoundingBox::new_with_crs(min.x, min.y, max.x, max.y, to_crs.epsg_code()))
    }

    /// Transform every vertex of a geometry between coordinate systems
    pub fn transform_geometry(&self, geometry: &Geometry<f64>, from_crs: &CoordinateSystem, to_crs: &CoordinateSystem) -> VectorResult<Geometry<f64>> {
        let f = Self::coord_fn(from_crs, to_crs)?;
        Ok(geometry.map_coords(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Point;

    #[test]
    fn test_origin_maps_to_origin() {
        let transformer = CoordinateTransformer;
        let c = transformer
            .transform_coord(coord! { x: 0.0, y: 0.0 }, &CoordinateSystem::WGS84, &CoordinateSystem::WebMercator)
            .unwrap();
        assert!(c.x.abs() < 1e-9);
        assert!(c.y.abs() < 1e-6);
    }

    #[test]
    fn test_round_trip_geometry() {
        let transformer = CoordinateTransformer;
        let geometry = Geometry::Point(Point::new(-74.08, 4.6));

        let projected = transformer
            .transform_geometry(&geometry, &CoordinateSystem::WGS84, &CoordinateSystem::WebMercator)
            .unwrap();
        let back = transformer
            .transform_geometry(&projected, &CoordinateSystem::WebMercator, &CoordinateSystem::WGS84)
            .unwrap();

        match back {
            Geometry::Point(p) => {
                assert!((p.x() + 74.08).abs() < 1e-9);
                assert!((p.y() - 4.6).abs() < 1e-9);
            },
            other => panic!("unexpected geometry {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_pair() {
        let transformer = CoordinateTransformer;
        let result = transformer.transform_coord(
            coord! { x: 1.0, y: 1.0 },
            &CoordinateSystem::Other(3116),
            &CoordinateSystem::WGS84,
        );
        assert!(matches!(result, Err(VectorError::UnsupportedTransform(_))));
        assert!(transformer.supports(&CoordinateSystem::Other(3116), &CoordinateSystem::Other(3116)));
    }
}
