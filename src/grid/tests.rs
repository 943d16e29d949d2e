//! Tests for grid generation

use geo::{point, polygon, BoundingRect, Geometry};

use super::{grid_for_layer, GridGenerator, DEFAULT_CELL_SIZE};
use crate::coordinate::{BoundingBox, CoordinateSystem};
use crate::errors::VectorError;
use crate::layer::{Feature, Layer};

fn layer_with_extent(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Layer {
    let mut layer = Layer::new(Some(CoordinateSystem::UTM(18, true)));
    layer.push(Feature::new(Geometry::Polygon(polygon![
        (x: min_x, y: min_y),
        (x: max_x, y: min_y),
        (x: max_x, y: max_y),
        (x: min_x, y: max_y),
        (x: min_x, y: min_y),
    ])));
    layer
}

fn cell_bounds(feature: &Feature) -> (f64, f64, f64, f64) {
    let rect = feature.geometry.bounding_rect().unwrap();
    (rect.min().x, rect.min().y, rect.max().x, rect.max().y)
}

#[test]
fn test_three_by_two_grid() {
    let layer = layer_with_extent(0.0, 0.0, 2500.0, 1500.0);
    let grid = grid_for_layer(&layer, 1000.0).unwrap();

    let bounds: Vec<_> = grid.iter().map(cell_bounds).collect();
    assert_eq!(bounds, vec![
        (0.0, 0.0, 1000.0, 1000.0),
        (0.0, 1000.0, 1000.0, 2000.0),
        (1000.0, 0.0, 2000.0, 1000.0),
        (1000.0, 1000.0, 2000.0, 2000.0),
        (2000.0, 0.0, 3000.0, 1000.0),
        (2000.0, 1000.0, 3000.0, 2000.0),
    ]);

    assert_eq!(grid.features[3].property_as_string("column").as_deref(), Some("1"));
    assert_eq!(grid.features[3].property_as_string("row").as_deref(), Some("1"));
}

#[test]
fn test_single_cell_overshoots_extent() {
    let layer = layer_with_extent(0.0, 0.0, 500.0, 500.0);
    let grid = grid_for_layer(&layer, 1000.0).unwrap();

    assert_eq!(grid.len(), 1);
    assert_eq!(cell_bounds(&grid.features[0]), (0.0, 0.0, 1000.0, 1000.0));
}

#[test]
fn test_crs_is_propagated() {
    let layer = layer_with_extent(0.0, 0.0, 2500.0, 1500.0);
    let grid = GridGenerator::default().generate(&layer).unwrap();
    assert_eq!(grid.crs, layer.crs);

    let mut unknown = layer.clone();
    unknown.crs = None;
    assert_eq!(GridGenerator::default().generate(&unknown).unwrap().crs, None);
}

#[test]
fn test_non_positive_cell_size_is_rejected() {
    for size in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(GridGenerator::new(size), Err(VectorError::InvalidArgument(_))), "size {}", size);
    }

    let layer = layer_with_extent(0.0, 0.0, 10.0, 10.0);
    assert!(matches!(grid_for_layer(&layer, -5.0), Err(VectorError::InvalidArgument(_))));
}

#[test]
fn test_empty_layer_is_rejected() {
    let layer = Layer::new(Some(CoordinateSystem::WGS84));
    let result = GridGenerator::default().generate(&layer);
    assert!(matches!(result, Err(VectorError::InvalidArgument(_))));
}

#[test]
fn test_precision_guard() {
    let generator = GridGenerator::new(1e-9).unwrap();
    let extent = BoundingBox::new(1e12, 0.0, 1e12 + 1.0, 1.0);
    assert!(matches!(generator.cells(&extent), Err(VectorError::InvalidArgument(_))));
}

#[test]
fn test_oversized_grid_is_rejected() {
    let generator = GridGenerator::new(1.0).unwrap();
    let extent = BoundingBox::new(0.0, 0.0, 4.3e9, 4.3e9);

    assert!(matches!(generator.cell_count(&extent), Err(VectorError::InvalidArgument(_))));
    assert!(matches!(generator.dimensions(&extent), Err(VectorError::InvalidArgument(_))));
    assert!(matches!(generator.generate_for_extent(&extent, None), Err(VectorError::InvalidArgument(_))));

    let small = BoundingBox::new(0.0, 0.0, 4.3e9, 3.0);
    let count = GridGenerator::new(1e9).unwrap().cell_count(&small).unwrap();
    assert_eq!(count, 5);
}

#[test]
fn test_single_point_gives_empty_grid() {
    let mut layer = Layer::new(Some(CoordinateSystem::WebMercator));
    layer.push(Feature::new(Geometry::Point(point! { x: 5.0, y: 5.0 })));

    let grid = GridGenerator::default().generate(&layer).unwrap();
    assert!(grid.is_empty());
}

#[test]
fn test_cells_tile_without_gaps_or_overlap() {
    let extent = BoundingBox::new(-1234.5, 987.25, 4321.0, 5555.5);
    let generator = GridGenerator::new(750.0).unwrap();
    let cells: Vec<_> = generator.cells(&extent).unwrap().collect();

    let (columns, rows) = generator.dimensions(&extent).unwrap();
    assert_eq!(cells.len(), columns * rows);
    assert_eq!(generator.cell_count(&extent).unwrap(), cells.len());

    for cell in &cells {
        assert_eq!(cell.width(), 750.0);
        assert_eq!(cell.height(), 750.0);

        let (min_x, min_y, max_x, max_y) = cell.bounds();
        assert!(min_x >= extent.min_x && min_x < extent.max_x);
        assert!(min_y >= extent.min_y && min_y < extent.max_y);
        assert!(max_x < extent.max_x + 750.0);
        assert!(max_y < extent.max_y + 750.0);
    }

    // Neighbours share their common edge exactly
    for pair in cells.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        if a.column == b.column {
            assert_eq!(b.row, a.row + 1);
            assert_eq!(a.bounds().3, b.bounds().1);
        } else {
            assert_eq!(b.column, a.column + 1);
            assert_eq!(b.row, 0);
        }
    }
    for cell in cells.iter().filter(|c| c.column > 0) {
        let left = cells.iter().find(|c| c.column == cell.column - 1 && c.row == cell.row).unwrap();
        assert_eq!(left.bounds().2, cell.bounds().0);
    }

    // Corners of the extent fall inside some cell
    let corners = [
        (extent.min_x, extent.min_y),
        (extent.max_x, extent.min_y),
        (extent.min_x, extent.max_y),
        (extent.max_x, extent.max_y),
    ];
    for (x, y) in corners {
        assert!(cells.iter().any(|c| {
            let (min_x, min_y, max_x, max_y) = c.bounds();
            x >= min_x && x <= max_x && y >= min_y && y <= max_y
        }));
    }
}

#[test]
fn test_generation_is_repeatable() {
    let layer = layer_with_extent(10.0, 20.0, 3010.0, 2020.0);
    let generator = GridGenerator::new(DEFAULT_CELL_SIZE).unwrap();
    assert_eq!(generator.generate(&layer).unwrap(), generator.generate(&layer).unwrap());
}
