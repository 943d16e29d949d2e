//! Bounding box structure for defining extents

use geo::{coord, Coord, Rect};

use crate::errors::{VectorError, VectorResult};

/// A bounding box in a coordinate system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum X coordinate
    pub min_x: f64,
    /// Minimum Y coordinate
    pub min_y: f64,
    /// Maximum X coordinate
    pub max_x: f64,
    /// Maximum Y coordinate
    pub max_y: f64,
    /// EPSG code of the coordinate system
    pub epsg: Option<u32>,
}

impl BoundingBox {
    /// Create a new bounding box
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
            epsg: None,
        }
    }

    /// Create a new bounding box with coordinate system
    pub fn new_with_crs(min_x: f64, min_y: f64, max_x: f64, max_y: f64, epsg: u32) -> Self {
        BoundingBox {
            min_x,
            min_y,
            max_x,
            max_y,
            epsg: Some(epsg),
        }
    }

    /// Create a bounding box from a geo rectangle
    pub fn from_rect(rect: &Rect<f64>) -> Self {
        let min = rect.min();
        let max = rect.max();
        BoundingBox::new(min.x, min.y, max.x, max.y)
    }

    /// Parse a bounding box from a string (format: "minx,miny,maxx,maxy")
    pub fn from_string(bbox_str: &str) -> VectorResult<Self> {
        let parts: Vec<&str> = bbox_str.split(',').collect();
        if parts.len() != 4 {
            return Err(VectorError::ParseError(
                "Bounding box must have 4 comma-separated values".to_string()));
        }

        let mut values = [0.0f64; 4];
        let names = ["min_x", "min_y", "max_x", "max_y"];
        for (i, part) in parts.iter().enumerate() {
            values[i] = part.trim().parse::<f64>()
                .map_err(|_| VectorError::ParseError(format!("Invalid {} value: {}", names[i], part.trim())))?;
        }

        let bbox = BoundingBox::new(values[0], values[1], values[2], values[3]);
        if !bbox.is_valid() {
            return Err(VectorError::InvalidArgument(format!(
                "Bounding box minimum exceeds maximum: {}", bbox_str)));
        }

        Ok(bbox)
    }

    /// Get the width of the bounding box
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Get the height of the bounding box
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Get the center point of the bounding box
    pub fn center(&self) -> Coord<f64> {
        coord! {
            x: self.min_x + self.width() / 2.0,
            y: self.min_y + self.height() / 2.0,
        }
    }

    /// Check if this bounding box contains a point (edges included)
    pub fn contains(&self, point: &Coord<f64>) -> bool {
        point.x >= self.min_x && point.x <= self.max_x &&
            point.y >= self.min_y && point.y <= self.max_y
    }

    /// Check that every coordinate is finite and min does not exceed max
    pub fn is_valid(&self) -> bool {
        let finite = self.min_x.is_finite() && self.min_y.is_finite()
            && self.max_x.is_finite() && self.max_y.is_finite();
        finite && self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    /// Grow this bounding box so that it also covers `other`
    pub fn expand_to_include(&mut self, other: &BoundingBox) {
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// Set the EPSG code for this bounding box
    pub fn with_epsg(mut self, epsg: u32) -> Self {
        self.epsg = Some(epsg);
        self
    }
}
