//! Vector layer model
//!
//! A layer is an ordered collection of features sharing one coordinate
//! reference system. This module also provides GeoJSON loading and saving.

mod feature;
pub mod io;

pub use feature::{geometry_type_name, Feature, Properties};
pub use io::{load_layer, parse_layer, save_layer};

use std::collections::BTreeMap;
use geo::BoundingRect;

use crate::coordinate::{BoundingBox, CoordinateSystem, CoordinateTransformer};
use crate::errors::{VectorError, VectorResult};

/// An ordered set of features in a shared coordinate system
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layer {
    /// Coordinate system of every feature, if known
    pub crs: Option<CoordinateSystem>,
    /// Features in insertion order
    pub features: Vec<Feature>,
}

impl Layer {
    /// Create an empty layer
    pub fn new(crs: Option<CoordinateSystem>) -> Self {
        Layer {
            crs,
            features: Vec::new(),
        }
    }

    /// Create a layer from existing features
    pub fn from_features(crs: Option<CoordinateSystem>, features: Vec<Feature>) -> Self {
        Layer { crs, features }
    }

    /// Append a feature
    pub fn push(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the layer has no features
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Iterate over the features
    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    /// Bounding extent of all geometries
    ///
    /// Returns `None` when the layer holds no geometry with a computable
    /// extent (no features, or only empty geometries).
    pub fn total_bounds(&self) -> Option<BoundingBox> {
        let mut total: Option<BoundingBox> = None;

        for feature in &self.features {
            if let Some(rect) = feature.geometry.bounding_rect() {
                let bbox = BoundingBox::from_rect(&rect);
                match total.as_mut() {
                    Some(acc) => acc.expand_to_include(&bbox),
                    None => total = Some(bbox),
                }
            }
        }

        match (total, self.crs) {
            (Some(bbox), Some(crs)) => Some(bbox.with_epsg(crs.epsg_code())),
            (bbox, _) => bbox,
        }
    }

    /// Count features per geometry kind
    pub fn geometry_type_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for feature in &self.features {
            *counts.entry(feature.geometry_type()).or_insert(0) += 1;
        }
        counts
    }

    /// Distinct text values of an attribute with their frequency
    pub fn property_values(&self, column: &str) -> BTreeMap<String, usize> {
        let mut values = BTreeMap::new();
        for feature in &self.features {
            if let Some(value) = feature.property_as_string(column) {
                *values.entry(value).or_insert(0) += 1;
            }
        }
        values
    }

    /// Copy of this layer expressed in another coordinate system
    ///
    /// # Errors
    /// `InvalidArgument` if the layer has no CRS, `UnsupportedTransform` if
    /// no transformation exists between the two systems.
    pub fn reproject(&self, target: &CoordinateSystem) -> VectorResult<Layer> {
        let source = self.crs.ok_or_else(|| VectorError::InvalidArgument(
            "Cannot reproject a layer without a coordinate system".to_string()))?;

        if &source == target {
            return Ok(self.clone());
        }

        let transformer = CoordinateTransformer;
        let features = self.features.iter()
            .map(|feature| {
                let geometry = transformer.transform_geometry(&feature.geometry, &source, target)?;
                Ok(Feature {
                    id: feature.id.clone(),
                    geometry,
                    properties: feature.properties.clone(),
                })
            })
            .collect::<VectorResult<Vec<_>>>()?;

        Ok(Layer::from_features(Some(*target), features))
    }
}

impl<'a> IntoIterator for &'a Layer {
    type Item = &'a Feature;
    type IntoIter = std::slice::Iter<'a, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.iter()
    }
}
