//! Layer merging
//!
//! Concatenates several layers into one, optionally reprojecting them to a
//! common coordinate system and tagging every feature with the name of the
//! layer it came from.

use geojson::feature::Id;
use log::{debug, info};

use crate::coordinate::CoordinateSystem;
use crate::errors::{VectorError, VectorResult};
use crate::layer::Layer;

/// Attribute holding the source layer name of merged features
pub const ORIGIN_PROPERTY: &str = "origin";

/// Options controlling a merge
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOptions {
    /// One name per input layer, written to the `origin` attribute
    pub names: Option<Vec<String>>,
    /// Reproject every layer to this system before merging
    pub target_crs: Option<CoordinateSystem>,
    /// Renumber feature ids 0..n in the merged layer
    pub reset_ids: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        MergeOptions {
            names: None,
            target_crs: None,
            reset_ids: true,
        }
    }
}

impl MergeOptions {
    /// Set the origin names
    pub fn with_names<S: Into<String>>(mut self, names: Vec<S>) -> Self {
        self.names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Set the target coordinate system
    pub fn with_target_crs(mut self, crs: CoordinateSystem) -> Self {
        self.target_crs = Some(crs);
        self
    }
}

/// Merge layers into a single layer
///
/// Features keep the order of the input layers. The merged layer takes the
/// coordinate system of the first (possibly reprojected) layer.
///
/// # Errors
/// * `InvalidArgument` if `layers` is empty, if the number of names does not
///   match the number of layers, if a layer to reproject has no CRS, or if
///   no target CRS is given and the layers are in different systems
/// * `UnsupportedTransform` if a reprojection is not available
pub fn merge_layers(layers: &[Layer], options: &MergeOptions) -> VectorResult<Layer> {
    if layers.is_empty() {
        return Err(VectorError::InvalidArgument("The list of layers to merge is empty".to_string()));
    }

    if let Some(names) = &options.names {
        if names.len() != layers.len() {
            return Err(VectorError::InvalidArgument(format!(
                "Got {} names for {} layers", names.len(), layers.len())));
        }
    }

    if options.target_crs.is_none() {
        let first = layers[0].crs;
        if let Some((index, layer)) = layers.iter().enumerate().find(|(_, l)| l.crs != first) {
            return Err(VectorError::InvalidArgument(format!(
                "Layer #{} is in {} but layer #0 is in {}, set a target CRS to merge them",
                index, crs_name(layer.crs), crs_name(first))));
        }
    }

    let mut merged: Option<Layer> = None;

    for (index, layer) in layers.iter().enumerate() {
        let mut prepared = match &options.target_crs {
            Some(target) => layer.reproject(target)?,
            None => layer.clone(),
        };

        if let Some(names) = &options.names {
            for feature in prepared.features.iter_mut() {
                feature.set_property(ORIGIN_PROPERTY, names[index].as_str());
            }
        }

        debug!("Merging layer #{} with {} features", index, prepared.len());
        match merged.as_mut() {
            Some(acc) => acc.features.append(&mut prepared.features),
            None => merged = Some(prepared),
        }
    }

    let mut merged = merged.unwrap_or_default();

    if options.reset_ids {
        for (i, feature) in merged.features.iter_mut().enumerate() {
            feature.id = Some(Id::Number(serde_json::Number::from(i as u64)));
        }
    }

    info!("Merged {} layers into {} features", layers.len(), merged.len());
    Ok(merged)
}

fn crs_name(crs: Option<CoordinateSystem>) -> String {
    crs.map(|c| c.description()).unwrap_or_else(|| "an unknown CRS".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{point, Geometry};
    use crate::layer::Feature;

    fn point_layer(crs: Option<CoordinateSystem>, coords: &[(f64, f64)]) -> Layer {
        let mut layer = Layer::new(crs);
        for (x, y) in coords {
            layer.push(Feature::new(Geometry::Point(point! { x: *x, y: *y })));
        }
        layer
    }

    #[test]
    fn test_merge_with_names() {
        let a = point_layer(Some(CoordinateSystem::WGS84), &[(0.0, 0.0), (1.0, 1.0)]);
        let b = point_layer(Some(CoordinateSystem::WGS84), &[(2.0, 2.0)]);

        let options = MergeOptions::default().with_names(vec!["roads", "rivers"]);
        let merged = merge_layers(&[a, b], &options).unwrap();

        assert_eq!(merged.len(), 3);
        assert_eq!(merged.crs, Some(CoordinateSystem::WGS84));
        let origins: Vec<_> = merged.iter().map(|f| f.property_as_string(ORIGIN_PROPERTY).unwrap()).collect();
        assert_eq!(origins, vec!["roads", "roads", "rivers"]);
        assert_eq!(merged.features[2].geometry, Geometry::Point(point! { x: 2.0, y: 2.0 }));
        assert_eq!(merged.features[2].id, Some(Id::Number(2u64.into())));
    }

    #[test]
    fn test_merge_without_names_or_reset() {
        let mut a = point_layer(None, &[(0.0, 0.0)]);
        a.features[0].id = Some(Id::String("keep".to_string()));

        let options = MergeOptions { reset_ids: false, ..MergeOptions::default() };
        let merged = merge_layers(&[a], &options).unwrap();
        assert_eq!(merged.features[0].id, Some(Id::String("keep".to_string())));
        assert!(merged.features[0].properties.is_empty());
    }

    #[test]
    fn test_merge_argument_errors() {
        let result = merge_layers(&[], &MergeOptions::default());
        assert!(matches!(result, Err(VectorError::InvalidArgument(_))));

        let a = point_layer(None, &[(0.0, 0.0)]);
        let options = MergeOptions::default().with_names(vec!["one", "two"]);
        assert!(matches!(merge_layers(&[a], &options), Err(VectorError::InvalidArgument(_))));
    }

    #[test]
    fn test_merge_rejects_mixed_crs() {
        let geographic = point_layer(Some(CoordinateSystem::WGS84), &[(-74.0, 4.6)]);
        let metric = point_layer(Some(CoordinateSystem::WebMercator), &[(-8237642.0, 512000.0)]);

        match merge_layers(&[geographic.clone(), metric.clone()], &MergeOptions::default()) {
            Err(VectorError::InvalidArgument(message)) => {
                assert!(message.contains("EPSG:4326"), "{}", message);
                assert!(message.contains("EPSG:3857"), "{}", message);
            },
            other => panic!("expected InvalidArgument, got {:?}", other),
        }

        let unknown = point_layer(None, &[(0.0, 0.0)]);
        assert!(matches!(merge_layers(&[geographic.clone(), unknown], &MergeOptions::default()),
                         Err(VectorError::InvalidArgument(_))));

        let options = MergeOptions::default().with_target_crs(CoordinateSystem::WebMercator);
        let merged = merge_layers(&[geographic, metric], &options).unwrap();
        assert_eq!(merged.crs, Some(CoordinateSystem::WebMercator));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn test_merge_with_reprojection() {
        let a = point_layer(Some(CoordinateSystem::WGS84), &[(0.0, 0.0)]);
        let b = point_layer(Some(CoordinateSystem::WebMercator), &[(1000.0, 1000.0)]);

        let options = MergeOptions::default().with_target_crs(CoordinateSystem::WebMercator);
        let merged = merge_layers(&[a, b], &options).unwrap();
        assert_eq!(merged.crs, Some(CoordinateSystem::WebMercator));

        match &merged.features[0].geometry {
            Geometry::Point(p) => assert!(p.x().abs() < 1e-6 && p.y().abs() < 1e-6),
            other => panic!("unexpected geometry {:?}", other),
        }
        assert_eq!(merged.features[1].geometry, Geometry::Point(point! { x: 1000.0, y: 1000.0 }));

        let unsupported = point_layer(Some(CoordinateSystem::Other(3116)), &[(0.0, 0.0)]);
        let result = merge_layers(&[unsupported], &options);
        assert!(matches!(result, Err(VectorError::UnsupportedTransform(_))));
    }
}
