//! GeoJSON loading and saving for layers
//!
//! Reads FeatureCollections, single Features and bare Geometries. The
//! legacy `crs` member is honoured on read and written for any system other
//! than WGS84, which is the GeoJSON default.

use std::fs;
use std::path::{Path, PathBuf};

use geojson::{FeatureCollection, GeoJson, JsonObject};
use log::{debug, info, warn};
use serde_json::json;

use super::{Feature, Layer};
use crate::coordinate::{CoordinateSystem, CoordinateSystemFactory};
use crate::errors::{VectorError, VectorResult};

/// Load a layer from a GeoJSON file
///
/// # Arguments
/// * `path` - Path to the GeoJSON file
///
/// # Returns
/// The loaded layer or an error
pub fn load_layer<P: AsRef<Path>>(path: P) -> VectorResult<Layer> {
    let path = path.as_ref();
    debug!("Loading layer from {}", path.display());

    let content = fs::read_to_string(path)?;
    let layer = parse_layer(&content)?;

    info!("Loaded {} features from {}", layer.len(), path.display());
    Ok(layer)
}

/// Parse a layer from GeoJSON text
pub fn parse_layer(content: &str) -> VectorResult<Layer> {
    let geojson: GeoJson = content.parse()?;

    match geojson {
        GeoJson::FeatureCollection(collection) => {
            let crs = read_crs_member(collection.foreign_members.as_ref());
            let mut layer = Layer::new(Some(crs));

            for (index, feature) in collection.features.into_iter().enumerate() {
                match convert_feature(feature)? {
                    Some(feature) => layer.push(feature),
                    None => warn!("Skipping feature #{} without geometry", index),
                }
            }

            Ok(layer)
        },
        GeoJson::Feature(feature) => {
            let crs = read_crs_member(feature.foreign_members.as_ref());
            let mut layer = Layer::new(Some(crs));
            if let Some(feature) = convert_feature(feature)? {
                layer.push(feature);
            }
            Ok(layer)
        },
        GeoJson::Geometry(geometry) => {
            let crs = read_crs_member(geometry.foreign_members.as_ref());
            let geometry = geo::Geometry::<f64>::try_from(geometry)?;
            Ok(Layer::from_features(Some(crs), vec![Feature::new(geometry)]))
        },
    }
}

/// Convert a GeoJSON feature, returning `None` for a null geometry
fn convert_feature(feature: geojson::Feature) -> VectorResult<Option<Feature>> {
    let geometry = match feature.geometry {
        Some(geometry) => geo::Geometry::<f64>::try_from(geometry)?,
        None => return Ok(None),
    };

    Ok(Some(Feature {
        id: feature.id,
        geometry,
        properties: feature.properties.unwrap_or_default(),
    }))
}

/// Read the legacy named `crs` member, defaulting to WGS84
fn read_crs_member(members: Option<&JsonObject>) -> CoordinateSystem {
    let name = members
        .and_then(|m| m.get("crs"))
        .and_then(|crs| crs.get("properties"))
        .and_then(|props| props.get("name"))
        .and_then(|name| name.as_str());

    match name {
        Some(name) => match CoordinateSystemFactory::from_string(name) {
            Ok(crs) => {
                debug!("Layer CRS: {}", crs.description());
                crs
            },
            Err(e) => {
                warn!("Ignoring unrecognised crs member '{}': {}", name, e);
                CoordinateSystem::WGS84
            },
        },
        None => CoordinateSystem::WGS84,
    }
}

/// Serialize a layer to GeoJSON text
pub fn layer_to_geojson(layer: &Layer) -> VectorResult<String> {
    let features = layer.iter()
        .map(|feature| geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::from(&feature.geometry))),
            id: feature.id.clone(),
            properties: Some(feature.properties.clone()),
            foreign_members: None,
        })
        .collect();

    let foreign_members = match layer.crs {
        Some(crs) if crs != CoordinateSystem::WGS84 => {
            let mut members = JsonObject::new();
            members.insert("crs".to_string(), json!({
                "type": "name",
                "properties": {
                    "name": format!("urn:ogc:def:crs:EPSG::{}", crs.epsg_code())
                }
            }));
            Some(members)
        },
        _ => None,
    };

    let collection = FeatureCollection {
        bbox: layer.total_bounds().map(|b| vec![b.min_x, b.min_y, b.max_x, b.max_y]),
        features,
        foreign_members,
    };

    Ok(serde_json::to_string_pretty(&collection)?)
}

/// Save a layer as a GeoJSON FeatureCollection
///
/// Parent directories are created as needed. A layer without a CRS is
/// written without a `crs` member and so reads back as WGS84; a warning is
/// logged when that happens.
///
/// # Arguments
/// * `layer` - Layer to write
/// * `path` - Destination file
///
/// # Returns
/// The path that was written
pub fn save_layer<P: AsRef<Path>>(layer: &Layer, path: P) -> VectorResult<PathBuf> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(VectorError::InvalidArgument("Output path is empty".to_string()));
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    if layer.crs.is_none() {
        warn!("Layer saved to {} has no CRS, it will read back as WGS84", path.display());
    }

    let content = layer_to_geojson(layer)?;
    fs::write(path, content)?;

    info!("File saved to: {}", path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{point, Geometry};

    const COLLECTION: &str = r#"{
        "type": "FeatureCollection",
        "crs": { "type": "name", "properties": { "name": "urn:ogc:def:crs:EPSG::3116" } },
        "features": [
            { "type": "Feature", "properties": { "CS_TIPO": "Urbano" },
              "geometry": { "type": "Polygon", "coordinates": [[[0,0],[10,0],[10,10],[0,10],[0,0]]] } },
            { "type": "Feature", "properties": { "CS_TIPO": "Rural" }, "geometry": null },
            { "type": "Feature", "id": 7, "properties": null,
              "geometry": { "type": "Point", "coordinates": [25, -3] } }
        ]
    }"#;

    #[test]
    fn test_parse_collection() {
        let layer = parse_layer(COLLECTION).unwrap();
        assert_eq!(layer.crs, Some(CoordinateSystem::Other(3116)));
        assert_eq!(layer.len(), 2);
        assert_eq!(layer.features[0].property_as_string("CS_TIPO").as_deref(), Some("Urbano"));
        assert!(layer.features[1].properties.is_empty());
        assert_eq!(layer.features[1].geometry, Geometry::Point(point! { x: 25.0, y: -3.0 }));

        let bounds = layer.total_bounds().unwrap();
        assert_eq!((bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y), (0.0, -3.0, 25.0, 10.0));
    }

    #[test]
    fn test_default_crs_is_wgs84() {
        let layer = parse_layer(r#"{ "type": "Point", "coordinates": [1.5, 2.5] }"#).unwrap();
        assert_eq!(layer.crs, Some(CoordinateSystem::WGS84));
        assert_eq!(layer.len(), 1);
    }

    #[test]
    fn test_invalid_json_is_geojson_error() {
        assert!(matches!(parse_layer("{ not json"), Err(VectorError::GeoJsonError(_))));
    }

    #[test]
    fn test_unknown_crs_reads_back_as_wgs84() {
        let mut layer = Layer::new(None);
        layer.push(Feature::new(Geometry::Point(point! { x: 500.0, y: 500.0 })));

        let text = layer_to_geojson(&layer).unwrap();
        assert!(!text.contains("\"crs\""));

        let dir = tempfile::tempdir().unwrap();
        let path = save_layer(&layer, dir.path().join("grid.geojson")).unwrap();
        let reloaded = load_layer(&path).unwrap();
        assert_eq!(reloaded.crs, Some(CoordinateSystem::WGS84));
        assert_eq!(reloaded.features, layer.features);
    }

    #[test]
    fn test_save_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("deeper").join("layer.geojson");

        let layer = parse_layer(COLLECTION).unwrap();
        let written = save_layer(&layer, &target).unwrap();
        assert_eq!(written, target);

        let reloaded = load_layer(&written).unwrap();
        assert_eq!(reloaded, layer);
    }
}
