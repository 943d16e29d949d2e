//! Feature structure pairing a geometry with its attributes

use geo::Geometry;
use geojson::feature::Id;
use serde_json::Value as JsonValue;

/// Attribute table of a single feature
pub type Properties = serde_json::Map<String, JsonValue>;

/// A single vector feature
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Optional feature identifier
    pub id: Option<Id>,
    /// Planar geometry
    pub geometry: Geometry<f64>,
    /// Attribute values keyed by column name
    pub properties: Properties,
}

impl Feature {
    /// Create a feature with no id and no attributes
    pub fn new(geometry: Geometry<f64>) -> Self {
        Feature {
            id: None,
            geometry,
            properties: Properties::new(),
        }
    }

    /// Builder-style attribute setter
    pub fn with_property<V: Into<JsonValue>>(mut self, name: &str, value: V) -> Self {
        self.properties.insert(name.to_string(), value.into());
        self
    }

    /// Set an attribute value
    pub fn set_property<V: Into<JsonValue>>(&mut self, name: &str, value: V) {
        self.properties.insert(name.to_string(), value.into());
    }

    /// Read an attribute as text
    ///
    /// Strings are returned as-is, numbers and booleans are formatted.
    /// Missing and null attributes give `None`.
    pub fn property_as_string(&self, name: &str) -> Option<String> {
        match self.properties.get(name)? {
            JsonValue::String(s) => Some(s.clone()),
            JsonValue::Number(n) => Some(n.to_string()),
            JsonValue::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Name of the geometry kind ("Polygon", "Point", ...)
    pub fn geometry_type(&self) -> &'static str {
        geometry_type_name(&self.geometry)
    }
}

/// Name of a geometry kind
pub fn geometry_type_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
