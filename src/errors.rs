//! Custom error types for vector processing

use std::fmt;
use std::io;

/// Vector processing error types
#[derive(Debug)]
pub enum VectorError {
    /// I/O error
    IoError(io::Error),
    /// Argument outside the accepted domain (cell size, empty extent, ...)
    InvalidArgument(String),
    /// Malformed or unsupported GeoJSON content
    GeoJsonError(String),
    /// Invalid thematic scheme definition
    ThemeError(String),
    /// Text value that could not be parsed
    ParseError(String),
    /// Geometry kind not handled by an operation
    UnsupportedGeometry(String),
    /// Coordinate transformation between two unsupported systems
    UnsupportedTransform(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for VectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorError::IoError(e) => write!(f, "I/O error: {}", e),
            VectorError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            VectorError::GeoJsonError(msg) => write!(f, "GeoJSON error: {}", msg),
            VectorError::ThemeError(msg) => write!(f, "Theme error: {}", msg),
            VectorError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            VectorError::UnsupportedGeometry(kind) => write!(f, "Unsupported geometry: {}", kind),
            VectorError::UnsupportedTransform(msg) => write!(f, "Unsupported transformation: {}", msg),
            VectorError::GenericError(msg) => write!(f, "Vector error: {}", msg),
        }
    }
}

impl std::error::Error for VectorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VectorError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for VectorError {
    fn from(error: io::Error) -> Self {
        VectorError::IoError(error)
    }
}

impl From<geojson::Error> for VectorError {
    fn from(error: geojson::Error) -> Self {
        VectorError::GeoJsonError(error.to_string())
    }
}

impl From<serde_json::Error> for VectorError {
    fn from(error: serde_json::Error) -> Self {
        VectorError::GeoJsonError(error.to_string())
    }
}

impl From<toml::de::Error> for VectorError {
    fn from(error: toml::de::Error) -> Self {
        VectorError::ThemeError(error.to_string())
    }
}

impl From<String> for VectorError {
    fn from(msg: String) -> Self {
        VectorError::GenericError(msg)
    }
}

/// Result type for vector operations
pub type VectorResult<T> = Result<T, VectorError>;
