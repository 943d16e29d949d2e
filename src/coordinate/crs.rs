//! Coordinate Reference System handling

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::{VectorError, VectorResult};

lazy_static! {
    // Matches "EPSG:4326", "epsg::3116" and OGC URNs such as "urn:ogc:def:crs:EPSG::32618"
    static ref EPSG_PATTERN: Regex = Regex::new(r"(?i)EPSG:(?:[0-9.]*:)?(\d+)$")
        .expect("EPSG pattern is a valid regex");
}

/// Identifier for common coordinate systems
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSystem {
    /// WGS 84 (EPSG:4326)
    WGS84,
    /// Web Mercator (EPSG:3857)
    WebMercator,
    /// UTM Zone (EPSG:326xx for northern hemisphere, 327xx for southern)
    UTM(u8, bool),
    /// Other EPSG code
    Other(u32),
}

impl CoordinateSystem {
    /// Get the EPSG code for this coordinate system
    pub fn epsg_code(&self) -> u32 {
        match self {
            CoordinateSystem::WGS84 => 4326,
            CoordinateSystem::WebMercator => 3857,
            CoordinateSystem::UTM(zone, is_northern) => {
                if *is_northern {
                    32600 + *zone as u32
                } else {
                    32700 + *zone as u32
                }
            },
            CoordinateSystem::Other(code) => *code,
        }
    }

    /// Get a description of this coordinate system
    pub fn description(&self) -> String {
        match self {
            CoordinateSystem::WGS84 => "WGS 84 (EPSG:4326)".to_string(),
            CoordinateSystem::WebMercator => "Web Mercator (EPSG:3857)".to_string(),
            CoordinateSystem::UTM(zone, is_northern) => {
                if *is_northern {
                    format!("UTM Zone {}N (EPSG:{})", zone, self.epsg_code())
                } else {
                    format!("UTM Zone {}S (EPSG:{})", zone, self.epsg_code())
                }
            },
            CoordinateSystem::Other(code) => format!("EPSG:{}", code),
        }
    }

    /// Whether coordinates are angular (degrees) rather than linear units
    ///
    /// Grid cell sizes on a geographic system are measured in degrees.
    pub fn is_geographic(&self) -> bool {
        matches!(self, CoordinateSystem::WGS84)
    }
}

/// Factory for creating coordinate systems
pub struct CoordinateSystemFactory;

impl CoordinateSystemFactory {
    /// Create a coordinate system from an EPSG code
    pub fn from_epsg(epsg: u32) -> VectorResult<CoordinateSystem> {
        match epsg {
            0 => Err(VectorError::InvalidArgument("EPSG code 0 is not a coordinate system".to_string())),
            4326 => Ok(CoordinateSystem::WGS84),
            3857 => Ok(CoordinateSystem::WebMercator),
            32601..=32660 => Ok(CoordinateSystem::UTM((epsg - 32600) as u8, true)),
            32701..=32760 => Ok(CoordinateSystem::UTM((epsg - 32700) as u8, false)),
            _ => Ok(CoordinateSystem::Other(epsg)),
        }
    }

    /// Parse a coordinate system from a string
    ///
    /// Accepts a bare code ("4326"), a prefixed code ("EPSG:4326") or an
    /// OGC URN ("urn:ogc:def:crs:EPSG::4326"). The OGC CRS84 URN maps to WGS84.
    pub fn from_string(crs_str: &str) -> VectorResult<CoordinateSystem> {
        let crs_str = crs_str.trim();

        if crs_str.to_uppercase().ends_with("CRS84") {
            return Ok(CoordinateSystem::WGS84);
        }

        if let Ok(epsg) = crs_str.parse::<u32>() {
            return Self::from_epsg(epsg);
        }

        match EPSG_PATTERN.captures(crs_str) {
            Some(captures) => {
                let code = &captures[1];
                let epsg = code.parse::<u32>()
                    .map_err(|_| VectorError::ParseError(format!("Invalid EPSG code: {}", code)))?;
                Self::from_epsg(epsg)
            },
            None => Err(VectorError::ParseError(format!("Unsupported CRS format: {}", crs_str))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string_formats() {
        assert_eq!(CoordinateSystemFactory::from_string("4326").unwrap(), CoordinateSystem::WGS84);
        assert_eq!(CoordinateSystemFactory::from_string("EPSG:3857").unwrap(), CoordinateSystem::WebMercator);
        assert_eq!(CoordinateSystemFactory::from_string("epsg:32618").unwrap(), CoordinateSystem::UTM(18, true));
        assert_eq!(
            CoordinateSystemFactory::from_string("urn:ogc:def:crs:EPSG::3116").unwrap(),
            CoordinateSystem::Other(3116)
        );
        assert_eq!(
            CoordinateSystemFactory::from_string("urn:ogc:def:crs:OGC:1.3:CRS84").unwrap(),
            CoordinateSystem::WGS84
        );
    }

    #[test]
    fn test_from_string_rejects_garbage() {
        assert!(CoordinateSystemFactory::from_string("not a crs").is_err());
        assert!(CoordinateSystemFactory::from_string("0").is_err());
    }

    #[test]
    fn test_southern_utm_round_trips_code() {
        let crs = CoordinateSystemFactory::from_epsg(32719).unwrap();
        assert_eq!(crs, CoordinateSystem::UTM(19, false));
        assert_eq!(crs.epsg_code(), 32719);
        assert_eq!(crs.description(), "UTM Zone 19S (EPSG:32719)");
    }
}
