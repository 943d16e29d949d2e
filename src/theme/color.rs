//! RGB color representation

use std::fmt;

use crate::errors::{VectorError, VectorResult};

/// Simple RGB color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl RgbColor {
    /// Create a new RGB color
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        RgbColor { r, g, b }
    }

    /// Convert to hex string (#rrggbb format)
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Create from hex string
    ///
    /// # Arguments
    /// * `hex` - Hex color string (with or without # prefix)
    ///
    /// # Returns
    /// The parsed color or a `ParseError`
    pub fn from_hex(hex: &str) -> VectorResult<Self> {
        let digits = hex.trim().trim_start_matches('#');

        if digits.len() != 6 || !digits.is_ascii() {
            return Err(VectorError::ParseError(
                format!("Invalid hex color code: {} - must be 6 hexadecimal digits", hex)
            ));
        }

        let r = parse_hex_component(&digits[0..2], hex)?;
        let g = parse_hex_component(&digits[2..4], hex)?;
        let b = parse_hex_component(&digits[4..6], hex)?;

        Ok(RgbColor { r, g, b })
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

fn parse_hex_component(component: &str, full: &str) -> VectorResult<u8> {
    u8::from_str_radix(component, 16)
        .map_err(|_| VectorError::ParseError(format!("Invalid hex color code: {}", full)))
}
