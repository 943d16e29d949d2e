//! Scheme definitions loaded from TOML

use std::collections::HashMap;
use std::fs;
use lazy_static::lazy_static;

use super::color::RgbColor;
use super::scheme::{Category, ThematicScheme};
use crate::errors::{VectorError, VectorResult};

lazy_static! {
    // Parse the built-in schemes at startup
    static ref BUILTIN_SCHEMES: HashMap<String, ThematicScheme> = {
        let content = include_str!("../../themes.toml");
        parse_schemes(content)
            .map(|schemes| schemes.into_iter().map(|s| (s.name.clone(), s)).collect())
            .unwrap_or_else(|e| {
                eprintln!("Warning: Failed to parse built-in themes: {}", e);
                HashMap::new()
            })
    };
}

/// Parse every scheme table of a TOML document
///
/// Each top-level table is one scheme with `title`, `column` and a
/// `categories` array of `{ label, color }` tables.
pub fn parse_schemes(content: &str) -> VectorResult<Vec<ThematicScheme>> {
    let table: toml::Table = content.parse()?;

    let mut schemes = Vec::new();
    for (name, definition) in &table {
        schemes.push(parse_scheme(name, definition)?);
    }

    if schemes.is_empty() {
        return Err(VectorError::ThemeError("Theme document defines no schemes".to_string()));
    }

    Ok(schemes)
}

/// Helper to parse one scheme table
fn parse_scheme(name: &str, definition: &toml::Value) -> VectorResult<ThematicScheme> {
    let title = text_field(definition, name, "title")?;
    let column = text_field(definition, name, "column")?;

    let entries = definition.get("categories")
        .and_then(|v| v.as_array())
        .ok_or_else(|| VectorError::ThemeError(format!("Scheme '{}' is missing 'categories'", name)))?;

    let mut categories = Vec::with_capacity(entries.len());
    for entry in entries {
        let label = entry.get("label").and_then(|v| v.as_str());
        let color = entry.get("color").and_then(|v| v.as_str());

        match (label, color) {
            (Some(label), Some(color)) => categories.push(Category {
                label: label.to_string(),
                color: RgbColor::from_hex(color)?,
            }),
            _ => return Err(VectorError::ThemeError(format!(
                "Scheme '{}' has a category without label or color", name))),
        }
    }

    ThematicScheme::new(name, title, column, categories)
}

/// Helper to read a required string field of a scheme table
fn text_field<'a>(definition: &'a toml::Value, name: &str, field: &str) -> VectorResult<&'a str> {
    definition.get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| VectorError::ThemeError(format!("Scheme '{}' is missing '{}'", name, field)))
}

/// Load schemes from a TOML file
pub fn load_schemes_from_file(path: &str) -> VectorResult<Vec<ThematicScheme>> {
    let contents = fs::read_to_string(path)?;
    parse_schemes(&contents)
}

/// Look up a built-in scheme by name
pub fn builtin_scheme(name: &str) -> VectorResult<ThematicScheme> {
    BUILTIN_SCHEMES.get(name)
        .cloned()
        .ok_or_else(|| VectorError::ThemeError(format!(
            "Unknown scheme '{}', available: {}", name, builtin_scheme_names().join(", "))))
}

/// Names of the built-in schemes, sorted
pub fn builtin_scheme_names() -> Vec<String> {
    let mut names: Vec<String> = BUILTIN_SCHEMES.keys().cloned().collect();
    names.sort();
    names
}
