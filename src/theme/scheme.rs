//! Thematic schemes and feature classification

use std::collections::BTreeMap;
use log::{debug, warn};

use super::color::RgbColor;
use crate::errors::{VectorError, VectorResult};
use crate::layer::Layer;

/// Attribute written on classified features
pub const FILL_PROPERTY: &str = "fill";

/// A category of a thematic scheme
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    /// Attribute value matched by this category
    pub label: String,
    /// Fill color
    pub color: RgbColor,
}

/// A named mapping from attribute values to colors
#[derive(Debug, Clone, PartialEq)]
pub struct ThematicScheme {
    /// Scheme identifier ("land_use", "hazard", ...)
    pub name: String,
    /// Legend title
    pub title: String,
    /// Attribute column read by default
    pub column: String,
    /// Categories in legend order
    pub categories: Vec<Category>,
}

/// Outcome of classifying a layer
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Classification {
    /// Features per matched category label
    pub matched: BTreeMap<String, usize>,
    /// Features whose value is not a category of the scheme
    pub unmatched: usize,
    /// Features without a value in the column
    pub missing: usize,
}

impl Classification {
    /// Total number of features that received a color
    pub fn matched_total(&self) -> usize {
        self.matched.values().sum()
    }
}

impl ThematicScheme {
    /// Create a scheme, rejecting empty or duplicated categories
    pub fn new(name: &str, title: &str, column: &str, categories: Vec<Category>) -> VectorResult<Self> {
        if categories.is_empty() {
            return Err(VectorError::ThemeError(format!("Scheme '{}' has no categories", name)));
        }

        for (i, category) in categories.iter().enumerate() {
            if categories[..i].iter().any(|c| c.label == category.label) {
                return Err(VectorError::ThemeError(format!(
                    "Scheme '{}' repeats category '{}'", name, category.label)));
            }
        }

        Ok(ThematicScheme {
            name: name.to_string(),
            title: title.to_string(),
            column: column.to_string(),
            categories,
        })
    }

    /// Color assigned to an attribute value
    pub fn color_for(&self, value: &str) -> Option<RgbColor> {
        self.categories.iter()
            .find(|c| c.label == value)
            .map(|c| c.color)
    }

    /// Legend entries as (label, color) in scheme order
    pub fn legend(&self) -> Vec<(&str, RgbColor)> {
        self.categories.iter()
            .map(|c| (c.label.as_str(), c.color))
            .collect()
    }

    /// Classify the features of a layer
    ///
    /// Returns a copy of the layer in which each feature whose `column`
    /// value matches a category gets a `fill` attribute with the category's
    /// hex color. Other features are copied unchanged.
    ///
    /// # Arguments
    /// * `layer` - Layer to classify
    /// * `column` - Attribute column to read, `None` for the scheme default
    pub fn classify(&self, layer: &Layer, column: Option<&str>) -> (Layer, Classification) {
        let column = column.unwrap_or(&self.column);
        debug!("Classifying {} features with scheme '{}' on column '{}'",
               layer.len(), self.name, column);

        let mut summary = Classification::default();
        let mut classified = layer.clone();

        for feature in classified.features.iter_mut() {
            let value = match feature.property_as_string(column) {
                Some(value) => value,
                None => {
                    summary.missing += 1;
                    continue;
                }
            };

            match self.color_for(&value) {
                Some(color) => {
                    feature.set_property(FILL_PROPERTY, color.to_hex());
                    *summary.matched.entry(value).or_insert(0) += 1;
                },
                None => summary.unmatched += 1,
            }
        }

        if summary.unmatched > 0 || summary.missing > 0 {
            warn!("{} features have values outside scheme '{}', {} have no '{}' value",
                  summary.unmatched, self.name, summary.missing, column);
        }

        (classified, summary)
    }
}
