//! Layer structure analysis command
//!
//! This module implements the command for summarising vector layers:
//! feature count, geometry kinds, coordinate system and extent.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::input_files;
use crate::errors::{VectorError, VectorResult};
use crate::layer::{load_layer, Layer};
use crate::utils::logger::Logger;

/// Command for analyzing vector layers
pub struct AnalyzeCommand<'a> {
    /// Paths of the input files
    input_files: Vec<String>,
    /// Whether to list attribute values
    verbose: bool,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> AnalyzeCommand<'a> {
    /// Create a new analyze command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new AnalyzeCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> VectorResult<Self> {
        let input_files = input_files(args);
        if input_files.is_empty() {
            return Err(VectorError::InvalidArgument("Missing input file".to_string()));
        }

        Ok(AnalyzeCommand {
            input_files,
            verbose: args.get_flag("verbose"),
            logger,
        })
    }

    /// Build the summary lines for a layer
    pub fn summarize(layer: &Layer) -> Vec<(&'static str, String)> {
        let crs = layer.crs
            .map(|c| c.description())
            .unwrap_or_else(|| "unknown".to_string());

        let extent = match layer.total_bounds() {
            Some(b) => format!("({}, {}, {}, {})", b.min_x, b.min_y, b.max_x, b.max_y),
            None => "none".to_string(),
        };

        let geometry_types = layer.geometry_type_counts()
            .iter()
            .map(|(kind, count)| format!("{} x{}", kind, count))
            .collect::<Vec<_>>()
            .join(", ");

        vec![
            ("Features", layer.len().to_string()),
            ("CRS", crs),
            ("Geometry types", geometry_types),
            ("Extent", extent),
        ]
    }

    /// Display the attribute columns and their distinct value counts
    fn display_attributes(&self, layer: &Layer) {
        let mut columns: Vec<&String> = layer.iter()
            .flat_map(|f| f.properties.keys())
            .collect();
        columns.sort();
        columns.dedup();

        for column in columns {
            let values = layer.property_values(column);
            info!("  Attribute '{}': {} distinct values", column, values.len());
        }
    }
}

impl<'a> Command for AnalyzeCommand<'a> {
    fn execute(&self) -> VectorResult<()> {
        for input in &self.input_files {
            let layer = load_layer(input)?;
            let summary = Self::summarize(&layer);

            info!("Layer Analysis Results: {}", input);
            for (label, value) in &summary {
                info!("  {}: {}", label, value);
            }

            if self.verbose {
                self.display_attributes(&layer);
            }

            self.logger.log_summary(&format!("Layer {}", input), &summary)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{point, Geometry};
    use crate::coordinate::CoordinateSystem;
    use crate::layer::Feature;

    #[test]
    fn test_summary_lines() {
        let mut layer = Layer::new(Some(CoordinateSystem::WebMercator));
        layer.push(Feature::new(Geometry::Point(point! { x: 1.0, y: 2.0 })));
        layer.push(Feature::new(Geometry::Point(point! { x: 3.0, y: 4.0 })));

        let summary = AnalyzeCommand::summarize(&layer);
        assert_eq!(summary[0], ("Features", "2".to_string()));
        assert_eq!(summary[1], ("CRS", "Web Mercator (EPSG:3857)".to_string()));
        assert_eq!(summary[2], ("Geometry types", "Point x2".to_string()));
        assert_eq!(summary[3], ("Extent", "(1, 2, 3, 4)".to_string()));
    }
}
