//! Grid generation command
//!
//! Builds a regular grid of square cells over the extent of an input layer,
//! or over an explicit extent, and writes it as GeoJSON.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::{first_input, parse_number};
use crate::coordinate::{BoundingBox, CoordinateSystemFactory};
use crate::errors::{VectorError, VectorResult};
use crate::grid::{GridGenerator, DEFAULT_CELL_SIZE};
use crate::layer::{load_layer, save_layer};
use crate::utils::logger::Logger;

/// Where the grid extent comes from
enum GridSource {
    /// Extent of a layer file
    Layer(String),
    /// Explicit extent with optional EPSG code
    Extent(BoundingBox, Option<u32>),
}

/// Command for generating a regular grid
pub struct GridCommand<'a> {
    /// Source of the extent
    source: GridSource,
    /// Path to the output file
    output_file: String,
    /// Grid generator with a validated cell size
    generator: GridGenerator,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> GridCommand<'a> {
    /// Create a new grid command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new GridCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> VectorResult<Self> {
        let output_file = args.get_one::<String>("output")
            .ok_or_else(|| VectorError::InvalidArgument("Missing output file path for the grid".to_string()))?
            .clone();

        let cell_size = parse_number::<f64>(args, "cell-size")?.unwrap_or(DEFAULT_CELL_SIZE);
        let generator = GridGenerator::new(cell_size)?;

        let source = match args.get_one::<String>("extent") {
            Some(extent) => {
                let bbox = BoundingBox::from_string(extent)?;
                let epsg = parse_number::<u32>(args, "epsg")?;
                GridSource::Extent(bbox, epsg)
            },
            None => GridSource::Layer(first_input(args)?),
        };

        Ok(GridCommand {
            source,
            output_file,
            generator,
            logger,
        })
    }
}

impl<'a> Command for GridCommand<'a> {
    fn execute(&self) -> VectorResult<()> {
        let grid = match &self.source {
            GridSource::Layer(path) => {
                info!("Generating grid over the extent of {} with cell size {}",
                      path, self.generator.cell_size());
                let layer = load_layer(path)?;
                self.generator.generate(&layer)?
            },
            GridSource::Extent(bbox, epsg) => {
                info!("Generating grid over ({}, {}, {}, {}) with cell size {}",
                      bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y, self.generator.cell_size());
                let crs = epsg.map(CoordinateSystemFactory::from_epsg).transpose()?;
                self.generator.generate_for_extent(bbox, crs)?
            },
        };

        if grid.crs.map(|c| c.is_geographic()).unwrap_or(false) {
            info!("Layer CRS is geographic, cell size is in degrees");
        }

        let written = save_layer(&grid, &self.output_file)?;

        info!("Grid with {} cells written to {}", grid.len(), written.display());
        self.logger.log(&format!("Grid generated: {} cells -> {}", grid.len(), written.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::build_cli;
    use crate::coordinate::CoordinateSystem;

    #[test]
    fn test_grid_from_extent() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out").join("grid.geojson");
        let output_str = output.to_str().unwrap();

        let args = build_cli().try_get_matches_from([
            "vectorkit", "--grid", "--extent", "0,0,2500,1500", "--epsg", "32618",
            "--cell-size", "1000", "-o", output_str,
        ]).unwrap();

        let logger = Logger::sink();
        GridCommand::new(&args, &logger).unwrap().execute().unwrap();

        let grid = load_layer(&output).unwrap();
        assert_eq!(grid.len(), 6);
        assert_eq!(grid.crs, Some(CoordinateSystem::UTM(18, true)));
    }

    #[test]
    fn test_invalid_cell_size() {
        let args = build_cli().try_get_matches_from([
            "vectorkit", "--grid", "--extent", "0,0,1,1", "--cell-size=-5", "-o", "grid.geojson",
        ]).unwrap();

        let logger = Logger::sink();
        assert!(matches!(GridCommand::new(&args, &logger), Err(VectorError::InvalidArgument(_))));
    }

    #[test]
    fn test_output_required() {
        let args = build_cli().try_get_matches_from(["vectorkit", "--grid", "--extent", "0,0,1,1"]).unwrap();
        let logger = Logger::sink();
        assert!(GridCommand::new(&args, &logger).is_err());
    }
}
