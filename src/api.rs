use std::path::PathBuf;
use log::info;

use crate::coordinate::{BoundingBox, CoordinateSystemFactory};
use crate::dem::{ElevationGrid, ElevationHistogram};
use crate::errors::VectorResult;
use crate::grid::GridGenerator;
use crate::layer::{load_layer, save_layer, Layer};
use crate::merge::{merge_layers, MergeOptions};
use crate::theme::{builtin_scheme, Classification};
use crate::utils::logger::Logger;

/// Main interface to the VectorKit library
pub struct VectorKit {
    logger: Logger,
}

impl VectorKit {
    /// Create a new VectorKit instance
    ///
    /// # Arguments
    /// * `log_file` - Optional path to log file, defaults to "vectorkit.log"
    ///
    /// # Returns
    /// A VectorKit instance or an error if initialization fails
    pub fn new(log_file: Option<&str>) -> VectorResult<Self> {
        let log_path = log_file.unwrap_or("vectorkit.log");
        let logger = Logger::new(log_path)?;
        Ok(VectorKit { logger })
    }

    /// Create a VectorKit instance that writes no log file
    pub fn without_log() -> Self {
        VectorKit { logger: Logger::sink() }
    }

    /// Analyze a layer file and return a summary of its contents
    ///
    /// # Arguments
    /// * `input_path` - Path to the GeoJSON file to analyze
    ///
    /// # Returns
    /// String containing analysis information or an error
    pub fn analyze(&self, input_path: &str) -> VectorResult<String> {
        let layer = load_layer(input_path)?;

        let mut result = "Layer Analysis Results:\n".to_string();
        for (label, value) in crate::commands::AnalyzeCommand::summarize(&layer) {
            result.push_str(&format!("  {}: {}\n", label, value));
        }

        Ok(result)
    }

    /// Generate a regular grid over the extent of a layer file
    ///
    /// # Arguments
    /// * `input_path` - Layer whose extent is tiled
    /// * `output_path` - Where to save the grid
    /// * `cell_size` - Cell side length in units of the layer's CRS
    ///
    /// # Returns
    /// The path written
    pub fn generate_grid(&self, input_path: &str, output_path: &str, cell_size: f64) -> VectorResult<PathBuf> {
        let generator = GridGenerator::new(cell_size)?;
        let layer = load_layer(input_path)?;
        let grid = generator.generate(&layer)?;

        self.logger.log(&format!("Grid over {}: {} cells", input_path, grid.len()))?;
        save_layer(&grid, output_path)
    }

    /// Generate a regular grid over an explicit extent
    ///
    /// # Arguments
    /// * `bbox` - Extent as "minx,miny,maxx,maxy"
    /// * `epsg` - Optional EPSG code of the extent
    /// * `cell_size` - Cell side length
    ///
    /// # Returns
    /// The grid layer
    pub fn grid_for_extent(&self, bbox: &str, epsg: Option<u32>, cell_size: f64) -> VectorResult<Layer> {
        let extent = BoundingBox::from_string(bbox)?;
        let crs = epsg.map(CoordinateSystemFactory::from_epsg).transpose()?;
        GridGenerator::new(cell_size)?.generate_for_extent(&extent, crs)
    }

    /// Merge layer files into one
    ///
    /// # Arguments
    /// * `input_paths` - Layers to merge, in order
    /// * `names` - Optional origin name per layer
    /// * `target_epsg` - Optional EPSG code to reproject every layer to
    /// * `output_path` - Where to save the merged layer
    ///
    /// # Returns
    /// The path written
    pub fn merge(&self,
                 input_paths: &[&str],
                 names: Option<&[&str]>,
                 target_epsg: Option<u32>,
                 output_path: &str) -> VectorResult<PathBuf> {
        let layers = input_paths.iter()
            .map(|path| load_layer(path))
            .collect::<VectorResult<Vec<_>>>()?;

        let options = MergeOptions {
            names: names.map(|n| n.iter().map(|s| s.to_string()).collect()),
            target_crs: target_epsg.map(CoordinateSystemFactory::from_epsg).transpose()?,
            ..MergeOptions::default()
        };

        let merged = merge_layers(&layers, &options)?;
        self.logger.log(&format!("Merged {} layers into {} features", layers.len(), merged.len()))?;
        save_layer(&merged, output_path)
    }

    /// Classify a layer file with a built-in thematic scheme
    ///
    /// # Arguments
    /// * `input_path` - Layer to classify
    /// * `scheme_name` - Built-in scheme name ("land_use", "land_cover", "hazard")
    /// * `column` - Optional column override
    /// * `output_path` - Optional path to save the classified layer
    ///
    /// # Returns
    /// Classification summary
    pub fn classify(&self,
                    input_path: &str,
                    scheme_name: &str,
                    column: Option<&str>,
                    output_path: Option<&str>) -> VectorResult<Classification> {
        let scheme = builtin_scheme(scheme_name)?;
        let layer = load_layer(input_path)?;
        let (classified, summary) = scheme.classify(&layer, column);

        if let Some(path) = output_path {
            save_layer(&classified, path)?;
        }

        info!("Scheme '{}' matched {} features", scheme.name, summary.matched_total());
        Ok(summary)
    }

    /// Compute an elevation histogram from a CSV array file
    ///
    /// # Arguments
    /// * `input_path` - CSV elevation array
    /// * `bins` - Number of bins
    ///
    /// # Returns
    /// The histogram
    pub fn elevation_histogram(&self, input_path: &str, bins: usize) -> VectorResult<ElevationHistogram> {
        let grid = ElevationGrid::from_csv(input_path)?;
        ElevationHistogram::compute(&grid.values, bins)
    }
}
