//! Elevation histogram command

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::{first_input, parse_number};
use crate::dem::{ElevationGrid, ElevationHistogram, DEFAULT_BINS};
use crate::errors::VectorResult;
use crate::utils::logger::Logger;

/// Command for computing a DEM elevation histogram
pub struct HistogramCommand<'a> {
    /// Path to the CSV elevation array
    input_file: String,
    /// Optional path for the histogram CSV
    output_file: Option<String>,
    /// Number of bins
    bins: usize,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> HistogramCommand<'a> {
    /// Create a new histogram command
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> VectorResult<Self> {
        Ok(HistogramCommand {
            input_file: first_input(args)?,
            output_file: args.get_one::<String>("output").cloned(),
            bins: parse_number::<usize>(args, "bins")?.unwrap_or(DEFAULT_BINS),
            logger,
        })
    }
}

impl<'a> Command for HistogramCommand<'a> {
    fn execute(&self) -> VectorResult<()> {
        let grid = ElevationGrid::from_csv(&self.input_file)?;
        let histogram = ElevationHistogram::compute(&grid.values, self.bins)?;

        info!("Elevation summary for {} ({}x{})", self.input_file, grid.width, grid.height);
        info!("  Values: {} ({} missing)", histogram.count, histogram.missing);
        info!("  Range: {} - {} m", histogram.min, histogram.max);
        info!("  Mean: {:.2} m", histogram.mean);

        if let Some(output) = &self.output_file {
            histogram.save_csv(output)?;
            info!("Histogram saved to: {}", output);
        }

        self.logger.log_summary(&format!("Elevation histogram {}", self.input_file), &[
            ("Bins", self.bins.to_string()),
            ("Values", histogram.count.to_string()),
            ("Missing", histogram.missing.to_string()),
            ("Min", histogram.min.to_string()),
            ("Max", histogram.max.to_string()),
        ])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::build_cli;
    use crate::errors::VectorError;

    const DEM: &str = "row/col,0,1\n0,100,200\n1,,300\n";

    #[test]
    fn test_histogram_csv_written() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("dem.csv");
        let output = dir.path().join("histogram.csv");
        std::fs::write(&input, DEM).unwrap();

        let args = build_cli().try_get_matches_from([
            "vectorkit", input.to_str().unwrap(), "--histogram", "--bins", "2",
            "-o", output.to_str().unwrap(),
        ]).unwrap();

        let logger = Logger::sink();
        HistogramCommand::new(&args, &logger).unwrap().execute().unwrap();

        let written = std::fs::read_to_string(&output).unwrap();
        assert_eq!(written, "bin_start,bin_end,count\n100,200,1\n200,300,2\n");
    }

    #[test]
    fn test_zero_bins_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("dem.csv");
        std::fs::write(&input, DEM).unwrap();

        let args = build_cli().try_get_matches_from([
            "vectorkit", input.to_str().unwrap(), "--histogram", "--bins", "0",
        ]).unwrap();

        let logger = Logger::sink();
        let command = HistogramCommand::new(&args, &logger).unwrap();
        assert!(matches!(command.execute(), Err(VectorError::InvalidArgument(_))));
    }
}
