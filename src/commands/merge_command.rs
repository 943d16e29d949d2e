//! Layer merge command

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::{input_files, parse_number};
use crate::coordinate::CoordinateSystemFactory;
use crate::errors::{VectorError, VectorResult};
use crate::layer::{load_layer, save_layer};
use crate::merge::{merge_layers, MergeOptions};
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

/// Command for merging several layers into one file
pub struct MergeCommand<'a> {
    /// Paths of the layers to merge, in order
    input_files: Vec<String>,
    /// Path to the output file
    output_file: String,
    /// Merge options built from the arguments
    options: MergeOptions,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> MergeCommand<'a> {
    /// Create a new merge command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new MergeCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> VectorResult<Self> {
        let input_files = input_files(args);
        if input_files.is_empty() {
            return Err(VectorError::InvalidArgument("No layers to merge".to_string()));
        }

        let output_file = args.get_one::<String>("output")
            .ok_or_else(|| VectorError::InvalidArgument("Missing output file path for the merge".to_string()))?
            .clone();

        let names = args.get_one::<String>("names")
            .map(|raw| raw.split(',').map(|n| n.trim().to_string()).collect::<Vec<_>>());

        let target_crs = parse_number::<u32>(args, "proj")?
            .map(CoordinateSystemFactory::from_epsg)
            .transpose()?;

        let options = MergeOptions {
            names,
            target_crs,
            reset_ids: !args.get_flag("keep-ids"),
        };

        Ok(MergeCommand {
            input_files,
            output_file,
            options,
            logger,
        })
    }
}

impl<'a> Command for MergeCommand<'a> {
    fn execute(&self) -> VectorResult<()> {
        info!("Merging {} layers into {}", self.input_files.len(), self.output_file);

        let progress = if self.input_files.len() > 1 {
            ProgressTracker::new(self.input_files.len() as u64, "Loading layers")
        } else {
            ProgressTracker::hidden()
        };

        let mut layers = Vec::with_capacity(self.input_files.len());
        for path in &self.input_files {
            progress.set_message(path);
            layers.push(load_layer(path)?);
            progress.increment(1);
        }
        progress.finish();

        let merged = merge_layers(&layers, &self.options)?;
        let written = save_layer(&merged, &self.output_file)?;

        self.logger.log(&format!("Merged {} layers ({} features) -> {}",
                                 layers.len(), merged.len(), written.display()))?;
        Ok(())
    }
}
