//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod cli;
pub mod analyze_command;
pub mod grid_command;
pub mod merge_command;
pub mod theme_command;
pub mod histogram_command;

pub use command_traits::{Command, CommandFactory};
pub use cli::build_cli;
pub use analyze_command::AnalyzeCommand;
pub use grid_command::GridCommand;
pub use merge_command::MergeCommand;
pub use theme_command::ThemeCommand;
pub use histogram_command::HistogramCommand;

use clap::ArgMatches;
use crate::utils::logger::Logger;
use crate::errors::{VectorError, VectorResult};

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct VectorkitCommandFactory;

impl VectorkitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        VectorkitCommandFactory
    }
}

impl Default for VectorkitCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for VectorkitCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> VectorResult<Box<dyn Command + 'a>> {
        if args.get_flag("grid") {
            Ok(Box::new(GridCommand::new(args, logger)?))
        } else if args.get_flag("merge") {
            Ok(Box::new(MergeCommand::new(args, logger)?))
        } else if args.contains_id("theme") || args.contains_id("theme-file") {
            Ok(Box::new(ThemeCommand::new(args, logger)?))
        } else if args.get_flag("histogram") {
            Ok(Box::new(HistogramCommand::new(args, logger)?))
        } else {
            // Default to analyze command
            Ok(Box::new(AnalyzeCommand::new(args, logger)?))
        }
    }
}

/// All positional input paths
pub(crate) fn input_files(args: &ArgMatches) -> Vec<String> {
    args.get_many::<String>("input")
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

/// The first positional input path
pub(crate) fn first_input(args: &ArgMatches) -> VectorResult<String> {
    input_files(args).into_iter().next()
        .ok_or_else(|| VectorError::InvalidArgument("Missing input file".to_string()))
}

/// Parse an optional numeric flag
pub(crate) fn parse_number<T: std::str::FromStr>(args: &ArgMatches, name: &str) -> VectorResult<Option<T>> {
    match args.get_one::<String>(name) {
        Some(raw) => raw.trim().parse::<T>()
            .map(Some)
            .map_err(|_| VectorError::ParseError(format!("Invalid value for --{}: {}", name, raw))),
        None => Ok(None),
    }
}
