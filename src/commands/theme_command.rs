//! Thematic classification command
//!
//! Assigns category colors to the features of a layer using a built-in
//! or user-supplied scheme and reports the legend.

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::first_input;
use crate::errors::{VectorError, VectorResult};
use crate::layer::{load_layer, save_layer};
use crate::theme::{builtin_scheme, load_schemes_from_file, ThematicScheme};
use crate::utils::logger::Logger;

/// Command for classifying a layer with a thematic scheme
pub struct ThemeCommand<'a> {
    /// Path to the input file
    input_file: String,
    /// Optional path for the classified layer
    output_file: Option<String>,
    /// Resolved scheme
    scheme: ThematicScheme,
    /// Column override
    column: Option<String>,
    /// Logger for recording operations
    logger: &'a Logger,
}

impl<'a> ThemeCommand<'a> {
    /// Create a new theme command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `logger` - Logger for recording operations
    ///
    /// # Returns
    /// A new ThemeCommand instance or an error
    pub fn new(args: &ArgMatches, logger: &'a Logger) -> VectorResult<Self> {
        let input_file = first_input(args)?;
        let name = args.get_one::<String>("theme").map(String::as_str);
        let scheme = Self::resolve_scheme(name, args.get_one::<String>("theme-file").map(String::as_str))?;

        Ok(ThemeCommand {
            input_file,
            output_file: args.get_one::<String>("output").cloned(),
            scheme,
            column: args.get_one::<String>("column").cloned(),
            logger,
        })
    }

    /// Pick the scheme from a theme file or from the built-in set
    ///
    /// With a theme file and no name, the file must define a single scheme.
    fn resolve_scheme(name: Option<&str>, theme_file: Option<&str>) -> VectorResult<ThematicScheme> {
        match (theme_file, name) {
            (Some(path), name) => {
                let mut schemes = load_schemes_from_file(path)?;
                match name {
                    Some(name) => {
                        let index = schemes.iter().position(|s| s.name == name)
                            .ok_or_else(|| VectorError::ThemeError(format!(
                                "Scheme '{}' not found in {}", name, path)))?;
                        Ok(schemes.swap_remove(index))
                    },
                    None if schemes.len() == 1 => Ok(schemes.remove(0)),
                    None => Err(VectorError::ThemeError(format!(
                        "{} defines {} schemes, choose one with --theme", path, schemes.len()))),
                }
            },
            (None, Some(name)) => builtin_scheme(name),
            (None, None) => Err(VectorError::InvalidArgument("Missing --theme or --theme-file".to_string())),
        }
    }
}

impl<'a> Command for ThemeCommand<'a> {
    fn execute(&self) -> VectorResult<()> {
        let layer = load_layer(&self.input_file)?;
        let (classified, summary) = self.scheme.classify(&layer, self.column.as_deref());

        info!("Legend: {}", self.scheme.title);
        for (label, color) in self.scheme.legend() {
            let count = summary.matched.get(label).copied().unwrap_or(0);
            info!("  {} {} ({} features)", color, label, count);
        }
        info!("Classified {} of {} features", summary.matched_total(), layer.len());

        if let Some(output) = &self.output_file {
            save_layer(&classified, output)?;
        }

        self.logger.log(&format!("Scheme '{}' applied to {}: {} matched, {} unmatched, {} missing",
                                 self.scheme.name, self.input_file,
                                 summary.matched_total(), summary.unmatched, summary.missing))?;
        Ok(())
    }
}
