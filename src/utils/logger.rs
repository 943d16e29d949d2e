//! Logger utility for application-wide logging
//!
//! This module provides a custom logger implementation that works alongside
//! the standard log crate, but adds file output capabilities.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{Log, Record, Level, Metadata, LevelFilter};

/// Custom logger implementation
pub struct Logger {
    /// File handle for log output
    file: Mutex<Option<File>>,
}

impl Logger {
    /// Creates a new logger instance
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file
    ///
    /// # Returns
    ///
    /// A new Logger instance or an error if the file cannot be created
    pub fn new(log_file: &str) -> io::Result<Self> {
        let file = File::create(Path::new(log_file))?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
        })
    }

    /// Creates a logger that discards every message
    ///
    /// Used by library callers that do not want a log file on disk.
    pub fn sink() -> Self {
        Logger {
            file: Mutex::new(None),
        }
    }

    /// Logs a message to the log file
    ///
    /// # Arguments
    ///
    /// * `message` - The message to log
    pub fn log(&self, message: &str) -> io::Result<()> {
        let mut guard = self.file.lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log file lock poisoned"))?;

        if let Some(file) = guard.as_mut() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Logs a titled block of key/value lines
    ///
    /// # Arguments
    ///
    /// * `title` - Heading written before the entries
    /// * `entries` - Pairs of label and value
    pub fn log_summary(&self, title: &str, entries: &[(&str, String)]) -> io::Result<()> {
        self.log(&format!("{}:", title))?;

        for (label, value) in entries {
            self.log(&format!("  {}: {}", label, value))?;
        }

        Ok(())
    }

    /// Static method to initialize the global logger
    pub fn init_global_logger(log_file: &str) -> io::Result<()> {
        let global_logger = Logger::new(log_file)?;

        // Only called once at startup
        if log::set_boxed_logger(Box::new(global_logger)).is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }

        log::set_max_level(LevelFilter::Debug);
        Ok(())
    }

    /// Initialize a console logger on stderr for verbose runs
    pub fn init_console_logger() {
        let _ = env_logger::Builder::new()
            .filter_level(LevelFilter::Debug)
            .format_timestamp(None)
            .try_init();
    }
}

// Implement the Log trait to make our Logger work with the log crate
impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Debug
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = self.log(&message);

            // Informational output also goes to the console
            if record.level() <= Level::Info {
                println!("{}", message);
            }
        }
    }

    fn flush(&self) {
        // Already flushing in the log method
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_writes_summary_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.log");
        let logger = Logger::new(path.to_str().unwrap()).unwrap();

        logger.log_summary("Layer", &[("Features", "3".to_string()), ("CRS", "EPSG:4326".to_string())]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Layer:\n  Features: 3\n  CRS: EPSG:4326\n");
    }

    #[test]
    fn test_sink_logger_accepts_messages() {
        let logger = Logger::sink();
        assert!(logger.log("discarded").is_ok());
    }
}
