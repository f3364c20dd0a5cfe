//! Logger utility for application-wide logging
//!
//! This module provides a logger that works alongside the standard log
//! crate, writing every record to a log file and echoing it to the console.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;
use log::{Log, Record, Level, Metadata};

use crate::coordinate::Grid;

/// File-backed logger
pub struct Logger {
    /// File handle for log output
    file: Mutex<Option<File>>,
    /// Most verbose level written
    level: Level,
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
        Self::with_level(log_file, Level::Info)
    }

    /// Creates a logger that records messages up to `level`
    pub fn with_level(log_file: &str, level: Level) -> io::Result<Self> {
        let file = File::create(Path::new(log_file))?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
            level,
        })
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

    /// Logs a grid's extent and shape in a readable layout
    pub fn log_grid(&self, title: &str, grid: &Grid) -> io::Result<()> {
        let extent = grid.extent();
        self.log(&format!("{}:", title))?;
        self.log(&format!("  north: {}", extent.north))?;
        self.log(&format!("  south: {}", extent.south))?;
        self.log(&format!("  east:  {}", extent.east))?;
        self.log(&format!("  west:  {}", extent.west))?;
        self.log(&format!("  rows:  {}  cols: {}", grid.rows(), grid.cols()))?;
        self.log(&format!("  nsres: {}  ewres: {}", grid.ns_resolution(), grid.ew_resolution()))
    }

    /// Static method to initialize the global logger
    pub fn init_global_logger(log_file: &str, level: Level) -> io::Result<()> {
        let global_logger = Logger::with_level(log_file, level)?;

        // Only called once at startup
        if log::set_boxed_logger(Box::new(global_logger)).is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }

        log::set_max_level(level.to_level_filter());
        Ok(())
    }
}

// Implement the Log trait to make our Logger work with the log crate
impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let message = format!("[{}] {}", record.level(), record.args());
            let _ = Logger::log(self, &message);

            // Console output goes to stderr so command results stay clean on stdout
            eprintln!("{}", message);
        }
    }

    fn flush(&self) {
        // Already flushing in the log method
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::Extent;

    #[test]
    fn test_writes_grid_summary() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("regionkit.log");
        let logger = Logger::new(path.to_str().unwrap()).unwrap();

        let grid = Grid::new(Extent::new(10.0, 0.0, 20.0, 0.0).unwrap(), 100, 200).unwrap();
        logger.log_grid("Target grid", &grid).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("Target grid:\n"));
        assert!(content.contains("rows:  100  cols: 200"));
    }

    #[test]
    fn test_level_filtering() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::with_level(dir.path().join("l.log").to_str().unwrap(), Level::Warn).unwrap();
        assert!(logger.enabled(&Metadata::builder().level(Level::Error).build()));
        assert!(!logger.enabled(&Metadata::builder().level(Level::Debug).build()));
    }
}
