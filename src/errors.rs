//! Custom error types for region processing

use std::fmt;
use std::io;

/// Region-specific error types
#[derive(Debug)]
pub enum RegionError {
    /// I/O error
    IoError(io::Error),
    /// The coordinate transformer failed or produced unusable coordinates
    TransformError(String),
    /// Grid has zero rows or columns
    InvalidGrid {
        /// Row count as reported
        rows: f64,
        /// Column count as reported
        cols: f64,
    },
    /// Region has zero width or height
    DegenerateRegion {
        /// East minus west
        width: f64,
        /// North minus south
        height: f64,
    },
    /// Collaborator output had the wrong shape
    MalformedResponse(String),
    /// Extent bounds are inverted or not finite
    InvalidExtent(String),
    /// An external command other than the transformer failed
    CollaboratorError(String),
    /// Configuration could not be parsed
    ConfigError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionError::IoError(e) => write!(f, "I/O error: {}", e),
            RegionError::TransformError(msg) => write!(f, "Coordinate transformation failed: {}", msg),
            RegionError::InvalidGrid { rows, cols } => {
                write!(f, "Invalid grid: rows={}, cols={} (both must be positive)", rows, cols)
            },
            RegionError::DegenerateRegion { width, height } => {
                write!(f, "Degenerate region: width={}, height={} (both must be non-zero)", width, height)
            },
            RegionError::MalformedResponse(msg) => write!(f, "Malformed response: {}", msg),
            RegionError::InvalidExtent(msg) => write!(f, "Invalid extent: {}", msg),
            RegionError::CollaboratorError(msg) => write!(f, "External command failed: {}", msg),
            RegionError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            RegionError::GenericError(msg) => write!(f, "Region error: {}", msg),
        }
    }
}

impl std::error::Error for RegionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegionError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for RegionError {
    fn from(error: io::Error) -> Self {
        RegionError::IoError(error)
    }
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;

impl From<String> for RegionError {
    fn from(msg: String) -> Self {
        RegionError::GenericError(msg)
    }
}
