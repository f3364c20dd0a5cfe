//! Axis-aligned extent of a region

use std::fmt;

use super::point::Point;
use crate::errors::{RegionError, RegionResult};

/// Axis-aligned bounding box of a region in some coordinate system
///
/// Extents are immutable values: every transformation produces a new one.
/// Callers are responsible for resolving antimeridian wrap-around before
/// constructing an extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    /// Northern bound (maximum y)
    pub north: f64,
    /// Southern bound (minimum y)
    pub south: f64,
    /// Eastern bound (maximum x)
    pub east: f64,
    /// Western bound (minimum x)
    pub west: f64,
}

impl Extent {
    /// Create a new extent, checking that the bounds are ordered and finite
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> RegionResult<Self> {
        if !(north.is_finite() && south.is_finite() && east.is_finite() && west.is_finite()) {
            return Err(RegionError::InvalidExtent(format!(
                "bounds must be finite (n={}, s={}, e={}, w={})",
                north, south, east, west
            )));
        }
        if north < south {
            return Err(RegionError::InvalidExtent(format!(
                "north ({}) is below south ({})", north, south
            )));
        }
        if east < west {
            return Err(RegionError::InvalidExtent(format!(
                "east ({}) is left of west ({})", east, west
            )));
        }

        Ok(Extent { north, south, east, west })
    }

    /// Smallest extent enclosing all the given points
    pub fn enclosing(points: &[Point]) -> RegionResult<Self> {
        if points.is_empty() {
            return Err(RegionError::InvalidExtent("no points to enclose".to_string()));
        }

        let mut north = f64::NEG_INFINITY;
        let mut south = f64::INFINITY;
        let mut east = f64::NEG_INFINITY;
        let mut west = f64::INFINITY;

        for point in points {
            north = north.max(point.y);
            south = south.min(point.y);
            east = east.max(point.x);
            west = west.min(point.x);
        }

        Extent::new(north, south, east, west)
    }

    /// Parse an extent from a string (format: "west,south,east,north")
    pub fn from_string(extent_str: &str) -> RegionResult<Self> {
        let parts: Vec<&str> = extent_str.split(',').collect();
        if parts.len() != 4 {
            return Err(RegionError::InvalidExtent(
                "extent must have 4 comma-separated values (west,south,east,north)".to_string()));
        }

        let mut values = [0.0f64; 4];
        for (value, part) in values.iter_mut().zip(&parts) {
            *value = part.trim().parse::<f64>()
                .map_err(|_| RegionError::InvalidExtent(format!("invalid bound: {}", part.trim())))?;
        }

        let [west, south, east, north] = values;
        Extent::new(north, south, east, west)
    }

    /// East-west span
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// North-south span
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// The four corners in NE, NW, SE, SW order
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.east, self.north),
            Point::new(self.west, self.north),
            Point::new(self.east, self.south),
            Point::new(self.west, self.south),
        ]
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={} s={} e={} w={}", self.north, self.south, self.east, self.west)
    }
}
