//! Computational grid: an extent plus row and column counts

use std::fmt;

use super::extent::Extent;
use crate::errors::{RegionError, RegionResult};

/// Rectangular, axis-aligned raster or region grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    extent: Extent,
    rows: u32,
    cols: u32,
}

impl Grid {
    /// Create a new grid; rows and cols must both be positive
    pub fn new(extent: Extent, rows: u32, cols: u32) -> RegionResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(RegionError::InvalidGrid { rows: rows as f64, cols: cols as f64 });
        }
        Ok(Grid { extent, rows, cols })
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Same shape over a different extent
    pub fn with_extent(&self, extent: Extent) -> Grid {
        Grid { extent, rows: self.rows, cols: self.cols }
    }

    /// North-south cell size
    pub fn ns_resolution(&self) -> f64 {
        self.extent.height() / self.rows as f64
    }

    /// East-west cell size
    pub fn ew_resolution(&self) -> f64 {
        self.extent.width() / self.cols as f64
    }

    /// Numeric parameter view of this grid
    pub fn params(&self) -> GridParams {
        GridParams {
            north: self.extent.north,
            south: self.extent.south,
            east: self.extent.east,
            west: self.extent.west,
            rows: self.rows as f64,
            cols: self.cols as f64,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rows={} cols={}", self.extent, self.rows, self.cols)
    }
}

/// Grid parameters as reported by a grid query, not yet validated
///
/// Every field is parsed as floating point, including rows and cols.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParams {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
    pub rows: f64,
    pub cols: f64,
}

impl GridParams {
    /// Validate into a grid
    ///
    /// Rows and cols must be positive whole numbers that fit in a `u32`.
    pub fn to_grid(&self) -> RegionResult<Grid> {
        let invalid = RegionError::InvalidGrid { rows: self.rows, cols: self.cols };
        let whole = |v: f64| v.is_finite() && v >= 1.0 && v.fract() == 0.0 && v <= u32::MAX as f64;
        if !whole(self.rows) || !whole(self.cols) {
            return Err(invalid);
        }

        let extent = Extent::new(self.north, self.south, self.east, self.west)?;
        Grid::new(extent, self.rows as u32, self.cols as u32)
    }

    /// `key=value` pairs in n, s, e, w, rows, cols order
    pub fn to_key_values(&self) -> Vec<(&'static str, f64)> {
        vec![
            ("n", self.north),
            ("s", self.south),
            ("e", self.east),
            ("w", self.west),
            ("rows", self.rows),
            ("cols", self.cols),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extent() -> Extent {
        Extent::new(10.0, 0.0, 20.0, 0.0).unwrap()
    }

    #[test]
    fn test_rejects_empty_shape() {
        assert!(matches!(Grid::new(extent(), 0, 5), Err(RegionError::InvalidGrid { .. })));
        assert!(matches!(Grid::new(extent(), 5, 0), Err(RegionError::InvalidGrid { .. })));
    }

    #[test]
    fn test_resolution() {
        let grid = Grid::new(extent(), 100, 200).unwrap();
        assert!((grid.ns_resolution() - 0.1).abs() < 1e-12);
        assert!((grid.ew_resolution() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_params_to_grid() {
        let grid = Grid::new(extent(), 3, 4).unwrap();
        assert_eq!(grid.params().to_grid().unwrap(), grid);

        let mut params = grid.params();
        params.rows = 2.5;
        assert!(matches!(params.to_grid(), Err(RegionError::InvalidGrid { .. })));
        params.rows = 0.0;
        assert!(matches!(params.to_grid(), Err(RegionError::InvalidGrid { .. })));
    }
}
