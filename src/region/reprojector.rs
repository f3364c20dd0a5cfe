//! Reprojection of region extents between coordinate systems
//!
//! An extent is reprojected by transforming its four corners in a single
//! batch and taking the enclosing box of the results. Transforming only two
//! opposite corners underestimates the reprojected box whenever the
//! projection shears or rotates the region. Sampling only the corners (and
//! not the edges) is a known approximation for strongly curved projections
//! and is kept deliberately.

use log::{debug, info};

use crate::coordinate::{CoordinateTransformer, CrsDescriptor, Extent, Point};
use crate::errors::{RegionError, RegionResult};

/// Reprojects extents through a coordinate transformer
pub struct RegionReprojector<T: CoordinateTransformer> {
    transformer: T,
}

impl<T: CoordinateTransformer> RegionReprojector<T> {
    /// Create a new reprojector around a transformer
    pub fn new(transformer: T) -> Self {
        RegionReprojector { transformer }
    }

    /// Reproject an extent from one coordinate system to another
    ///
    /// When both descriptors are identical the input extent is returned
    /// as is, without calling the transformer.
    ///
    /// # Arguments
    /// * `extent` - Extent in the source coordinate system
    /// * `from` - Source coordinate system
    /// * `to` - Target coordinate system
    ///
    /// # Returns
    /// The enclosing extent of the four transformed corners
    pub fn reproject(&self, extent: &Extent, from: &CrsDescriptor, to: &CrsDescriptor) -> RegionResult<Extent> {
        if from == to {
            debug!("Source and target CRS are identical, keeping extent {}", extent);
            return Ok(*extent);
        }

        let corners = extent.corners();
        let transformed = self.transformer.transform(&corners, from, to)?;

        if transformed.len() != corners.len() {
            return Err(RegionError::MalformedResponse(format!(
                "expected {} transformed corners, got {}",
                corners.len(), transformed.len()
            )));
        }

        const CORNER_NAMES: [&str; 4] = ["NE", "NW", "SE", "SW"];
        for (name, point) in CORNER_NAMES.iter().zip(&transformed) {
            if !point.is_finite() {
                return Err(RegionError::TransformError(format!(
                    "{} corner transformed to non-finite coordinates ({}, {})",
                    name, point.x, point.y
                )));
            }
        }

        let reprojected = Extent::enclosing(&transformed)?;
        info!("Reprojected extent {} to {}", extent, reprojected);
        Ok(reprojected)
    }

    /// Reproject a single point from one coordinate system to another
    pub fn reproject_point(&self, point: &Point, from: &CrsDescriptor, to: &CrsDescriptor) -> RegionResult<Point> {
        if from == to {
            return Ok(*point);
        }

        let mut transformed = self.transformer.transform(std::slice::from_ref(point), from, to)?;
        if transformed.len() != 1 {
            return Err(RegionError::MalformedResponse(format!(
                "expected 1 transformed point, got {}", transformed.len()
            )));
        }

        let result = transformed.remove(0);
        if !result.is_finite() {
            return Err(RegionError::TransformError(format!(
                "point transformed to non-finite coordinates ({}, {})", result.x, result.y
            )));
        }
        Ok(result)
    }
}
