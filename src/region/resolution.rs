//! Estimated cell resolution of a raster after reprojection
//!
//! The raster is never materialized in the target system. Instead the
//! external reprojection tool is asked where the raster would land, and
//! the resulting grid's cell sizes are averaged into one scalar.

use log::{debug, info};

use crate::collaborator::{Environment, GridQuery, RasterSource};
use crate::coordinate::GridParams;
use crate::errors::{RegionError, RegionResult};

/// Estimates a representative cell size for a grid
pub struct ResolutionEstimator;

impl ResolutionEstimator {
    /// Mean of the north-south and east-west cell sizes
    ///
    /// Fails with `InvalidGrid` unless rows and cols are finite and positive.
    pub fn estimate(params: &GridParams) -> RegionResult<f64> {
        let valid = |count: f64| count.is_finite() && count > 0.0;
        if !valid(params.rows) || !valid(params.cols) {
            return Err(RegionError::InvalidGrid { rows: params.rows, cols: params.cols });
        }

        let cell_ns = (params.north - params.south) / params.rows;
        let cell_ew = (params.east - params.west) / params.cols;
        debug!("Cell size: ns={}, ew={}", cell_ns, cell_ew);

        Ok((cell_ew + cell_ns) / 2.0)
    }

    /// Estimate the resolution `raster` would have in `target`
    ///
    /// Queries the hypothetical reprojection parameters of the raster,
    /// resolves them against the target environment's region settings,
    /// then averages the resulting cell sizes.
    pub fn estimate_reprojected<Q: GridQuery + ?Sized>(
        query: &Q,
        raster: &RasterSource,
        target: &Environment,
    ) -> RegionResult<f64> {
        let native = query.reprojection_params(raster, target)?;
        debug!("Reprojection parameters for {}: {:?}", raster.name, native);

        let resolved = query.resolve_grid(&native, target)?;
        let estimate = Self::estimate(&resolved)?;

        info!("Estimated resolution of {} in {}: {}", raster.name, target.name(), estimate);
        Ok(estimate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(rows: f64, cols: f64) -> GridParams {
        GridParams { north: 10.0, south: 0.0, east: 20.0, west: 0.0, rows, cols }
    }

    #[test]
    fn test_concrete_estimate() {
        let estimate = ResolutionEstimator::estimate(&params(100.0, 200.0)).unwrap();
        assert!((estimate - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_mean_of_axes() {
        // ns = 10 / 10 = 1, ew = 20 / 5 = 4
        let estimate = ResolutionEstimator::estimate(&params(10.0, 5.0)).unwrap();
        assert!((estimate - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_doubling_shape_halves_estimate() {
        let base = ResolutionEstimator::estimate(&params(40.0, 30.0)).unwrap();
        let doubled = ResolutionEstimator::estimate(&params(80.0, 60.0)).unwrap();
        assert!((doubled - base / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_shape_is_invalid() {
        assert!(matches!(ResolutionEstimator::estimate(&params(0.0, 10.0)), Err(RegionError::InvalidGrid { .. })));
        assert!(matches!(ResolutionEstimator::estimate(&params(10.0, 0.0)), Err(RegionError::InvalidGrid { .. })));
    }

    #[test]
    fn test_negative_or_non_finite_shape_is_invalid() {
        for (rows, cols) in [(-10.0, 10.0), (10.0, f64::NAN), (f64::INFINITY, 10.0)] {
            assert!(
                matches!(ResolutionEstimator::estimate(&params(rows, cols)), Err(RegionError::InvalidGrid { .. })),
                "rows={} cols={}", rows, cols
            );
        }
    }
}
