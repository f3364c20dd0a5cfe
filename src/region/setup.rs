//! Target region setup across coordinate systems
//!
//! Makes a target environment's computational grid match a source
//! environment's: same rows and columns, extent reprojected into the
//! target coordinate system.

use log::info;

use super::aligner::GridAligner;
use super::reprojector::RegionReprojector;
use crate::collaborator::{Environment, GridQuery, RegionSetter};
use crate::coordinate::{CoordinateTransformer, Grid};
use crate::errors::RegionResult;

/// Composes grid queries, reprojection, alignment and region setting
pub struct TargetRegionSetup<'a, Q: ?Sized, S: ?Sized, T: CoordinateTransformer> {
    query: &'a Q,
    setter: &'a S,
    reprojector: RegionReprojector<T>,
}

impl<'a, Q, S, T> TargetRegionSetup<'a, Q, S, T>
where
    Q: GridQuery + ?Sized,
    S: RegionSetter + ?Sized,
    T: CoordinateTransformer,
{
    pub fn new(query: &'a Q, setter: &'a S, transformer: T) -> Self {
        TargetRegionSetup { query, setter, reprojector: RegionReprojector::new(transformer) }
    }

    /// Set the target's grid from the source's grid
    ///
    /// Everything is computed before the target is touched, so a failing
    /// query or transformation leaves the target region unchanged.
    ///
    /// # Returns
    /// The grid applied to the target environment
    pub fn set_target_region(&self, source: &Environment, target: &Environment) -> RegionResult<Grid> {
        let source_grid = self.query.current_grid(source)?;
        let from = self.query.projection(source)?;
        let to = self.query.projection(target)?;

        let extent = self.reprojector.reproject(&source_grid.extent(), &from, &to)?;
        let target_grid = GridAligner::align(&source_grid, extent);

        self.setter.apply_grid(&target_grid, target)?;
        info!("Target region of '{}' set from '{}': {}", target.name(), source.name(), target_grid);
        Ok(target_grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use crate::collaborator::RasterSource;
    use crate::coordinate::{CrsDescriptor, Extent, GridParams, MercatorTransformer};
    use crate::errors::RegionError;

    struct FakeSession {
        applied: RefCell<Vec<(Grid, String)>>,
        target_crs: &'static str,
    }

    impl GridQuery for FakeSession {
        fn current_grid(&self, _env: &Environment) -> RegionResult<Grid> {
            Grid::new(Extent::new(10.0, 0.0, 20.0, 0.0)?, 50, 100)
        }

        fn projection(&self, env: &Environment) -> RegionResult<CrsDescriptor> {
            Ok(match env.name() {
                "source" => CrsDescriptor::from_epsg(4326),
                _ => CrsDescriptor::new(self.target_crs),
            })
        }

        fn reprojection_params(&self, _raster: &RasterSource, _target: &Environment) -> RegionResult<GridParams> {
            unreachable!()
        }

        fn resolve_grid(&self, _params: &GridParams, _env: &Environment) -> RegionResult<GridParams> {
            unreachable!()
        }
    }

    impl RegionSetter for FakeSession {
        fn apply_grid(&self, grid: &Grid, env: &Environment) -> RegionResult<()> {
            self.applied.borrow_mut().push((*grid, env.name().to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_sets_reprojected_grid_with_source_shape() {
        let session = FakeSession { applied: RefCell::new(Vec::new()), target_crs: "EPSG:3857" };
        let setup = TargetRegionSetup::new(&session, &session, MercatorTransformer);

        let grid = setup.set_target_region(&Environment::new("source"), &Environment::new("target")).unwrap();
        assert_eq!((grid.rows(), grid.cols()), (50, 100));
        assert!((grid.extent().east - 2226389.8158654715).abs() < 1e-3);
        assert_eq!(grid.extent().west, 0.0);

        let applied = session.applied.borrow();
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0].1, "target");
    }

    #[test]
    fn test_failed_transform_leaves_target_untouched() {
        let session = FakeSession { applied: RefCell::new(Vec::new()), target_crs: "EPSG:32633" };
        let setup = TargetRegionSetup::new(&session, &session, MercatorTransformer);

        let result = setup.set_target_region(&Environment::new("source"), &Environment::new("target"));
        assert!(matches!(result, Err(RegionError::TransformError(_))));
        assert!(session.applied.borrow().is_empty());
    }
}
