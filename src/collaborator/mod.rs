//! External collaborators
//!
//! Interfaces for the services the region logic depends on but does not
//! implement: grid queries and region setting. Process-backed
//! implementations run configurable commands and parse their output
//! strictly.

pub mod environment;
pub mod key_value;
pub mod process;
pub mod region_service;
pub mod transform_service;

pub use environment::Environment;
pub use region_service::ProcessRegionService;
pub use transform_service::ProcessTransformer;

use crate::coordinate::{CrsDescriptor, Grid, GridParams};
use crate::errors::RegionResult;

/// Raster dataset located in some project database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterSource {
    /// Raster map name
    pub name: String,
    /// Mapset containing the raster
    pub mapset: String,
    /// Project (location) containing the mapset
    pub project: String,
    /// Path of the database holding the project
    pub dbase: String,
}

/// Grid and region query service
pub trait GridQuery {
    /// The active computational grid of an environment
    fn current_grid(&self, env: &Environment) -> RegionResult<Grid>;

    /// The coordinate system of an environment
    fn projection(&self, env: &Environment) -> RegionResult<CrsDescriptor>;

    /// Bounds and shape `raster` would have if reprojected into `target`
    fn reprojection_params(&self, raster: &RasterSource, target: &Environment) -> RegionResult<GridParams>;

    /// Resolve parameters against an environment's region settings
    fn resolve_grid(&self, params: &GridParams, env: &Environment) -> RegionResult<GridParams>;
}

/// Region-setting service
pub trait RegionSetter {
    /// Make `grid` the active computational grid of `env`
    fn apply_grid(&self, grid: &Grid, env: &Environment) -> RegionResult<()>;
}
