//! Region queries and region setting through external commands

use log::{debug, info};

use super::environment::Environment;
use super::key_value::{parse_grid_params, PairLayout, REGION_SCHEMA, REPROJECTION_SCHEMA};
use super::process::ProcessRunner;
use super::{GridQuery, RasterSource, RegionSetter};
use crate::config::{render_args, RegionConfig, ReprojectionConfig};
use crate::coordinate::{CrsDescriptor, Grid, GridParams};
use crate::errors::{RegionError, RegionResult};

/// Grid query and region-setting service backed by external commands
#[derive(Debug, Clone)]
pub struct ProcessRegionService {
    region: RegionConfig,
    reprojection: ReprojectionConfig,
}

impl ProcessRegionService {
    pub fn new(region: RegionConfig, reprojection: ReprojectionConfig) -> Self {
        ProcessRegionService { region, reprojection }
    }

    fn run(&self, program: &str, args: &[String], env: &Environment) -> RegionResult<String> {
        ProcessRunner::new(program)
            .run(args, env, None)
            .map_err(RegionError::CollaboratorError)
    }

    fn grid_args(base: &[String], params: &GridParams) -> Vec<String> {
        base.iter()
            .cloned()
            .chain(params.to_key_values().into_iter().map(|(key, value)| format!("{}={}", key, value)))
            .collect()
    }
}

impl GridQuery for ProcessRegionService {
    fn current_grid(&self, env: &Environment) -> RegionResult<Grid> {
        let output = self.run(&self.region.command, &self.region.query_args, env)?;
        let grid = parse_grid_params(&output, &REGION_SCHEMA, PairLayout::Lines)?.to_grid()?;
        debug!("Current grid in '{}': {}", env.name(), grid);
        Ok(grid)
    }

    fn projection(&self, env: &Environment) -> RegionResult<CrsDescriptor> {
        let output = self.run(&self.region.projection_command, &self.region.projection_args, env)?;
        let definition = output.trim();
        if definition.is_empty() {
            return Err(RegionError::MalformedResponse(format!(
                "{} returned an empty projection for '{}'", self.region.projection_command, env.name()
            )));
        }
        Ok(CrsDescriptor::new(definition))
    }

    fn reprojection_params(&self, raster: &RasterSource, target: &Environment) -> RegionResult<GridParams> {
        let args = render_args(&self.reprojection.args, &[
            ("raster", raster.name.as_str()),
            ("mapset", raster.mapset.as_str()),
            ("project", raster.project.as_str()),
            ("dbase", raster.dbase.as_str()),
        ])?;
        let output = self.run(&self.reprojection.command, &args, target)?;
        parse_grid_params(&output, &REPROJECTION_SCHEMA, PairLayout::Whitespace)
    }

    fn resolve_grid(&self, params: &GridParams, env: &Environment) -> RegionResult<GridParams> {
        let args = Self::grid_args(&self.region.resolve_args, params);
        let output = self.run(&self.region.command, &args, env)?;
        parse_grid_params(&output, &REGION_SCHEMA, PairLayout::Lines)
    }
}

impl RegionSetter for ProcessRegionService {
    fn apply_grid(&self, grid: &Grid, env: &Environment) -> RegionResult<()> {
        let args = Self::grid_args(&self.region.set_args, &grid.params());
        self.run(&self.region.command, &args, env)?;
        info!("Applied grid {} to '{}'", grid, env.name());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::Extent;

    #[test]
    fn test_grid_args() {
        let grid = Grid::new(Extent::new(10.0, 0.0, 20.5, -1.0).unwrap(), 3, 4).unwrap();
        let args = ProcessRegionService::grid_args(&["-ug".to_string()], &grid.params());
        assert_eq!(args, vec!["-ug", "n=10", "s=0", "e=20.5", "w=-1", "rows=3", "cols=4"]);
    }
}
