//! Resolution estimate command
//!
//! Either averages the cell size of a grid given on the command line, or
//! asks the external tools where a raster would land in a target
//! environment and estimates the resolution there.

use clap::ArgMatches;
use log::info;

use crate::collaborator::{Environment, ProcessRegionService, RasterSource};
use crate::commands::command_traits::Command;
use crate::config::Config;
use crate::coordinate::GridParams;
use crate::errors::RegionResult;
use crate::region::ResolutionEstimator;
use crate::utils::arg_utils;
use crate::utils::logger::Logger;

enum ResolutionInput {
    /// Grid given directly
    Grid(GridParams),
    /// Raster to be conceptually reprojected into a target environment
    Raster {
        raster: RasterSource,
        target: Environment,
        service: ProcessRegionService,
    },
}

/// Command estimating cell resolution
pub struct ResolutionCommand<'a> {
    input: ResolutionInput,
    logger: &'a Logger,
}

impl<'a> ResolutionCommand<'a> {
    pub fn new(args: &ArgMatches, config: &Config, logger: &'a Logger) -> RegionResult<Self> {
        let input = if let Some(name) = args.get_one::<String>("raster") {
            let raster = RasterSource {
                name: name.clone(),
                mapset: arg_utils::required_string(args, "mapset", "raster resolution")?,
                project: arg_utils::required_string(args, "project", "raster resolution")?,
                dbase: arg_utils::required_string(args, "dbase", "raster resolution")?,
            };
            ResolutionInput::Raster {
                raster,
                target: arg_utils::environment(args, "target-rc", "target"),
                service: ProcessRegionService::new(config.region.clone(), config.reprojection.clone()),
            }
        } else {
            // Shape is checked by the estimator, not here
            let extent = arg_utils::required_extent(args, "grid resolution")?;
            let rows = arg_utils::required_u32(args, "rows", "grid resolution")?;
            let cols = arg_utils::required_u32(args, "cols", "grid resolution")?;
            ResolutionInput::Grid(GridParams {
                north: extent.north,
                south: extent.south,
                east: extent.east,
                west: extent.west,
                rows: rows as f64,
                cols: cols as f64,
            })
        };

        Ok(ResolutionCommand { input, logger })
    }
}

impl<'a> Command for ResolutionCommand<'a> {
    fn execute(&self) -> RegionResult<String> {
        let estimate = match &self.input {
            ResolutionInput::Grid(params) => ResolutionEstimator::estimate(params)?,
            ResolutionInput::Raster { raster, target, service } => {
                info!("Estimating resolution of {}@{} in '{}'", raster.name, raster.mapset, target.name());
                ResolutionEstimator::estimate_reprojected(service, raster, target)?
            },
        };

        self.logger.log(&format!("Estimated resolution: {}", estimate))?;
        Ok(estimate.to_string())
    }
}
