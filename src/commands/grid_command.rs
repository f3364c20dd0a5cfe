//! Target grid commands
//!
//! `align` derives the target grid for a source grid without touching any
//! environment; `set-region` queries the source environment and applies
//! the derived grid to the target environment.

use clap::ArgMatches;
use log::info;

use crate::collaborator::{Environment, ProcessRegionService};
use crate::commands::command_traits::Command;
use crate::config::Config;
use crate::coordinate::{CoordinateTransformer, CrsDescriptor, Grid};
use crate::errors::RegionResult;
use crate::region::{GridAligner, RegionReprojector, TargetRegionSetup};
use crate::utils::arg_utils;
use crate::utils::logger::Logger;

fn format_grid(grid: &Grid) -> String {
    let extent = grid.extent();
    format!(
        "n={}\ns={}\ne={}\nw={}\nrows={}\ncols={}",
        extent.north, extent.south, extent.east, extent.west, grid.rows(), grid.cols()
    )
}

/// Command deriving a target grid from a grid given on the command line
pub struct AlignCommand<'a> {
    source: Grid,
    from: CrsDescriptor,
    to: CrsDescriptor,
    reprojector: RegionReprojector<Box<dyn CoordinateTransformer>>,
    logger: &'a Logger,
}

impl<'a> AlignCommand<'a> {
    pub fn new(args: &ArgMatches, transformer: Box<dyn CoordinateTransformer>, logger: &'a Logger) -> RegionResult<Self> {
        let extent = arg_utils::required_extent(args, "grid alignment")?;
        let rows = arg_utils::required_u32(args, "rows", "grid alignment")?;
        let cols = arg_utils::required_u32(args, "cols", "grid alignment")?;
        let (from, to) = arg_utils::crs_pair(args, "grid alignment")?;

        Ok(AlignCommand {
            source: Grid::new(extent, rows, cols)?,
            from,
            to,
            reprojector: RegionReprojector::new(transformer),
            logger,
        })
    }
}

impl<'a> Command for AlignCommand<'a> {
    fn execute(&self) -> RegionResult<String> {
        let extent = self.reprojector.reproject(&self.source.extent(), &self.from, &self.to)?;
        let target = GridAligner::align(&self.source, extent);

        self.logger.log_grid("Source grid", &self.source)?;
        self.logger.log_grid("Target grid", &target)?;
        Ok(format_grid(&target))
    }
}

/// Command setting a target environment's region from a source environment
pub struct SetRegionCommand<'a> {
    source: Environment,
    target: Environment,
    service: ProcessRegionService,
    transformer: Box<dyn CoordinateTransformer>,
    logger: &'a Logger,
}

impl<'a> SetRegionCommand<'a> {
    pub fn new(args: &ArgMatches, config: &Config, transformer: Box<dyn CoordinateTransformer>, logger: &'a Logger) -> RegionResult<Self> {
        // Both sessions must be given explicitly
        arg_utils::required_string(args, "source-rc", "region setup")?;
        arg_utils::required_string(args, "target-rc", "region setup")?;

        Ok(SetRegionCommand {
            source: arg_utils::environment(args, "source-rc", "source"),
            target: arg_utils::environment(args, "target-rc", "target"),
            service: ProcessRegionService::new(config.region.clone(), config.reprojection.clone()),
            transformer,
            logger,
        })
    }
}

impl<'a> Command for SetRegionCommand<'a> {
    fn execute(&self) -> RegionResult<String> {
        info!("Setting region of '{}' from '{}'", self.target.name(), self.source.name());
        let setup = TargetRegionSetup::new(&self.service, &self.service, &self.transformer);
        let grid = setup.set_target_region(&self.source, &self.target)?;

        self.logger.log_grid("Applied target grid", &grid)?;
        Ok(format_grid(&grid))
    }
}
