//! Extent and point reprojection commands

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::coordinate::{CoordinateTransformer, CrsDescriptor, Extent, Point};
use crate::errors::{RegionError, RegionResult};
use crate::region::RegionReprojector;
use crate::utils::arg_utils;
use crate::utils::logger::Logger;

/// Command reprojecting an extent between coordinate systems
pub struct ReprojectCommand<'a> {
    extent: Extent,
    from: CrsDescriptor,
    to: CrsDescriptor,
    reprojector: RegionReprojector<Box<dyn CoordinateTransformer>>,
    logger: &'a Logger,
}

impl<'a> ReprojectCommand<'a> {
    /// Create a new reproject command
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    /// * `transformer` - Transformer selected for this run
    /// * `logger` - Logger for recording operations
    pub fn new(args: &ArgMatches, transformer: Box<dyn CoordinateTransformer>, logger: &'a Logger) -> RegionResult<Self> {
        let extent = arg_utils::required_extent(args, "reprojection")?;
        let (from, to) = arg_utils::crs_pair(args, "reprojection")?;

        Ok(ReprojectCommand {
            extent,
            from,
            to,
            reprojector: RegionReprojector::new(transformer),
            logger,
        })
    }
}

impl<'a> Command for ReprojectCommand<'a> {
    fn execute(&self) -> RegionResult<String> {
        info!("Reprojecting {} from '{}' to '{}'", self.extent, self.from, self.to);
        let reprojected = self.reprojector.reproject(&self.extent, &self.from, &self.to)?;

        self.logger.log(&format!("Reprojected {} -> {}", self.extent, reprojected))?;
        Ok(reprojected.to_string())
    }
}

/// Command reprojecting a single point
pub struct PointCommand<'a> {
    point: Point,
    from: CrsDescriptor,
    to: CrsDescriptor,
    reprojector: RegionReprojector<Box<dyn CoordinateTransformer>>,
    logger: &'a Logger,
}

impl<'a> PointCommand<'a> {
    pub fn new(args: &ArgMatches, transformer: Box<dyn CoordinateTransformer>, logger: &'a Logger) -> RegionResult<Self> {
        let point_str = arg_utils::required_string(args, "point", "point reprojection")?;
        let point = Point::from_string(&point_str).map_err(RegionError::GenericError)?;
        let (from, to) = arg_utils::crs_pair(args, "point reprojection")?;

        Ok(PointCommand {
            point,
            from,
            to,
            reprojector: RegionReprojector::new(transformer),
            logger,
        })
    }
}

impl<'a> Command for PointCommand<'a> {
    fn execute(&self) -> RegionResult<String> {
        let reprojected = self.reprojector.reproject_point(&self.point, &self.from, &self.to)?;

        self.logger.log(&format!("Reprojected point {} -> {}", self.point, reprojected))?;
        Ok(format!("{} {}", reprojected.x, reprojected.y))
    }
}
