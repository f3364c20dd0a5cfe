//! Rendering size command

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::config::RenderConfig;
use crate::coordinate::Extent;
use crate::errors::RegionResult;
use crate::region::RenderSizeCalculator;
use crate::utils::arg_utils;
use crate::utils::logger::Logger;

/// Command computing the rendering size of a region
pub struct RenderSizeCommand<'a> {
    extent: Extent,
    width: Option<u32>,
    height: Option<u32>,
    calculator: RenderSizeCalculator,
    logger: &'a Logger,
}

impl<'a> RenderSizeCommand<'a> {
    pub fn new(args: &ArgMatches, render: &RenderConfig, logger: &'a Logger) -> RegionResult<Self> {
        Ok(RenderSizeCommand {
            extent: arg_utils::required_extent(args, "rendering size")?,
            width: arg_utils::optional_u32(args, "width")?,
            height: arg_utils::optional_u32(args, "height")?,
            calculator: RenderSizeCalculator::new(render.default_width, render.default_height),
            logger,
        })
    }
}

impl<'a> Command for RenderSizeCommand<'a> {
    fn execute(&self) -> RegionResult<String> {
        let size = self.calculator.compute_size(&self.extent, self.width, self.height)?;
        info!("Rendering size for {}: {}x{}", self.extent, size.width, size.height);

        self.logger.log(&format!("Rendering size {}x{} for {}", size.width, size.height, self.extent))?;
        Ok(format!("width={}\nheight={}", size.width, size.height))
    }
}
