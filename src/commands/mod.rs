//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod reproject_command;
pub mod render_size_command;
pub mod resolution_command;
pub mod grid_command;
pub mod batch_command;

pub use command_traits::{Command, CommandFactory};
pub use reproject_command::{ReprojectCommand, PointCommand};
pub use render_size_command::RenderSizeCommand;
pub use resolution_command::ResolutionCommand;
pub use grid_command::{AlignCommand, SetRegionCommand};
pub use batch_command::BatchCommand;

use clap::ArgMatches;
use log::debug;

use crate::utils::arg_utils;
use crate::utils::logger::Logger;
use crate::errors::RegionResult;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
pub struct RegionkitCommandFactory;

impl RegionkitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        RegionkitCommandFactory
    }
}

impl Default for RegionkitCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for RegionkitCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> RegionResult<Box<dyn Command + 'a>> {
        let config = arg_utils::load_config(args)?;
        debug!("Loaded configuration: {:?}", config);

        if args.get_flag("set-region") {
            let transformer = arg_utils::create_transformer(args, &config)?;
            Ok(Box::new(SetRegionCommand::new(args, &config, transformer, logger)?))
        } else if args.get_flag("align") {
            let transformer = arg_utils::create_transformer(args, &config)?;
            Ok(Box::new(AlignCommand::new(args, transformer, logger)?))
        } else if args.contains_id("batch") {
            let transformer = arg_utils::create_transformer(args, &config)?;
            Ok(Box::new(BatchCommand::new(args, transformer, logger)?))
        } else if args.contains_id("point") {
            let transformer = arg_utils::create_transformer(args, &config)?;
            Ok(Box::new(PointCommand::new(args, transformer, logger)?))
        } else if args.get_flag("reproject") {
            let transformer = arg_utils::create_transformer(args, &config)?;
            Ok(Box::new(ReprojectCommand::new(args, transformer, logger)?))
        } else if args.get_flag("resolution") {
            Ok(Box::new(ResolutionCommand::new(args, &config, logger)?))
        } else {
            // Default to the rendering size of the given extent
            Ok(Box::new(RenderSizeCommand::new(args, &config.render, logger)?))
        }
    }
}
