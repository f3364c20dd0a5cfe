//! Command-line argument helpers
//!
//! Shared parsing of the values commands read from clap matches.

use clap::ArgMatches;
use log::debug;

use crate::collaborator::{Environment, ProcessTransformer};
use crate::config::Config;
use crate::coordinate::{CoordinateTransformer, CrsDescriptor, Extent, MercatorTransformer};
use crate::errors::{RegionError, RegionResult};

/// A required string argument
pub fn required_string(args: &ArgMatches, name: &str, purpose: &str) -> RegionResult<String> {
    args.get_one::<String>(name)
        .cloned()
        .ok_or_else(|| RegionError::GenericError(format!("Missing --{} for {}", name, purpose)))
}

/// An optional positive integer argument
pub fn optional_u32(args: &ArgMatches, name: &str) -> RegionResult<Option<u32>> {
    match args.get_one::<String>(name) {
        Some(value) => value.trim().parse::<u32>()
            .map(Some)
            .map_err(|_| RegionError::GenericError(format!("Invalid --{} value: {}", name, value))),
        None => Ok(None),
    }
}

/// A required positive integer argument
pub fn required_u32(args: &ArgMatches, name: &str, purpose: &str) -> RegionResult<u32> {
    optional_u32(args, name)?
        .ok_or_else(|| RegionError::GenericError(format!("Missing --{} for {}", name, purpose)))
}

/// The positional extent argument
pub fn required_extent(args: &ArgMatches, purpose: &str) -> RegionResult<Extent> {
    let extent_str = args.get_one::<String>("extent")
        .ok_or_else(|| RegionError::GenericError(format!("Missing extent (west,south,east,north) for {}", purpose)))?;
    Extent::from_string(extent_str)
}

/// Source and target coordinate systems from --from and --to
pub fn crs_pair(args: &ArgMatches, purpose: &str) -> RegionResult<(CrsDescriptor, CrsDescriptor)> {
    let from = required_string(args, "from", purpose)?;
    let to = required_string(args, "to", purpose)?;
    Ok((CrsDescriptor::new(from), CrsDescriptor::new(to)))
}

/// Configuration from --config, or the embedded defaults
pub fn load_config(args: &ArgMatches) -> RegionResult<Config> {
    match args.get_one::<String>("config") {
        Some(path) => Config::from_file(path),
        None => Config::embedded(),
    }
}

/// Environment selected by an rc-file argument, or the inherited one
pub fn environment(args: &ArgMatches, arg_name: &str, display_name: &str) -> Environment {
    match args.get_one::<String>(arg_name) {
        Some(rc_file) => Environment::from_rc_file(display_name, rc_file),
        None => Environment::new(display_name),
    }
}

/// Transformer selected by --engine
pub fn create_transformer(args: &ArgMatches, config: &Config) -> RegionResult<Box<dyn CoordinateTransformer>> {
    let engine = args.get_one::<String>("engine").map(String::as_str).unwrap_or("process");
    debug!("Using '{}' transformation engine", engine);

    match engine {
        "builtin" => Ok(Box::new(MercatorTransformer)),
        "process" => Ok(Box::new(ProcessTransformer::new(&config.transform, environment(args, "source-rc", "source")))),
        other => Err(RegionError::GenericError(format!(
            "Unknown engine '{}', expected 'builtin' or 'process'", other
        ))),
    }
}
