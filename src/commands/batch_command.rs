//! Batch extent reprojection command
//!
//! Reads one extent per line (`west,south,east,north`; blank lines and
//! lines starting with `#` are skipped) and reprojects each of them. The
//! batch is all-or-nothing: the first failing extent aborts it and no
//! partial output is produced.

use std::fs;

use clap::ArgMatches;
use log::{debug, info};

use crate::commands::command_traits::Command;
use crate::coordinate::{CoordinateTransformer, CrsDescriptor, Extent};
use crate::errors::{RegionError, RegionResult};
use crate::region::RegionReprojector;
use crate::utils::arg_utils;
use crate::utils::logger::Logger;
use crate::utils::progress::ProgressTracker;

/// Parse an extent list, one `west,south,east,north` per line
pub fn parse_extent_list(text: &str) -> RegionResult<Vec<Extent>> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(i, line)| Extent::from_string(line).map_err(|e| match e {
            RegionError::InvalidExtent(msg) => RegionError::InvalidExtent(format!("line {}: {}", i + 1, msg)),
            other => other,
        }))
        .collect()
}

/// Reproject every extent, stopping at the first failure
pub fn reproject_all<T: CoordinateTransformer>(
    reprojector: &RegionReprojector<T>,
    extents: &[Extent],
    from: &CrsDescriptor,
    to: &CrsDescriptor,
    progress: &ProgressTracker,
) -> RegionResult<Vec<Extent>> {
    let mut results = Vec::with_capacity(extents.len());
    for (i, extent) in extents.iter().enumerate() {
        debug!("Reprojecting extent {} of {}", i + 1, extents.len());
        results.push(reprojector.reproject(extent, from, to)?);
        progress.increment(1);
    }
    progress.finish();
    Ok(results)
}

/// Command reprojecting a file of extents
pub struct BatchCommand<'a> {
    input_file: String,
    from: CrsDescriptor,
    to: CrsDescriptor,
    reprojector: RegionReprojector<Box<dyn CoordinateTransformer>>,
    show_progress: bool,
    logger: &'a Logger,
}

impl<'a> BatchCommand<'a> {
    pub fn new(args: &ArgMatches, transformer: Box<dyn CoordinateTransformer>, logger: &'a Logger) -> RegionResult<Self> {
        let input_file = arg_utils::required_string(args, "batch", "batch reprojection")?;
        let (from, to) = arg_utils::crs_pair(args, "batch reprojection")?;

        Ok(BatchCommand {
            input_file,
            from,
            to,
            reprojector: RegionReprojector::new(transformer),
            show_progress: !args.get_flag("quiet"),
            logger,
        })
    }
}

impl<'a> Command for BatchCommand<'a> {
    fn execute(&self) -> RegionResult<String> {
        let content = fs::read_to_string(&self.input_file)?;
        let extents = parse_extent_list(&content)?;
        info!("Reprojecting {} extents from {}", extents.len(), self.input_file);

        let progress = if self.show_progress {
            ProgressTracker::new(extents.len() as u64, "Reprojecting extents")
        } else {
            ProgressTracker::hidden(extents.len() as u64)
        };

        let reprojected = reproject_all(&self.reprojector, &extents, &self.from, &self.to, &progress)?;
        self.logger.log(&format!("Reprojected {} extents from {}", reprojected.len(), self.input_file))?;

        let lines: Vec<String> = reprojected.iter()
            .map(|e| format!("{},{},{},{}", e.west, e.south, e.east, e.north))
            .collect();
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinate::MercatorTransformer;

    #[test]
    fn test_parse_extent_list() {
        let text = "# west,south,east,north\n0,0,20,10\n\n  -5,-5,5,5  \n";
        let extents = parse_extent_list(text).unwrap();
        assert_eq!(extents.len(), 2);
        assert_eq!(extents[1], Extent::new(5.0, -5.0, 5.0, -5.0).unwrap());
    }

    #[test]
    fn test_parse_reports_line() {
        let err = parse_extent_list("0,0,20,10\n0,10,20,0\n").unwrap_err();
        assert!(err.to_string().contains("line 2"), "{}", err);
    }

    #[test]
    fn test_reproject_all_is_all_or_nothing() {
        let reprojector = RegionReprojector::new(MercatorTransformer);
        let extents = vec![Extent::new(10.0, 0.0, 20.0, 0.0).unwrap(); 3];
        let progress = ProgressTracker::hidden(3);

        let ok = reproject_all(&reprojector, &extents, &CrsDescriptor::from_epsg(4326), &CrsDescriptor::from_epsg(3857), &progress).unwrap();
        assert_eq!(ok.len(), 3);
        assert_eq!(progress.position(), 3);

        let progress = ProgressTracker::hidden(3);
        let failed = reproject_all(&reprojector, &extents, &CrsDescriptor::from_epsg(4326), &CrsDescriptor::from_epsg(32633), &progress);
        assert!(failed.is_err());
        assert_eq!(progress.position(), 0);
    }
}
