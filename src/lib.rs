pub mod errors;
pub mod config;
pub mod coordinate;
pub mod collaborator;
pub mod region;
pub mod utils;
pub mod commands;

pub use errors::{RegionError, RegionResult};
pub use config::Config;
pub use coordinate::{Extent, Grid, GridParams, Point, CrsDescriptor, CoordinateTransformer, MercatorTransformer};
pub use collaborator::{Environment, GridQuery, RegionSetter, RasterSource, ProcessTransformer, ProcessRegionService};
pub use region::{RegionReprojector, GridAligner, ResolutionEstimator, RenderSize, RenderSizeCalculator, TargetRegionSetup};
