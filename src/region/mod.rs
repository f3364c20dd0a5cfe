//! Region geometry operations
//!
//! Reprojection of extents, derivation of target grids, resolution
//! estimates, and rendering sizes.

mod aligner;
mod render_size;
mod reprojector;
mod resolution;
mod setup;

pub use self::aligner::GridAligner;
pub use self::render_size::{compute_size, RenderSize, RenderSizeCalculator, DEFAULT_HEIGHT, DEFAULT_WIDTH};
pub use self::reprojector::RegionReprojector;
pub use self::resolution::ResolutionEstimator;
pub use self::setup::TargetRegionSetup;
