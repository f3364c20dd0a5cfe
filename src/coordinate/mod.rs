//! Coordinate handling for geospatial regions
//!
//! This module provides the value types describing regions and grids,
//! coordinate system descriptors, and the transformer interface used
//! to move points between coordinate systems.

mod extent;
mod grid;
mod point;
mod transform;
mod crs;

// Re-export key types
pub use self::extent::Extent;
pub use self::grid::{Grid, GridParams};
pub use self::point::Point;
pub use self::transform::{CoordinateTransformer, MercatorTransformer};
pub use self::crs::{CoordinateSystem, CoordinateSystemFactory, CrsDescriptor};
