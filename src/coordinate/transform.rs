//! Coordinate transformation functionality

use std::f64::consts::PI;

use log::debug;

use super::crs::{CoordinateSystem, CoordinateSystemFactory, CrsDescriptor};
use super::point::Point;
use crate::errors::{RegionError, RegionResult};

/// Batched transformation of points between coordinate systems
///
/// Implementations must return exactly one output point per input point,
/// in input order, or fail as a whole.
pub trait CoordinateTransformer: Send + Sync {
    /// Transform all points from one coordinate system to another
    fn transform(&self, points: &[Point], from: &CrsDescriptor, to: &CrsDescriptor) -> RegionResult<Vec<Point>>;
}

impl<T: CoordinateTransformer + ?Sized> CoordinateTransformer for &T {
    fn transform(&self, points: &[Point], from: &CrsDescriptor, to: &CrsDescriptor) -> RegionResult<Vec<Point>> {
        (**self).transform(points, from, to)
    }
}

impl<T: CoordinateTransformer + ?Sized> CoordinateTransformer for Box<T> {
    fn transform(&self, points: &[Point], from: &CrsDescriptor, to: &CrsDescriptor) -> RegionResult<Vec<Point>> {
        (**self).transform(points, from, to)
    }
}

/// Analytic transformer between WGS84 (EPSG:4326) and Web Mercator (EPSG:3857)
pub struct MercatorTransformer;

impl MercatorTransformer {
    /// Earth radius in meters
    const EARTH_RADIUS: f64 = 6378137.0;

    /// Maximum latitude representable in Web Mercator
    const MAX_LATITUDE: f64 = 85.05112878;

    /// Convert from WGS84 (EPSG:4326) to Web Mercator (EPSG:3857)
    ///
    /// Latitudes beyond the Web Mercator limit (polar regions) are not
    /// representable and fail instead of being clamped.
    pub fn wgs84_to_web_mercator(&self, lon: f64, lat: f64) -> RegionResult<Point> {
        if !lon.is_finite() || !lat.is_finite() || lat.abs() > Self::MAX_LATITUDE {
            return Err(RegionError::TransformError(format!(
                "point ({}, {}) is outside the Web Mercator latitude range of +/-{}",
                lon, lat, Self::MAX_LATITUDE
            )));
        }

        let x = lon * Self::EARTH_RADIUS * PI / 180.0;
        let y = f64::ln(f64::tan((90.0 + lat) * PI / 360.0)) * Self::EARTH_RADIUS;

        Ok(Point::new(x, y))
    }

    /// Convert from Web Mercator (EPSG:3857) to WGS84 (EPSG:4326)
    pub fn web_mercator_to_wgs84(&self, x: f64, y: f64) -> RegionResult<Point> {
        if !x.is_finite() || !y.is_finite() {
            return Err(RegionError::TransformError(format!(
                "point ({}, {}) has non-finite Web Mercator coordinates", x, y
            )));
        }

        let lon = x * 180.0 / (Self::EARTH_RADIUS * PI);
        let lat = 180.0 / PI * (2.0 * f64::atan(f64::exp(y / Self::EARTH_RADIUS)) - PI / 2.0);

        Ok(Point::new(lon, lat))
    }

    fn recognize(crs: &CrsDescriptor) -> RegionResult<CoordinateSystem> {
        CoordinateSystemFactory::from_descriptor(crs)
            .map_err(|e| RegionError::TransformError(e.to_string()))
    }

    /// Transform a single point between recognized coordinate systems
    pub fn transform_point(&self, point: &Point, from_crs: &CoordinateSystem, to_crs: &CoordinateSystem) -> RegionResult<Point> {
        if from_crs == to_crs {
            return Ok(*point);
        }

        match (from_crs, to_crs) {
            (CoordinateSystem::WGS84, CoordinateSystem::WebMercator) => {
                self.wgs84_to_web_mercator(point.x, point.y)
            },
            (CoordinateSystem::WebMercator, CoordinateSystem::WGS84) => {
                self.web_mercator_to_wgs84(point.x, point.y)
            },
            _ => Err(RegionError::TransformError(format!(
                "Unsupported coordinate transformation from {} to {}",
                from_crs.description(), to_crs.description()
            ))),
        }
    }
}

impl CoordinateTransformer for MercatorTransformer {
    fn transform(&self, points: &[Point], from: &CrsDescriptor, to: &CrsDescriptor) -> RegionResult<Vec<Point>> {
        let from_crs = Self::recognize(from)?;
        let to_crs = Self::recognize(to)?;
        debug!("Transforming {} points from {} to {}",
               points.len(), from_crs.description(), to_crs.description());

        points.iter()
            .map(|point| self.transform_point(point, &from_crs, &to_crs))
            .collect()
    }
}
