//! Point structure for representing coordinates

use std::fmt;

/// A point in a coordinate system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X coordinate (easting or longitude)
    pub x: f64,
    /// Y coordinate (northing or latitude)
    pub y: f64,
    /// Z coordinate (elevation, reported by some transformers)
    pub z: Option<f64>,
}

impl Point {
    /// Create a new 2D point
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y, z: None }
    }

    /// Create a new 3D point
    pub fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Point { x, y, z: Some(z) }
    }

    /// Check whether both horizontal coordinates are finite numbers
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Parse a point from a string (format: "x,y")
    pub fn from_string(point_str: &str) -> Result<Self, String> {
        let parts: Vec<&str> = point_str.split(',').collect();
        if parts.len() != 2 {
            return Err("Point must have 2 comma-separated values".to_string());
        }

        let x = parts[0].trim().parse::<f64>()
            .map_err(|_| format!("Invalid x value: {}", parts[0].trim()))?;
        let y = parts[1].trim().parse::<f64>()
            .map_err(|_| format!("Invalid y value: {}", parts[1].trim()))?;

        Ok(Point::new(x, y))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.z {
            Some(z) => write!(f, "{} {} {}", self.x, self.y, z),
            None => write!(f, "{} {}", self.x, self.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        let p = Point::from_string(" -73.5, 40.25 ").unwrap();
        assert_eq!(p, Point::new(-73.5, 40.25));
        assert!(Point::from_string("1,2,3").is_err());
        assert!(Point::from_string("a,2").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Point::new(1.5, 2.0).to_string(), "1.5 2");
        assert_eq!(Point::new_3d(1.0, 2.0, 0.0).to_string(), "1 2 0");
    }
}
