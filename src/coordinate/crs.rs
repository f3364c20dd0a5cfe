//! Coordinate Reference System handling

use std::fmt;

use crate::errors::{RegionError, RegionResult};

/// Opaque identifier of a coordinate reference system
///
/// Usually a PROJ-style definition string as reported by the projection
/// query. Two descriptors are equal only when their strings are identical;
/// no semantic normalization is performed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CrsDescriptor(String);

impl CrsDescriptor {
    pub fn new(definition: impl Into<String>) -> Self {
        CrsDescriptor(definition.into())
    }

    /// Descriptor for an EPSG code, e.g. "EPSG:4326"
    pub fn from_epsg(code: u32) -> Self {
        CrsDescriptor(format!("EPSG:{}", code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CrsDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CrsDescriptor {
    fn from(definition: &str) -> Self {
        CrsDescriptor::new(definition)
    }
}

/// Identifier for common coordinate systems
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSystem {
    /// WGS 84 (EPSG:4326)
    WGS84,
    /// Web Mercator (EPSG:3857)
    WebMercator,
    /// UTM Zone (EPSG:326xx for northern hemisphere, 327xx for southern)
    UTM(u8, bool),
    /// Other EPSG code
    Other(u32),
}

impl CoordinateSystem {
    /// Get the EPSG code for this coordinate system
    pub fn epsg_code(&self) -> u32 {
        match self {
            CoordinateSystem::WGS84 => 4326,
            CoordinateSystem::WebMercator => 3857,
            CoordinateSystem::UTM(zone, is_northern) => {
                if *is_northern {
                    32600 + *zone as u32
                } else {
                    32700 + *zone as u32
                }
            },
            CoordinateSystem::Other(code) => *code,
        }
    }

    /// Get a description of this coordinate system
    pub fn description(&self) -> String {
        match self {
            CoordinateSystem::WGS84 => "WGS 84 (EPSG:4326)".to_string(),
            CoordinateSystem::WebMercator => "Web Mercator (EPSG:3857)".to_string(),
            CoordinateSystem::UTM(zone, is_northern) => {
                let hemisphere = if *is_northern { "N" } else { "S" };
                format!("UTM Zone {}{} (EPSG:{})", zone, hemisphere, self.epsg_code())
            },
            CoordinateSystem::Other(code) => format!("EPSG:{}", code),
        }
    }
}

/// Factory for recognizing coordinate systems from descriptors
pub struct CoordinateSystemFactory;

impl CoordinateSystemFactory {
    /// Create a coordinate system from an EPSG code
    pub fn from_epsg(epsg: u32) -> CoordinateSystem {
        match epsg {
            4326 => CoordinateSystem::WGS84,
            3857 | 3785 | 900913 => CoordinateSystem::WebMercator,
            32601..=32660 => CoordinateSystem::UTM((epsg - 32600) as u8, true),
            32701..=32760 => CoordinateSystem::UTM((epsg - 32700) as u8, false),
            _ => CoordinateSystem::Other(epsg),
        }
    }

    /// Recognize a descriptor such as "EPSG:4326", "4326" or "+init=epsg:3857"
    pub fn from_descriptor(crs: &CrsDescriptor) -> RegionResult<CoordinateSystem> {
        let normalized = crs.as_str().trim().to_uppercase();

        let code_str = if let Some(code) = normalized.strip_prefix("EPSG:") {
            code
        } else if let Some(code) = normalized.strip_prefix("+INIT=EPSG:") {
            code
        } else {
            normalized.as_str()
        };

        match code_str.trim().parse::<u32>() {
            Ok(epsg) => Ok(Self::from_epsg(epsg)),
            Err(_) => Err(RegionError::GenericError(format!("Unsupported CRS format: {}", crs))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_identity() {
        assert_eq!(CrsDescriptor::from_epsg(4326), CrsDescriptor::new("EPSG:4326"));
        // No normalization: same CRS, different spelling
        assert_ne!(CrsDescriptor::new("EPSG:4326"), CrsDescriptor::new("epsg:4326"));
    }

    #[test]
    fn test_recognize_descriptors() {
        let wgs84 = CoordinateSystemFactory::from_descriptor(&"epsg:4326".into()).unwrap();
        assert_eq!(wgs84, CoordinateSystem::WGS84);
        let merc = CoordinateSystemFactory::from_descriptor(&"+init=epsg:3857".into()).unwrap();
        assert_eq!(merc, CoordinateSystem::WebMercator);
        let utm = CoordinateSystemFactory::from_descriptor(&"32733".into()).unwrap();
        assert_eq!(utm, CoordinateSystem::UTM(33, false));
        assert!(CoordinateSystemFactory::from_descriptor(&"+proj=longlat".into()).is_err());
    }
}
