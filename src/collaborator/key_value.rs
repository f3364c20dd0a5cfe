//! Strict parsing of `key=value` command output
//!
//! Output is checked against a schema: every required key must appear
//! exactly once with a numeric value, and keys outside the schema are
//! rejected instead of being ignored.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::coordinate::GridParams;
use crate::errors::{RegionError, RegionResult};

lazy_static! {
    static ref KEY_VALUE: Regex = Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)=(.*)$").unwrap();
}

/// How pairs are laid out in the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairLayout {
    /// One `key=value` pair per line
    Lines,
    /// Pairs separated by any whitespace, e.g. `n=10 s=0 e=20`
    Whitespace,
}

/// Keys a response must and may contain
#[derive(Debug, Clone, Copy)]
pub struct KeyValueSchema {
    pub required: &'static [&'static str],
    pub permitted: &'static [&'static str],
}

/// Region query output: shell-style region description
pub const REGION_SCHEMA: KeyValueSchema = KeyValueSchema {
    required: &["n", "s", "e", "w", "rows", "cols"],
    permitted: &[
        "projection", "zone", "nsres", "ewres", "cells",
        "t", "b", "tbres", "nsres3", "ewres3", "rows3", "cols3", "depths", "cells3",
    ],
};

/// Hypothetical reprojection output: bounds and shape only
pub const REPROJECTION_SCHEMA: KeyValueSchema = KeyValueSchema {
    required: &["n", "s", "e", "w", "rows", "cols"],
    permitted: &[],
};

impl KeyValueSchema {
    fn knows(&self, key: &str) -> bool {
        self.required.contains(&key) || self.permitted.contains(&key)
    }
}

/// Parse text into raw pairs, validating keys against the schema
pub fn parse_key_values(text: &str, schema: &KeyValueSchema, layout: PairLayout) -> RegionResult<BTreeMap<String, String>> {
    let tokens: Vec<&str> = match layout {
        PairLayout::Lines => text.lines().map(str::trim).filter(|l| !l.is_empty()).collect(),
        PairLayout::Whitespace => text.split_whitespace().collect(),
    };

    let mut pairs = BTreeMap::new();
    for token in tokens {
        let caps = KEY_VALUE.captures(token)
            .ok_or_else(|| RegionError::MalformedResponse(format!("expected key=value, got '{}'", token)))?;
        let key = caps[1].to_string();
        let value = caps[2].trim().to_string();

        if !schema.knows(&key) {
            return Err(RegionError::MalformedResponse(format!("unexpected key '{}'", key)));
        }
        if pairs.insert(key.clone(), value).is_some() {
            return Err(RegionError::MalformedResponse(format!("duplicate key '{}'", key)));
        }
    }

    for key in schema.required {
        if !pairs.contains_key(*key) {
            return Err(RegionError::MalformedResponse(format!("missing key '{}'", key)));
        }
    }

    Ok(pairs)
}

/// Parse grid parameters, reading every field as a finite floating point value
pub fn parse_grid_params(text: &str, schema: &KeyValueSchema, layout: PairLayout) -> RegionResult<GridParams> {
    let pairs = parse_key_values(text, schema, layout)?;
    let number = |key: &str| -> RegionResult<f64> {
        let raw = pairs.get(key)
            .ok_or_else(|| RegionError::MalformedResponse(format!("missing key '{}'", key)))?;
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| RegionError::MalformedResponse(format!("value of '{}' is not a finite number: '{}'", key, raw)))
    };

    Ok(GridParams {
        north: number("n")?,
        south: number("s")?,
        east: number("e")?,
        west: number("w")?,
        rows: number("rows")?,
        cols: number("cols")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const REGION_OUTPUT: &str = "projection=99\nzone=0\nn=10\ns=0\nw=0\ne=20\nnsres=0.1\newres=0.1\nrows=100\ncols=200\ncells=20000\n";

    #[test]
    fn test_region_output() {
        let params = parse_grid_params(REGION_OUTPUT, &REGION_SCHEMA, PairLayout::Lines).unwrap();
        assert_eq!(params, GridParams { north: 10.0, south: 0.0, east: 20.0, west: 0.0, rows: 100.0, cols: 200.0 });
    }

    #[test]
    fn test_whitespace_layout() {
        let text = "n=5220000 s=5180000 w=620000 e=650000 rows=400 cols=300\n";
        let params = parse_grid_params(text, &REPROJECTION_SCHEMA, PairLayout::Whitespace).unwrap();
        assert_eq!(params.rows, 400.0);
        assert_eq!(params.west, 620000.0);
    }

    #[test]
    fn test_missing_key() {
        let text = "n=10\ns=0\ne=20\nw=0\nrows=100\n";
        assert!(matches!(parse_grid_params(text, &REGION_SCHEMA, PairLayout::Lines), Err(RegionError::MalformedResponse(_))));
    }

    #[test]
    fn test_unexpected_and_duplicate_keys() {
        let extra = "n=10 s=0 e=20 w=0 rows=1 cols=1 nsres=10";
        assert!(matches!(parse_grid_params(extra, &REPROJECTION_SCHEMA, PairLayout::Whitespace), Err(RegionError::MalformedResponse(_))));
        let dup = "n=10 n=11 s=0 e=20 w=0 rows=1 cols=1";
        assert!(matches!(parse_grid_params(dup, &REPROJECTION_SCHEMA, PairLayout::Whitespace), Err(RegionError::MalformedResponse(_))));
    }

    #[test]
    fn test_non_numeric_value() {
        let text = "n=north s=0 e=20 w=0 rows=1 cols=1";
        assert!(matches!(parse_grid_params(text, &REPROJECTION_SCHEMA, PairLayout::Whitespace), Err(RegionError::MalformedResponse(_))));
        let garbage = "ERROR: raster not found";
        assert!(matches!(parse_grid_params(garbage, &REGION_SCHEMA, PairLayout::Lines), Err(RegionError::MalformedResponse(_))));
    }

    #[test]
    fn test_non_finite_values_rejected() {
        let text = "n=10 s=0 e=20 w=0 rows=nan cols=inf";
        assert!(matches!(parse_grid_params(text, &REPROJECTION_SCHEMA, PairLayout::Whitespace), Err(RegionError::MalformedResponse(_))));
        let text = "n=infinity\ns=0\ne=20\nw=0\nrows=1\ncols=1\n";
        assert!(matches!(parse_grid_params(text, &REGION_SCHEMA, PairLayout::Lines), Err(RegionError::MalformedResponse(_))));
    }
}
