//! Collaborator and rendering configuration
//!
//! Defaults live in `regionkit.toml`, embedded at compile time. A user file
//! only needs the keys it changes; everything else falls back to the
//! embedded values.

use std::fs;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::errors::{RegionError, RegionResult};

const DEFAULT_CONFIG: &str = include_str!("../regionkit.toml");

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{([a-z_]+)\}").unwrap();
}

/// External coordinate transform command
#[derive(Debug, Clone, PartialEq)]
pub struct TransformConfig {
    pub command: String,
    /// Argument template; `{from}` and `{to}` are substituted
    pub args: Vec<String>,
    /// Numeric fields on each output line
    pub output_fields: usize,
}

/// Region query and region-setting commands
#[derive(Debug, Clone, PartialEq)]
pub struct RegionConfig {
    pub command: String,
    pub query_args: Vec<String>,
    pub resolve_args: Vec<String>,
    /// Arguments placed before the `n= s= e= w= rows= cols=` pairs when setting a region
    pub set_args: Vec<String>,
    pub projection_command: String,
    pub projection_args: Vec<String>,
}

/// Hypothetical reprojection parameter query
#[derive(Debug, Clone, PartialEq)]
pub struct ReprojectionConfig {
    pub command: String,
    /// Argument template; `{raster}`, `{mapset}`, `{project}` and `{dbase}` are substituted
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    pub default_width: u32,
    pub default_height: u32,
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub transform: TransformConfig,
    pub region: RegionConfig,
    pub reprojection: ReprojectionConfig,
    pub render: RenderConfig,
}

impl Config {
    /// The embedded default configuration
    pub fn embedded() -> RegionResult<Self> {
        Self::from_value(&parse_toml(DEFAULT_CONFIG)?)
    }

    /// Parse a configuration, filling missing keys from the embedded defaults
    pub fn from_str(content: &str) -> RegionResult<Self> {
        let mut merged = parse_toml(DEFAULT_CONFIG)?;
        merge(&mut merged, parse_toml(content)?);
        Self::from_value(&merged)
    }

    /// Load a configuration file
    pub fn from_file(path: &str) -> RegionResult<Self> {
        debug!("Loading configuration from {}", path);
        let content = fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    fn from_value(value: &toml::Value) -> RegionResult<Self> {
        let transform = section(value, "transform")?;
        let region = section(value, "region")?;
        let reprojection = section(value, "reprojection")?;
        let render = section(value, "render")?;

        let output_fields = get_integer(transform, "transform", "output_fields")?;
        if output_fields < 2 {
            return Err(RegionError::ConfigError(format!(
                "transform.output_fields must be at least 2, got {}", output_fields
            )));
        }

        Ok(Config {
            transform: TransformConfig {
                command: get_str(transform, "transform", "command")?,
                args: get_str_array(transform, "transform", "args")?,
                output_fields: output_fields as usize,
            },
            region: RegionConfig {
                command: get_str(region, "region", "command")?,
                query_args: get_str_array(region, "region", "query_args")?,
                resolve_args: get_str_array(region, "region", "resolve_args")?,
                set_args: get_str_array(region, "region", "set_args")?,
                projection_command: get_str(region, "region", "projection_command")?,
                projection_args: get_str_array(region, "region", "projection_args")?,
            },
            reprojection: ReprojectionConfig {
                command: get_str(reprojection, "reprojection", "command")?,
                args: get_str_array(reprojection, "reprojection", "args")?,
            },
            render: RenderConfig {
                default_width: get_dimension(render, "default_width")?,
                default_height: get_dimension(render, "default_height")?,
            },
        })
    }
}

/// Substitute `{name}` placeholders in an argument template
///
/// Fails on placeholders that have no value.
pub fn render_args(template: &[String], values: &[(&str, &str)]) -> RegionResult<Vec<String>> {
    template.iter().map(|arg| {
        let mut unknown = None;
        let rendered = PLACEHOLDER.replace_all(arg, |caps: &regex::Captures| {
            let name = &caps[1];
            match values.iter().find(|(key, _)| *key == name) {
                Some((_, value)) => value.to_string(),
                None => {
                    unknown = Some(name.to_string());
                    String::new()
                }
            }
        });

        match unknown {
            Some(name) => Err(RegionError::ConfigError(format!("unknown placeholder {{{}}} in '{}'", name, arg))),
            None => Ok(rendered.into_owned()),
        }
    }).collect()
}

fn parse_toml(content: &str) -> RegionResult<toml::Value> {
    content.parse::<toml::Value>()
        .map_err(|e| RegionError::ConfigError(format!("Failed to parse TOML: {}", e)))
}

fn merge(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        },
        (base, overlay) => *base = overlay,
    }
}

fn section<'a>(value: &'a toml::Value, name: &str) -> RegionResult<&'a toml::value::Table> {
    value.get(name)
        .and_then(|v| v.as_table())
        .ok_or_else(|| RegionError::ConfigError(format!("missing [{}] section", name)))
}

fn get_str(table: &toml::value::Table, section: &str, key: &str) -> RegionResult<String> {
    table.get(key)
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| RegionError::ConfigError(format!("{}.{} must be a string", section, key)))
}

fn get_str_array(table: &toml::value::Table, section: &str, key: &str) -> RegionResult<Vec<String>> {
    let invalid = || RegionError::ConfigError(format!("{}.{} must be an array of strings", section, key));
    let array = table.get(key).and_then(|v| v.as_array()).ok_or_else(invalid)?;
    array.iter()
        .map(|v| v.as_str().map(str::to_string).ok_or_else(invalid))
        .collect()
}

fn get_integer(table: &toml::value::Table, section: &str, key: &str) -> RegionResult<i64> {
    table.get(key)
        .and_then(|v| v.as_integer())
        .ok_or_else(|| RegionError::ConfigError(format!("{}.{} must be an integer", section, key)))
}

fn get_dimension(table: &toml::value::Table, key: &str) -> RegionResult<u32> {
    let value = get_integer(table, "render", key)?;
    u32::try_from(value)
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| RegionError::ConfigError(format!("render.{} must be a positive pixel count, got {}", key, value)))
}
