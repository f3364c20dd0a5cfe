//! Coordinate transformation through an external command

use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;

use super::environment::Environment;
use super::process::ProcessRunner;
use crate::config::{render_args, TransformConfig};
use crate::coordinate::{CoordinateTransformer, CrsDescriptor, Point};
use crate::errors::{RegionError, RegionResult};

lazy_static! {
    // Commas and pipes may be padded with spaces; plain whitespace also separates
    static ref FIELD_SEPARATOR: Regex = Regex::new(r"\s*[,|]\s*|\s+").unwrap();
}

/// Transformer that batches points through an external command
///
/// Each point is written as one `x y` line on stdin; each output line
/// must carry exactly the configured number of numeric fields, x and y
/// first.
#[derive(Debug, Clone)]
pub struct ProcessTransformer {
    runner: ProcessRunner,
    args: Vec<String>,
    output_fields: usize,
    env: Environment,
}

impl ProcessTransformer {
    /// Create a transformer from configuration, running in `env`
    pub fn new(config: &TransformConfig, env: Environment) -> Self {
        ProcessTransformer {
            runner: ProcessRunner::new(config.command.clone()),
            args: config.args.clone(),
            output_fields: config.output_fields,
            env,
        }
    }

    fn format_input(points: &[Point]) -> String {
        points.iter().map(|p| format!("{} {}\n", p.x, p.y)).collect()
    }
}

/// Parse transformer output into points
///
/// Blank lines are skipped. Any line with the wrong number of fields or a
/// non-numeric field, or a line count different from `expected_points`,
/// fails the whole batch.
pub fn parse_transform_output(output: &str, expected_points: usize, output_fields: usize) -> RegionResult<Vec<Point>> {
    let mut points = Vec::with_capacity(expected_points);

    for (line_no, line) in output.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = FIELD_SEPARATOR.split(line).collect();
        if fields.len() != output_fields {
            return Err(RegionError::MalformedResponse(format!(
                "line {}: expected {} fields, got {}: '{}'",
                line_no + 1, output_fields, fields.len(), line
            )));
        }

        let mut values = Vec::with_capacity(fields.len());
        for field in &fields {
            let value = field.parse::<f64>().map_err(|_| RegionError::MalformedResponse(format!(
                "line {}: field '{}' is not numeric", line_no + 1, field
            )))?;
            values.push(value);
        }

        let point = match values.get(2) {
            Some(z) => Point::new_3d(values[0], values[1], *z),
            None => Point::new(values[0], values[1]),
        };
        points.push(point);
    }

    if points.len() != expected_points {
        return Err(RegionError::MalformedResponse(format!(
            "expected {} transformed points, got {}", expected_points, points.len()
        )));
    }

    Ok(points)
}

impl CoordinateTransformer for ProcessTransformer {
    fn transform(&self, points: &[Point], from: &CrsDescriptor, to: &CrsDescriptor) -> RegionResult<Vec<Point>> {
        if points.is_empty() {
            return Ok(Vec::new());
        }

        let args = render_args(&self.args, &[("from", from.as_str()), ("to", to.as_str())])?;
        debug!("Transforming {} points with {}", points.len(), self.runner.program());

        let output = self.runner
            .run(&args, &self.env, Some(&Self::format_input(points)))
            .map_err(RegionError::TransformError)?;

        let transformed = parse_transform_output(&output, points.len(), self.output_fields)?;
        info!("Transformed {} points from '{}' to '{}'", transformed.len(), from, to);
        Ok(transformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_space_and_comma_separated() {
        let points = parse_transform_output("1.5 2.5 0\n\n-3,4.25,0\n", 2, 3).unwrap();
        assert_eq!(points, vec![Point::new_3d(1.5, 2.5, 0.0), Point::new_3d(-3.0, 4.25, 0.0)]);

        let points = parse_transform_output("10 , 20 , 0\n", 1, 3).unwrap();
        assert_eq!(points[0].x, 10.0);
        assert_eq!(points[0].y, 20.0);
    }

    #[test]
    fn test_wrong_field_count() {
        let result = parse_transform_output("1 2 0\n3 4\n", 2, 3);
        assert!(matches!(result, Err(RegionError::MalformedResponse(_))));
    }

    #[test]
    fn test_empty_field_is_rejected() {
        let result = parse_transform_output("1,,0\n", 1, 3);
        assert!(matches!(result, Err(RegionError::MalformedResponse(_))));
    }

    #[test]
    fn test_non_numeric_field() {
        let result = parse_transform_output("1 abc 0\n", 1, 3);
        assert!(matches!(result, Err(RegionError::MalformedResponse(_))));
    }

    #[test]
    fn test_wrong_point_count() {
        let result = parse_transform_output("1 2 0\n", 2, 3);
        assert!(matches!(result, Err(RegionError::MalformedResponse(_))));
    }

    #[test]
    fn test_input_format() {
        let input = ProcessTransformer::format_input(&[Point::new(20.0, 10.0), Point::new(-0.5, 1e-3)]);
        assert_eq!(input, "20 10\n-0.5 0.001\n");
    }
}
