//! Point ingest.
//!
//! Turns a text stream into an ordered list of sample points. One point per
//! line, two numbers separated by whitespace and/or a comma:
//!
//! ```text
//! # comment
//! 0.10 0.25
//! 0.4,0.8
//! ```
//!
//! Design goals:
//! - **Order preserved**: the fitter parameterises by traversal order
//! - **Strict rows**: a malformed line is an error with its line number
//!   (exit code 2), not silently skipped
//! - **No range checks**: values outside the unit square are passed through

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::domain::Point;
use crate::error::AppError;

/// Summary stats about the points read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetStats {
    pub n_points: usize,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// Ingest output: points in input order plus bookkeeping.
#[derive(Debug, Clone)]
pub struct IngestedPoints {
    pub points: Vec<Point>,
    pub lines_read: usize,
    /// `None` when no points were read.
    pub stats: Option<DatasetStats>,
}

/// Read points from `path`, or from standard input when `path` is `None`.
pub fn load_points(path: Option<&Path>) -> Result<IngestedPoints, AppError> {
    match path {
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                AppError::new(2, format!("Failed to open point file '{}': {e}", path.display()))
            })?;
            parse_points(BufReader::new(file))
        }
        None => parse_points(std::io::stdin().lock()),
    }
}

/// Parse points from any buffered reader.
pub fn parse_points<R: BufRead>(reader: R) -> Result<IngestedPoints, AppError> {
    let mut points = Vec::new();
    let mut lines_read = 0;

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| AppError::new(4, format!("Failed to read input: {e}")))?;
        lines_read += 1;
        match parse_line(&line) {
            Ok(Some(p)) => points.push(p),
            Ok(None) => {}
            Err(message) => {
                return Err(AppError::new(2, format!("Line {}: {message}", idx + 1)));
            }
        }
    }

    tracing::debug!(points = points.len(), lines = lines_read, "read sample points");
    let stats = compute_stats(&points);
    Ok(IngestedPoints {
        points,
        lines_read,
        stats,
    })
}

fn parse_line(line: &str) -> Result<Option<Point>, String> {
    let content = match line.split_once('#') {
        Some((before, _)) => before,
        None => line,
    };
    let fields: Vec<&str> = content
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|f| !f.is_empty())
        .collect();

    match fields.as_slice() {
        [] => Ok(None),
        [x, y] => {
            let xy = (parse_coord(x)?, parse_coord(y)?);
            Ok(Some(xy.into()))
        }
        _ => Err(format!("expected 'x y', got '{}'", line.trim())),
    }
}

fn parse_coord(s: &str) -> Result<f64, String> {
    s.parse::<f64>().map_err(|e| format!("invalid number '{s}': {e}"))
}

fn compute_stats(points: &[Point]) -> Option<DatasetStats> {
    if points.is_empty() {
        return None;
    }
    let mut stats = DatasetStats {
        n_points: points.len(),
        x_min: f64::INFINITY,
        x_max: f64::NEG_INFINITY,
        y_min: f64::INFINITY,
        y_max: f64::NEG_INFINITY,
    };
    for p in points {
        stats.x_min = stats.x_min.min(p.x);
        stats.x_max = stats.x_max.max(p.x);
        stats.y_min = stats.y_min.min(p.y);
        stats.y_max = stats.y_max.max(p.y);
    }
    Some(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_mixed_separators_comments_and_blanks() {
        let input = "# samples\n0.1 0.2\n\n0.3,0.4\n  0.5 ,\t0.6  # trailing\n";
        let ingested = parse_points(input.as_bytes()).unwrap();
        assert_eq!(
            ingested.points,
            vec![Point::new(0.1, 0.2), Point::new(0.3, 0.4), Point::new(0.5, 0.6)]
        );
        assert_eq!(ingested.lines_read, 5);

        let stats = ingested.stats.unwrap();
        assert_eq!(stats.n_points, 3);
        assert_eq!((stats.x_min, stats.x_max), (0.1, 0.5));
        assert_eq!((stats.y_min, stats.y_max), (0.2, 0.6));
    }

    #[test]
    fn malformed_line_reports_line_number() {
        let err = parse_points("0.1 0.2\n0.3\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().starts_with("Line 2:"), "{err}");

        let err = parse_points("0.1 abc\n".as_bytes()).unwrap_err();
        assert!(err.to_string().contains("invalid number 'abc'"), "{err}");
    }

    #[test]
    fn empty_input_is_not_an_error() {
        let ingested = parse_points("".as_bytes()).unwrap();
        assert!(ingested.points.is_empty());
        assert!(ingested.stats.is_none());
    }

    #[test]
    fn out_of_range_values_pass_through() {
        let ingested = parse_points("-0.5 1.5\n".as_bytes()).unwrap();
        assert_eq!(ingested.points, vec![Point::new(-0.5, 1.5)]);
    }
}
