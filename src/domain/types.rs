//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - passed across the fitting worker boundary (after encoding)
//! - exported to JSON/CSV
//! - reloaded later for plotting or evaluation

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A sample or control point in the plane.
///
/// Coordinates are conventionally in `[0, 1]` (the unit square a timing curve is
/// drawn in), but nothing here enforces that.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// Fixed start point of every curve.
pub const P0: Point = Point::ORIGIN;
/// Fixed end point of every curve.
pub const P3: Point = Point::new(1.0, 1.0);

/// The two free control points of a timing curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoints {
    pub p1: Point,
    pub p2: Point,
}

impl ControlPoints {
    /// Control points of the straight line from `P0` to `P3`.
    pub const IDENTITY: ControlPoints = ControlPoints {
        p1: Point::new(1.0 / 3.0, 1.0 / 3.0),
        p2: Point::new(2.0 / 3.0, 2.0 / 3.0),
    };

    pub const fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// `[p1x, p1y, p2x, p2y]`.
    pub fn to_array(&self) -> [f64; 4] {
        [self.p1.x, self.p1.y, self.p2.x, self.p2.y]
    }

    pub fn from_array(values: [f64; 4]) -> Self {
        Self::new(Point::new(values[0], values[1]), Point::new(values[2], values[3]))
    }

    pub fn is_finite(&self) -> bool {
        self.p1.is_finite() && self.p2.is_finite()
    }

    /// The full curve with the fixed endpoints filled in.
    pub fn to_curve(&self) -> CubicBezier {
        CubicBezier {
            p0: P0,
            p1: self.p1,
            p2: self.p2,
            p3: P3,
        }
    }
}

/// Parses `cubic-bezier(a,b,c,d)` or a bare `a,b,c,d`.
impl FromStr for ControlPoints {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let inner = match trimmed.strip_prefix("cubic-bezier(") {
            Some(rest) => rest
                .strip_suffix(')')
                .ok_or_else(|| format!("Missing closing parenthesis in '{trimmed}'."))?,
            None => trimmed,
        };

        let values: Vec<f64> = inner
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<f64>()
                    .map_err(|e| format!("Invalid number '{}': {e}", part.trim()))
            })
            .collect::<Result<_, _>>()?;

        let values: [f64; 4] = values
            .try_into()
            .map_err(|v: Vec<f64>| format!("Expected 4 values, got {}.", v.len()))?;
        if values.iter().any(|v| !v.is_finite()) {
            return Err("Control point coordinates must be finite.".to_string());
        }
        Ok(ControlPoints::from_array(values))
    }
}

/// A cubic Bézier segment.
///
/// Curves built by this crate always have `p0 = (0,0)` and `p3 = (1,1)`; the
/// general form is kept so evaluation code does not have to special-case it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: Point,
    pub p1: Point,
    pub p2: Point,
    pub p3: Point,
}

/// Correlation id linking a fit request to its response.
pub type RequestId = u64;

/// A fit request as seen on both sides of the worker boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct FitRequest {
    pub id: RequestId,
    pub points: Vec<Point>,
}

/// The answer to exactly one [`FitRequest`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResponse {
    pub id: RequestId,
    pub control_points: ControlPoints,
}

/// Quality figures for a fitted curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitQuality {
    /// Number of samples the curve was fitted to.
    pub n: usize,
    /// Largest distance from a sample to the curve.
    pub max_error: f64,
    pub rms_error: f64,
    /// `Σ (y(x_i) - y_i)²` with the curve read as a timing function.
    pub timing_sse: f64,
    /// True when the control points are exactly the straight line.
    pub degenerate: bool,
}

/// Portable representation of a fitted curve (see `io::curve`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurveFile {
    pub tool: String,
    pub label: String,
    pub control_points: ControlPoints,
    pub fit_quality: Option<FitQuality>,
    pub samples: Vec<Point>,
}

/// A sample together with where the fitted curve puts it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointResidual {
    pub point: Point,
    /// Curve parameter matched to this sample.
    pub t: f64,
    pub fitted: Point,
    /// Euclidean distance between `point` and `fitted`.
    pub distance: f64,
    /// `y(point.x) - point.y` with the curve read as a timing function.
    pub timing_residual: f64,
}

/// Resolved configuration for a `bezierfit fit` run.
#[derive(Debug, Clone)]
pub struct FitConfig {
    /// Point file; `None` reads standard input.
    pub input: Option<PathBuf>,
    pub refine_iterations: usize,
    pub refine_tolerance: f64,
    /// Decimals in the printed label and SVG path.
    pub precision: usize,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub export_curve: Option<PathBuf>,
    pub export_results: Option<PathBuf>,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            input: None,
            refine_iterations: 4,
            refine_tolerance: 1e-4,
            precision: 3,
            plot: true,
            plot_width: 60,
            plot_height: 20,
            export_curve: None,
            export_results: None,
        }
    }
}
