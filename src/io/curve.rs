//! Read/write curve JSON files.
//!
//! Curve JSON is the "portable" representation of a fitted curve:
//! - the two control points (and the CSS label built from them)
//! - fit quality figures
//! - the samples the curve was fitted to, for re-plotting
//!
//! The schema is defined by `domain::CurveFile`.

use std::fs::File;
use std::path::Path;

use crate::domain::{ControlPoints, CurveFile, FitQuality, Point};
use crate::error::AppError;
use crate::report::format_cubic_bezier;

/// Write a curve JSON file.
pub fn write_curve_json(
    path: &Path,
    control_points: &ControlPoints,
    quality: Option<&FitQuality>,
    samples: &[Point],
    precision: usize,
) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create curve JSON '{}': {e}", path.display())))?;

    let curve = CurveFile {
        tool: "bezierfit".to_string(),
        label: format_cubic_bezier(control_points, precision),
        control_points: *control_points,
        fit_quality: quality.copied(),
        samples: samples.to_vec(),
    };

    serde_json::to_writer_pretty(file, &curve)
        .map_err(|e| AppError::new(4, format!("Failed to write curve JSON: {e}")))?;

    tracing::info!(path = %path.display(), "wrote curve JSON");
    Ok(())
}

/// Read a curve JSON file.
pub fn read_curve_json(path: &Path) -> Result<CurveFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open curve JSON '{}': {e}", path.display())))?;
    let curve: CurveFile =
        serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid curve JSON: {e}")))?;
    if !curve.control_points.is_finite() {
        return Err(AppError::new(2, "Curve JSON has non-finite control points."));
    }
    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_json_survives_a_write_read_cycle() {
        let dir = std::env::temp_dir().join(format!("bezierfit-curve-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("curve.json");

        let cp = ControlPoints::new(Point::new(0.42, 0.0), Point::new(0.58, 1.0));
        let samples = vec![Point::new(0.2, 0.1), Point::new(0.8, 0.9)];
        write_curve_json(&path, &cp, None, &samples, 2).unwrap();

        let curve = read_curve_json(&path).unwrap();
        assert_eq!(curve.tool, "bezierfit");
        assert_eq!(curve.label, "cubic-bezier(0.42,0.00,0.58,1.00)");
        assert_eq!(curve.control_points, cp);
        assert_eq!(curve.samples, samples);
        assert!(curve.fit_quality.is_none());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_file_is_an_input_error() {
        let err = read_curve_json(Path::new("/nonexistent/bezierfit/curve.json")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
