//! Export per-point results to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::path::Path;

use crate::domain::PointResidual;
use crate::error::AppError;

const HEADER: [&str; 8] = ["index", "x", "y", "t", "fit_x", "fit_y", "distance", "timing_residual"];

/// Write per-point results to a CSV file.
pub fn write_results_csv(path: &Path, residuals: &[PointResidual]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(4, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writer
        .write_record(HEADER)
        .map_err(|e| AppError::new(4, format!("Failed to write export CSV header: {e}")))?;

    for (i, r) in residuals.iter().enumerate() {
        writer
            .write_record([
                i.to_string(),
                format!("{:.10}", r.point.x),
                format!("{:.10}", r.point.y),
                format!("{:.10}", r.t),
                format!("{:.10}", r.fitted.x),
                format!("{:.10}", r.fitted.y),
                format!("{:.10}", r.distance),
                format!("{:.10}", r.timing_residual),
            ])
            .map_err(|e| AppError::new(4, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(4, format!("Failed to flush export CSV: {e}")))?;

    tracing::info!(path = %path.display(), rows = residuals.len(), "wrote per-point CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Point;

    #[test]
    fn writes_header_and_one_row_per_point() {
        let dir = std::env::temp_dir().join(format!("bezierfit-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("results.csv");

        let residuals = vec![PointResidual {
            point: Point::new(0.5, 0.5),
            t: 0.5,
            fitted: Point::new(0.5, 0.5),
            distance: 0.0,
            timing_residual: 0.0,
        }];
        write_results_csv(&path, &residuals).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "index,x,y,t,fit_x,fit_y,distance,timing_residual");
        assert!(lines[1].starts_with("0,0.5000000000,0.5000000000,0.5000000000"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
