//! The `bezierfit fit` workflow, kept apart from printing.
//!
//! ingest -> dispatch to the fitting worker -> residuals -> quality figures

use std::cell::Cell;
use std::rc::Rc;

use crate::dispatch::{Dispatcher, WorkerThread, fit_bezier_curve};
use crate::domain::{ControlPoints, FitConfig, FitQuality, PointResidual};
use crate::error::AppError;
use crate::fit::FitOptions;
use crate::io::ingest::{IngestedPoints, load_points};
use crate::report::{compute_residuals, fit_quality};

/// All computed outputs of a single `bezierfit fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub ingest: IngestedPoints,
    pub control_points: ControlPoints,
    pub quality: FitQuality,
    pub residuals: Vec<PointResidual>,
}

/// Read the configured input and fit it.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    let ingest = load_points(config.input.as_deref())?;
    run_fit_on(ingest, config)
}

/// Fit already-ingested points.
pub fn run_fit_on(ingest: IngestedPoints, config: &FitConfig) -> Result<RunOutput, AppError> {
    let opts = fit_options(config)?;

    let worker = WorkerThread::spawn(opts)?;
    let mut dispatcher = Dispatcher::new(worker);

    let slot = Rc::new(Cell::new(None));
    let sink = Rc::clone(&slot);
    fit_bezier_curve(&mut dispatcher, &ingest.points, move |cp| sink.set(Some(cp)));
    dispatcher.run_until_idle();

    let control_points = slot
        .take()
        .ok_or_else(|| AppError::new(4, "Fitting worker stopped before returning a result."))?;

    let residuals = compute_residuals(&ingest.points, &control_points);
    let quality = fit_quality(&control_points, &residuals);

    tracing::info!(
        n = quality.n,
        max_error = quality.max_error,
        rms_error = quality.rms_error,
        degenerate = quality.degenerate,
        "fit complete"
    );

    Ok(RunOutput {
        ingest,
        control_points,
        quality,
        residuals,
    })
}

fn fit_options(config: &FitConfig) -> Result<FitOptions, AppError> {
    if !(config.refine_tolerance.is_finite() && config.refine_tolerance >= 0.0) {
        return Err(AppError::new(2, "Refinement tolerance must be a finite, non-negative number."));
    }
    Ok(FitOptions {
        refine_iterations: config.refine_iterations,
        refine_tolerance: config.refine_tolerance,
        ..FitOptions::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::parse_points;

    #[test]
    fn pipeline_matches_direct_fit() {
        let ingest = parse_points("0.1 0.2\n0.4 0.6\n# comment\n0.8,0.9\n".as_bytes()).unwrap();
        let points = ingest.points.clone();
        let run = run_fit_on(ingest, &FitConfig::default()).unwrap();

        assert_eq!(run.control_points, crate::fit::fit(&points));
        assert_eq!(run.quality.n, 3);
        assert_eq!(run.residuals.len(), 3);
    }

    #[test]
    fn empty_input_gives_straight_line() {
        let ingest = parse_points("".as_bytes()).unwrap();
        let run = run_fit_on(ingest, &FitConfig::default()).unwrap();
        assert_eq!(run.control_points, ControlPoints::IDENTITY);
        assert!(run.quality.degenerate);
        assert!(run.residuals.is_empty());
    }

    #[test]
    fn single_point_runs_through_the_worker() {
        let ingest = parse_points("0.2 0.6\n".as_bytes()).unwrap();
        let run = run_fit_on(ingest, &FitConfig::default()).unwrap();
        let cp = run.control_points;
        assert!((cp.p2.x - cp.p1.y).abs() < 1e-12 && (cp.p2.y - cp.p1.x).abs() < 1e-12);
        assert!(run.quality.max_error < 1e-9, "max_error={}", run.quality.max_error);
        assert_eq!(run.residuals[0].distance, run.quality.max_error);
    }

    #[test]
    fn quality_figures_come_from_the_returned_control_points() {
        let ingest = parse_points("0.1 0.3\n0.3 0.6\n0.6 0.8\n0.9 0.95\n".as_bytes()).unwrap();
        let points = ingest.points.clone();
        let run = run_fit_on(ingest, &FitConfig::default()).unwrap();

        let residuals = compute_residuals(&points, &run.control_points);
        assert_eq!(run.residuals, residuals);
        assert_eq!(run.quality, fit_quality(&run.control_points, &residuals));
        assert_eq!(run.quality.n, 4);
        assert!(run.quality.rms_error <= run.quality.max_error);
    }

    #[test]
    fn rejects_negative_tolerance() {
        let config = FitConfig {
            refine_tolerance: -1.0,
            ..FitConfig::default()
        };
        let ingest = parse_points("".as_bytes()).unwrap();
        assert_eq!(run_fit_on(ingest, &config).unwrap_err().exit_code(), 2);
    }
}
