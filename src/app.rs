//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and sets up logging
//! - parses CLI arguments
//! - runs the fit pipeline or one of the helper commands
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Cli, Command, EvalArgs, FitArgs, PlotArgs, SampleArgs};
use crate::domain::FitConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `bezierfit` binary.
pub fn run() -> Result<(), AppError> {
    // RUST_LOG may come from .env, so load it before the logger reads it.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    crate::logging::init_logger(cli.verbose);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Eval(args) => handle_eval(args),
        Command::Sample(args) => handle_sample(args),
        Command::Plot(args) => handle_plot(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args);
    let run = pipeline::run_fit(&config)?;
    let cp = run.control_points;

    println!(
        "{}",
        crate::report::format_fit_summary(run.ingest.stats.as_ref(), &cp, &run.quality, &config)
    );

    if config.plot {
        let plot = crate::plot::render_ascii_plot(&run.ingest.points, &cp, config.plot_width, config.plot_height);
        println!("{plot}");
    }

    if let Some(path) = &config.export_results {
        crate::io::export::write_results_csv(path, &run.residuals)?;
    }
    if let Some(path) = &config.export_curve {
        crate::io::curve::write_curve_json(path, &cp, Some(&run.quality), &run.ingest.points, config.precision)?;
    }

    Ok(())
}

fn handle_eval(args: EvalArgs) -> Result<(), AppError> {
    let curve = args.curve.to_curve();
    for &x in &args.xs {
        if !(x.is_finite() && (0.0..=1.0).contains(&x)) {
            return Err(AppError::new(2, format!("x must lie in [0, 1], got {x}.")));
        }
        let y = curve.y_for_x(x);
        println!("{x} {y:.prec$}", prec = args.precision);
    }
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let points = crate::data::generate_samples(&args.curve, args.count, args.noise, args.seed)?;
    for p in points {
        println!("{:.6} {:.6}", p.x, p.y);
    }
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let curve = crate::io::curve::read_curve_json(&args.curve_file)?;

    println!("{}", curve.label);
    let plot = crate::plot::render_ascii_plot(&curve.samples, &curve.control_points, args.width, args.height);
    println!("{plot}");
    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> FitConfig {
    FitConfig {
        input: args.input.clone(),
        refine_iterations: args.refine,
        refine_tolerance: args.tolerance,
        precision: args.precision,
        plot: !args.no_plot,
        plot_width: args.width,
        plot_height: args.height,
        export_curve: args.export_curve.clone(),
        export_results: args.export.clone(),
    }
}
