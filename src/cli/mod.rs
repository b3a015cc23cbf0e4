//! Command-line parsing for the Bézier timing-curve fitter.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! fitting and dispatch code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::ControlPoints;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "bezierfit", version, about = "Fit cubic Bézier timing curves to sample points")]
pub struct Cli {
    /// Debug-level logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit control points to `x y` samples, print the label and diagnostics.
    Fit(FitArgs),
    /// Evaluate a timing curve: print `y(x)` for each X.
    Eval(EvalArgs),
    /// Print noisy samples along a known curve (input for `fit`).
    Sample(SampleArgs),
    /// Plot a previously exported curve JSON.
    Plot(PlotArgs),
}

/// Options for `bezierfit fit`.
#[derive(Debug, Args, Clone)]
pub struct FitArgs {
    /// Point file (`x y` or `x,y` per line). Reads stdin when omitted.
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Maximum foot-point refinement passes (0 disables refinement).
    #[arg(long, default_value_t = 4)]
    pub refine: usize,

    /// Stop refining once the worst-sample distance improves by less than this.
    #[arg(long, default_value_t = 1e-4)]
    pub tolerance: f64,

    /// Decimals in the printed label and SVG path.
    #[arg(short, long, default_value_t = 3)]
    pub precision: usize,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export curve (control points + quality + samples) to JSON.
    #[arg(long = "export-curve", value_name = "JSON")]
    pub export_curve: Option<PathBuf>,

    /// Export per-point results to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

/// Options for `bezierfit eval`.
#[derive(Debug, Args)]
pub struct EvalArgs {
    /// `cubic-bezier(x1,y1,x2,y2)` or `x1,y1,x2,y2`.
    #[arg(long)]
    pub curve: ControlPoints,

    /// Progress values in [0, 1].
    #[arg(required = true, allow_negative_numbers = true)]
    pub xs: Vec<f64>,

    /// Decimals in the output.
    #[arg(short, long, default_value_t = 6)]
    pub precision: usize,
}

/// Options for `bezierfit sample`.
#[derive(Debug, Args)]
pub struct SampleArgs {
    /// `cubic-bezier(x1,y1,x2,y2)` or `x1,y1,x2,y2`.
    #[arg(long)]
    pub curve: ControlPoints,

    /// Number of samples.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub count: usize,

    /// Standard deviation of the Gaussian noise added to y.
    #[arg(long, default_value_t = 0.0)]
    pub noise: f64,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

/// Options for plotting a saved curve.
#[derive(Debug, Args)]
pub struct PlotArgs {
    /// Curve JSON file produced by `bezierfit fit --export-curve`.
    #[arg(long = "curve-file", value_name = "JSON")]
    pub curve_file: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 60)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Point;

    #[test]
    fn fit_defaults() {
        let cli = Cli::try_parse_from(["bezierfit", "fit"]).unwrap();
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert!(args.input.is_none());
        assert_eq!(args.refine, 4);
        assert_eq!(args.precision, 3);
        assert!(!args.no_plot);
        assert!(!cli.verbose);
    }

    #[test]
    fn eval_parses_curve_and_values() {
        let cli = Cli::try_parse_from(["bezierfit", "-v", "eval", "--curve", "cubic-bezier(0.25,0.1,0.25,1)", "0", "0.5"])
            .unwrap();
        assert!(cli.verbose);
        let Command::Eval(args) = cli.command else {
            panic!("expected eval");
        };
        assert_eq!(args.curve.p1, Point::new(0.25, 0.1));
        assert_eq!(args.xs, vec![0.0, 0.5]);
    }

    #[test]
    fn bad_curve_is_a_usage_error() {
        assert!(Cli::try_parse_from(["bezierfit", "sample", "--curve", "0.1,0.2,0.3"]).is_err());
        assert!(Cli::try_parse_from(["bezierfit", "eval", "--curve", "0,0,1,1"]).is_err());
    }
}
