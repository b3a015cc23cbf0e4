//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::domain::{ControlPoints, FitConfig, FitQuality};
use crate::io::ingest::DatasetStats;

/// `cubic-bezier(x1,y1,x2,y2)` with `precision` decimals, y pointing up.
pub fn format_cubic_bezier(cp: &ControlPoints, precision: usize) -> String {
    let [x1, y1, x2, y2] = cp.to_array();
    format!(
        "cubic-bezier({},{},{},{})",
        fmt_num(x1, precision),
        fmt_num(y1, precision),
        fmt_num(x2, precision),
        fmt_num(y2, precision)
    )
}

/// SVG path of the curve in a unit-square viewport whose y axis points down.
pub fn format_svg_path(cp: &ControlPoints, precision: usize) -> String {
    let [x1, y1, x2, y2] = cp.to_array();
    format!(
        "M0,1 C{},{} {},{} 1,0",
        fmt_num(x1, precision),
        fmt_num(1.0 - y1, precision),
        fmt_num(x2, precision),
        fmt_num(1.0 - y2, precision)
    )
}

/// Format the run summary (input stats + fit diagnostics + result).
pub fn format_fit_summary(
    stats: Option<&DatasetStats>,
    cp: &ControlPoints,
    quality: &FitQuality,
    config: &FitConfig,
) -> String {
    let mut out = String::new();

    out.push_str("=== bezierfit - cubic Bézier timing curve fit ===\n");
    match stats {
        Some(s) => out.push_str(&format!(
            "Points: n={} | x=[{:.3}, {:.3}] | y=[{:.3}, {:.3}]\n",
            s.n_points, s.x_min, s.x_max, s.y_min, s.y_max
        )),
        None => out.push_str("Points: none\n"),
    }

    out.push_str(&format!(
        "Fit: max_err={:.5} rms_err={:.5} timing_sse={:.5}{}\n",
        quality.max_error,
        quality.rms_error,
        quality.timing_sse,
        if quality.degenerate { " (straight line)" } else { "" }
    ));
    out.push_str(&format!(
        "P1: ({}, {})\nP2: ({}, {})\n",
        fmt_num(cp.p1.x, 6),
        fmt_num(cp.p1.y, 6),
        fmt_num(cp.p2.x, 6),
        fmt_num(cp.p2.y, 6)
    ));
    out.push('\n');
    out.push_str(&format_cubic_bezier(cp, config.precision));
    out.push('\n');
    out.push_str(&format!("SVG: {}\n", format_svg_path(cp, config.precision)));

    out
}

fn fmt_num(v: f64, precision: usize) -> String {
    let s = format!("{v:.precision$}");
    // Avoid printing "-0.000" for values that round to zero.
    if s.starts_with('-') && s[1..].chars().all(|c| c == '0' || c == '.') {
        s[1..].to_string()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Point;

    #[test]
    fn label_uses_requested_precision() {
        let cp = ControlPoints::new(Point::new(0.25, 0.1), Point::new(0.25, 1.0));
        assert_eq!(format_cubic_bezier(&cp, 3), "cubic-bezier(0.250,0.100,0.250,1.000)");
        assert_eq!(format_cubic_bezier(&ControlPoints::IDENTITY, 2), "cubic-bezier(0.33,0.33,0.67,0.67)");
    }

    #[test]
    fn svg_path_flips_y() {
        let cp = ControlPoints::new(Point::new(0.25, 0.1), Point::new(0.25, 1.0));
        assert_eq!(format_svg_path(&cp, 3), "M0,1 C0.250,0.900 0.250,0.000 1,0");
    }

    #[test]
    fn negative_zero_is_printed_as_zero() {
        let cp = ControlPoints::new(Point::new(-0.0001, 0.0), Point::new(1.0, 1.0));
        assert_eq!(format_cubic_bezier(&cp, 3), "cubic-bezier(0.000,0.000,1.000,1.000)");
    }

    #[test]
    fn summary_mentions_fallback_and_label() {
        let quality = FitQuality {
            n: 0,
            max_error: 0.0,
            rms_error: 0.0,
            timing_sse: 0.0,
            degenerate: true,
        };
        let text = format_fit_summary(None, &ControlPoints::IDENTITY, &quality, &FitConfig::default());
        assert!(text.contains("Points: none"));
        assert!(text.contains("(straight line)"));
        assert!(text.contains("cubic-bezier(0.333,0.333,0.667,0.667)"));
        assert!(text.contains("SVG: M0,1 C0.333,0.667 0.667,0.333 1,0"));
    }
}
