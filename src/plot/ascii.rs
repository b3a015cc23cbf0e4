//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - samples: `o`
//! - fitted curve: `*`
//!
//! The view always covers the unit square and grows to include any sample or
//! curve point outside it.

use crate::domain::{ControlPoints, Point};

/// Render samples and the curve defined by `cp`.
pub fn render_ascii_plot(samples: &[Point], cp: &ControlPoints, width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let curve = cp.to_curve().sample(width * 4);
    let (x_min, x_max, y_min, y_max) = view_bounds(samples, &curve);

    let mut grid = vec![vec![' '; width]; height];
    draw_curve(&mut grid, &curve, x_min, x_max, y_min, y_max);

    for p in samples {
        let x = map_x(p.x, x_min, x_max, width);
        let y = map_y(p.y, y_min, y_max, height);
        grid[y][x] = 'o';
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: x=[{x_min:.2}, {x_max:.2}] | y=[{y_min:.2}, {y_max:.2}]\n"
    ));
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
    out
}

fn view_bounds(samples: &[Point], curve: &[Point]) -> (f64, f64, f64, f64) {
    let mut x_min = 0.0_f64;
    let mut x_max = 1.0_f64;
    let mut y_min = 0.0_f64;
    let mut y_max = 1.0_f64;
    for p in samples.iter().chain(curve.iter()).filter(|p| p.is_finite()) {
        x_min = x_min.min(p.x);
        x_max = x_max.max(p.x);
        y_min = y_min.min(p.y);
        y_max = y_max.max(p.y);
    }
    (x_min, x_max, y_min, y_max)
}

fn map_x(x: f64, x_min: f64, x_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((x - x_min) / (x_max - x_min)).clamp(0.0, 1.0);
    let u = if u.is_nan() { 0.0 } else { u };
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    let u = if u.is_nan() { 0.0 } else { u };
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[Point], x_min: f64, x_max: f64, y_min: f64, y_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for p in curve {
        let x = map_x(p.x, x_min, x_max, width);
        let y = map_y(p.y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, y, '*');
        } else {
            grid[y][x] = '*';
        }
        prev = Some((x, y));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0 && (y0 as usize) < grid.len() && x0 >= 0 && (x0 as usize) < grid[0].len() {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_golden_snapshot_identity() {
        let samples = [Point::new(0.0, 1.0), Point::new(1.0, 0.0)];
        let txt = render_ascii_plot(&samples, &ControlPoints::IDENTITY, 12, 6);
        let expected = concat!(
            "Plot: x=[0.00, 1.00] | y=[0.00, 1.00]\n",
            "o         **\n",
            "        ***\n",
            "      **\n",
            "    **\n",
            " ***\n",
            "**         o\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn view_grows_to_fit_overshooting_curve() {
        let cp = ControlPoints::new(Point::new(0.3, -0.6), Point::new(0.7, 1.6));
        let txt = render_ascii_plot(&[], &cp, 20, 8);
        let header = txt.lines().next().unwrap();
        assert!(header.starts_with("Plot: x=[0.00, 1.00] | y=[-0."), "{header}");
        assert_eq!(txt.lines().count(), 9);
    }
}
