//! SVG time-series chart rendering.

use crate::error::{BotError, Result};
use chrono::{DateTime, Utc};
use plotters::prelude::*;

/// Chart canvas width in pixels (40 cm at 96 dpi).
pub const CHART_WIDTH: u32 = 1512;

/// Chart canvas height in pixels (20 cm at 96 dpi).
pub const CHART_HEIGHT: u32 = 756;

/// Point marker radius.
const MARKER_SIZE: i32 = 3;

/// The connecting line between points is wired up but switched off; the
/// chart shows markers only.
const DRAW_LINE: bool = false;

fn render_err(e: impl std::fmt::Display) -> BotError {
    BotError::render(e.to_string())
}

fn to_utc(unix_seconds: f64) -> DateTime<Utc> {
    DateTime::from_timestamp(unix_seconds as i64, 0).unwrap_or(DateTime::UNIX_EPOCH)
}

/// Time bounds of the data, widened so the axis never degenerates.
fn x_bounds(points: &[(f64, f64)]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &(x, _) in points {
        min = min.min(x);
        max = max.max(x);
    }
    if points.is_empty() {
        (0.0, 1.0)
    } else if min == max {
        (min, min + 1.0)
    } else {
        (min, max)
    }
}

/// Render `points` ((unix-seconds, value) pairs, oldest first) to an SVG
/// string.
///
/// X axis is time with date+time tick labels; Y axis is light intensity
/// with its minimum clamped to 0 regardless of the data.
pub fn render(points: &[(f64, f64)]) -> Result<String> {
    let mut svg = String::new();
    {
        let root =
            SVGBackend::with_string(&mut svg, (CHART_WIDTH, CHART_HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(render_err)?;

        let (x_min, x_max) = x_bounds(points);
        let y_max = points
            .iter()
            .map(|&(_, y)| y)
            .fold(0.0_f64, f64::max)
            .max(1.0);

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .x_label_area_size(70)
            .y_label_area_size(80)
            .build_cartesian_2d(to_utc(x_min)..to_utc(x_max), 0.0..y_max)
            .map_err(render_err)?;

        chart
            .configure_mesh()
            .x_desc("Time")
            .y_desc("Light (A.U.)")
            .x_label_formatter(&|t: &DateTime<Utc>| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .y_label_formatter(&|v: &f64| format!("{v:.1}"))
            .draw()
            .map_err(render_err)?;

        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((to_utc(x), y), MARKER_SIZE, RED.filled())),
            )
            .map_err(render_err)?;

        if DRAW_LINE {
            chart
                .draw_series(LineSeries::new(
                    points.iter().map(|&(x, y)| (to_utc(x), y)),
                    &RED,
                ))
                .map_err(render_err)?;
        }

        root.present().map_err(render_err)?;
    }
    Ok(svg)
}
