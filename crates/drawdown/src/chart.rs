//! SVG equity curve: account balance against the fixed-deposit benchmark.

use crate::{DrawdownError, DrawdownReport, Result, record::PnlRecord};
use chrono::NaiveDate;
use std::path::Path;

const WIDTH: f64 = 1400.0;
const HEIGHT: f64 = 700.0;
const MARGIN_LEFT: f64 = 90.0;
const MARGIN_RIGHT: f64 = 30.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 70.0;
const MAX_X_TICKS: usize = 8;
const Y_TICKS: usize = 6;
const BALANCE_COLOR: &str = "#1f77b4";
const FD_COLOR: &str = "#ff7f0e";
const GRID_COLOR: &str = "#dddddd";

struct Series<'a> {
    label: &'a str,
    color: &'a str,
    dash: bool,
    values: Vec<f64>,
}

/// Render the equity curve as a standalone SVG document.
///
/// Plots `balance` (solid) and `fd_balance` (dashed) against the trading
/// days, with a grid, a legend and `Date` / `Balance` axis labels.
pub fn render_equity_curve(records: &[PnlRecord], report: &DrawdownReport) -> Result<String> {
    if records.is_empty() {
        return Err(DrawdownError::EmptyInput);
    }
    if records.len() != report.records.len() {
        return Err(DrawdownError::LengthMismatch {
            records: records.len(),
            derived: report.records.len(),
        });
    }

    let dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
    let series = [
        Series {
            label: "Account Balance",
            color: BALANCE_COLOR,
            dash: false,
            values: report.records.iter().map(|r| r.balance).collect(),
        },
        Series {
            label: "FD Balance",
            color: FD_COLOR,
            dash: true,
            values: report.records.iter().map(|r| r.fd_balance).collect(),
        },
    ];

    let (min_v, max_v) = extent(&series);
    let xs = x_positions(dates.len());

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = WIDTH,
        h = HEIGHT
    ));
    svg.push_str(
        r#"<style>text{font-family:Arial,sans-serif;font-size:12px;fill:#333}</style>"#,
    );
    svg.push_str(r##"<rect width="100%" height="100%" fill="#ffffff" />"##);

    draw_y_axis(&mut svg, min_v, max_v);
    draw_x_axis(&mut svg, &dates, &xs);

    for s in &series {
        let points = xs
            .iter()
            .zip(&s.values)
            .map(|(x, v)| format!("{x:.2},{y:.2}", y = scale_y(*v, min_v, max_v)))
            .collect::<Vec<_>>()
            .join(" ");
        svg.push_str(&format!(
            r#"<polyline fill="none" stroke="{color}" stroke-width="1.5" stroke-dasharray="{dash}" points="{points}" />"#,
            color = s.color,
            dash = if s.dash { "6 4" } else { "0" },
        ));
    }

    draw_legend(&mut svg, &series);

    svg.push_str(&format!(
        r#"<text x="{x:.2}" y="30" text-anchor="middle" font-size="18">Equity Curve</text>"#,
        x = WIDTH / 2.0
    ));
    svg.push_str(&format!(
        r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" font-size="14">Date</text>"#,
        x = MARGIN_LEFT + plot_width() / 2.0,
        y = HEIGHT - 15.0
    ));
    svg.push_str(&format!(
        r#"<text x="20" y="{y:.2}" text-anchor="middle" font-size="14" transform="rotate(-90 20 {y:.2})">Balance</text>"#,
        y = MARGIN_TOP + plot_height() / 2.0
    ));

    svg.push_str("</svg>\n");
    Ok(svg)
}

/// Render the equity curve and write it to `path`.
pub fn write_equity_curve(
    path: impl AsRef<Path>,
    records: &[PnlRecord],
    report: &DrawdownReport,
) -> Result<()> {
    let path = path.as_ref();
    let svg = render_equity_curve(records, report)?;
    std::fs::write(path, svg)?;
    tracing::info!(path = %path.display(), "wrote equity curve");
    Ok(())
}

const fn plot_width() -> f64 {
    WIDTH - MARGIN_LEFT - MARGIN_RIGHT
}

const fn plot_height() -> f64 {
    HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
}

/// Value range over all series, padded so flat lines stay visible.
fn extent(series: &[Series<'_>]) -> (f64, f64) {
    let (min_v, max_v) = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !min_v.is_finite() || !max_v.is_finite() {
        return (0.0, 1.0);
    }
    let span = max_v - min_v;
    let pad = if span > 0.0 {
        span * 0.05
    } else {
        min_v.abs().max(1.0) * 0.01
    };
    (min_v - pad, max_v + pad)
}

fn x_positions(len: usize) -> Vec<f64> {
    if len == 1 {
        return vec![MARGIN_LEFT + plot_width() / 2.0];
    }
    let step = plot_width() / (len - 1) as f64;
    (0..len).map(|i| MARGIN_LEFT + step * i as f64).collect()
}

fn scale_y(value: f64, min_v: f64, max_v: f64) -> f64 {
    let norm = (value - min_v) / (max_v - min_v);
    MARGIN_TOP + (1.0 - norm) * plot_height()
}

fn draw_y_axis(svg: &mut String, min_v: f64, max_v: f64) {
    let x1 = MARGIN_LEFT;
    let x2 = MARGIN_LEFT + plot_width();
    for i in 0..Y_TICKS {
        let value = min_v + (max_v - min_v) * i as f64 / (Y_TICKS - 1) as f64;
        let y = scale_y(value, min_v, max_v);
        svg.push_str(&format!(
            r#"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="{GRID_COLOR}" stroke-width="1" />"#
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{ty:.2}" text-anchor="end">{label}</text>"#,
            x = x1 - 8.0,
            ty = y + 4.0,
            label = format_tick(value)
        ));
    }
    svg.push_str(&format!(
        r##"<line x1="{x1:.2}" y1="{top:.2}" x2="{x1:.2}" y2="{bottom:.2}" stroke="#000" stroke-width="1" />"##,
        top = MARGIN_TOP,
        bottom = MARGIN_TOP + plot_height()
    ));
}

fn draw_x_axis(svg: &mut String, dates: &[NaiveDate], xs: &[f64]) {
    let axis_y = MARGIN_TOP + plot_height();
    svg.push_str(&format!(
        r##"<line x1="{x1:.2}" y1="{axis_y:.2}" x2="{x2:.2}" y2="{axis_y:.2}" stroke="#000" stroke-width="1" />"##,
        x1 = MARGIN_LEFT,
        x2 = MARGIN_LEFT + plot_width()
    ));

    for idx in tick_indices(dates.len()) {
        let x = xs[idx];
        svg.push_str(&format!(
            r#"<line x1="{x:.2}" y1="{top:.2}" x2="{x:.2}" y2="{axis_y:.2}" stroke="{GRID_COLOR}" stroke-width="1" />"#,
            top = MARGIN_TOP
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle">{label}</text>"#,
            y = axis_y + 20.0,
            label = dates[idx].format("%Y-%m-%d")
        ));
    }
}

/// Evenly spaced tick rows, always including the first and last.
fn tick_indices(len: usize) -> Vec<usize> {
    if len <= MAX_X_TICKS {
        return (0..len).collect();
    }
    let last = len - 1;
    let mut ticks: Vec<usize> = (0..MAX_X_TICKS)
        .map(|i| (i * last + (MAX_X_TICKS - 1) / 2) / (MAX_X_TICKS - 1))
        .collect();
    ticks.dedup();
    ticks
}

fn draw_legend(svg: &mut String, series: &[Series<'_>]) {
    let x = MARGIN_LEFT + 15.0;
    let mut y = MARGIN_TOP + 20.0;
    for s in series {
        svg.push_str(&format!(
            r#"<line x1="{x:.2}" y1="{ly:.2}" x2="{x2:.2}" y2="{ly:.2}" stroke="{color}" stroke-width="2" stroke-dasharray="{dash}" />"#,
            x2 = x + 30.0,
            ly = y - 4.0,
            color = s.color,
            dash = if s.dash { "6 4" } else { "0" }
        ));
        svg.push_str(&format!(
            r#"<text x="{tx:.2}" y="{y:.2}">{label}</text>"#,
            tx = x + 38.0,
            label = s.label
        ));
        y += 20.0;
    }
}

fn format_tick(value: f64) -> String {
    if value.abs() >= 1_000.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
