//! Line chart rendering.
//!
//! The output format follows the file extension: `.svg` produces an SVG
//! document, anything else a bitmap encoded by extension (PNG by default).
//! Labels are set in DejaVu Sans, bundled with the crate.

use std::{fmt, ops::Range, path::Path, sync::OnceLock};

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use plotters::{coord::Shift, prelude::*};

const SIZE: (u32, u32) = (1280, 720);
const FONT_FAMILY: &str = "sans-serif";
const FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
const PALETTE: [RGBColor; 4] = [
    BLUE,
    RGBColor(230, 180, 0),
    RGBColor(200, 40, 40),
    RGBColor(40, 160, 70),
];

#[derive(Debug)]
pub enum PlotError {
    NoData,
    Render(String),
}

impl fmt::Display for PlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotError::NoData => write!(f, "nothing to plot"),
            PlotError::Render(e) => write!(f, "cannot render plot: {}", e),
        }
    }
}

impl std::error::Error for PlotError {}

/// Registers the bundled font with plotters once per process.
fn ensure_font() -> Result<(), PlotError> {
    static REGISTERED: OnceLock<Result<(), String>> = OnceLock::new();
    REGISTERED
        .get_or_init(|| {
            plotters::style::register_font(FONT_FAMILY, plotters::style::FontStyle::Normal, FONT)
                .map_err(|_| "invalid font".to_string())
        })
        .clone()
        .map_err(PlotError::Render)
}

fn render_err<E: fmt::Display>(err: E) -> PlotError {
    PlotError::Render(err.to_string())
}

/// A named line over time.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSeries {
    pub label: String,
    pub points: Vec<(NaiveDateTime, f64)>,
}

impl PlotSeries {
    pub fn new(label: impl Into<String>, points: Vec<(NaiveDateTime, f64)>) -> Self {
        Self {
            label: label.into(),
            points,
        }
    }

    /// Builds a series from per-day values, placed at midnight.
    pub fn daily(label: impl Into<String>, points: Vec<(NaiveDate, f64)>) -> Self {
        Self::new(
            label,
            points
                .into_iter()
                .map(|(date, v)| (date.and_time(chrono::NaiveTime::MIN), v))
                .collect(),
        )
    }
}

/// Draws every series as a line on shared axes and writes the chart to `path`.
pub fn render_line_chart(
    path: &Path,
    y_desc: &str,
    series: &[PlotSeries],
) -> Result<(), PlotError> {
    if series.iter().all(|s| s.points.is_empty()) {
        return Err(PlotError::NoData);
    }
    ensure_font()?;

    let svg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

    if svg {
        draw(SVGBackend::new(path, SIZE).into_drawing_area(), y_desc, series)
    } else {
        draw(BitMapBackend::new(path, SIZE).into_drawing_area(), y_desc, series)
    }
}

fn draw<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    y_desc: &str,
    series: &[PlotSeries],
) -> Result<(), PlotError> {
    root.fill(&WHITE).map_err(render_err)?;

    let (x_range, y_range) = bounds(series);
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("date")
        .y_desc(y_desc)
        .x_labels(8)
        .x_label_formatter(&|x: &f64| axis_date(*x))
        .draw()
        .map_err(render_err)?;

    for (i, s) in series.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        chart
            .draw_series(LineSeries::new(
                s.points.iter().map(|(t, v)| (timestamp(t), *v)),
                &color,
            ))
            .map_err(render_err)?
            .label(s.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    Ok(())
}

fn timestamp(t: &NaiveDateTime) -> f64 {
    t.and_utc().timestamp() as f64
}

fn axis_date(x: f64) -> String {
    DateTime::from_timestamp(x as i64, 0)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Axis ranges covering all points, widened when degenerate.
pub fn bounds(series: &[PlotSeries]) -> (Range<f64>, Range<f64>) {
    let points = series.iter().flat_map(|s| s.points.iter());

    let (mut x_min, mut x_max) = (f64::MAX, f64::MIN);
    let (mut y_min, mut y_max) = (f64::MAX, f64::MIN);
    for (t, v) in points {
        let x = timestamp(t);
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(*v);
        y_max = y_max.max(*v);
    }

    if x_min >= x_max {
        x_min -= 43_200.0;
        x_max += 43_200.0;
    }

    let pad = (y_max - y_min) * 0.05;
    if pad <= 0.0 {
        y_min -= 1.0;
        y_max += 1.0;
    } else {
        y_min -= pad;
        y_max += pad;
    }

    (x_min..x_max, y_min..y_max)
}
