//! PNG charts: histograms, missing-value matrix and correlation heatmap.
//!
//! Each `render_*` function returns `Ok(false)` when there is not enough data
//! to draw anything, in which case no file is created.

use crate::types::CorrelationMatrix;
use crate::utils::{string_values, numeric_values, is_float_dtype, truncate_str};
use anyhow::{Result, anyhow};
use once_cell::sync::OnceCell;
use plotters::prelude::*;
use plotters::style::{FontStyle, register_font};
use polars::prelude::*;
use std::path::Path;

/// DejaVu Sans, see `assets/DejaVuSans-LICENSE`.
static CHART_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");
static FONT_REGISTERED: OnceCell<bool> = OnceCell::new();

/// Family name every chart draws its text with.
const FONT_FAMILY: &str = "sans-serif";

const HISTOGRAM_BINS: usize = 20;
const HISTOGRAM_SIZE: (u32, u32) = (800, 500);
/// Rows beyond this are folded into buckets in the missing matrix.
const MATRIX_MAX_ROWS: usize = 400;
/// Cell values are written into the heatmap up to this many columns.
const HEATMAP_ANNOTATE_MAX: usize = 12;
const MAX_IMAGE_SIDE: u32 = 2000;
const LABEL_CHARS: usize = 14;

/// Register the bundled font under [`FONT_FAMILY`]. Text cannot be drawn
/// before this succeeds.
pub(crate) fn ensure_font() -> Result<()> {
    let registered = *FONT_REGISTERED
        .get_or_init(|| register_font(FONT_FAMILY, FontStyle::Normal, CHART_FONT).is_ok());
    if registered {
        Ok(())
    } else {
        Err(anyhow!("bundled chart font could not be loaded"))
    }
}

/// Equal-width bin counts over `[min, max]`. A single distinct value gets a
/// unit-wide range centered on it.
pub(crate) fn histogram_bins(values: &[f64], bins: usize) -> Option<(f64, f64, Vec<usize>)> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || bins == 0 {
        return None;
    }

    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if min == max {
        (min - 0.5, max + 0.5)
    } else {
        (min, max)
    };

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in finite {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    Some((lo, hi, counts))
}

pub fn render_histogram(path: &Path, column: &str, series: &Series) -> Result<bool> {
    let values: Vec<f64> = numeric_values(series)?.into_iter().flatten().collect();
    let Some((lo, hi, counts)) = histogram_bins(&values, HISTOGRAM_BINS) else {
        return Ok(false);
    };

    ensure_font()?;

    let width = (hi - lo) / HISTOGRAM_BINS as f64;
    let y_max = counts.iter().copied().max().unwrap_or(0).max(1);

    let root = BitMapBackend::new(path, HISTOGRAM_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(format!("Histogram: {}", column), (FONT_FAMILY, 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(lo..hi, 0usize..(y_max + y_max / 10 + 1))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(column)
        .y_desc("count")
        .draw()?;

    chart.draw_series(counts.iter().enumerate().map(|(i, &count)| {
        let x0 = lo + i as f64 * width;
        Rectangle::new([(x0, 0), (x0 + width, count)], BLUE.mix(0.6).filled())
    }))?;

    root.present()?;
    Ok(true)
}

/// Per-column missing flags folded into at most `max_rows` row buckets; a
/// bucket is missing when any of its rows is.
pub(crate) fn missing_buckets(masks: &[Vec<bool>], n_rows: usize, max_rows: usize) -> Vec<Vec<bool>> {
    let bucket = n_rows.div_ceil(max_rows.max(1)).max(1);
    masks
        .iter()
        .map(|mask| mask.chunks(bucket).map(|c| c.iter().any(|m| *m)).collect())
        .collect()
}

fn missing_mask(series: &Series) -> PolarsResult<Vec<bool>> {
    if is_float_dtype(series.dtype()) {
        Ok(numeric_values(series)?.iter().map(Option::is_none).collect())
    } else {
        Ok(string_values(series)?.iter().map(Option::is_none).collect())
    }
}

pub fn render_missing_matrix(path: &Path, df: &DataFrame) -> Result<bool> {
    if df.width() == 0 || df.height() == 0 {
        return Ok(false);
    }

    ensure_font()?;

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| truncate_str(n.as_str(), LABEL_CHARS))
        .collect();
    let masks = df
        .get_columns()
        .iter()
        .map(|c| missing_mask(c.as_materialized_series()))
        .collect::<PolarsResult<Vec<_>>>()?;
    let cells = missing_buckets(&masks, df.height(), MATRIX_MAX_ROWS);

    let n_cols = names.len() as i32;
    let n_buckets = cells.first().map(Vec::len).unwrap_or(0) as i32;
    let width = (160 + 50 * names.len() as u32).clamp(500, MAX_IMAGE_SIDE);

    let root = BitMapBackend::new(path, (width, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Missing values (dark = missing)", (FONT_FAMILY, 24))
        .margin(10)
        .top_x_label_area_size(80)
        .y_label_area_size(60)
        .build_cartesian_2d(0i32..n_cols, n_buckets..0i32)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(names.len())
        .x_label_offset(20)
        .x_label_formatter(&|x| names.get(*x as usize).cloned().unwrap_or_default())
        .y_desc("row")
        .draw()?;

    let missing_color = RGBColor(40, 40, 40);
    let present_color = RGBColor(225, 230, 240);
    chart.draw_series(cells.iter().zip(0..).flat_map(|(col, x)| {
        col.iter().zip(0..).map(move |(&missing, y)| {
            let color = if missing { missing_color } else { present_color };
            Rectangle::new([(x, y), (x + 1, y + 1)], color.filled())
        })
    }))?;

    root.present()?;
    Ok(true)
}

/// Diverging color: blue for -1, white for 0, red for +1, grey for NaN.
pub(crate) fn correlation_color(r: f64) -> RGBColor {
    if r.is_nan() {
        return RGBColor(190, 190, 190);
    }
    let t = r.clamp(-1.0, 1.0);
    let fade = |c: u8| (255.0 - (255.0 - c as f64) * t.abs()).round() as u8;
    if t >= 0.0 {
        RGBColor(fade(214), fade(39), fade(40))
    } else {
        RGBColor(fade(31), fade(119), fade(180))
    }
}

pub fn render_correlation_heatmap(path: &Path, corr: &CorrelationMatrix) -> Result<bool> {
    if corr.is_empty() {
        return Ok(false);
    }

    ensure_font()?;

    let names: Vec<String> = corr
        .columns
        .iter()
        .map(|n| truncate_str(n, LABEL_CHARS))
        .collect();
    let n = names.len() as i32;
    let side = (200 + 60 * names.len() as u32).clamp(500, MAX_IMAGE_SIDE);

    let root = BitMapBackend::new(path, (side, side)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Correlation (Pearson)", (FONT_FAMILY, 24))
        .margin(10)
        .top_x_label_area_size(80)
        .y_label_area_size(110)
        .build_cartesian_2d(0i32..n, n..0i32)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .disable_y_mesh()
        .x_labels(names.len())
        .y_labels(names.len())
        .x_label_offset(25)
        .y_label_offset(20)
        .x_label_formatter(&|x| names.get(*x as usize).cloned().unwrap_or_default())
        .y_label_formatter(&|y| names.get(*y as usize).cloned().unwrap_or_default())
        .draw()?;

    chart.draw_series(corr.values.iter().zip(0..).flat_map(|(row, y)| {
        row.iter().zip(0..).map(move |(&r, x)| {
            Rectangle::new([(x, y), (x + 1, y + 1)], correlation_color(r).filled())
        })
    }))?;

    if corr.len() <= HEATMAP_ANNOTATE_MAX {
        chart.draw_series(corr.values.iter().zip(0..).flat_map(|(row, y)| {
            row.iter().zip(0..).map(move |(&r, x)| {
                let label = if r.is_nan() {
                    "NaN".to_string()
                } else {
                    format!("{:.2}", r)
                };
                EmptyElement::at((x, y)) + Text::new(label, (8, 8), (FONT_FAMILY, 14).into_font())
            })
        }))?;
    }

    root.present()?;
    Ok(true)
}
