//! Chart rendering for aggregated commit activity.
//!
//! Two chart kinds over the same commit collection: a stacked per-period
//! bar chart with one segment per repository, and a whole-range pie chart
//! of commit share per repository. Both render to a raster image.

use clap::ValueEnum;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::core::aggregate::commits_per_repo_per_period;
use crate::core::period::{period_key, Period};
use crate::error::{ReportError, Result};
use crate::model::Commit;

const CHART_SIZE: (u32, u32) = (1200, 600);

/// Supported chart kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChartKind {
    /// Stacked per-period bars, one segment per repository
    Stats,
    /// Whole-range commit share per repository
    Summary,
}

fn chart_err(err: impl std::fmt::Display) -> ReportError {
    ReportError::Chart(err.to_string())
}

/// Raster backends key the encoder off the file extension; default to PNG
/// when the caller gave none.
fn with_png_extension(dest: &Path) -> PathBuf {
    if dest.extension().is_some() {
        dest.to_path_buf()
    } else {
        let mut name = dest.as_os_str().to_os_string();
        name.push(".png");
        PathBuf::from(name)
    }
}

fn palette_color(idx: usize) -> RGBColor {
    let (r, g, b) = Palette99::COLORS[idx % Palette99::COLORS.len()];
    RGBColor(r, g, b)
}

/// Renders one stacked bar per period between the first and last commit,
/// one segment per repository, non-zero segments labeled with their count.
/// Periods without commits show as explicit empty columns.
///
/// Precondition: `commits` sorted ascending by date. Fails with
/// [`ReportError::EmptyDataset`] on empty input.
pub fn plot_stats(
    commits: &[Commit],
    period: Period,
    author: &str,
    dest: &Path,
) -> Result<PathBuf> {
    if commits.is_empty() {
        return Err(ReportError::EmptyDataset);
    }

    let series = commits_per_repo_per_period(commits, period);
    let repos: BTreeSet<&str> = commits.iter().map(|c| c.repo_name.as_str()).collect();
    let periods: Vec<&String> = series.keys().collect();

    let max_total = series
        .values()
        .map(|per_repo| per_repo.values().sum::<usize>())
        .max()
        .unwrap_or(0) as u32;

    let dest = with_png_extension(dest);
    let root = BitMapBackend::new(&dest, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let title = format!("Commits per Repository ({period}) by <{author}>");
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(50)
        .build_cartesian_2d((0..periods.len()).into_segmented(), 0u32..max_total + 1)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(periods.len().min(20))
        .x_label_formatter(&|value| {
            let idx = match value {
                SegmentValue::Exact(i) | SegmentValue::CenterOf(i) => *i,
                SegmentValue::Last => periods.len(),
            };
            periods.get(idx).map(|key| key.to_string()).unwrap_or_default()
        })
        .x_desc("Period")
        .y_desc("Number of Commits")
        .draw()
        .map_err(chart_err)?;

    let label_style = TextStyle::from(("sans-serif", 14))
        .pos(Pos::new(HPos::Center, VPos::Center));
    let mut bottoms = vec![0u32; periods.len()];
    let mut count_labels = Vec::new();

    for (repo_idx, repo) in repos.iter().enumerate() {
        let color = palette_color(repo_idx);
        let mut bars = Vec::new();

        for (x, key) in periods.iter().enumerate() {
            let count = series[*key].get(*repo).copied().unwrap_or(0) as u32;
            if count == 0 {
                continue;
            }
            let (y0, y1) = (bottoms[x], bottoms[x] + count);
            let mut bar = Rectangle::new(
                [(SegmentValue::Exact(x), y0), (SegmentValue::Exact(x + 1), y1)],
                color.filled(),
            );
            bar.set_margin(0, 0, 3, 3);
            bars.push(bar);
            count_labels.push(Text::new(
                count.to_string(),
                (SegmentValue::CenterOf(x), y0 + count / 2),
                label_style.clone(),
            ));
            bottoms[x] = y1;
        }

        chart
            .draw_series(bars)
            .map_err(chart_err)?
            .label(repo.to_string())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
            });
    }

    chart.draw_series(count_labels).map_err(chart_err)?;
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .border_style(&BLACK)
        .background_style(&WHITE.mix(0.8))
        .draw()
        .map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(dest.clone())
}

/// Renders total commit share per repository as a pie chart, slices sorted
/// ascending by count and labeled with the absolute count next to the
/// repository name. The title states the inclusive date span covered.
///
/// Fails with [`ReportError::EmptyDataset`] on empty input.
pub fn plot_summary(commits: &[Commit], author: &str, dest: &Path) -> Result<PathBuf> {
    let (Some(min_date), Some(max_date)) = (
        commits.iter().map(|c| c.date).min(),
        commits.iter().map(|c| c.date).max(),
    ) else {
        return Err(ReportError::EmptyDataset);
    };

    let mut totals: Vec<(String, usize)> = {
        let mut per_repo = std::collections::BTreeMap::new();
        for commit in commits {
            *per_repo.entry(commit.repo_name.clone()).or_insert(0usize) += 1;
        }
        per_repo.into_iter().collect()
    };
    totals.sort_by_key(|(_, count)| *count);

    let sizes: Vec<f64> = totals.iter().map(|(_, count)| *count as f64).collect();
    let labels: Vec<String> = totals
        .iter()
        .map(|(repo, count)| format!("{repo}: {count}"))
        .collect();
    let colors: Vec<RGBColor> = (0..totals.len()).map(palette_color).collect();

    let dest = with_png_extension(dest);
    let root = BitMapBackend::new(&dest, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;

    let title = format!(
        "Commits per Repository (from {} to {}) by <{author}>",
        period_key(min_date, Period::Day),
        period_key(max_date, Period::Day),
    );
    let root = root
        .titled(&title, ("sans-serif", 24))
        .map_err(chart_err)?;

    let (width, height) = root.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = f64::from(width.min(height)) / 2.0 - 40.0;

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.label_style(("sans-serif", 16).into_font());
    root.draw(&pie).map_err(chart_err)?;

    root.present().map_err(chart_err)?;
    Ok(dest.clone())
}
