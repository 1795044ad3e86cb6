//! The report pipeline: reshape once, then run each reporting step in order.
//!
//! ```no_run
//! use wdi_agri::config::ReportConfig;
//!
//! let outcome = wdi_agri::report::run(&ReportConfig::default())?;
//! for path in &outcome.written {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::config::{
    self, AGRICULTURAL_LAND, AGRICULTURAL_LAND_FILE, CEREAL_FILE, CEREAL_INDICATORS,
    IRRIGATED_LAND, IRRIGATED_LAND_FILE, ReportConfig, STATISTICAL_FILE,
};
use crate::models::{CountryIndexedView, YearIndexedView};
use crate::reshape::read_views;
use crate::stats::{CountrySummary, summarize_country};
use crate::storage;
use crate::viz::{self, BarGrid, ColorMap, Heatmap, SpreadChart, TrendChart};
use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

/// Files produced by [`run`], in the order they were written.
#[derive(Debug, Clone, Default)]
pub struct ReportOutcome {
    pub written: Vec<PathBuf>,
}

/// Run the whole report. Any failing step aborts the run.
pub fn run(config: &ReportConfig) -> Result<ReportOutcome> {
    let (by_country, by_year) = read_views(&config.input, &config.selection)
        .with_context(|| format!("reshaping {}", config.input.display()))?;
    info!(
        "reshaped {} series over {} years",
        by_country.len(),
        by_country.years().len()
    );
    viz::fonts::ensure_fonts_registered()?;

    let mut outcome = ReportOutcome::default();
    let mut wrote = |path: PathBuf| {
        info!("wrote {}", path.display());
        outcome.written.push(path);
    };

    let path = config.output_path(CEREAL_FILE);
    cereal_precipitation(&by_country, &config.cereal_years, &path)?;
    wrote(path);

    let path = config.output_path(IRRIGATED_LAND_FILE);
    irrigated_land(&by_country, &path)?;
    wrote(path);

    let path = config.output_path(AGRICULTURAL_LAND_FILE);
    agricultural_land(&by_country, &path)?;
    wrote(path);

    for (country, cmap) in &config.heatmaps {
        let path = config.output_path(&config::correlation_file_name(country));
        correlation_heatmap(&by_country, country, cmap, &path)?;
        wrote(path);
    }

    let path = config.output_path(STATISTICAL_FILE);
    let summary = statistical_summary(&by_year, &config.stats_country, &path)?;
    wrote(path);

    if let Some(dir) = &config.export_dir {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        let csv_path = dir.join("country_indexed.csv");
        storage::save_view_csv(&by_country, &csv_path)?;
        wrote(csv_path);
        let json_path = dir.join(format!("statistics_{}.json", summary.country));
        storage::save_summary_json(&summary, &json_path)?;
        wrote(json_path);
    }

    Ok(outcome)
}

/// 2×2 grid of grouped bars comparing cereal yield and precipitation per
/// country, one panel per year.
pub fn cereal_precipitation(view: &CountryIndexedView, years: &[i32], out: &Path) -> Result<()> {
    let grid = BarGrid::for_years(
        view,
        "Average Precipitation vs Cereal Yield",
        years,
        &CEREAL_INDICATORS,
    )?;
    viz::render(&grid, out).with_context(|| format!("rendering {}", out.display()))
}

/// One line per country for `indicator` across the retained years.
pub fn indicator_trend(view: &CountryIndexedView, indicator: &str, out: &Path) -> Result<()> {
    let chart = TrendChart::for_indicator(view, indicator)?;
    viz::render(&chart, out).with_context(|| format!("rendering {}", out.display()))
}

pub fn irrigated_land(view: &CountryIndexedView, out: &Path) -> Result<()> {
    indicator_trend(view, IRRIGATED_LAND, out)
}

pub fn agricultural_land(view: &CountryIndexedView, out: &Path) -> Result<()> {
    indicator_trend(view, AGRICULTURAL_LAND, out)
}

/// Heatmap of the correlation between `country`'s indicators across years.
pub fn correlation_heatmap(
    view: &CountryIndexedView,
    country: &str,
    color_map: &str,
    out: &Path,
) -> Result<()> {
    let cmap: ColorMap = color_map.parse()?;
    let heatmap = Heatmap::for_country(view, country, cmap)?;
    viz::render(&heatmap, out).with_context(|| format!("rendering {}", out.display()))
}

/// Print descriptive statistics of `country`'s indicators and chart the
/// per-year mean and standard deviation across them.
pub fn statistical_summary(view: &YearIndexedView, country: &str, out: &Path) -> Result<CountrySummary> {
    let frame = view.country_frame(country)?;
    let summary = summarize_country(&frame);
    print!("{summary}");

    let chart = SpreadChart::new(country, summary.per_year.clone());
    viz::render(&chart, out).with_context(|| format!("rendering {}", out.display()))?;
    Ok(summary)
}
