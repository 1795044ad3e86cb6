//! wdi_agri
//!
//! Reshape a World Bank indicator CSV (wide format, one column per year) into
//! two pivoted views and render an agricultural indicator report from them.
//! Pairs with the `agri-report` binary.
//!
//! ### Features
//! - Filter to a fixed set of countries and indicators, dropping incomplete years
//! - Country-indexed view: (country, indicator) × year
//! - Year-indexed view: year × country × indicator
//! - Grouped bar grid, trend lines, correlation heatmaps, statistics chart (PNG/SVG)
//! - Descriptive statistics (count, mean, std, quartiles) and tidy CSV/JSON export
//!
//! ### Example
//! ```no_run
//! use wdi_agri::config::Selection;
//! use wdi_agri::reshape::read_views;
//!
//! let (by_country, by_year) = read_views("API_19_DS2_en_csv_v2_5998250.csv", &Selection::default())?;
//! let india = by_year.country_frame("India")?;
//! println!("{}", wdi_agri::stats::summarize_country(&india));
//! wdi_agri::report::irrigated_land(&by_country, "irrigated_land.png".as_ref())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod reshape;
pub mod stats;
pub mod storage;
pub mod viz;

pub use error::Error;
pub use models::{CountryIndexedView, SeriesKey, YearIndexedView};
