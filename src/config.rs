//! Named constants for the agricultural indicator report and the
//! [`ReportConfig`] that bundles them.
//!
//! The country and indicator lists are the only selection knobs; everything
//! else (plotted years, file names, heatmap colormaps) is fixed report layout.

use std::path::{Path, PathBuf};

/// Default input file: the World Bank "Agriculture & Rural Development" bulk CSV.
pub const DEFAULT_INPUT: &str = "API_19_DS2_en_csv_v2_5998250.csv";

/// Title/source lines preceding the header row in World Bank bulk CSVs.
pub const METADATA_LINES: usize = 4;

pub const COUNTRY_NAME: &str = "Country Name";
pub const COUNTRY_CODE: &str = "Country Code";
pub const INDICATOR_NAME: &str = "Indicator Name";
pub const INDICATOR_CODE: &str = "Indicator Code";

pub const CEREAL_YIELD: &str = "Cereal yield (kg per hectare)";
pub const AVG_PRECIPITATION: &str = "Average precipitation in depth (mm per year)";
pub const IRRIGATED_LAND: &str = "Agricultural irrigated land (% of total agricultural land)";
pub const AGRICULTURAL_LAND: &str = "Agricultural land (% of land area)";
pub const ARABLE_LAND: &str = "Arable land (% of land area)";
pub const FOREST_AREA: &str = "Forest area (% of land area)";

/// Indicators retained by the reshaper.
pub const INDICATORS: [&str; 6] = [
    CEREAL_YIELD,
    AVG_PRECIPITATION,
    IRRIGATED_LAND,
    AGRICULTURAL_LAND,
    ARABLE_LAND,
    FOREST_AREA,
];

/// Countries retained by the reshaper.
pub const COUNTRIES: [&str; 10] = [
    "Australia",
    "Spain",
    "India",
    "Pakistan",
    "Afghanistan",
    "Azerbaijan",
    "Jordan",
    "Kyrgyz Republic",
    "Romania",
    "Slovenia",
];

/// Years shown in the cereal/precipitation bar grid (row-major, 2×2).
pub const CEREAL_YEARS: [i32; 4] = [2005, 2010, 2015, 2020];

/// Indicators compared in the cereal/precipitation bar grid.
pub const CEREAL_INDICATORS: [&str; 2] = [CEREAL_YIELD, AVG_PRECIPITATION];

pub const CEREAL_FILE: &str = "cereal.png";
pub const IRRIGATED_LAND_FILE: &str = "irrigated_land.png";
pub const AGRICULTURAL_LAND_FILE: &str = "agricultural_land.png";
pub const STATISTICAL_FILE: &str = "statistical.png";

/// Country whose statistics are printed and charted.
pub const STATS_COUNTRY: &str = "India";

/// Correlation heatmaps rendered by default: (country, colormap name).
pub const HEATMAPS: [(&str, &str); 2] = [("India", "Wistia"), ("Australia", "tab20b")];

/// File name of a correlation heatmap. The space before the extension is part
/// of the published file names.
pub fn correlation_file_name(country: &str) -> String {
    format!("correlation {country} .png")
}

/// Allow-lists applied to the raw records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub countries: Vec<String>,
    pub indicators: Vec<String>,
}

impl Selection {
    pub fn new<C, I>(countries: C, indicators: I) -> Self
    where
        C: IntoIterator,
        C::Item: Into<String>,
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            countries: countries.into_iter().map(Into::into).collect(),
            indicators: indicators.into_iter().map(Into::into).collect(),
        }
    }

    /// Both predicates apply conjunctively.
    pub fn accepts(&self, country: &str, indicator: &str) -> bool {
        self.countries.iter().any(|c| c == country)
            && self.indicators.iter().any(|i| i == indicator)
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(COUNTRIES, INDICATORS)
    }
}

/// Everything one report run needs.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    pub selection: Selection,
    pub cereal_years: Vec<i32>,
    pub heatmaps: Vec<(String, String)>,
    pub stats_country: String,
    /// When set, the country-indexed view and the statistics summary are
    /// also written here as CSV/JSON.
    pub export_dir: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            out_dir: PathBuf::from("."),
            selection: Selection::default(),
            cereal_years: CEREAL_YEARS.to_vec(),
            heatmaps: HEATMAPS
                .iter()
                .map(|(c, m)| (c.to_string(), m.to_string()))
                .collect(),
            stats_country: STATS_COUNTRY.to_string(),
            export_dir: None,
        }
    }
}

impl ReportConfig {
    /// Path of an output file inside `out_dir`.
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.out_dir.join(file_name)
    }

    pub fn with_paths(mut self, input: impl AsRef<Path>, out_dir: impl AsRef<Path>) -> Self {
        self.input = input.as_ref().to_path_buf();
        self.out_dir = out_dir.as_ref().to_path_buf();
        self
    }
}
