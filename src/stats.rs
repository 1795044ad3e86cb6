use crate::error::Result;
use crate::models::{CountryFrame, CountryIndexedView};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;
use std::fmt;

/// Descriptive statistics of one series.
///
/// `std` is the sample standard deviation (n − 1) and is `None` below two
/// observations; quartiles use linear interpolation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Describe {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub q50: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

pub fn describe(values: &[f64]) -> Describe {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    sorted.sort_by(f64::total_cmp);
    let q = |p: f64| quantile(&sorted, p);
    Describe {
        count: sorted.len(),
        mean: mean(&sorted),
        std: sample_std(&sorted),
        min: sorted.first().copied(),
        q25: q(0.25),
        q50: q(0.5),
        q75: q(0.75),
        max: sorted.last().copied(),
    }
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    finite(values.mean())
}

/// Sample standard deviation (n − 1); `None` below two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    finite(values.std_dev())
}

/// Quantile of an ascending slice, interpolating between neighbours.
fn quantile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64))
}

/// Pearson correlation; `None` when undefined (fewer than two pairs or a
/// constant series).
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let (mx, my) = (mean(xs)?, mean(ys)?);
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let (dx, dy) = (x - mx, y - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    let r = sxy / (sxx * syy).sqrt();
    r.is_finite().then(|| r.clamp(-1.0, 1.0))
}

/// Square, symmetric correlation matrix between labelled series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CorrelationMatrix {
    pub labels: Vec<String>,
    /// Row-major; undefined coefficients are stored as 0.0.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }

    /// Smallest and largest coefficient, (0, 0) when empty.
    pub fn range(&self) -> (f64, f64) {
        let mut it = self.values.iter().flatten().copied();
        let Some(first) = it.next() else {
            return (0.0, 0.0);
        };
        it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)))
    }
}

/// Pairwise Pearson correlation between `series` (each observed over the
/// same positions), coercing undefined coefficients to zero.
pub fn correlation_matrix(labels: Vec<String>, series: &[&[f64]]) -> CorrelationMatrix {
    let n = series.len();
    let mut values = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = pearson(series[i], series[j]).unwrap_or(0.0);
            let r = if i == j && r != 0.0 { 1.0 } else { r };
            values[i][j] = r;
            values[j][i] = r;
        }
    }
    CorrelationMatrix { labels, values }
}

/// Correlation between one country's indicators across the retained years.
pub fn country_correlation(view: &CountryIndexedView, country: &str) -> Result<CorrelationMatrix> {
    let rows = view.country_rows(country)?;
    let labels = rows.iter().map(|(ind, _)| ind.to_string()).collect();
    let series: Vec<&[f64]> = rows.iter().map(|(_, vals)| *vals).collect();
    Ok(correlation_matrix(labels, &series))
}

/// Mean and spread of one country's indicators within a single year.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct YearSpread {
    pub year: i32,
    pub mean: Option<f64>,
    pub std: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndicatorSummary {
    pub indicator: String,
    pub stats: Describe,
}

/// Statistics of one country: per indicator across years, and per year across
/// indicators.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CountrySummary {
    pub country: String,
    pub indicators: Vec<IndicatorSummary>,
    pub per_year: Vec<YearSpread>,
}

pub fn per_year_mean_std(frame: &CountryFrame) -> Vec<YearSpread> {
    frame
        .years
        .iter()
        .enumerate()
        .map(|(col, &year)| {
            let vals = frame.year_values(col);
            YearSpread {
                year,
                mean: mean(&vals),
                std: sample_std(&vals),
            }
        })
        .collect()
}

pub fn summarize_country(frame: &CountryFrame) -> CountrySummary {
    let indicators = frame
        .indicators
        .iter()
        .zip(&frame.values)
        .map(|(indicator, vals)| IndicatorSummary {
            indicator: indicator.clone(),
            stats: describe(vals),
        })
        .collect();
    CountrySummary {
        country: frame.country.clone(),
        indicators,
        per_year: per_year_mean_std(frame),
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => format!("{x:.4}"),
        _ => "NA".to_string(),
    }
}

const COLUMN_WIDTH: usize = 24;
const ROW_LABEL_WIDTH: usize = 5;

fn fit_label(s: &str) -> String {
    if s.chars().count() <= COLUMN_WIDTH {
        s.to_string()
    } else {
        let head: String = s.chars().take(COLUMN_WIDTH - 1).collect();
        format!("{head}…")
    }
}

impl Describe {
    /// (row label, value) in `describe` table order.
    pub fn rows(&self) -> [(&'static str, Option<f64>); 8] {
        [
            ("count", Some(self.count as f64)),
            ("mean", self.mean),
            ("std", self.std),
            ("min", self.min),
            ("25%", self.q25),
            ("50%", self.q50),
            ("75%", self.q75),
            ("max", self.max),
        ]
    }
}

/// One column per indicator, one row per statistic.
impl fmt::Display for CountrySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Descriptive statistics for {}", self.country)?;
        write!(f, "{:<w$}", "", w = ROW_LABEL_WIDTH)?;
        for s in &self.indicators {
            write!(f, " {:>w$}", fit_label(&s.indicator), w = COLUMN_WIDTH)?;
        }
        writeln!(f)?;
        let columns: Vec<_> = self.indicators.iter().map(|s| s.stats.rows()).collect();
        for row in 0..8 {
            let label = columns.first().map_or("", |c| c[row].0);
            write!(f, "{label:<w$}", w = ROW_LABEL_WIDTH)?;
            for col in &columns {
                write!(f, " {:>w$}", fmt_opt(col[row].1), w = COLUMN_WIDTH)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
