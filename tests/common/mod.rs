#![allow(dead_code)]

use std::fmt::Write as _;

pub const PREAMBLE: &str = "\u{feff}\"Data Source\",\"World Development Indicators\",\n\n\"Last Updated Date\",\"2023-12-18\",\n\n";

/// Builder for synthetic World Bank bulk CSVs.
pub struct WideCsv {
    years: Vec<i32>,
    rows: Vec<(String, String, Vec<Option<f64>>)>,
}

impl WideCsv {
    pub fn new(years: &[i32]) -> Self {
        Self {
            years: years.to_vec(),
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, country: &str, indicator: &str, values: &[Option<f64>]) -> Self {
        assert_eq!(values.len(), self.years.len());
        self.rows
            .push((country.to_string(), indicator.to_string(), values.to_vec()));
        self
    }

    /// Every country × indicator, with a distinct smooth value per cell.
    pub fn grid(mut self, countries: &[&str], indicators: &[&str]) -> Self {
        for (ci, c) in countries.iter().enumerate() {
            for (ii, i) in indicators.iter().enumerate() {
                let vals: Vec<Option<f64>> = self
                    .years
                    .iter()
                    .enumerate()
                    .map(|(yi, _)| {
                        let base = 10.0 * (ci + 1) as f64 + (ii + 1) as f64;
                        Some(base + (yi as f64) * (ii as f64 + 0.5) + ((yi * (ci + 2)) % 5) as f64)
                    })
                    .collect();
                self.rows.push((c.to_string(), i.to_string(), vals));
            }
        }
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::from(PREAMBLE);
        out.push_str("\"Country Name\",\"Country Code\",\"Indicator Name\",\"Indicator Code\",");
        for y in &self.years {
            write!(out, "\"{y}\",").unwrap();
        }
        out.push('\n');
        for (country, indicator, vals) in &self.rows {
            let code: String = country.chars().take(3).collect::<String>().to_uppercase();
            write!(out, "\"{country}\",\"{code}\",\"{indicator}\",\"IND.{code}\",").unwrap();
            for v in vals {
                match v {
                    Some(v) => write!(out, "\"{v}\",").unwrap(),
                    None => out.push_str("\"\","),
                }
            }
            out.push('\n');
        }
        out
    }

    pub fn write_to(&self, path: &std::path::Path) {
        std::fs::write(path, self.render()).unwrap();
    }
}
