use crate::error::{Error, Result};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One row of the wide World Bank CSV: a (country, indicator) pair with one
/// optional value per year column of the enclosing [`RawTable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub country_name: String,
    pub country_code: String,
    pub indicator_name: String,
    pub indicator_code: String,
    pub values: Vec<Option<f64>>,
}

/// Parsed wide CSV: year columns in header order plus every data row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub years: Vec<i32>,
    pub records: Vec<RawRecord>,
}

/// Composite row key of the country-indexed view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeriesKey {
    pub country: String,
    pub indicator: String,
}

impl SeriesKey {
    pub fn new(country: impl Into<String>, indicator: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            indicator: indicator.into(),
        }
    }
}

/// Table keyed by (country, indicator) with one column per retained year.
///
/// Rows keep the order of the source file. Every row holds a value for every
/// year column.
#[derive(Debug, Clone, Default)]
pub struct CountryIndexedView {
    years: Vec<i32>,
    rows: Vec<(SeriesKey, Vec<f64>)>,
    index: AHashMap<SeriesKey, usize>,
}

impl CountryIndexedView {
    /// Build the view, rejecting duplicate keys.
    ///
    /// Each row must have exactly one value per entry of `years`.
    pub fn new(years: Vec<i32>, rows: Vec<(SeriesKey, Vec<f64>)>) -> Result<Self> {
        let mut index = AHashMap::with_capacity(rows.len());
        for (pos, (key, values)) in rows.iter().enumerate() {
            debug_assert_eq!(values.len(), years.len());
            if index.insert(key.clone(), pos).is_some() {
                return Err(Error::DuplicateSeries {
                    country: key.country.clone(),
                    indicator: key.indicator.clone(),
                });
            }
        }
        Ok(Self { years, rows, index })
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn rows(&self) -> impl Iterator<Item = (&SeriesKey, &[f64])> {
        self.rows.iter().map(|(k, v)| (k, v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct country names, sorted.
    pub fn countries(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.rows.iter().map(|(k, _)| k.country.as_str()).collect();
        set.into_iter().collect()
    }

    /// Distinct indicator names, sorted.
    pub fn indicators(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.rows.iter().map(|(k, _)| k.indicator.as_str()).collect();
        set.into_iter().collect()
    }

    fn year_position(&self, year: i32) -> Result<usize> {
        self.years
            .iter()
            .position(|y| *y == year)
            .ok_or(Error::UnknownYear(year))
    }

    /// Values of one series, aligned with [`years`](Self::years).
    pub fn row(&self, country: &str, indicator: &str) -> Result<&[f64]> {
        let key = SeriesKey::new(country, indicator);
        self.index
            .get(&key)
            .map(|&pos| self.rows[pos].1.as_slice())
            .ok_or(Error::UnknownSeries {
                country: key.country,
                indicator: key.indicator,
            })
    }

    pub fn value(&self, country: &str, indicator: &str, year: i32) -> Result<f64> {
        let col = self.year_position(year)?;
        Ok(self.row(country, indicator)?[col])
    }

    /// One year column: every series with its value, in row order.
    pub fn column(&self, year: i32) -> Result<Vec<(&SeriesKey, f64)>> {
        let col = self.year_position(year)?;
        Ok(self.rows.iter().map(|(k, v)| (k, v[col])).collect())
    }

    /// All series of one country as (indicator, values), in row order.
    pub fn country_rows(&self, country: &str) -> Result<Vec<(&str, &[f64])>> {
        let rows: Vec<(&str, &[f64])> = self
            .rows
            .iter()
            .filter(|(k, _)| k.country == country)
            .map(|(k, v)| (k.indicator.as_str(), v.as_slice()))
            .collect();
        if rows.is_empty() {
            return Err(Error::UnknownCountry(country.to_string()));
        }
        Ok(rows)
    }

    /// All series of one indicator as (country, values), in row order.
    /// Empty when the indicator was filtered out.
    pub fn indicator_rows(&self, indicator: &str) -> Vec<(&str, &[f64])> {
        self.rows
            .iter()
            .filter(|(k, _)| k.indicator == indicator)
            .map(|(k, v)| (k.country.as_str(), v.as_slice()))
            .collect()
    }

    /// Permute axes: year becomes the row key, country the outer column and
    /// indicator the inner column.
    pub fn to_year_indexed(&self) -> YearIndexedView {
        let mut cells: BTreeMap<i32, BTreeMap<String, BTreeMap<String, f64>>> = self
            .years
            .iter()
            .map(|y| (*y, BTreeMap::new()))
            .collect();
        for (key, values) in &self.rows {
            for (year, value) in self.years.iter().zip(values) {
                if let Some(by_country) = cells.get_mut(year) {
                    by_country
                        .entry(key.country.clone())
                        .or_default()
                        .insert(key.indicator.clone(), *value);
                }
            }
        }
        YearIndexedView {
            years: self.years.clone(),
            cells,
        }
    }
}

/// Table keyed by year whose columns are countries, each nesting one
/// sub-column per indicator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearIndexedView {
    years: Vec<i32>,
    cells: BTreeMap<i32, BTreeMap<String, BTreeMap<String, f64>>>,
}

impl YearIndexedView {
    /// Year keys, in the column order of the country-indexed view.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Outer column labels, sorted.
    pub fn countries(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self
            .cells
            .values()
            .flat_map(|by_country| by_country.keys().map(String::as_str))
            .collect();
        set.into_iter().collect()
    }

    /// Inner column labels under one country, sorted.
    pub fn indicators(&self, country: &str) -> Result<Vec<&str>> {
        let set: BTreeSet<&str> = self
            .cells
            .values()
            .filter_map(|by_country| by_country.get(country))
            .flat_map(|by_ind| by_ind.keys().map(String::as_str))
            .collect();
        if set.is_empty() {
            return Err(Error::UnknownCountry(country.to_string()));
        }
        Ok(set.into_iter().collect())
    }

    pub fn value(&self, year: i32, country: &str, indicator: &str) -> Result<f64> {
        let by_country = self.cells.get(&year).ok_or(Error::UnknownYear(year))?;
        let by_ind = by_country
            .get(country)
            .ok_or_else(|| Error::UnknownCountry(country.to_string()))?;
        by_ind
            .get(indicator)
            .copied()
            .ok_or_else(|| Error::UnknownSeries {
                country: country.to_string(),
                indicator: indicator.to_string(),
            })
    }

    /// Select one country's column block as an indicator × year matrix.
    pub fn country_frame(&self, country: &str) -> Result<CountryFrame> {
        let indicators: Vec<String> = self
            .indicators(country)?
            .into_iter()
            .map(str::to_string)
            .collect();
        let mut values = Vec::with_capacity(indicators.len());
        for indicator in &indicators {
            let row = self
                .years
                .iter()
                .map(|&y| self.value(y, country, indicator))
                .collect::<Result<Vec<f64>>>()?;
            values.push(row);
        }
        Ok(CountryFrame {
            country: country.to_string(),
            years: self.years.clone(),
            indicators,
            values,
        })
    }
}

/// One country's data: `values[i][j]` is indicator `i` in year `j`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryFrame {
    pub country: String,
    pub years: Vec<i32>,
    pub indicators: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CountryFrame {
    /// Values of every indicator in the year at column `col`.
    pub fn year_values(&self, col: usize) -> Vec<f64> {
        self.values.iter().map(|row| row[col]).collect()
    }
}
