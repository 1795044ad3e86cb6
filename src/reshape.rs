//! Data reshaper: wide World Bank CSV → country-indexed and year-indexed views.
//!
//! ### Steps
//! 1. Skip the metadata lines and read the header row.
//! 2. Keep rows whose country *and* indicator are in the [`Selection`].
//! 3. Drop the code columns.
//! 4. Drop every year column with a missing value in any kept row.
//! 5. Key rows by (country, indicator) → [`CountryIndexedView`].
//! 6. Permute axes → [`YearIndexedView`].
//!
//! Step 4 is whole-table: one gap in one series removes that year from every
//! series.
//!
//! ### Example
//! ```no_run
//! use wdi_agri::config::Selection;
//! use wdi_agri::reshape::read_views;
//!
//! let (by_country, by_year) = read_views("API_19_DS2_en_csv_v2_5998250.csv", &Selection::default())?;
//! println!("{} series over {} years", by_country.len(), by_year.years().len());
//! # Ok::<(), wdi_agri::Error>(())
//! ```

use crate::config::{
    COUNTRY_CODE, COUNTRY_NAME, INDICATOR_CODE, INDICATOR_NAME, METADATA_LINES, Selection,
};
use crate::error::{Error, Result};
use crate::models::{CountryIndexedView, RawRecord, RawTable, SeriesKey, YearIndexedView};
use csv::{ReaderBuilder, StringRecord};
use log::{debug, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Cell spellings treated as a missing observation.
const MISSING_MARKERS: [&str; 5] = ["", "NA", "NaN", "N/A", ".."];

/// Read `path` and build both views.
pub fn read_views<P: AsRef<Path>>(
    path: P,
    selection: &Selection,
) -> Result<(CountryIndexedView, YearIndexedView)> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_views_from_reader(BufReader::new(file), selection)
}

/// Same as [`read_views`] over any buffered reader.
pub fn read_views_from_reader<R: BufRead>(
    reader: R,
    selection: &Selection,
) -> Result<(CountryIndexedView, YearIndexedView)> {
    let table = read_raw_table(reader)?;
    reshape(table, selection)
}

/// Parse the wide CSV without filtering.
pub fn read_raw_table<R: BufRead>(mut reader: R) -> Result<RawTable> {
    skip_lines(&mut reader, METADATA_LINES)?;

    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(Error::MissingHeader {
            expected: METADATA_LINES,
        });
    }

    let country_name = column_index(&headers, COUNTRY_NAME)?;
    let country_code = column_index(&headers, COUNTRY_CODE)?;
    let indicator_name = column_index(&headers, INDICATOR_NAME)?;
    let indicator_code = column_index(&headers, INDICATOR_CODE)?;
    let named = [country_name, country_code, indicator_name, indicator_code];

    // (column index, year)
    let mut year_cols: Vec<(usize, i32)> = Vec::new();
    for (idx, label) in headers.iter().enumerate() {
        let label = label.trim();
        if named.contains(&idx) || label.is_empty() {
            continue;
        }
        match label.parse::<i32>() {
            Ok(year) => year_cols.push((idx, year)),
            Err(_) => warn!("ignoring non-year column `{label}`"),
        }
    }

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let field = |idx: usize| record.get(idx).unwrap_or("").trim().to_string();

        let mut values = Vec::with_capacity(year_cols.len());
        for &(idx, year) in &year_cols {
            let raw = record.get(idx).unwrap_or("");
            values.push(parse_value(raw).ok_or_else(|| Error::InvalidValue {
                line,
                column: year.to_string(),
                value: raw.to_string(),
            })?);
        }

        records.push(RawRecord {
            country_name: field(country_name),
            country_code: field(country_code),
            indicator_name: field(indicator_name),
            indicator_code: field(indicator_code),
            values,
        });
    }

    Ok(RawTable {
        years: year_cols.into_iter().map(|(_, y)| y).collect(),
        records,
    })
}

/// Filter, drop incomplete years and pivot a parsed table.
pub fn reshape(
    table: RawTable,
    selection: &Selection,
) -> Result<(CountryIndexedView, YearIndexedView)> {
    let RawTable { years, records } = table;
    let total = records.len();
    let retained = filter_records(records, selection);
    debug!("retained {} of {} rows", retained.len(), total);

    let keep = complete_years(years.len(), &retained);
    if keep.len() < years.len() {
        warn!(
            "dropped {} of {} year columns with missing values",
            years.len() - keep.len(),
            years.len()
        );
    }

    let kept_years: Vec<i32> = keep.iter().map(|&i| years[i]).collect();
    let rows: Vec<(SeriesKey, Vec<f64>)> = retained
        .into_iter()
        .map(|r| {
            let values = keep
                .iter()
                .filter_map(|&i| r.values.get(i).copied().flatten())
                .collect();
            (SeriesKey::new(r.country_name, r.indicator_name), values)
        })
        .collect();

    let by_country = CountryIndexedView::new(kept_years, rows)?;
    let by_year = by_country.to_year_indexed();
    Ok((by_country, by_year))
}

/// Keep records whose country and indicator are both selected.
pub fn filter_records(records: Vec<RawRecord>, selection: &Selection) -> Vec<RawRecord> {
    records
        .into_iter()
        .filter(|r| selection.accepts(&r.country_name, &r.indicator_name))
        .collect()
}

/// Indices of year columns with a value in every record.
pub fn complete_years(n_years: usize, records: &[RawRecord]) -> Vec<usize> {
    (0..n_years)
        .filter(|&i| {
            records
                .iter()
                .all(|r| r.values.get(i).copied().flatten().is_some())
        })
        .collect()
}

fn skip_lines<R: BufRead>(reader: &mut R, n: usize) -> Result<()> {
    let mut buf = Vec::new();
    for _ in 0..n {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Err(Error::MissingHeader { expected: n });
        }
    }
    Ok(())
}

fn column_index(headers: &StringRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| Error::MissingColumn(name.to_string()))
}

/// `Some(None)` for a missing marker, `Some(Some(v))` for a number, `None`
/// when the cell is not numeric.
fn parse_value(raw: &str) -> Option<Option<f64>> {
    let s = raw.trim();
    if MISSING_MARKERS.contains(&s) {
        return Some(None);
    }
    let v = s.parse::<f64>().ok()?;
    Some(if v.is_nan() { None } else { Some(v) })
}
