use crate::models::CountryIndexedView;
use crate::stats::CountrySummary;
use anyhow::Result;
use csv::WriterBuilder;
use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Prefix text cells that a spreadsheet would evaluate as a formula.
fn sanitize_cell(s: &str) -> Cow<'_, str> {
    match s.chars().next() {
        Some('=' | '+' | '-' | '@' | '\t' | '\r') => Cow::Owned(format!("'{s}")),
        _ => Cow::Borrowed(s),
    }
}

/// Save the country-indexed view as tidy CSV, one row per (country, indicator, year).
pub fn save_view_csv<P: AsRef<Path>>(view: &CountryIndexedView, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("country_name", "indicator_name", "year", "value"))?;
    for (key, values) in view.rows() {
        for (year, value) in view.years().iter().zip(values) {
            wtr.serialize((
                sanitize_cell(&key.country),
                sanitize_cell(&key.indicator),
                year,
                value,
            ))?;
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Save a country summary as pretty JSON.
pub fn save_summary_json<P: AsRef<Path>>(summary: &CountrySummary, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(summary)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeriesKey;
    use tempfile::tempdir;

    #[test]
    fn tidy_csv_has_one_row_per_cell() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("view.csv");
        let view = CountryIndexedView::new(
            vec![2005, 2010],
            vec![
                (SeriesKey::new("India", "Forest"), vec![1.0, 2.0]),
                (SeriesKey::new("Spain", "Forest"), vec![3.0, 4.0]),
            ],
        )
        .unwrap();
        save_view_csv(&view, &path).unwrap();
        let txt = std::fs::read_to_string(&path).unwrap();
        assert!(txt.starts_with("country_name,indicator_name,year,value"));
        assert_eq!(txt.lines().count(), 1 + 4);
        assert!(txt.contains("Spain,Forest,2010,4.0"));
    }

    #[test]
    fn formula_like_cells_are_prefixed() {
        assert_eq!(sanitize_cell("=SUM(A1)"), "'=SUM(A1)");
        assert_eq!(sanitize_cell("India"), "India");
    }
}
