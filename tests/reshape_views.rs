mod common;

use common::WideCsv;
use std::io::Cursor;
use wdi_agri::config::{self, Selection};
use wdi_agri::reshape::{read_raw_table, read_views, read_views_from_reader};
use wdi_agri::{CountryIndexedView, Error, YearIndexedView};

const CEREAL: &str = config::CEREAL_YIELD;
const RAIN: &str = config::AVG_PRECIPITATION;

fn views(csv: &WideCsv) -> (CountryIndexedView, YearIndexedView) {
    read_views_from_reader(Cursor::new(csv.render()), &Selection::default()).unwrap()
}

#[test]
fn missing_value_drops_the_year_for_every_row() {
    let csv = WideCsv::new(&[2005, 2010])
        .row("India", CEREAL, &[Some(2600.0), Some(2900.0)])
        .row("India", RAIN, &[Some(1083.0), None])
        .row("Spain", CEREAL, &[Some(2900.0), Some(3400.0)])
        .row("Spain", RAIN, &[Some(636.0), Some(636.0)]);
    let (by_country, by_year) = views(&csv);

    assert_eq!(by_country.years(), &[2005]);
    assert_eq!(by_year.years(), &[2005]);
    assert_eq!(by_country.len(), 4);
    assert_eq!(by_country.value("Spain", CEREAL, 2005).unwrap(), 2900.0);
    assert!(matches!(
        by_country.value("Spain", CEREAL, 2010),
        Err(Error::UnknownYear(2010))
    ));
    assert!(matches!(
        by_year.value(2010, "Spain", CEREAL),
        Err(Error::UnknownYear(2010))
    ));
}

#[test]
fn rows_outside_the_selection_are_dropped() {
    let csv = WideCsv::new(&[2005, 2010])
        .row("India", CEREAL, &[Some(1.0), Some(2.0)])
        .row("Germany", CEREAL, &[Some(3.0), Some(4.0)])
        .row("India", "Population, total", &[Some(5.0), None])
        .row("World", "Forest area (% of land area)", &[None, None]);
    let (by_country, by_year) = views(&csv);

    let selection = Selection::default();
    for (key, _) in by_country.rows() {
        assert!(selection.accepts(&key.country, &key.indicator), "{key:?}");
    }
    assert_eq!(by_country.len(), 1);
    // the excluded rows' gaps do not remove any year
    assert_eq!(by_country.years(), &[2005, 2010]);
    assert_eq!(by_year.countries(), vec!["India"]);
    assert_eq!(by_year.indicators("India").unwrap(), vec![CEREAL]);
}

#[test]
fn retained_rows_keep_their_source_values() {
    let countries = config::COUNTRIES;
    let indicators = config::INDICATORS;
    let years = [2001, 2002, 2003, 2004];
    let csv = WideCsv::new(&years).grid(&countries, &indicators);
    let raw = read_raw_table(Cursor::new(csv.render())).unwrap();
    let (by_country, _) = views(&csv);

    assert_eq!(by_country.len(), countries.len() * indicators.len());
    for rec in &raw.records {
        let row = by_country
            .row(&rec.country_name, &rec.indicator_name)
            .unwrap();
        let expected: Vec<f64> = rec.values.iter().map(|v| v.unwrap()).collect();
        assert_eq!(row, expected.as_slice());
    }
}

#[test]
fn both_views_expose_the_same_values() {
    let csv = WideCsv::new(&[2000, 2005, 2010, 2015, 2020])
        .grid(&["Australia", "Jordan", "Slovenia"], &config::INDICATORS);
    let (by_country, by_year) = views(&csv);

    assert_eq!(by_country.years(), by_year.years());
    for (key, values) in by_country.rows() {
        for (year, v) in by_country.years().iter().zip(values) {
            assert_eq!(by_year.value(*year, &key.country, &key.indicator).unwrap(), *v);
        }
    }
    // and back: every cell of the year-indexed view exists in the country view
    for &year in by_year.years() {
        for country in by_year.countries() {
            for indicator in by_year.indicators(country).unwrap() {
                let v = by_year.value(year, country, indicator).unwrap();
                assert_eq!(by_country.value(country, indicator, year).unwrap(), v);
            }
        }
    }
}

#[test]
fn no_retained_year_has_a_gap() {
    let csv = WideCsv::new(&[1990, 1995, 2000, 2005])
        .row("Romania", CEREAL, &[None, Some(2.0), Some(3.0), Some(4.0)])
        .row("Romania", RAIN, &[Some(1.0), Some(2.0), Some(3.0), Some(4.0)])
        .row("Jordan", CEREAL, &[Some(1.0), Some(2.0), None, Some(4.0)]);
    let (by_country, _) = views(&csv);
    assert_eq!(by_country.years(), &[1995, 2005]);
    for (_, values) in by_country.rows() {
        assert_eq!(values.len(), 2);
        assert!(values.iter().all(|v| v.is_finite()));
    }
}

#[test]
fn nothing_selected_gives_empty_views_and_lookup_errors() {
    let csv = WideCsv::new(&[2005]).row("Germany", CEREAL, &[Some(1.0)]);
    let (by_country, by_year) = views(&csv);
    assert!(by_country.is_empty());
    assert!(by_year.countries().is_empty());
    assert!(matches!(
        by_year.country_frame("India"),
        Err(Error::UnknownCountry(_))
    ));
}

#[test]
fn duplicate_series_is_malformed() {
    let csv = WideCsv::new(&[2005])
        .row("India", CEREAL, &[Some(1.0)])
        .row("India", CEREAL, &[Some(2.0)]);
    let err = read_views_from_reader(Cursor::new(csv.render()), &Selection::default()).unwrap_err();
    assert!(matches!(err, Error::DuplicateSeries { .. }));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_views(dir.path().join("nope.csv"), &Selection::default()).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(err.to_string().contains("nope.csv"));
}

#[test]
fn custom_selection_is_honored() {
    let csv = WideCsv::new(&[2005]).grid(&["India", "Spain"], &[CEREAL, RAIN]);
    let sel = Selection::new(["Spain"], [RAIN]);
    let (by_country, _) = read_views_from_reader(Cursor::new(csv.render()), &sel).unwrap();
    assert_eq!(by_country.len(), 1);
    assert!(by_country.row("Spain", RAIN).is_ok());
}
