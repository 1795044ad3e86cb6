mod common;

use common::WideCsv;
use wdi_agri::config::{self, ReportConfig};
use wdi_agri::report;

const YEARS: [i32; 16] = [
    2005, 2006, 2007, 2008, 2009, 2010, 2011, 2012, 2013, 2014, 2015, 2016, 2017, 2018, 2019, 2020,
];

#[test]
fn full_report_writes_every_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("indicators.csv");
    WideCsv::new(&YEARS)
        .grid(&config::COUNTRIES, &config::INDICATORS)
        .row("Germany", config::CEREAL_YIELD, &[None; 16])
        .write_to(&input);

    let mut cfg = ReportConfig::default().with_paths(&input, dir.path());
    cfg.export_dir = Some(dir.path().join("export"));
    let outcome = report::run(&cfg).unwrap();

    for name in [
        "cereal.png",
        "irrigated_land.png",
        "agricultural_land.png",
        "correlation India .png",
        "correlation Australia .png",
        "statistical.png",
    ] {
        let p = dir.path().join(name);
        assert!(p.exists(), "{name} missing");
        assert!(outcome.written.contains(&p));
    }

    let csv = std::fs::read_to_string(dir.path().join("export/country_indexed.csv")).unwrap();
    assert_eq!(csv.lines().count(), 1 + 10 * 6 * YEARS.len());
    let json: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(dir.path().join("export/statistics_India.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(json["country"], "India");
    assert_eq!(json["indicators"].as_array().unwrap().len(), 6);
}

#[test]
fn dropped_plot_year_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("indicators.csv");
    let mut india_cereal = vec![Some(2500.0); YEARS.len()];
    india_cereal[YEARS.len() - 1] = None; // 2020 missing for one series
    WideCsv::new(&YEARS)
        .grid(&["Spain", "Jordan"], &config::INDICATORS)
        .row("India", config::CEREAL_YIELD, &india_cereal)
        .write_to(&input);

    let cfg = ReportConfig::default().with_paths(&input, dir.path());
    let err = report::run(&cfg).unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("2020"), "{chain}");
}

#[test]
fn unknown_colormap_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let view = wdi_agri::CountryIndexedView::default();
    let err = report::correlation_heatmap(&view, "India", "not-a-map", &dir.path().join("c.png"))
        .unwrap_err();
    assert!(err.to_string().contains("not-a-map"));
}
