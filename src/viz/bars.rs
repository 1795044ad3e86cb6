//! Grouped bar charts arranged in a grid, one panel per year.

use super::Chart;
use super::legend::{draw_legend_panel, preferred_width_px};
use super::util::{bar_range, format_tick, office_color};
use crate::error::Result as CrateResult;
use crate::models::CountryIndexedView;
use anyhow::{Result, anyhow};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontFamily, FontTransform};
use std::collections::BTreeSet;

/// Bars of one panel: one group per category, one bar per series inside
/// each group. `None` leaves a gap.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGroups {
    pub title: String,
    pub categories: Vec<String>,
    pub series: Vec<(String, Vec<Option<f64>>)>,
}

impl BarGroups {
    /// Column `year` of `view` restricted to `indicators`: categories are the
    /// countries and series the indicators, both sorted by name.
    pub fn from_year(view: &CountryIndexedView, year: i32, indicators: &[&str]) -> CrateResult<Self> {
        let column = view.column(year)?;
        let selected: Vec<_> = column
            .into_iter()
            .filter(|(k, _)| indicators.contains(&k.indicator.as_str()))
            .collect();

        let categories: Vec<String> = selected
            .iter()
            .map(|(k, _)| k.country.clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let names: BTreeSet<&str> = selected.iter().map(|(k, _)| k.indicator.as_str()).collect();

        let series: Vec<(String, Vec<Option<f64>>)> = names
            .into_iter()
            .map(|ind| {
                let vals: Vec<Option<f64>> = categories
                    .iter()
                    .map(|c| {
                        selected
                            .iter()
                            .find(|(k, _)| k.indicator == ind && &k.country == c)
                            .map(|(_, v)| *v)
                    })
                    .collect();
                (ind.to_string(), vals)
            })
            .collect();

        Ok(Self {
            title: format!("Year {year}"),
            categories,
            series,
        })
    }

    fn is_empty(&self) -> bool {
        self.categories.is_empty() || self.series.is_empty()
    }
}

/// Figure of bar panels laid out `rows × cols` under a common title.
#[derive(Debug, Clone)]
pub struct BarGrid {
    pub title: String,
    pub panels: Vec<BarGroups>,
    pub rows: usize,
    pub cols: usize,
    pub width: u32,
    pub height: u32,
}

impl BarGrid {
    /// One panel per year, as close to square as the count allows.
    pub fn for_years(
        view: &CountryIndexedView,
        title: &str,
        years: &[i32],
        indicators: &[&str],
    ) -> CrateResult<Self> {
        let panels = years
            .iter()
            .map(|&y| BarGroups::from_year(view, y, indicators))
            .collect::<CrateResult<Vec<_>>>()?;
        let cols = ((panels.len() as f64).sqrt().ceil() as usize).max(1);
        let rows = panels.len().div_ceil(cols);
        Ok(Self {
            title: title.to_string(),
            panels,
            rows,
            cols,
            width: 1500,
            height: 800,
        })
    }
}

impl Chart for BarGrid {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        if self.panels.is_empty() {
            return Err(anyhow!("bar grid has no panels"));
        }
        root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
        let body = root
            .titled(&self.title, (FontFamily::SansSerif, 26))
            .map_err(|e| anyhow!("{:?}", e))?;
        let areas = body.split_evenly((self.rows, self.cols));
        for (panel, area) in self.panels.iter().zip(areas.iter()) {
            draw_panel(area, panel)?;
        }
        Ok(())
    }
}

/// Height (px) below each panel's x axis reserved for country names.
const CATEGORY_LABEL_AREA: u32 = 120;

fn draw_panel<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, panel: &BarGroups) -> Result<()> {
    if panel.is_empty() {
        return Err(anyhow!("no bars to draw for {}", panel.title));
    }
    let n_cat = panel.categories.len();
    let (y_min, y_max) = bar_range(panel.series.iter().flat_map(|(_, v)| v.iter().flatten().copied()));

    let no_x_label = |_: &f64| String::new();
    let y_label_fmt = |v: &f64| format_tick(*v);

    let (w, _) = area.dim_in_pixel();
    let labels: Vec<String> = panel.series.iter().map(|(l, _)| l.clone()).collect();
    let legend_w = preferred_width_px(&labels, 100, w / 4);
    let (plot_area, legend_area) = area.split_horizontally(w.saturating_sub(legend_w) as i32);

    let mut chart = ChartBuilder::on(&plot_area)
        .margin(8)
        .caption(&panel.title, (FontFamily::SansSerif, 18))
        .set_label_area_size(LabelAreaPosition::Left, 64)
        .set_label_area_size(LabelAreaPosition::Bottom, CATEGORY_LABEL_AREA)
        .build_cartesian_2d(-0.5f64..(n_cat as f64 - 0.5), y_min..y_max)
        .map_err(|e| anyhow!("{:?}", e))?;

    // Ticks only; the mesh would anchor rotated labels at their centre.
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n_cat)
        .y_labels(8)
        .x_label_formatter(&no_x_label)
        .y_label_formatter(&y_label_fmt)
        .y_label_style((FontFamily::SansSerif, 12))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    // Category names hang down from the axis, starting just below it.
    let base = plot_area.get_base_pixel();
    let category_style = TextStyle::from((FontFamily::SansSerif, 12))
        .transform(FontTransform::Rotate90)
        .pos(Pos::new(HPos::Left, VPos::Center));
    for (i, name) in panel.categories.iter().enumerate() {
        let (x, y) = chart.backend_coord(&(i as f64, y_min));
        plot_area
            .draw_text(name, &category_style, (x - base.0, y - base.1 + 6))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    let group_width = 0.8f64;
    let bar_w = group_width / panel.series.len() as f64;
    let mut legend_items = Vec::with_capacity(panel.series.len());
    for (idx, (name, values)) in panel.series.iter().enumerate() {
        let color = office_color(idx);
        let rects = values.iter().enumerate().filter_map(|(cat, v)| {
            let v = (*v)?;
            let x0 = cat as f64 - group_width / 2.0 + idx as f64 * bar_w;
            Some(Rectangle::new(
                [(x0, 0.0f64.min(v)), (x0 + bar_w, 0.0f64.max(v))],
                color.filled(),
            ))
        });
        chart.draw_series(rects).map_err(|e| anyhow!("{:?}", e))?;
        legend_items.push((name.clone(), color));
    }

    draw_legend_panel(&legend_area, &legend_items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::SeriesKey;

    fn view() -> CountryIndexedView {
        CountryIndexedView::new(
            vec![2005, 2010],
            vec![
                (SeriesKey::new("Spain", "Cereal"), vec![3000.0, 3100.0]),
                (SeriesKey::new("India", "Cereal"), vec![2500.0, 2800.0]),
                (SeriesKey::new("India", "Rain"), vec![1083.0, 1083.0]),
                (SeriesKey::new("India", "Forest"), vec![23.0, 23.5]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn groups_are_sorted_and_gaps_are_none() {
        let g = BarGroups::from_year(&view(), 2010, &["Cereal", "Rain"]).unwrap();
        assert_eq!(g.title, "Year 2010");
        assert_eq!(g.categories, vec!["India", "Spain"]);
        assert_eq!(g.series[0], ("Cereal".to_string(), vec![Some(2800.0), Some(3100.0)]));
        assert_eq!(g.series[1], ("Rain".to_string(), vec![Some(1083.0), None]));
    }

    #[test]
    fn missing_year_is_a_lookup_error() {
        assert!(matches!(
            BarGroups::from_year(&view(), 2020, &["Cereal"]),
            Err(Error::UnknownYear(2020))
        ));
    }

    #[test]
    fn four_years_make_a_two_by_two_grid() {
        let v = CountryIndexedView::new(
            vec![1, 2, 3, 4],
            vec![(SeriesKey::new("India", "Cereal"), vec![1.0, 2.0, 3.0, 4.0])],
        )
        .unwrap();
        let grid = BarGrid::for_years(&v, "t", &[1, 2, 3, 4], &["Cereal"]).unwrap();
        assert_eq!((grid.rows, grid.cols), (2, 2));
        assert_eq!(grid.panels.len(), 4);
    }
}
