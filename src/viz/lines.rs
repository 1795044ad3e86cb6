//! One line per series over the years, legend in a side panel.

use super::Chart;
use super::legend::{draw_legend_panel, preferred_width_px};
use super::util::{format_tick, office_color, value_range};
use crate::error::{Error, Result as CrateResult};
use crate::models::CountryIndexedView;
use anyhow::{Result, anyhow};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::LineSeries;
use plotters::style::FontFamily;

#[derive(Debug, Clone, PartialEq)]
pub struct TrendChart {
    pub title: String,
    pub years: Vec<i32>,
    /// (label, value per year)
    pub series: Vec<(String, Vec<f64>)>,
    pub width: u32,
    pub height: u32,
}

impl TrendChart {
    /// Every country's series for `indicator`, in view order, titled with the
    /// indicator name.
    pub fn for_indicator(view: &CountryIndexedView, indicator: &str) -> CrateResult<Self> {
        let rows = view.indicator_rows(indicator);
        if rows.is_empty() {
            return Err(Error::UnknownIndicator(indicator.to_string()));
        }
        Ok(Self {
            title: indicator.to_string(),
            years: view.years().to_vec(),
            series: rows
                .into_iter()
                .map(|(country, vals)| (country.to_string(), vals.to_vec()))
                .collect(),
            width: 1000,
            height: 600,
        })
    }
}

impl Chart for TrendChart {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        let (Some(&first), Some(&last)) = (self.years.iter().min(), self.years.iter().max()) else {
            return Err(anyhow!("no years to plot for {}", self.title));
        };
        let (min_year, max_year) = if first == last {
            (first - 1, last + 1)
        } else {
            (first, last)
        };
        let (y_min, y_max) = value_range(self.series.iter().flat_map(|(_, v)| v.iter().copied()))
            .ok_or_else(|| anyhow!("no numeric values to plot"))?;

        root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
        let labels: Vec<String> = self.series.iter().map(|(l, _)| l.clone()).collect();
        let legend_w = preferred_width_px(&labels, 120, (self.width / 3).max(120));
        let (plot_area, legend_area) = root.split_horizontally(self.width.saturating_sub(legend_w) as i32);

        let x_label_fmt = |x: &f64| (x.round() as i32).to_string();
        let y_label_fmt = |v: &f64| format_tick(*v);

        let mut chart = ChartBuilder::on(&plot_area)
            .margin(16)
            .caption(&self.title, (FontFamily::SansSerif, 20))
            .set_label_area_size(LabelAreaPosition::Left, 64)
            .set_label_area_size(LabelAreaPosition::Bottom, 48)
            .build_cartesian_2d(min_year as f64..max_year as f64, y_min..y_max)
            .map_err(|e| anyhow!("{:?}", e))?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .x_labels(((max_year - min_year + 1) as usize).min(12))
            .y_labels(10)
            .x_label_formatter(&x_label_fmt)
            .y_label_formatter(&y_label_fmt)
            .label_style((FontFamily::SansSerif, 12))
            .axis_desc_style((FontFamily::SansSerif, 14))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;

        let mut legend_items = Vec::with_capacity(self.series.len());
        for (idx, (label, values)) in self.series.iter().enumerate() {
            let color = office_color(idx);
            let points: Vec<(f64, f64)> = self
                .years
                .iter()
                .zip(values)
                .map(|(y, v)| (*y as f64, *v))
                .collect();
            chart
                .draw_series(LineSeries::new(points, color.stroke_width(2)))
                .map_err(|e| anyhow!("{:?}", e))?;
            legend_items.push((label.clone(), color));
        }

        draw_legend_panel(&legend_area, &legend_items)
    }
}
