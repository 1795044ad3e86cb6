//! Per-year mean and standard deviation of a country's indicators.

use super::Chart;
use super::util::{format_tick, office_color, value_range};
use crate::stats::YearSpread;
use anyhow::{Result, anyhow};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::series::LineSeries;
use plotters::style::FontFamily;

#[derive(Debug, Clone, PartialEq)]
pub struct SpreadChart {
    pub title: String,
    pub points: Vec<YearSpread>,
    pub width: u32,
    pub height: u32,
}

impl SpreadChart {
    pub fn new(country: &str, points: Vec<YearSpread>) -> Self {
        Self {
            title: format!("Statistical Methods for Country - {country}"),
            points,
            width: 900,
            height: 450,
        }
    }

    fn lines(&self) -> [(&'static str, Vec<(f64, f64)>); 2] {
        let pick = |f: fn(&YearSpread) -> Option<f64>| -> Vec<(f64, f64)> {
            self.points
                .iter()
                .filter_map(|p| f(p).map(|v| (p.year as f64, v)))
                .collect()
        };
        [("Mean", pick(|p| p.mean)), ("Standard Deviation", pick(|p| p.std))]
    }
}

impl Chart for SpreadChart {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        let years = self.points.iter().map(|p| p.year);
        let (Some(first), Some(last)) = (years.clone().min(), years.max()) else {
            return Err(anyhow!("no years to plot for {}", self.title));
        };
        let (min_year, max_year) = if first == last {
            (first - 1, last + 1)
        } else {
            (first, last)
        };
        let lines = self.lines();
        let (y_min, y_max) = value_range(lines.iter().flat_map(|(_, pts)| pts.iter().map(|(_, v)| *v)))
            .ok_or_else(|| anyhow!("no numeric values to plot"))?;

        root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

        let x_label_fmt = |x: &f64| (x.round() as i32).to_string();
        let y_label_fmt = |v: &f64| format_tick(*v);

        let mut chart = ChartBuilder::on(root)
            .margin(12)
            .caption(&self.title, (FontFamily::SansSerif, 18))
            .set_label_area_size(LabelAreaPosition::Left, 64)
            .set_label_area_size(LabelAreaPosition::Bottom, 44)
            .build_cartesian_2d(min_year as f64..max_year as f64, y_min..y_max)
            .map_err(|e| anyhow!("{:?}", e))?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .x_labels(((max_year - min_year + 1) as usize).min(12))
            .y_labels(8)
            .x_label_formatter(&x_label_fmt)
            .y_label_formatter(&y_label_fmt)
            .label_style((FontFamily::SansSerif, 12))
            .axis_desc_style((FontFamily::SansSerif, 14))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;

        for (idx, (label, pts)) in lines.into_iter().enumerate() {
            let color = office_color(idx);
            chart
                .draw_series(LineSeries::new(pts, color.stroke_width(2)))
                .map_err(|e| anyhow!("{:?}", e))?
                .label(label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .border_style(BLACK)
            .background_style(WHITE.mix(0.85))
            .label_font((FontFamily::SansSerif, 12))
            .draw()
            .map_err(|e| anyhow!("{:?}", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_points_are_skipped() {
        let chart = SpreadChart::new(
            "India",
            vec![
                YearSpread { year: 2001, mean: Some(2.0), std: Some(1.0) },
                YearSpread { year: 2002, mean: Some(3.0), std: None },
            ],
        );
        assert_eq!(chart.title, "Statistical Methods for Country - India");
        let [(m, mean), (s, std)] = chart.lines();
        assert_eq!((m, s), ("Mean", "Standard Deviation"));
        assert_eq!(mean, vec![(2001.0, 2.0), (2002.0, 3.0)]);
        assert_eq!(std, vec![(2001.0, 1.0)]);
    }
}
