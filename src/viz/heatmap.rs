//! Annotated correlation heatmap with a vertical colorbar.

use super::Chart;
use super::colormap::ColorMap;
use super::text::{estimate_text_width_px, truncate_to_width};
use crate::error::Result as CrateResult;
use crate::models::CountryIndexedView;
use crate::stats::{CorrelationMatrix, country_correlation};
use anyhow::{Result, anyhow};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontFamily, FontTransform};

const LABEL_FONT_PX: u32 = 12;
const LABEL_MAX_PX: u32 = 210;
const TITLE_H: i32 = 44;
const COLORBAR_W: i32 = 18;
const COLORBAR_GUTTER: i32 = 90;

#[derive(Debug, Clone, PartialEq)]
pub struct Heatmap {
    pub title: String,
    pub matrix: CorrelationMatrix,
    pub cmap: ColorMap,
    /// Square canvas edge in pixels.
    pub side: u32,
}

impl Heatmap {
    pub fn new(title: impl Into<String>, matrix: CorrelationMatrix, cmap: ColorMap) -> Self {
        Self {
            title: title.into(),
            matrix,
            cmap,
            side: 800,
        }
    }

    /// Correlation between `country`'s indicators, titled with the country.
    pub fn for_country(view: &CountryIndexedView, country: &str, cmap: ColorMap) -> CrateResult<Self> {
        let matrix = country_correlation(view, country)?;
        Ok(Self::new(country, matrix, cmap))
    }

    /// Position of `v` on the colormap: the data range is stretched to [0, 1].
    fn normalize(&self, v: f64) -> f64 {
        let (lo, hi) = self.matrix.range();
        if hi - lo > f64::EPSILON { (v - lo) / (hi - lo) } else { 0.0 }
    }
}

impl Chart for Heatmap {
    fn size(&self) -> (u32, u32) {
        (self.side, self.side)
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()> {
        let n = self.matrix.len();
        if n == 0 {
            return Err(anyhow!("empty correlation matrix for {}", self.title));
        }
        root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
        let (w_u32, h_u32) = root.dim_in_pixel();
        let (w, h) = (w_u32 as i32, h_u32 as i32);

        let title_style = TextStyle::from((FontFamily::SansSerif, 22)).pos(Pos::new(HPos::Center, VPos::Top));
        root.draw(&Text::new(self.title.as_str(), (w / 2, 12), title_style))
            .map_err(|e| anyhow!("{:?}", e))?;

        let labels: Vec<String> = self
            .matrix
            .labels
            .iter()
            .map(|l| truncate_to_width(l, LABEL_FONT_PX, LABEL_MAX_PX))
            .collect();
        let label_w = labels
            .iter()
            .map(|l| estimate_text_width_px(l, LABEL_FONT_PX) as i32)
            .max()
            .unwrap_or(0)
            .max(24)
            + 10;

        let grid_left = 10 + label_w;
        let grid_top = TITLE_H + 10;
        let avail_w = w - grid_left - COLORBAR_GUTTER - 10;
        let avail_h = h - grid_top - label_w - 10;
        let cell = (avail_w.min(avail_h) / n as i32).max(8);
        let grid = cell * n as i32;

        // cells
        let cell_font = (cell / 5).clamp(8, 16) as u32;
        let value_style = TextStyle::from((FontFamily::SansSerif, cell_font))
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        for i in 0..n {
            for j in 0..n {
                let v = self.matrix.get(i, j);
                let x0 = grid_left + j as i32 * cell;
                let y0 = grid_top + i as i32 * cell;
                root.draw(&Rectangle::new(
                    [(x0, y0), (x0 + cell, y0 + cell)],
                    self.cmap.color(self.normalize(v)).filled(),
                ))
                .map_err(|e| anyhow!("{:?}", e))?;
                root.draw(&Text::new(
                    format!("{v:.2}"),
                    (x0 + cell / 2, y0 + cell / 2),
                    value_style.clone(),
                ))
                .map_err(|e| anyhow!("{:?}", e))?;
            }
        }

        // tick labels
        let y_style = TextStyle::from((FontFamily::SansSerif, LABEL_FONT_PX)).pos(Pos::new(HPos::Right, VPos::Center));
        let x_style = TextStyle::from((FontFamily::SansSerif, LABEL_FONT_PX))
            .transform(FontTransform::Rotate90)
            .pos(Pos::new(HPos::Left, VPos::Center));
        for (k, label) in labels.iter().enumerate() {
            let center = k as i32 * cell + cell / 2;
            root.draw(&Text::new(label.as_str(), (grid_left - 6, grid_top + center), y_style.clone()))
                .map_err(|e| anyhow!("{:?}", e))?;
            root.draw(&Text::new(label.as_str(), (grid_left + center, grid_top + grid + 6), x_style.clone()))
                .map_err(|e| anyhow!("{:?}", e))?;
        }

        self.draw_colorbar(root, grid_left + grid + 20, grid_top, grid)
    }
}

impl Heatmap {
    fn draw_colorbar<DB: DrawingBackend>(
        &self,
        root: &DrawingArea<DB, Shift>,
        left: i32,
        top: i32,
        height: i32,
    ) -> Result<()> {
        for k in 0..height {
            let t = 1.0 - k as f64 / (height - 1).max(1) as f64;
            root.draw(&Rectangle::new(
                [(left, top + k), (left + COLORBAR_W, top + k + 1)],
                self.cmap.color(t).filled(),
            ))
            .map_err(|e| anyhow!("{:?}", e))?;
        }
        root.draw(&Rectangle::new(
            [(left, top), (left + COLORBAR_W, top + height)],
            BLACK.stroke_width(1),
        ))
        .map_err(|e| anyhow!("{:?}", e))?;

        let (lo, hi) = self.matrix.range();
        let style = TextStyle::from((FontFamily::SansSerif, LABEL_FONT_PX)).pos(Pos::new(HPos::Left, VPos::Center));
        for (frac, v) in [(0.0, hi), (0.5, (lo + hi) / 2.0), (1.0, lo)] {
            let y = top + (frac * height as f64) as i32;
            root.draw(&PathElement::new(
                vec![(left + COLORBAR_W, y), (left + COLORBAR_W + 4, y)],
                BLACK.stroke_width(1),
            ))
            .map_err(|e| anyhow!("{:?}", e))?;
            root.draw(&Text::new(format!("{v:.2}"), (left + COLORBAR_W + 8, y), style.clone()))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
        Ok(())
    }
}
