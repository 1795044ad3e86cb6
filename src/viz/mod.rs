//! Chart rendering to **PNG** or **SVG**.
//!
//! - Grouped bar grid (`bars`), one line per series (`lines`)
//! - Annotated correlation heatmap with colorbar (`heatmap`)
//! - Per-year mean / standard deviation chart (`spread`)
//!
//! Every chart is a plain value implementing [`Chart`]; [`render`] gives it a
//! fresh drawing surface for its output file, so charts share no state.

pub mod bars;
pub mod colormap;
pub mod fonts;
pub mod heatmap;
pub mod legend;
pub mod lines;
pub mod spread;
pub mod text;
pub mod util;

pub use bars::{BarGroups, BarGrid};
pub use colormap::ColorMap;
pub use heatmap::Heatmap;
pub use lines::TrendChart;
pub use spread::SpreadChart;

use anyhow::{Result, anyhow};
use log::debug;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::Path;

/// Something that can draw itself onto a drawing area of a fixed pixel size.
pub trait Chart {
    /// Canvas size in pixels (width, height).
    fn size(&self) -> (u32, u32);

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> Result<()>;
}

/// Render `chart` to `out_path`; `.svg` selects the SVG backend, anything else
/// is written as a bitmap (PNG for `.png`).
pub fn render<C: Chart, P: AsRef<Path>>(chart: &C, out_path: P) -> Result<()> {
    fonts::ensure_fonts_registered()?;
    let out_path = out_path.as_ref();
    let size = chart.size();

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(out_path, size).into_drawing_area();
        chart.draw(&root)?;
        root.present().map_err(|e| anyhow!("{:?}", e))?;
    } else {
        let root = BitMapBackend::new(out_path, size).into_drawing_area();
        chart.draw(&root)?;
        root.present().map_err(|e| anyhow!("{:?}", e))?;
    }
    debug!("rendered {}x{} chart to {}", size.0, size.1, out_path.display());
    Ok(())
}
