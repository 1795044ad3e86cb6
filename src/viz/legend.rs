//! Legend panel drawn in its own area beside the plot, so long labels never
//! overlap the data.

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::{estimate_text_width_px, wrap_text_to_width};

const FONT_PX: u32 = 14;
const LINE_H: i32 = FONT_PX as i32 + 2;
const ROW_GAP: i32 = 6;
const PAD_X: i32 = 6;
const MARKER_W: i32 = 18;

/// Pixel height the panel needs for `labels` at width `panel_w`.
pub fn legend_height_px(labels: &[String], panel_w: i32) -> i32 {
    let max_text_w = text_width(panel_w);
    labels
        .iter()
        .map(|l| wrap_text_to_width(l, FONT_PX, max_text_w).len().max(1) as i32 * LINE_H + ROW_GAP)
        .sum::<i32>()
        + 2 * PAD_X
}

fn text_width(panel_w: i32) -> u32 {
    (panel_w - 2 * PAD_X - MARKER_W - 8).max(40) as u32
}

/// Single-column legend: a short line marker in the series color followed by
/// the wrapped label, vertically centered in the area.
pub fn draw_legend_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    items: &[(String, RGBAColor)],
) -> Result<()> {
    let (w_u32, h_u32) = area.dim_in_pixel();
    let (w, h) = (w_u32 as i32, h_u32 as i32);
    let labels: Vec<String> = items.iter().map(|(l, _)| l.clone()).collect();
    let needed = legend_height_px(&labels, w);
    let mut y = ((h - needed) / 2).max(PAD_X);

    let max_text_w = text_width(w);
    let text_x = PAD_X + MARKER_W + 8;
    let style = TextStyle::from((FontFamily::SansSerif, FONT_PX)).pos(Pos::new(HPos::Left, VPos::Center));

    for (label, color) in items {
        let lines = wrap_text_to_width(label, FONT_PX, max_text_w);
        let block_h = lines.len().max(1) as i32 * LINE_H;
        let mid = y + LINE_H / 2;

        area.draw(&PathElement::new(
            vec![(PAD_X, mid), (PAD_X + MARKER_W, mid)],
            color.stroke_width(3),
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        for (i, line) in lines.iter().enumerate() {
            let cy = y + i as i32 * LINE_H + LINE_H / 2;
            area.draw(&Text::new(line.as_str(), (text_x, cy), style.clone()))
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        }
        y += block_h + ROW_GAP;
    }
    Ok(())
}

/// Narrowest panel width (px) that fits the longest label on one line,
/// clamped to `[min_px, max_px]`. A `max_px` below `min_px` yields `min_px`.
pub fn preferred_width_px(labels: &[String], min_px: u32, max_px: u32) -> u32 {
    let longest = labels
        .iter()
        .map(|l| estimate_text_width_px(l, FONT_PX))
        .max()
        .unwrap_or(0);
    (longest + (2 * PAD_X + MARKER_W + 8) as u32).clamp(min_px, max_px.max(min_px))
}
