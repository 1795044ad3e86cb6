//! Named colormaps for the correlation heatmap.

use crate::error::Error;
use plotters::prelude::RGBColor;
use std::str::FromStr;

const WISTIA: [(u8, u8, u8); 5] = [
    (0xe4, 0xff, 0x7a),
    (0xff, 0xe8, 0x1a),
    (0xff, 0xbd, 0x00),
    (0xff, 0xa0, 0x00),
    (0xfc, 0x7f, 0x00),
];

const VIRIDIS: [(u8, u8, u8); 10] = [
    (0x44, 0x01, 0x54),
    (0x48, 0x28, 0x78),
    (0x3e, 0x49, 0x89),
    (0x31, 0x68, 0x8e),
    (0x26, 0x82, 0x8e),
    (0x1f, 0x9e, 0x89),
    (0x35, 0xb7, 0x79),
    (0x6e, 0xce, 0x58),
    (0xb5, 0xde, 0x2b),
    (0xfd, 0xe7, 0x25),
];

const TAB20B: [(u8, u8, u8); 20] = [
    (0x39, 0x3b, 0x79),
    (0x52, 0x54, 0xa3),
    (0x6b, 0x6e, 0xcf),
    (0x9c, 0x9e, 0xde),
    (0x63, 0x79, 0x39),
    (0x8c, 0xa2, 0x52),
    (0xb5, 0xcf, 0x6b),
    (0xce, 0xdb, 0x9c),
    (0x8c, 0x6d, 0x31),
    (0xbd, 0x9e, 0x39),
    (0xe7, 0xba, 0x52),
    (0xe7, 0xcb, 0x94),
    (0x84, 0x3c, 0x39),
    (0xad, 0x49, 0x4a),
    (0xd6, 0x61, 0x6b),
    (0xe7, 0x96, 0x9c),
    (0x7b, 0x41, 0x73),
    (0xa5, 0x51, 0x94),
    (0xce, 0x6d, 0xbd),
    (0xde, 0x9e, 0xd6),
];

/// A colormap maps a normalized scalar in `[0, 1]` to a color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMap {
    /// Sequential yellow → orange.
    Wistia,
    /// Sequential purple → yellow.
    Viridis,
    /// Qualitative, 20 discrete colors.
    Tab20b,
}

impl ColorMap {
    pub fn name(self) -> &'static str {
        match self {
            ColorMap::Wistia => "Wistia",
            ColorMap::Viridis => "viridis",
            ColorMap::Tab20b => "tab20b",
        }
    }

    /// Color at `t`, clamped to `[0, 1]`. NaN maps to the low end.
    pub fn color(self, t: f64) -> RGBColor {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            ColorMap::Wistia => interpolate(&WISTIA, t),
            ColorMap::Viridis => interpolate(&VIRIDIS, t),
            ColorMap::Tab20b => {
                let idx = ((t * TAB20B.len() as f64) as usize).min(TAB20B.len() - 1);
                let (r, g, b) = TAB20B[idx];
                RGBColor(r, g, b)
            }
        }
    }
}

fn interpolate(stops: &[(u8, u8, u8)], t: f64) -> RGBColor {
    let pos = t * (stops.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(stops.len() - 1);
    let f = pos - lo as f64;
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * f).round() as u8;
    RGBColor(
        mix(stops[lo].0, stops[hi].0),
        mix(stops[lo].1, stops[hi].1),
        mix(stops[lo].2, stops[hi].2),
    )
}

impl FromStr for ColorMap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wistia" => Ok(ColorMap::Wistia),
            "viridis" => Ok(ColorMap::Viridis),
            "tab20b" => Ok(ColorMap::Tab20b),
            _ => Err(Error::UnknownColorMap(s.to_string())),
        }
    }
}
