//! Colors, axis ranges and tick formatting shared by the charts.

use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;

/// Microsoft Office (2013+) chart series palette.
const OFFICE10: [RGBColor; 10] = [
    RGBColor(68, 114, 196),  // blue      (#4472C4)
    RGBColor(237, 125, 49),  // orange    (#ED7D31)
    RGBColor(165, 165, 165), // gray      (#A5A5A5)
    RGBColor(255, 192, 0),   // gold      (#FFC000)
    RGBColor(91, 155, 213),  // light blue(#5B9BD5)
    RGBColor(112, 173, 71),  // green     (#70AD47)
    RGBColor(38, 68, 120),   // dark blue (#264478)
    RGBColor(158, 72, 14),   // dark org. (#9E480E)
    RGBColor(99, 99, 99),    // dark gray (#636363)
    RGBColor(153, 115, 0),   // brownish  (#997300)
];

#[inline]
pub fn office_color(idx: usize) -> RGBAColor {
    OFFICE10[idx % OFFICE10.len()].to_rgba()
}

/// Padded (min, max) of finite values for a line chart's Y axis.
pub fn value_range<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })?;
    if (hi - lo).abs() < f64::EPSILON {
        return Some((lo - 1.0, hi + 1.0));
    }
    let pad = (hi - lo) * 0.05;
    Some((lo - pad, hi + pad))
}

/// Y range for bars: always includes the zero baseline, with headroom.
pub fn bar_range<I: IntoIterator<Item = f64>>(values: I) -> (f64, f64) {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if hi - lo < f64::EPSILON {
        return (0.0, 1.0);
    }
    (lo * 1.08, hi * 1.08)
}

/// Tick label: thousands separators for large magnitudes, fewer decimals as
/// values grow.
pub fn format_tick(v: f64) -> String {
    let a = v.abs();
    if a >= 1000.0 {
        let n = v.round() as i64;
        let s = n.unsigned_abs().to_formatted_string(&Locale::en);
        if n < 0 { format!("-{s}") } else { s }
    } else {
        let prec = if a >= 100.0 {
            0
        } else if a >= 10.0 {
            1
        } else {
            2
        };
        format!("{:.*}", prec, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_use_grouping_and_precision() {
        assert_eq!(format_tick(4321.4), "4,321");
        assert_eq!(format_tick(-12000.0), "-12,000");
        assert_eq!(format_tick(250.0), "250");
        assert_eq!(format_tick(12.34), "12.3");
        assert_eq!(format_tick(0.5), "0.50");
    }

    #[test]
    fn flat_series_gets_a_unit_band() {
        assert_eq!(value_range([3.0, 3.0]), Some((2.0, 4.0)));
        assert_eq!(value_range(Vec::<f64>::new()), None);
    }

    #[test]
    fn bars_start_at_zero() {
        let (lo, hi) = bar_range([10.0, 20.0]);
        assert_eq!(lo, 0.0);
        assert!(hi > 20.0);
    }
}
