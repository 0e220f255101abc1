use plotters::style::RGBColor;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<Rgb> for RGBColor {
    fn from(c: Rgb) -> Self {
        RGBColor(c.0, c.1, c.2)
    }
}

const TAB10: [Rgb; 10] = [
    Rgb(31, 119, 180),
    Rgb(255, 127, 14),
    Rgb(44, 160, 44),
    Rgb(214, 39, 40),
    Rgb(148, 103, 189),
    Rgb(140, 86, 75),
    Rgb(227, 119, 194),
    Rgb(127, 127, 127),
    Rgb(188, 189, 22),
    Rgb(23, 190, 207),
];

// Diverging blue -> grey -> red anchors, evenly spaced on [0, 1].
const COOLWARM: [Rgb; 5] = [
    Rgb(58, 76, 193),
    Rgb(141, 176, 254),
    Rgb(221, 220, 220),
    Rgb(244, 154, 123),
    Rgb(180, 4, 38),
];

/// Qualitative palette keyed by component index: tab10 first, then evenly
/// spaced hues so no two components share a color.
pub fn component_palette(k: usize) -> Vec<Rgb> {
    if k <= TAB10.len() {
        return TAB10[..k].to_vec();
    }
    let extra = k - TAB10.len();
    TAB10
        .iter()
        .copied()
        .chain((0..extra).map(|i| hsl_to_rgb((i as f64 / extra as f64) * 360.0 + 15.0, 0.55, 0.55)))
        .collect()
}

/// Coolwarm lookup for `t` in [0, 1]; values outside are clamped.
pub fn coolwarm(t: f64) -> Rgb {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let segments = (COOLWARM.len() - 1) as f64;
    let pos = t * segments;
    let idx = (pos.floor() as usize).min(COOLWARM.len() - 2);
    let frac = pos - idx as f64;
    let a = COOLWARM[idx];
    let b = COOLWARM[idx + 1];
    let lerp = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * frac).round() as u8;
    Rgb(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let h = h.rem_euclid(360.0);
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h_prime = h / 60.0;
    let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());
    let (r1, g1, b1) = match h_prime as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c / 2.0;
    let to_u8 = |v: f64| ((v + m).clamp(0.0, 1.0) * 255.0) as u8;
    Rgb(to_u8(r1), to_u8(g1), to_u8(b1))
}

/// Axis tick text for a proportion: `0.25` -> `25%`.
pub fn format_percent(v: f64) -> String {
    format!("{:.0}%", v * 100.0)
}

/// Cell annotation: `median% (IQR%)`, one decimal each.
pub fn format_median_iqr(median: f64, iqr: f64) -> String {
    format!("{:.1}% ({:.1}%)", median * 100.0, iqr * 100.0)
}
