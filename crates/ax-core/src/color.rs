//! Color utilities shared by the surface backends

use serde::{Deserialize, Serialize};

/// Straight (non-premultiplied) RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Same color with the given alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Color { a, ..self }
    }
}

/// Get a categorical color from a fixed palette, cycling by index.
pub fn categorical_color(index: usize) -> Color {
    const PALETTE: &[Color] = &[
        Color::rgb(100, 150, 250), // Blue
        Color::rgb(250, 150, 100), // Orange
        Color::rgb(150, 250, 100), // Green
        Color::rgb(250, 100, 150), // Pink
        Color::rgb(150, 100, 250), // Purple
        Color::rgb(250, 250, 100), // Yellow
        Color::rgb(100, 250, 250), // Cyan
        Color::rgb(250, 100, 100), // Red
    ];
    PALETTE[index % PALETTE.len()]
}

/// Colormap used by the image primitive and its colorbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Colormap {
    #[default]
    Viridis,
    Plasma,
    Grayscale,
}

impl Colormap {
    /// Sample the colormap at `t` in `[0, 1]`; out-of-range values are clamped.
    pub fn sample(&self, t: f32) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Colormap::Viridis => viridis_color(t),
            Colormap::Plasma => plasma_color(t),
            Colormap::Grayscale => {
                let v = (t * 255.0) as u8;
                Color::rgb(v, v, v)
            }
        }
    }
}

fn lerp(a: f32, b: f32, s: f32) -> u8 {
    (a * (1.0 - s) + b * s) as u8
}

/// Simplified viridis colormap (piecewise linear over four segments).
fn viridis_color(t: f32) -> Color {
    if t < 0.25 {
        let s = t * 4.0;
        Color::rgb(lerp(68.0, 53.0, s), lerp(1.0, 91.0, s), lerp(84.0, 125.0, s))
    } else if t < 0.5 {
        let s = (t - 0.25) * 4.0;
        Color::rgb(lerp(53.0, 42.0, s), lerp(91.0, 117.0, s), lerp(125.0, 142.0, s))
    } else if t < 0.75 {
        let s = (t - 0.5) * 4.0;
        Color::rgb(lerp(42.0, 86.0, s), lerp(117.0, 163.0, s), lerp(142.0, 92.0, s))
    } else {
        let s = (t - 0.75) * 4.0;
        Color::rgb(lerp(86.0, 253.0, s), lerp(163.0, 231.0, s), lerp(92.0, 36.0, s))
    }
}

/// Simplified plasma colormap.
fn plasma_color(t: f32) -> Color {
    if t < 0.5 {
        let s = t * 2.0;
        Color::rgb(lerp(13.0, 253.0, s), lerp(8.0, 65.0, s), lerp(135.0, 148.0, s))
    } else {
        let s = (t - 0.5) * 2.0;
        Color::rgb(253, lerp(65.0, 240.0, s), lerp(148.0, 33.0, s))
    }
}
