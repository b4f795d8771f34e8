//! Pass-through style options for the drawing primitives

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use crate::color::{Color, Colormap};

/// Options forwarded verbatim to the error-bar primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    /// Explicit series color. When unset the backend picks the next color from
    /// its categorical palette.
    pub color: Option<Color>,

    /// Line width in points.
    pub line_width: f32,

    /// Marker radius in points.
    pub marker_radius: f32,

    /// Width of the error-bar caps in points.
    pub cap_width: f32,
}

impl Default for SeriesStyle {
    fn default() -> Self {
        Self {
            color: None,
            line_width: 1.5,
            marker_radius: 2.5,
            cap_width: 4.0,
        }
    }
}

/// Options forwarded verbatim to the image primitive.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ImageStyle {
    pub colormap: Colormap,

    /// Lower end of the value range; computed from the data when unset.
    pub vmin: Option<f64>,

    /// Upper end of the value range; computed from the data when unset.
    pub vmax: Option<f64>,
}

impl ImageStyle {
    /// Resolve the value range for `data`: explicit bounds win, otherwise the
    /// min/max over finite cells. An image with no finite cell falls back to
    /// the unit range.
    pub fn resolve_range(&self, data: ArrayView2<'_, f64>) -> (f64, f64) {
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for &v in data.iter().filter(|v| v.is_finite()) {
            lo = lo.min(v);
            hi = hi.max(v);
        }
        if lo > hi {
            lo = 0.0;
            hi = 1.0;
        }
        (self.vmin.unwrap_or(lo), self.vmax.unwrap_or(hi))
    }
}
