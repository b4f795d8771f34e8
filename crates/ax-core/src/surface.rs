//! The drawable-surface abstraction
//!
//! A `Surface` is the object the convenience renderers draw onto: one axes
//! worth of plot state. Implementations own all validation; the renderers call
//! the primitives in a fixed order and propagate whatever the surface raises.

use ndarray::ArrayView2;

use crate::attrs::AttrBag;
use crate::color::Colormap;
use crate::error::PlotResult;
use crate::style::{ImageStyle, SeriesStyle};

/// Everything the error-bar primitive needs for one series.
///
/// `x` and `y` must be the same length, `yerr` (symmetric, non-negative error
/// magnitudes) must match too; the surface checks, not the caller.
#[derive(Debug, Clone, Copy)]
pub struct SeriesSpec<'a> {
    pub x: &'a [f64],
    pub y: &'a [f64],
    pub yerr: Option<&'a [f64]>,
    /// matplotlib-style format string, parsed by the surface.
    pub fmt: &'a str,
    pub label: Option<&'a str>,
    pub style: &'a SeriesStyle,
}

/// Handle to an image drawn by [`Surface::imshow`], carrying what a colorbar
/// needs to mirror it.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageHandle {
    pub colormap: Colormap,
    pub vmin: f64,
    pub vmax: f64,
}

/// Legend rendering options.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LegendConfig {
    /// Draw a frame around the legend box.
    pub frame: bool,
    /// Scale factor applied to the marker samples inside the legend.
    pub marker_scale: f32,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            frame: true,
            marker_scale: 1.0,
        }
    }
}

/// One axes worth of drawing surface.
pub trait Surface {
    /// Erase all content and configuration previously put on this surface.
    fn clear(&mut self);

    /// Draw one series, with error bars when `spec.yerr` is set.
    fn errorbar(&mut self, spec: &SeriesSpec<'_>) -> PlotResult<()>;

    /// Draw a 2D array as an image.
    fn imshow(&mut self, data: ArrayView2<'_, f64>, style: &ImageStyle) -> PlotResult<ImageHandle>;

    /// Apply an attribute bag in bulk, in insertion order.
    fn apply(&mut self, attrs: &AttrBag) -> PlotResult<()>;

    /// Toggle gridline visibility.
    fn grid(&mut self, visible: bool);

    /// Attach a legend reflecting the labeled series drawn so far.
    fn legend(&mut self, config: &LegendConfig) -> PlotResult<()>;

    /// Render a colorbar for an image drawn on another surface onto this one.
    fn colorbar(&mut self, image: &ImageHandle, label: Option<&str>, font_size: f32)
        -> PlotResult<()>;
}
