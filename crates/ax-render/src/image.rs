//! 2D image renderer

use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use ax_core::{AttrBag, ImageStyle, PlotResult, Surface};

/// Options for [`draw_image`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageOptions {
    /// Attributes applied in bulk after drawing.
    pub attrs: AttrBag,

    /// Label put on the colorbar, when one is drawn.
    pub colorbar_label: Option<String>,

    /// Font size of the colorbar label, in points.
    pub colorbar_font_size: f32,

    /// Erase the surface before drawing.
    pub clear_first: bool,

    /// Forwarded verbatim to the image primitive.
    pub style: ImageStyle,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            attrs: AttrBag::new(),
            colorbar_label: None,
            colorbar_font_size: 14.0,
            clear_first: true,
            style: ImageStyle::default(),
        }
    }
}

/// Draw `data` as an image onto `surface`, optionally mirroring it as a
/// colorbar on `colorbar_surface`.
///
/// Side effects, in order: clear (when `clear_first`), draw the image, apply
/// `attrs`, disable gridlines, draw the colorbar when a target surface was
/// given. Gridline suppression is unconditional and runs after the attribute
/// step, so it wins even when the bag asked for gridlines.
///
/// Failures from either surface propagate unchanged.
pub fn draw_image<S: Surface + ?Sized>(
    surface: &mut S,
    data: ArrayView2<'_, f64>,
    colorbar_surface: Option<&mut S>,
    opts: &ImageOptions,
) -> PlotResult<()> {
    tracing::debug!(rows = data.nrows(), cols = data.ncols(), "drawing image");

    if opts.clear_first {
        surface.clear();
    }

    let handle = surface.imshow(data, &opts.style)?;
    surface.apply(&opts.attrs)?;
    surface.grid(false);

    if let Some(cax) = colorbar_surface {
        cax.colorbar(
            &handle,
            opts.colorbar_label.as_deref(),
            opts.colorbar_font_size,
        )?;
    }

    Ok(())
}
