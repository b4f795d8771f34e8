//! 1D series renderer

use serde::{Deserialize, Serialize};

use ax_core::{AttrBag, LegendConfig, PlotResult, SeriesSpec, SeriesStyle, Surface};

/// Options for [`draw_series`]. Everything beyond `x` and `y` lives here so the
/// call site can use struct-update syntax over the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesOptions {
    /// Symmetric error-bar magnitudes, same length as `y`.
    pub yerr: Option<Vec<f64>>,

    /// Series label; a present, non-empty label also attaches a legend.
    pub label: Option<String>,

    /// matplotlib-style format string for the series, parsed by the surface.
    pub fmt: String,

    /// Attributes applied in bulk after drawing, so they can override anything
    /// the draw step set.
    pub attrs: AttrBag,

    /// Erase the surface before drawing.
    pub clear_first: bool,

    /// Frame visibility of the legend box.
    pub legend_frame: bool,

    /// Scale factor for marker samples in the legend.
    pub legend_marker_scale: f32,

    /// Forwarded verbatim to the error-bar primitive.
    pub style: SeriesStyle,
}

impl Default for SeriesOptions {
    fn default() -> Self {
        Self {
            yerr: None,
            label: None,
            fmt: ".".to_string(),
            attrs: AttrBag::new(),
            clear_first: true,
            legend_frame: true,
            legend_marker_scale: 1.0,
            style: SeriesStyle::default(),
        }
    }
}

/// Draw a 1D series (with error bars when `opts.yerr` is set) onto `surface`.
///
/// Side effects, in order: clear (when `clear_first`), draw, apply `attrs`,
/// attach a legend when a non-empty label was given. Attribute application
/// runs strictly after drawing and the legend strictly after that, so the bag
/// can override draw-step defaults and the legend reflects final axis state.
///
/// Failures from the surface propagate unchanged; this layer validates
/// nothing.
pub fn draw_series<S: Surface + ?Sized>(
    surface: &mut S,
    x: &[f64],
    y: &[f64],
    opts: &SeriesOptions,
) -> PlotResult<()> {
    tracing::debug!(points = x.len(), label = ?opts.label, "drawing 1d series");

    if opts.clear_first {
        surface.clear();
    }

    surface.errorbar(&SeriesSpec {
        x,
        y,
        yerr: opts.yerr.as_deref(),
        fmt: &opts.fmt,
        label: opts.label.as_deref(),
        style: &opts.style,
    })?;

    surface.apply(&opts.attrs)?;

    if opts.label.as_deref().is_some_and(|label| !label.is_empty()) {
        surface.legend(&LegendConfig {
            frame: opts.legend_frame,
            marker_scale: opts.legend_marker_scale,
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Event, RecordingSurface};
    use ax_core::{attrs, PlotError};

    #[test]
    fn test_draws_exactly_one_series() {
        let mut surface = RecordingSurface::new();
        draw_series(
            &mut surface,
            &[0.0, 1.0, 2.0],
            &[1.0, 4.0, 9.0],
            &SeriesOptions::default(),
        )
        .unwrap();
        assert_eq!(surface.series_count(), 1);
    }

    #[test]
    fn test_labeled_series_gets_legend() {
        let mut surface = RecordingSurface::new();
        let opts = SeriesOptions {
            label: Some("sq".to_string()),
            ..Default::default()
        };
        draw_series(&mut surface, &[0.0, 1.0, 2.0], &[1.0, 4.0, 9.0], &opts).unwrap();

        assert_eq!(surface.series_count(), 1);
        assert_eq!(surface.series()[0].label.as_deref(), Some("sq"));
        assert!(surface.legend().is_some());
    }

    #[test]
    fn test_no_label_no_legend() {
        let mut surface = RecordingSurface::new();
        draw_series(&mut surface, &[0.0], &[1.0], &SeriesOptions::default()).unwrap();
        assert!(surface.legend().is_none());
    }

    #[test]
    fn test_empty_label_no_legend() {
        let mut surface = RecordingSurface::new();
        let opts = SeriesOptions {
            label: Some(String::new()),
            ..Default::default()
        };
        draw_series(&mut surface, &[0.0], &[1.0], &opts).unwrap();
        assert!(surface.legend().is_none());
    }

    #[test]
    fn test_legend_options_forwarded() {
        let mut surface = RecordingSurface::new();
        let opts = SeriesOptions {
            label: Some("data".to_string()),
            legend_frame: false,
            legend_marker_scale: 2.0,
            ..Default::default()
        };
        draw_series(&mut surface, &[0.0], &[1.0], &opts).unwrap();

        let legend = surface.legend().unwrap();
        assert!(!legend.frame);
        assert_eq!(legend.marker_scale, 2.0);
    }

    #[test]
    fn test_attrs_applied_after_draw() {
        let mut surface = RecordingSurface::new();
        let opts = SeriesOptions {
            label: Some("data".to_string()),
            attrs: attrs! { "title": "after", "yscale": "log" },
            ..Default::default()
        };
        draw_series(&mut surface, &[0.0, 1.0], &[1.0, 2.0], &opts).unwrap();

        // The bag lands on the surface even when it duplicates draw defaults.
        assert_eq!(surface.attr("title").unwrap().as_str(), Some("after"));

        // Ordering: clear, draw, attrs, legend.
        let kinds: Vec<_> = surface
            .events()
            .iter()
            .map(|e| match e {
                Event::Cleared => "clear",
                Event::Series { .. } => "series",
                Event::AttrsApplied(_) => "attrs",
                Event::Legend { .. } => "legend",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["clear", "series", "attrs", "legend"]);
    }

    #[test]
    fn test_clear_first_false_accumulates() {
        let mut surface = RecordingSurface::new();
        let keep = SeriesOptions {
            clear_first: false,
            ..Default::default()
        };
        draw_series(&mut surface, &[0.0], &[1.0], &SeriesOptions::default()).unwrap();
        draw_series(&mut surface, &[0.0], &[2.0], &keep).unwrap();
        draw_series(&mut surface, &[0.0], &[3.0], &keep).unwrap();
        assert_eq!(surface.series_count(), 3);

        // A clearing call starts over.
        draw_series(&mut surface, &[0.0], &[4.0], &SeriesOptions::default()).unwrap();
        assert_eq!(surface.series_count(), 1);
    }

    #[test]
    fn test_yerr_forwarded() {
        let mut surface = RecordingSurface::new();
        let opts = SeriesOptions {
            yerr: Some(vec![0.1, 0.2]),
            ..Default::default()
        };
        draw_series(&mut surface, &[0.0, 1.0], &[1.0, 2.0], &opts).unwrap();
        assert_eq!(surface.series()[0].yerr.as_deref(), Some(&[0.1, 0.2][..]));
    }

    #[test]
    fn test_surface_errors_propagate() {
        let mut surface = RecordingSurface::new();
        let err = draw_series(
            &mut surface,
            &[0.0, 1.0],
            &[1.0],
            &SeriesOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PlotError::LengthMismatch { .. }));

        let opts = SeriesOptions {
            fmt: "zz".to_string(),
            ..Default::default()
        };
        let err = draw_series(&mut surface, &[0.0], &[1.0], &opts).unwrap_err();
        assert!(matches!(err, PlotError::BadFormat { .. }));
    }
}
