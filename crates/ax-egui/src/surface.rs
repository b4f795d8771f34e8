//! Retained plot state and the `Surface` implementation

use ndarray::{Array2, ArrayView2};
use serde_json::Value;

use ax_core::{
    categorical_color, AttrBag, Color, ImageHandle, ImageStyle, LegendConfig, MarkerFormat,
    PlotError, PlotResult, SeriesSpec, Surface,
};

/// Axis scale attribute (`"xscale"` / `"yscale"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum AxisScale {
    #[default]
    Linear,
    Log,
}

impl AxisScale {
    /// Map a data coordinate into plot space. Non-positive values on a log
    /// axis come back non-finite and are dropped by the draw path.
    pub(crate) fn forward(self, v: f64) -> f64 {
        match self {
            AxisScale::Linear => v,
            AxisScale::Log => {
                if v > 0.0 {
                    v.log10()
                } else {
                    f64::NAN
                }
            }
        }
    }
}

/// Axes-level configuration accumulated from attribute bags.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct AxisState {
    pub title: Option<String>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub xlim: Option<(f64, f64)>,
    pub ylim: Option<(f64, f64)>,
    pub xscale: AxisScale,
    pub yscale: AxisScale,
}

#[derive(Debug, Clone)]
pub(crate) struct RetainedSeries {
    pub label: Option<String>,
    pub fmt: MarkerFormat,
    /// Resolved draw color: explicit style color, else format-string color,
    /// else the next categorical palette entry.
    pub color: Color,
    pub line_width: f32,
    pub marker_radius: f32,
    pub cap_width: f32,
    pub points: Vec<[f64; 2]>,
    pub yerr: Option<Vec<f64>>,
}

#[derive(Debug, Clone)]
pub(crate) struct RetainedImage {
    pub values: Array2<f64>,
    pub handle: ImageHandle,
}

#[derive(Debug, Clone)]
pub(crate) struct ColorbarState {
    pub image: ImageHandle,
    pub label: Option<String>,
    pub font_size: f32,
}

/// One axes worth of retained plot state, shown into an `egui::Ui` per frame.
pub struct RetainedSurface {
    pub(crate) id: String,
    pub(crate) series: Vec<RetainedSeries>,
    pub(crate) image: Option<RetainedImage>,
    pub(crate) axis: AxisState,
    pub(crate) grid_visible: bool,
    pub(crate) legend: Option<LegendConfig>,
    pub(crate) colorbar: Option<ColorbarState>,
}

impl RetainedSurface {
    /// `id` keys the underlying `egui_plot::Plot`; keep it unique per surface
    /// within one window.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            series: Vec::new(),
            image: None,
            axis: AxisState::default(),
            grid_visible: false,
            legend: None,
            colorbar: None,
        }
    }

    fn apply_one(&mut self, key: &str, value: &Value) -> PlotResult<()> {
        match key {
            "title" => self.axis.title = Some(expect_str(key, value)?),
            "xlabel" => self.axis.xlabel = Some(expect_str(key, value)?),
            "ylabel" => self.axis.ylabel = Some(expect_str(key, value)?),
            "xlim" => self.axis.xlim = Some(expect_pair(key, value)?),
            "ylim" => self.axis.ylim = Some(expect_pair(key, value)?),
            "xscale" => self.axis.xscale = expect_scale(key, value)?,
            "yscale" => self.axis.yscale = expect_scale(key, value)?,
            "grid" => self.grid_visible = expect_bool(key, value)?,
            _ => return Err(PlotError::UnknownAttr(key.to_string())),
        }
        Ok(())
    }
}

impl Surface for RetainedSurface {
    fn clear(&mut self) {
        self.series.clear();
        self.image = None;
        self.axis = AxisState::default();
        self.grid_visible = false;
        self.legend = None;
        self.colorbar = None;
    }

    fn errorbar(&mut self, spec: &SeriesSpec<'_>) -> PlotResult<()> {
        if spec.y.len() != spec.x.len() {
            return Err(PlotError::LengthMismatch {
                x_len: spec.x.len(),
                what: "y",
                len: spec.y.len(),
            });
        }
        if let Some(yerr) = spec.yerr {
            if yerr.len() != spec.x.len() {
                return Err(PlotError::LengthMismatch {
                    x_len: spec.x.len(),
                    what: "yerr",
                    len: yerr.len(),
                });
            }
        }
        let fmt = MarkerFormat::parse(spec.fmt)?;
        let color = spec
            .style
            .color
            .or(fmt.color)
            .unwrap_or_else(|| categorical_color(self.series.len()));

        tracing::debug!(
            id = %self.id,
            points = spec.x.len(),
            label = ?spec.label,
            "retaining series"
        );

        self.series.push(RetainedSeries {
            label: spec.label.map(str::to_string),
            fmt,
            color,
            line_width: spec.style.line_width,
            marker_radius: spec.style.marker_radius,
            cap_width: spec.style.cap_width,
            points: spec.x.iter().zip(spec.y).map(|(&x, &y)| [x, y]).collect(),
            yerr: spec.yerr.map(<[f64]>::to_vec),
        });
        Ok(())
    }

    fn imshow(&mut self, data: ArrayView2<'_, f64>, style: &ImageStyle) -> PlotResult<ImageHandle> {
        let (rows, cols) = data.dim();
        if rows == 0 || cols == 0 {
            return Err(PlotError::EmptyImage { rows, cols });
        }

        let (vmin, vmax) = style.resolve_range(data);
        let handle = ImageHandle {
            colormap: style.colormap,
            vmin,
            vmax,
        };

        tracing::debug!(id = %self.id, rows, cols, vmin, vmax, "retaining image");

        self.image = Some(RetainedImage {
            values: data.to_owned(),
            handle: handle.clone(),
        });
        Ok(handle)
    }

    fn apply(&mut self, attrs: &AttrBag) -> PlotResult<()> {
        for (key, value) in attrs {
            self.apply_one(key, value)?;
        }
        Ok(())
    }

    fn grid(&mut self, visible: bool) {
        self.grid_visible = visible;
    }

    fn legend(&mut self, config: &LegendConfig) -> PlotResult<()> {
        self.legend = Some(*config);
        Ok(())
    }

    fn colorbar(
        &mut self,
        image: &ImageHandle,
        label: Option<&str>,
        font_size: f32,
    ) -> PlotResult<()> {
        self.colorbar = Some(ColorbarState {
            image: image.clone(),
            label: label.map(str::to_string),
            font_size,
        });
        Ok(())
    }
}

fn expect_str(key: &str, value: &Value) -> PlotResult<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or(PlotError::InvalidAttr {
            key: key.to_string(),
            expected: "a string",
        })
}

fn expect_bool(key: &str, value: &Value) -> PlotResult<bool> {
    value.as_bool().ok_or(PlotError::InvalidAttr {
        key: key.to_string(),
        expected: "a boolean",
    })
}

fn expect_pair(key: &str, value: &Value) -> PlotResult<(f64, f64)> {
    let invalid = || PlotError::InvalidAttr {
        key: key.to_string(),
        expected: "a two-element numeric array",
    };
    let arr = value.as_array().ok_or_else(invalid)?;
    match arr.as_slice() {
        [lo, hi] => {
            let lo = lo.as_f64().ok_or_else(invalid)?;
            let hi = hi.as_f64().ok_or_else(invalid)?;
            Ok((lo, hi))
        }
        _ => Err(invalid()),
    }
}

fn expect_scale(key: &str, value: &Value) -> PlotResult<AxisScale> {
    match value.as_str() {
        Some("linear") => Ok(AxisScale::Linear),
        Some("log") => Ok(AxisScale::Log),
        _ => Err(PlotError::InvalidAttr {
            key: key.to_string(),
            expected: "\"linear\" or \"log\"",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ax_core::{attrs, SeriesStyle};
    use ndarray::array;

    fn surface() -> RetainedSurface {
        RetainedSurface::new("test")
    }

    fn spec<'a>(x: &'a [f64], y: &'a [f64], style: &'a SeriesStyle) -> SeriesSpec<'a> {
        SeriesSpec {
            x,
            y,
            yerr: None,
            fmt: ".",
            label: None,
            style,
        }
    }

    #[test]
    fn test_apply_sets_axis_state() {
        let mut s = surface();
        s.apply(&attrs! {
            "title": "T",
            "xlabel": "x",
            "ylim": [0.0, 10.0],
            "yscale": "log",
            "grid": true,
        })
        .unwrap();

        assert_eq!(s.axis.title.as_deref(), Some("T"));
        assert_eq!(s.axis.xlabel.as_deref(), Some("x"));
        assert_eq!(s.axis.ylim, Some((0.0, 10.0)));
        assert_eq!(s.axis.yscale, AxisScale::Log);
        assert!(s.grid_visible);
    }

    #[test]
    fn test_apply_rejects_unknown_key() {
        let mut s = surface();
        let err = s.apply(&attrs! { "zorder": 3 }).unwrap_err();
        assert_eq!(err, PlotError::UnknownAttr("zorder".to_string()));
    }

    #[test]
    fn test_apply_rejects_bad_values() {
        let mut s = surface();
        assert!(matches!(
            s.apply(&attrs! { "title": 3 }),
            Err(PlotError::InvalidAttr { .. })
        ));
        assert!(matches!(
            s.apply(&attrs! { "xlim": [1, 2, 3] }),
            Err(PlotError::InvalidAttr { .. })
        ));
        assert!(matches!(
            s.apply(&attrs! { "xscale": "cubic" }),
            Err(PlotError::InvalidAttr { .. })
        ));
    }

    #[test]
    fn test_errorbar_validates_lengths() {
        let mut s = surface();
        let style = SeriesStyle::default();
        assert!(matches!(
            s.errorbar(&spec(&[0.0, 1.0], &[1.0], &style)),
            Err(PlotError::LengthMismatch { .. })
        ));
        assert!(s.series.is_empty());
    }

    #[test]
    fn test_series_color_resolution() {
        let mut s = surface();

        // Palette color when nothing is specified.
        let style = SeriesStyle::default();
        s.errorbar(&spec(&[0.0], &[1.0], &style)).unwrap();
        assert_eq!(s.series[0].color, categorical_color(0));

        // Format-string color beats the palette.
        let mut red = spec(&[0.0], &[1.0], &style);
        red.fmt = "r-";
        s.errorbar(&red).unwrap();
        assert_eq!(s.series[1].color, Color::rgb(255, 0, 0));

        // Explicit style color beats both.
        let style = SeriesStyle {
            color: Some(Color::rgb(1, 2, 3)),
            ..Default::default()
        };
        let mut explicit = spec(&[0.0], &[1.0], &style);
        explicit.fmt = "r-";
        s.errorbar(&explicit).unwrap();
        assert_eq!(s.series[2].color, Color::rgb(1, 2, 3));
    }

    #[test]
    fn test_imshow_retains_grid_and_range() {
        let mut s = surface();
        let data = array![[0.0, 1.0], [2.0, 3.0]];
        let handle = s.imshow(data.view(), &ImageStyle::default()).unwrap();
        assert_eq!((handle.vmin, handle.vmax), (0.0, 3.0));

        let image = s.image.as_ref().unwrap();
        assert_eq!(image.values.dim(), (2, 2));
        assert_eq!(image.handle, handle);
    }

    #[test]
    fn test_colorbar_state() {
        let mut s = surface();
        let handle = ImageHandle {
            colormap: ax_core::Colormap::Plasma,
            vmin: -1.0,
            vmax: 1.0,
        };
        s.colorbar(&handle, Some("v"), 14.0).unwrap();

        let cb = s.colorbar.as_ref().unwrap();
        assert_eq!(cb.label.as_deref(), Some("v"));
        assert_eq!(cb.font_size, 14.0);
        assert_eq!(cb.image, handle);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut s = surface();
        let style = SeriesStyle::default();
        s.errorbar(&spec(&[0.0], &[1.0], &style)).unwrap();
        s.apply(&attrs! { "title": "T" }).unwrap();
        s.grid(true);
        s.legend(&LegendConfig::default()).unwrap();
        s.clear();

        assert!(s.series.is_empty());
        assert!(s.image.is_none());
        assert_eq!(s.axis, AxisState::default());
        assert!(!s.grid_visible);
        assert!(s.legend.is_none());
        assert!(s.colorbar.is_none());
    }

    #[test]
    fn test_log_forward() {
        assert_eq!(AxisScale::Log.forward(100.0), 2.0);
        assert!(AxisScale::Log.forward(0.0).is_nan());
        assert!(AxisScale::Log.forward(-5.0).is_nan());
        assert_eq!(AxisScale::Linear.forward(-5.0), -5.0);
    }

    #[test]
    fn test_renderers_drive_retained_surface() {
        // End to end through the convenience layer.
        let mut ax = surface();
        let opts = ax_render::SeriesOptions {
            label: Some("sq".to_string()),
            yerr: Some(vec![0.1, 0.2, 0.3]),
            attrs: attrs! { "title": "squares", "yscale": "log" },
            ..Default::default()
        };
        ax_render::draw_series(&mut ax, &[0.0, 1.0, 2.0], &[1.0, 4.0, 9.0], &opts).unwrap();

        assert_eq!(ax.series.len(), 1);
        assert_eq!(ax.axis.title.as_deref(), Some("squares"));
        assert_eq!(ax.axis.yscale, AxisScale::Log);
        assert!(ax.legend.is_some());

        let mut img_ax = surface();
        let mut cax = surface();
        let data = array![[0.0, 1.0], [2.0, 3.0]];
        let opts = ax_render::ImageOptions {
            colorbar_label: Some("v".to_string()),
            attrs: attrs! { "grid": true },
            ..Default::default()
        };
        ax_render::draw_image(&mut img_ax, data.view(), Some(&mut cax), &opts).unwrap();

        assert!(img_ax.image.is_some());
        // The unconditional suppression wins over the attribute.
        assert!(!img_ax.grid_visible);
        assert_eq!(cax.colorbar.as_ref().unwrap().label.as_deref(), Some("v"));
    }
}
