//! Headless recording backend
//!
//! `RecordingSurface` implements [`Surface`] without drawing anything: every
//! primitive call is appended to an ordered event log and folded into retained
//! state that tests (or capture-style tooling) can inspect. It enforces the
//! same primitive-level contracts a real backend does, so renderer tests see
//! realistic failures for mismatched lengths, empty images and bad format
//! strings.

use ndarray::ArrayView2;
use serde_json::Value;

use ax_core::{
    AttrBag, ImageHandle, ImageStyle, LegendConfig, MarkerFormat, PlotError, PlotResult,
    SeriesSpec, Surface,
};

/// One recorded primitive call.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Cleared,
    Series {
        label: Option<String>,
        points: usize,
        with_err: bool,
    },
    Image {
        rows: usize,
        cols: usize,
    },
    /// Attribute keys applied, in application order.
    AttrsApplied(Vec<String>),
    Grid(bool),
    Legend {
        frame: bool,
        marker_scale: f32,
    },
    Colorbar {
        label: Option<String>,
        font_size: f32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedSeries {
    pub label: Option<String>,
    pub fmt: MarkerFormat,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub yerr: Option<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedColorbar {
    pub label: Option<String>,
    pub font_size: f32,
    pub image: ImageHandle,
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    events: Vec<Event>,
    series: Vec<RecordedSeries>,
    images: Vec<ImageHandle>,
    attrs: AttrBag,
    grid_visible: bool,
    legend: Option<LegendConfig>,
    colorbars: Vec<RecordedColorbar>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full event log, in call order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    pub fn series(&self) -> &[RecordedSeries] {
        &self.series
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Merged attribute state, last write per key wins.
    pub fn attr(&self, key: &str) -> Option<&Value> {
        self.attrs.get(key)
    }

    pub fn grid_visible(&self) -> bool {
        self.grid_visible
    }

    pub fn legend(&self) -> Option<&LegendConfig> {
        self.legend.as_ref()
    }

    pub fn colorbars(&self) -> &[RecordedColorbar] {
        &self.colorbars
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.series.clear();
        self.images.clear();
        self.attrs.clear();
        self.grid_visible = false;
        self.legend = None;
        self.colorbars.clear();
        self.events.push(Event::Cleared);
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

        self.events.push(Event::Series {
            label: spec.label.map(str::to_string),
            points: spec.x.len(),
            with_err: spec.yerr.is_some(),
        });
        self.series.push(RecordedSeries {
            label: spec.label.map(str::to_string),
            fmt,
            x: spec.x.to_vec(),
            y: spec.y.to_vec(),
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

        self.events.push(Event::Image { rows, cols });
        self.images.push(handle.clone());
        Ok(handle)
    }

    fn apply(&mut self, attrs: &AttrBag) -> PlotResult<()> {
        // Recorded verbatim: this backend accepts any key.
        for (key, value) in attrs {
            self.attrs.insert(key.clone(), value.clone());
        }
        self.events
            .push(Event::AttrsApplied(attrs.keys().cloned().collect()));
        Ok(())
    }

    fn grid(&mut self, visible: bool) {
        self.grid_visible = visible;
        self.events.push(Event::Grid(visible));
    }

    fn legend(&mut self, config: &LegendConfig) -> PlotResult<()> {
        self.legend = Some(*config);
        self.events.push(Event::Legend {
            frame: config.frame,
            marker_scale: config.marker_scale,
        });
        Ok(())
    }

    fn colorbar(
        &mut self,
        image: &ImageHandle,
        label: Option<&str>,
        font_size: f32,
    ) -> PlotResult<()> {
        self.colorbars.push(RecordedColorbar {
            label: label.map(str::to_string),
            font_size,
            image: image.clone(),
        });
        self.events.push(Event::Colorbar {
            label: label.map(str::to_string),
            font_size,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ax_core::SeriesStyle;
    use ndarray::array;

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
    fn test_length_mismatch_rejected() {
        let mut surface = RecordingSurface::new();
        let style = SeriesStyle::default();
        let err = surface
            .errorbar(&spec(&[0.0, 1.0], &[1.0], &style))
            .unwrap_err();
        assert_eq!(
            err,
            PlotError::LengthMismatch {
                x_len: 2,
                what: "y",
                len: 1
            }
        );
        assert_eq!(surface.series_count(), 0);
    }

    #[test]
    fn test_yerr_mismatch_rejected() {
        let mut surface = RecordingSurface::new();
        let style = SeriesStyle::default();
        let mut s = spec(&[0.0, 1.0], &[1.0, 2.0], &style);
        s.yerr = Some(&[0.1]);
        assert!(surface.errorbar(&s).is_err());
    }

    #[test]
    fn test_bad_fmt_rejected() {
        let mut surface = RecordingSurface::new();
        let style = SeriesStyle::default();
        let mut s = spec(&[0.0], &[1.0], &style);
        s.fmt = "!!";
        assert!(matches!(
            surface.errorbar(&s),
            Err(PlotError::BadFormat { .. })
        ));
    }

    #[test]
    fn test_empty_image_rejected() {
        let mut surface = RecordingSurface::new();
        let data = ndarray::Array2::<f64>::zeros((0, 3));
        let err = surface.imshow(data.view(), &ImageStyle::default()).unwrap_err();
        assert_eq!(err, PlotError::EmptyImage { rows: 0, cols: 3 });
    }

    #[test]
    fn test_image_value_range() {
        let mut surface = RecordingSurface::new();
        let data = array![[0.0, 1.0], [2.0, f64::NAN]];
        let handle = surface.imshow(data.view(), &ImageStyle::default()).unwrap();
        assert_eq!((handle.vmin, handle.vmax), (0.0, 2.0));

        let style = ImageStyle {
            vmin: Some(-1.0),
            vmax: Some(5.0),
            ..Default::default()
        };
        let handle = surface.imshow(data.view(), &style).unwrap();
        assert_eq!((handle.vmin, handle.vmax), (-1.0, 5.0));
    }

    #[test]
    fn test_clear_resets_state() {
        let mut surface = RecordingSurface::new();
        let style = SeriesStyle::default();
        surface.errorbar(&spec(&[0.0], &[1.0], &style)).unwrap();
        surface.grid(true);
        surface.clear();

        assert_eq!(surface.series_count(), 0);
        assert!(!surface.grid_visible());
        assert_eq!(surface.events().last(), Some(&Event::Cleared));
    }
}
