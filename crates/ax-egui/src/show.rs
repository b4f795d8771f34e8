//! Frame rendering for `RetainedSurface`

use egui::{pos2, vec2, Align2, Color32, FontId, Rect, RichText, Sense, Stroke, TextStyle, Ui};
use egui_plot::{Line, LineStyle, MarkerShape, Plot, PlotBounds, PlotPoints, Points};

use ax_core::{Color, LegendConfig, LinePattern, Marker};

use crate::surface::{AxisScale, ColorbarState, RetainedImage, RetainedSeries, RetainedSurface};

impl RetainedSurface {
    /// Draw the current state into `ui`. Call once per frame.
    pub fn show(&self, ui: &mut Ui) {
        if let Some(title) = &self.axis.title {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(title).strong());
            });
        }

        if let Some(colorbar) = &self.colorbar {
            self.show_colorbar(ui, colorbar);
        } else if let Some(image) = &self.image {
            self.show_image(ui, image);
        } else {
            self.show_plot(ui);
        }
    }

    fn show_plot(&self, ui: &mut Ui) {
        let axis = &self.axis;
        let xlim = axis
            .xlim
            .map(|(lo, hi)| (axis.xscale.forward(lo), axis.xscale.forward(hi)))
            .filter(|(lo, hi)| lo.is_finite() && hi.is_finite());
        let ylim = axis
            .ylim
            .map(|(lo, hi)| (axis.yscale.forward(lo), axis.yscale.forward(hi)))
            .filter(|(lo, hi)| lo.is_finite() && hi.is_finite());

        let plot = Plot::new(self.id.clone())
            .show_grid(self.grid_visible)
            .auto_bounds(egui::Vec2b::new(xlim.is_none(), ylim.is_none()))
            .allow_scroll(true)
            .allow_zoom(true)
            .allow_drag(true)
            .allow_boxed_zoom(true);

        let response = plot.show(ui, |plot_ui| {
            if xlim.is_some() || ylim.is_some() {
                let bounds = plot_ui.plot_bounds();
                let [mut xmin, mut ymin] = bounds.min();
                let [mut xmax, mut ymax] = bounds.max();
                if let Some((lo, hi)) = xlim {
                    (xmin, xmax) = (lo, hi);
                }
                if let Some((lo, hi)) = ylim {
                    (ymin, ymax) = (lo, hi);
                }
                plot_ui.set_plot_bounds(PlotBounds::from_min_max([xmin, ymin], [xmax, ymax]));
            }

            for series in &self.series {
                draw_series(plot_ui, series, axis.xscale, axis.yscale);
            }
        });

        let rect = response.response.rect;
        if let Some(legend) = &self.legend {
            self.paint_legend(ui, rect, legend);
        }
        self.paint_axis_labels(ui, rect);
    }

    fn show_image(&self, ui: &mut Ui, image: &RetainedImage) {
        let (rows, cols) = image.values.dim();
        let left_margin = if self.axis.ylabel.is_some() { 24.0 } else { 4.0 };
        let bottom_margin = if self.axis.xlabel.is_some() { 20.0 } else { 4.0 };

        let avail = ui.available_size();
        let cell = ((avail.x - left_margin) / cols as f32)
            .min((avail.y - bottom_margin) / rows as f32)
            .clamp(2.0, 48.0);
        let desired = vec2(
            left_margin + cols as f32 * cell,
            rows as f32 * cell + bottom_margin,
        );
        let (response, painter) = ui.allocate_painter(desired, Sense::hover());
        let rect = response.rect;
        let origin = rect.min + vec2(left_margin, 0.0);

        let handle = &image.handle;
        let span = handle.vmax - handle.vmin;
        for row in 0..rows {
            for col in 0..cols {
                let cell_rect = Rect::from_min_size(
                    origin + vec2(col as f32 * cell, row as f32 * cell),
                    vec2(cell, cell),
                );
                let value = image.values[[row, col]];
                if value.is_finite() {
                    let t = if span > 0.0 {
                        ((value - handle.vmin) / span) as f32
                    } else {
                        0.5
                    };
                    painter.rect_filled(cell_rect, 0.0, color32(handle.colormap.sample(t)));
                } else {
                    // Non-finite cell
                    painter.rect_filled(cell_rect, 0.0, Color32::from_gray(40));
                }
                if self.grid_visible {
                    painter.rect_stroke(cell_rect, 0.0, Stroke::new(0.5, Color32::from_gray(80)));
                }
            }
        }

        let text_color = ui.style().visuals.text_color();
        let font = TextStyle::Small.resolve(ui.style());
        if let Some(xlabel) = &self.axis.xlabel {
            painter.text(
                pos2(origin.x + cols as f32 * cell / 2.0, rect.max.y - 2.0),
                Align2::CENTER_BOTTOM,
                xlabel,
                font.clone(),
                text_color,
            );
        }
        if let Some(ylabel) = &self.axis.ylabel {
            painter.text(
                pos2(rect.min.x + 2.0, origin.y + rows as f32 * cell / 2.0),
                Align2::LEFT_CENTER,
                ylabel,
                font,
                text_color,
            );
        }
    }

    fn show_colorbar(&self, ui: &mut Ui, colorbar: &ColorbarState) {
        let desired = vec2(64.0, ui.available_height().max(120.0));
        let (response, painter) = ui.allocate_painter(desired, Sense::hover());
        let rect = response.rect;
        let bar = Rect::from_min_size(
            rect.min + vec2(4.0, 8.0),
            vec2(14.0, (rect.height() - 16.0).max(16.0)),
        );

        let image = &colorbar.image;
        let steps = 50;
        let step_height = bar.height() / steps as f32;
        for i in 0..steps {
            let t = i as f32 / (steps - 1) as f32;
            let step_rect = Rect::from_min_size(
                bar.min + vec2(0.0, (steps - 1 - i) as f32 * step_height),
                vec2(bar.width(), step_height),
            );
            painter.rect_filled(step_rect, 0.0, color32(image.colormap.sample(t)));
        }

        let text_color = ui.style().visuals.text_color();
        let small = TextStyle::Small.resolve(ui.style());
        painter.text(
            pos2(bar.max.x + 4.0, bar.min.y),
            Align2::LEFT_TOP,
            format!("{:.1}", image.vmax),
            small.clone(),
            text_color,
        );
        painter.text(
            pos2(bar.max.x + 4.0, bar.max.y),
            Align2::LEFT_BOTTOM,
            format!("{:.1}", image.vmin),
            small,
            text_color,
        );

        if let Some(label) = &colorbar.label {
            painter.text(
                pos2(bar.max.x + 4.0, bar.center().y),
                Align2::LEFT_CENTER,
                label,
                FontId::proportional(colorbar.font_size),
                text_color,
            );
        }
    }

    fn paint_legend(&self, ui: &Ui, rect: Rect, legend: &LegendConfig) {
        let labeled: Vec<&RetainedSeries> = self
            .series
            .iter()
            .filter(|s| s.label.as_deref().is_some_and(|l| !l.is_empty()))
            .collect();
        if labeled.is_empty() {
            return;
        }

        let font = TextStyle::Small.resolve(ui.style());
        let text_color = ui.style().visuals.text_color();
        let galleys: Vec<_> = labeled
            .iter()
            .map(|s| {
                ui.painter()
                    .layout_no_wrap(s.label.clone().unwrap(), font.clone(), text_color)
            })
            .collect();

        let sample_width = 18.0 * legend.marker_scale.max(0.1);
        let row_height = galleys
            .iter()
            .map(|g| g.size().y)
            .fold(12.0f32, f32::max)
            + 4.0;
        let text_width = galleys.iter().map(|g| g.size().x).fold(0.0f32, f32::max);
        let padding = 6.0;
        let box_size = vec2(
            sample_width + 6.0 + text_width + 2.0 * padding,
            labeled.len() as f32 * row_height + 2.0 * padding,
        );
        let box_rect = Rect::from_min_size(
            rect.right_top() + vec2(-box_size.x - 8.0, 8.0),
            box_size,
        );

        let painter = ui.painter().with_clip_rect(rect);
        if legend.frame {
            painter.rect_filled(box_rect, 3.0, Color32::from_black_alpha(144));
            painter.rect_stroke(box_rect, 3.0, Stroke::new(1.0, Color32::from_gray(120)));
        }

        for (i, (series, galley)) in labeled.into_iter().zip(galleys).enumerate() {
            let row_top = box_rect.min.y + padding + i as f32 * row_height;
            let sample_center = pos2(
                box_rect.min.x + padding + sample_width / 2.0,
                row_top + row_height / 2.0,
            );
            let color = color32(series.color);

            if series.fmt.line.is_some() || series.fmt.marker.is_none() {
                painter.line_segment(
                    [
                        sample_center - vec2(sample_width / 2.0, 0.0),
                        sample_center + vec2(sample_width / 2.0, 0.0),
                    ],
                    Stroke::new(series.line_width, color),
                );
            }
            if let Some(marker) = series.fmt.marker {
                let radius = marker_radius(series, marker) * legend.marker_scale;
                match marker {
                    Marker::Square => painter.rect_filled(
                        Rect::from_center_size(sample_center, vec2(radius * 2.0, radius * 2.0)),
                        0.0,
                        color,
                    ),
                    _ => painter.circle_filled(sample_center, radius, color),
                }
            }

            painter.galley(
                pos2(
                    box_rect.min.x + padding + sample_width + 6.0,
                    row_top + (row_height - galley.size().y) / 2.0,
                ),
                galley,
            );
        }
    }

    fn paint_axis_labels(&self, ui: &Ui, rect: Rect) {
        let text_color = ui.style().visuals.text_color();
        let font = TextStyle::Small.resolve(ui.style());
        let painter = ui.painter();
        if let Some(xlabel) = &self.axis.xlabel {
            painter.text(
                pos2(rect.center().x, rect.max.y - 2.0),
                Align2::CENTER_BOTTOM,
                xlabel,
                font.clone(),
                text_color,
            );
        }
        if let Some(ylabel) = &self.axis.ylabel {
            painter.text(
                pos2(rect.min.x + 2.0, rect.min.y + 2.0),
                Align2::LEFT_TOP,
                ylabel,
                font,
                text_color,
            );
        }
    }
}

fn draw_series(
    plot_ui: &mut egui_plot::PlotUi,
    series: &RetainedSeries,
    xscale: AxisScale,
    yscale: AxisScale,
) {
    let color = color32(series.color);

    let mut dropped = 0usize;
    let points: Vec<[f64; 2]> = series
        .points
        .iter()
        .filter_map(|&[x, y]| {
            let (tx, ty) = (xscale.forward(x), yscale.forward(y));
            if tx.is_finite() && ty.is_finite() {
                Some([tx, ty])
            } else {
                dropped += 1;
                None
            }
        })
        .collect();
    if dropped > 0 {
        tracing::warn!(dropped, label = ?series.label, "dropped points not representable on log axis");
    }

    // An empty format string draws a plain line.
    let draw_line = series.fmt.line.is_some() || series.fmt.marker.is_none();
    if draw_line {
        let mut line = Line::new(PlotPoints::new(points.clone()))
            .color(color)
            .width(series.line_width);
        if let Some(label) = &series.label {
            line = line.name(label);
        }
        match series.fmt.line {
            Some(LinePattern::Dashed) => line = line.style(LineStyle::Dashed { length: 10.0 }),
            Some(LinePattern::Dotted) => line = line.style(LineStyle::Dotted { spacing: 10.0 }),
            Some(LinePattern::DashDot) => line = line.style(LineStyle::Dashed { length: 5.0 }),
            _ => {}
        }
        plot_ui.line(line);
    }

    if let Some(marker) = series.fmt.marker {
        plot_ui.points(
            Points::new(points.clone())
                .color(color)
                .radius(marker_radius(series, marker))
                .shape(marker_shape(marker)),
        );
    }

    if let Some(yerr) = &series.yerr {
        draw_error_bars(plot_ui, series, yerr, xscale, yscale, color);
    }
}

fn draw_error_bars(
    plot_ui: &mut egui_plot::PlotUi,
    series: &RetainedSeries,
    yerr: &[f64],
    xscale: AxisScale,
    yscale: AxisScale,
    color: Color32,
) {
    // Cap half-width in (transformed) data space, scaled off the x span so it
    // stays visible at any zoom level.
    let xs: Vec<f64> = series
        .points
        .iter()
        .map(|&[x, _]| xscale.forward(x))
        .filter(|v| v.is_finite())
        .collect();
    let span = match (
        xs.iter().cloned().fold(f64::INFINITY, f64::min),
        xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
    ) {
        (lo, hi) if hi > lo => hi - lo,
        _ => 1.0,
    };
    let half = span * 0.01 * (series.cap_width as f64 / 4.0);

    let stroke_width = (series.line_width * 0.75).max(0.5);
    for (&[x, y], &err) in series.points.iter().zip(yerr) {
        let tx = xscale.forward(x);
        let lo = yscale.forward(y - err);
        let hi = yscale.forward(y + err);
        if !tx.is_finite() || !lo.is_finite() || !hi.is_finite() {
            continue;
        }

        plot_ui.line(
            Line::new(PlotPoints::new(vec![[tx, lo], [tx, hi]]))
                .color(color)
                .width(stroke_width),
        );
        for end in [lo, hi] {
            plot_ui.line(
                Line::new(PlotPoints::new(vec![[tx - half, end], [tx + half, end]]))
                    .color(color)
                    .width(stroke_width),
            );
        }
    }
}

fn marker_radius(series: &RetainedSeries, marker: Marker) -> f32 {
    // A bare dot renders smaller than the named markers.
    if marker == Marker::Point {
        series.marker_radius * 0.6
    } else {
        series.marker_radius
    }
}

fn marker_shape(marker: Marker) -> MarkerShape {
    match marker {
        Marker::Point | Marker::Circle => MarkerShape::Circle,
        Marker::Square => MarkerShape::Square,
        Marker::TriangleUp => MarkerShape::Up,
        Marker::TriangleDown => MarkerShape::Down,
        Marker::Diamond => MarkerShape::Diamond,
        Marker::Cross => MarkerShape::Cross,
        Marker::Plus => MarkerShape::Plus,
        Marker::Asterisk => MarkerShape::Asterisk,
    }
}

fn color32(color: Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}
