//! Demo application for the axes convenience renderers
//!
//! Draws a damped oscillation with error bars next to a 2D field with a
//! colorbar, both produced through the public `ax-render` API against
//! retained egui surfaces.

use anyhow::Result;
use ndarray::Array2;
use tracing::info;

use ax_core::attrs;
use ax_egui::RetainedSurface;
use ax_render::{draw_image, draw_series, ImageOptions, SeriesOptions};

struct DemoApp {
    line_ax: RetainedSurface,
    image_ax: RetainedSurface,
    colorbar_ax: RetainedSurface,
}

impl DemoApp {
    fn new() -> Result<Self> {
        let mut line_ax = RetainedSurface::new("demo-line");
        let mut image_ax = RetainedSurface::new("demo-image");
        let mut colorbar_ax = RetainedSurface::new("demo-colorbar");

        let x: Vec<f64> = (0..60).map(|i| i as f64 * 0.25).collect();
        let y: Vec<f64> = x
            .iter()
            .map(|&x| (x * 0.8).sin() * (-x / 12.0).exp() + 1.5)
            .collect();
        let yerr: Vec<f64> = x
            .iter()
            .map(|&x| 0.04 + 0.03 * (x * 1.7).cos().abs())
            .collect();

        draw_series(
            &mut line_ax,
            &x,
            &y,
            &SeriesOptions {
                yerr: Some(yerr),
                label: Some("damped".to_string()),
                fmt: "o-".to_string(),
                attrs: attrs! {
                    "title": "Damped oscillation",
                    "xlabel": "t [s]",
                    "ylabel": "amplitude",
                },
                ..Default::default()
            },
        )?;

        let field = Array2::from_shape_fn((32, 32), |(row, col)| {
            let dy = row as f64 - 15.5;
            let dx = col as f64 - 15.5;
            let r = (dx * dx + dy * dy).sqrt();
            (r * 0.45).cos() * (-r / 14.0).exp()
        });

        draw_image(
            &mut image_ax,
            field.view(),
            Some(&mut colorbar_ax),
            &ImageOptions {
                colorbar_label: Some("intensity".to_string()),
                attrs: attrs! {
                    "title": "Radial field",
                    "xlabel": "x [px]",
                    "ylabel": "y [px]",
                },
                ..Default::default()
            },
        )?;

        Ok(Self {
            line_ax,
            image_ax,
            colorbar_ax,
        })
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.columns(2, |columns| {
                self.line_ax.show(&mut columns[0]);
                columns[1].horizontal(|ui| {
                    self.image_ax.show(ui);
                    self.colorbar_ax.show(ui);
                });
            });
        });
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    info!("Starting axes renderer demo");

    let app = DemoApp::new()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 560.0])
            .with_min_inner_size([640.0, 400.0]),
        default_theme: eframe::Theme::Dark,
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native(
        "Axes Renderer Demo",
        options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
