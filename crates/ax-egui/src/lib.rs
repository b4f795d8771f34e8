//! egui backend for the axes convenience renderers
//!
//! [`RetainedSurface`] implements [`ax_core::Surface`] as retained state: the
//! renderers mutate it once, the app calls [`RetainedSurface::show`] every
//! frame to draw the current state into an `egui::Ui`. Series surfaces render
//! through `egui_plot`; image and colorbar surfaces are painted directly.

mod show;
mod surface;

pub use surface::RetainedSurface;
