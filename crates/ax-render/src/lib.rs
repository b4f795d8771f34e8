//! Axes convenience renderers
//!
//! Two stateless functions that drive a caller-supplied [`ax_core::Surface`]:
//! [`draw_series`] for 1D line/error-bar data and [`draw_image`] for 2D arrays
//! with an optional colorbar. Each is a fixed linear sequence of surface calls;
//! all validation and failure behavior belongs to the surface implementation.

pub mod image;
pub mod line;
pub mod record;

pub use image::{draw_image, ImageOptions};
pub use line::{draw_series, SeriesOptions};
pub use record::{Event, RecordingSurface};
