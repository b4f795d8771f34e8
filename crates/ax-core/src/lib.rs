//! Core abstractions for the axes convenience renderers
//!
//! This crate defines the drawable-surface seam everything else plugs into:
//! the `Surface` trait, the attribute bag applied in bulk to a surface, the
//! error taxonomy raised by surface backends, and the small shared vocabulary
//! of colors, colormaps, format strings and pass-through styles.

pub mod attrs;
pub mod color;
pub mod error;
pub mod format;
pub mod style;
pub mod surface;

// Re-export commonly used types
pub use attrs::AttrBag;
pub use color::{categorical_color, Color, Colormap};
pub use error::{PlotError, PlotResult};
pub use format::{LinePattern, Marker, MarkerFormat};
pub use style::{ImageStyle, SeriesStyle};
pub use surface::{ImageHandle, LegendConfig, SeriesSpec, Surface};

// Used by the `attrs!` macro expansion.
#[doc(hidden)]
pub use serde_json;
