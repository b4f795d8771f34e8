//! Error taxonomy for surface backends
//!
//! The renderers in `ax-render` define no errors of their own; everything here
//! is raised by a surface implementation and propagated unchanged.

use thiserror::Error;

/// Convenience alias used throughout the workspace.
pub type PlotResult<T> = Result<T, PlotError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlotError {
    /// A sequence passed to the error-bar primitive does not match the x data.
    #[error("length mismatch: x has {x_len} points but {what} has {len}")]
    LengthMismatch {
        x_len: usize,
        what: &'static str,
        len: usize,
    },

    /// The image primitive was handed an array with a zero dimension.
    #[error("image data has a zero dimension ({rows}x{cols})")]
    EmptyImage { rows: usize, cols: usize },

    /// A format string contained a character outside the grammar.
    #[error("unrecognized character {chr:?} in format string {fmt:?}")]
    BadFormat { fmt: String, chr: char },

    /// The attribute bag named an attribute the surface does not know.
    #[error("unknown axes attribute {0:?}")]
    UnknownAttr(String),

    /// An attribute value had the wrong shape or type.
    #[error("invalid value for attribute {key:?}: expected {expected}")]
    InvalidAttr { key: String, expected: &'static str },
}
