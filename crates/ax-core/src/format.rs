//! matplotlib-style format strings
//!
//! A format string combines at most one color character, one marker character
//! and one line style, in any order: `"r.-"`, `"o"`, `"--"`, `"gs:"`. Anything
//! else is rejected by the backend parsing it.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{PlotError, PlotResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    /// `.` (renders smaller than `o`)
    Point,
    /// `o`
    Circle,
    /// `s`
    Square,
    /// `^`
    TriangleUp,
    /// `v`
    TriangleDown,
    /// `d`
    Diamond,
    /// `x`
    Cross,
    /// `+`
    Plus,
    /// `*`
    Asterisk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinePattern {
    /// `-`
    Solid,
    /// `--`
    Dashed,
    /// `:`
    Dotted,
    /// `-.`
    DashDot,
}

/// Parsed form of a format string.
///
/// A marker with no line pattern draws markers only; a line pattern with no
/// marker draws the line only; both present draw both. The empty string leaves
/// everything unset and the backend falls back to a plain line.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MarkerFormat {
    pub color: Option<Color>,
    pub marker: Option<Marker>,
    pub line: Option<LinePattern>,
}

impl MarkerFormat {
    pub fn parse(fmt: &str) -> PlotResult<Self> {
        let mut parsed = MarkerFormat::default();
        let bad = |chr| PlotError::BadFormat {
            fmt: fmt.to_string(),
            chr,
        };

        let mut chars = fmt.chars().peekable();
        while let Some(chr) = chars.next() {
            match chr {
                '-' => {
                    let pattern = match chars.peek() {
                        Some('-') => {
                            chars.next();
                            LinePattern::Dashed
                        }
                        Some('.') => {
                            chars.next();
                            LinePattern::DashDot
                        }
                        _ => LinePattern::Solid,
                    };
                    set_once(&mut parsed.line, pattern).map_err(|_| bad(chr))?;
                }
                ':' => set_once(&mut parsed.line, LinePattern::Dotted).map_err(|_| bad(chr))?,
                '.' => set_once(&mut parsed.marker, Marker::Point).map_err(|_| bad(chr))?,
                'o' => set_once(&mut parsed.marker, Marker::Circle).map_err(|_| bad(chr))?,
                's' => set_once(&mut parsed.marker, Marker::Square).map_err(|_| bad(chr))?,
                '^' => set_once(&mut parsed.marker, Marker::TriangleUp).map_err(|_| bad(chr))?,
                'v' => set_once(&mut parsed.marker, Marker::TriangleDown).map_err(|_| bad(chr))?,
                'd' => set_once(&mut parsed.marker, Marker::Diamond).map_err(|_| bad(chr))?,
                'x' => set_once(&mut parsed.marker, Marker::Cross).map_err(|_| bad(chr))?,
                '+' => set_once(&mut parsed.marker, Marker::Plus).map_err(|_| bad(chr))?,
                '*' => set_once(&mut parsed.marker, Marker::Asterisk).map_err(|_| bad(chr))?,
                'b' | 'g' | 'r' | 'c' | 'm' | 'y' | 'k' | 'w' => {
                    set_once(&mut parsed.color, color_code(chr)).map_err(|_| bad(chr))?
                }
                other => return Err(bad(other)),
            }
        }
        Ok(parsed)
    }
}

/// Assign a slot that may only be written once per format string.
fn set_once<T>(slot: &mut Option<T>, value: T) -> Result<(), ()> {
    if slot.is_some() {
        return Err(());
    }
    *slot = Some(value);
    Ok(())
}

fn color_code(chr: char) -> Color {
    match chr {
        'b' => Color::rgb(0, 0, 255),
        'g' => Color::rgb(0, 128, 0),
        'r' => Color::rgb(255, 0, 0),
        'c' => Color::rgb(0, 191, 191),
        'm' => Color::rgb(191, 0, 191),
        'y' => Color::rgb(191, 191, 0),
        'k' => Color::rgb(0, 0, 0),
        _ => Color::rgb(255, 255, 255),
    }
}
