// File: crates/chart-core/src/types.rs
// Summary: Shared widget geometry types, defaults and the deserializable widget options.

use serde::Deserialize;

use crate::error::{ChartError, ChartResult};

/// Default widget width in pixels.
pub const WIDTH: f64 = 300.0;
/// Default widget height in pixels.
pub const HEIGHT: f64 = 200.0;
/// Default transition duration used by `Widget::refresh`.
pub const DEFAULT_DURATION_MS: u64 = 400;

/// Widget margins, in pixels.
/// Not validated: negative values flow through to layout untouched.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Margins {
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self { left, right, top, bottom }
    }
    pub const fn uniform(v: f64) -> Self {
        Self::new(v, v, v, v)
    }
    /// Total horizontal margin (left + right).
    pub fn hsum(&self) -> f64 { self.left + self.right }
    /// Total vertical margin (top + bottom).
    pub fn vsum(&self) -> f64 { self.top + self.bottom }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(40.0, 10.0, 10.0, 40.0)
    }
}

/// Outer widget size; inner size is derived from the margins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
    pub fn inner_width(&self, margins: &Margins) -> f64 { self.width - margins.hsum() }
    pub fn inner_height(&self, margins: &Margins) -> f64 { self.height - margins.vsum() }
    pub fn css_width(&self) -> String { px(self.width) }
    pub fn css_height(&self) -> String { px(self.height) }
    pub fn css_inner_width(&self, margins: &Margins) -> String { px(self.inner_width(margins)) }
    pub fn css_inner_height(&self, margins: &Margins) -> String { px(self.inner_height(margins)) }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(WIDTH, HEIGHT)
    }
}

/// Where a widget sits along one axis of its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    /// Offset from the near edge (left / top).
    Start(f64),
    /// Offset from the far edge (right / bottom).
    End(f64),
}

impl Anchor {
    /// Negative coordinates count from the far edge.
    pub fn from_signed(v: f64) -> Self {
        if v < 0.0 { Anchor::End(-v) } else { Anchor::Start(v) }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub x: Anchor,
    pub y: Anchor,
}

impl Default for Position {
    fn default() -> Self {
        Self { x: Anchor::Start(0.0), y: Anchor::Start(0.0) }
    }
}

/// Coarse widget lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Configuration staged since the last render (or never rendered).
    Configured,
    /// The last render reflects the staged configuration.
    Rendered,
}

/// Construction-time widget configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct WidgetOptions {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub x: f64,
    pub y: f64,
    pub duration_ms: u64,
    pub disabled: bool,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            margins: Margins::default(),
            x: 0.0,
            y: 0.0,
            duration_ms: DEFAULT_DURATION_MS,
            disabled: false,
        }
    }
}

impl WidgetOptions {
    /// Parse options from JSON; missing fields keep their defaults.
    pub fn from_json(text: &str) -> ChartResult<Self> {
        serde_json::from_str(text).map_err(|e| ChartError::config(e.to_string()))
    }
}

/// Format a pixel length with its unit suffix.
pub fn px(v: f64) -> String {
    format!("{v}px")
}
