// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports the composition engine, widget lifecycle and built-in components.

pub mod axis;
pub mod color;
pub mod compose;
pub mod dom;
pub mod encode;
pub mod error;
pub mod extend;
pub mod font;
pub mod highlight;
pub mod namespace;
pub mod page;
pub mod plot;
pub mod scale;
pub mod theme;
pub mod tooltip;
pub mod types;
pub mod widget;

pub use axis::{Axis, AxisApi, BottomAxis, LeftAxis};
pub use color::{Color, ColorApi, ColorMapper, ColorPolicy};
pub use compose::{compose, Component, Protected};
pub use dom::{Document, Element, NodeId};
pub use encode::encode;
pub use error::{ChartError, ChartResult};
pub use extend::{extend, Placement, UpdateChain};
pub use font::{Font, FontApi, FontState};
pub use highlight::{Highlight, HighlightApi, Highlightable};
pub use namespace::{Capabilities, Namespace, Namespaces};
pub use page::{Page, StyleRegistry};
pub use scale::{Horizontal, Scale, ScaleApi, ScaleKind, ScaleMapper, Vertical, XScale, YScale};
pub use theme::Theme;
pub use tooltip::{Tooltip, TooltipApi, TooltipContent, TooltipSource};
pub use types::{Anchor, Margins, Phase, Position, Size, WidgetOptions};
pub use widget::{UpdateContext, Widget, WidgetState};
