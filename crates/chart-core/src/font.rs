// File: crates/chart-core/src/font.rs
// Summary: Font component: staged size/family/color applied to the widget container.

use crate::compose::Component;
use crate::error::ChartResult;
use crate::extend::Placement;
use crate::namespace::Namespace;
use crate::theme::Theme;
use crate::types::px;
use crate::widget::{UpdateContext, Widget};

pub const DEFAULT_FONT_SIZE: f64 = 12.0;
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// Public `font` namespace.
#[derive(Clone, Debug, PartialEq)]
pub struct FontApi {
    size: f64,
    family: String,
    color: String,
}

impl Namespace for FontApi {
    const KEY: &'static str = "font";
}

impl FontApi {
    pub fn size(&mut self, px: f64) -> &mut Self {
        self.size = px;
        self
    }
    pub fn family(&mut self, family: impl Into<String>) -> &mut Self {
        self.family = family.into();
        self
    }
    pub fn color(&mut self, color: impl Into<String>) -> &mut Self {
        self.color = color.into();
        self
    }
}

/// Protected `_font` namespace: the font as of the last render.
#[derive(Clone, Debug, PartialEq)]
pub struct FontState {
    pub size: f64,
    pub family: String,
    pub color: String,
}

impl Namespace for FontState {
    const KEY: &'static str = "_font";
}

/// Requires only the base widget.
pub struct Font {
    defaults: FontApi,
}

impl Font {
    pub fn new(size: f64) -> Self {
        let mut font = Self::default();
        font.defaults.size = size;
        font
    }
}

impl Default for Font {
    fn default() -> Self {
        Self {
            defaults: FontApi {
                size: DEFAULT_FONT_SIZE,
                family: DEFAULT_FONT_FAMILY.to_string(),
                color: Theme::default().text.to_string(),
            },
        }
    }
}

fn update_font(ctx: &mut UpdateContext<'_>) {
    let Ok(font) = ctx.api.get::<FontApi>() else { return };
    let state = FontState { size: font.size, family: font.family.clone(), color: font.color.clone() };
    let container = ctx.widget().container();
    if let Some(el) = ctx.document.get_mut(container) {
        el.style("font-size", px(state.size))
            .style("font-family", state.family.as_str())
            .style("color", state.color.as_str());
    }
    if let Ok(slot) = ctx.protected.get_mut::<FontState>() {
        *slot = state;
    }
}

impl Component for Font {
    fn apply(self: Box<Self>, mut widget: Widget) -> ChartResult<Widget> {
        let d = &self.defaults;
        widget.protected.contribute(FontState { size: d.size, family: d.family.clone(), color: d.color.clone() });
        widget.protected.chain_mut().extend("font", Placement::After, update_font);
        widget.api.contribute(self.defaults);
        Ok(widget)
    }
}
