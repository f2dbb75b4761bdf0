// File: crates/chart-core/src/color.rs
// Summary: Color component: palette/policy/mapping staged publicly, exposed to other components as a ColorMapper.

use indexmap::IndexMap;

use crate::compose::Component;
use crate::error::ChartResult;
use crate::extend::Placement;
use crate::namespace::Namespace;
use crate::theme::Theme;
use crate::widget::{UpdateContext, Widget};

/// Color lookup for data keys.
pub trait ColorMapper {
    /// Color for the series `key` at position `index`.
    fn color_of(&self, key: &str, index: usize) -> String;
}

#[derive(Clone, Debug, PartialEq)]
pub enum ColorPolicy {
    /// Cycle through the palette by index.
    Categorical,
    /// One color for everything.
    Fixed(String),
}

#[derive(Clone, Debug, PartialEq)]
struct ColorConfig {
    palette: Vec<String>,
    policy: ColorPolicy,
    mapping: IndexMap<String, String>,
}

impl ColorConfig {
    fn color_of(&self, key: &str, index: usize) -> String {
        if let Some(c) = self.mapping.get(key) {
            return c.clone();
        }
        match &self.policy {
            ColorPolicy::Fixed(c) => c.clone(),
            ColorPolicy::Categorical if self.palette.is_empty() => "currentColor".to_string(),
            ColorPolicy::Categorical => self.palette[index % self.palette.len()].clone(),
        }
    }
}

/// Public `color` namespace.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorApi {
    config: ColorConfig,
}

impl Namespace for ColorApi {
    const KEY: &'static str = "color";
}

impl ColorApi {
    pub fn palette<I, S>(&mut self, colors: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.palette = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn policy(&mut self, policy: ColorPolicy) -> &mut Self {
        self.config.policy = policy;
        self
    }

    /// Pin `key` to `color` regardless of policy.
    pub fn mapping(&mut self, key: impl Into<String>, color: impl Into<String>) -> &mut Self {
        self.config.mapping.insert(key.into(), color.into());
        self
    }
}

/// Protected `_color` namespace: the colors as of the last render.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorState {
    config: ColorConfig,
}

impl Namespace for ColorState {
    const KEY: &'static str = "_color";
}

impl ColorMapper for ColorState {
    fn color_of(&self, key: &str, index: usize) -> String {
        self.config.color_of(key, index)
    }
}

/// Requires only the base widget. Its hook runs before everything composed
/// earlier so the fresh mapping is visible to the rest of the chain.
pub struct Color {
    config: ColorConfig,
}

impl Color {
    pub fn with_theme(theme: &Theme) -> Self {
        Self {
            config: ColorConfig {
                palette: theme.palette(),
                policy: ColorPolicy::Categorical,
                mapping: IndexMap::new(),
            },
        }
    }

    pub fn with_policy(mut self, policy: ColorPolicy) -> Self {
        self.config.policy = policy;
        self
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::with_theme(&Theme::default())
    }
}

fn update_color(ctx: &mut UpdateContext<'_>) {
    let Ok(api) = ctx.api.get::<ColorApi>() else { return };
    let config = api.config.clone();
    if let Ok(state) = ctx.protected.get_mut::<ColorState>() {
        state.config = config;
    }
}

impl Component for Color {
    fn apply(self: Box<Self>, mut widget: Widget) -> ChartResult<Widget> {
        widget.protected.contribute(ColorState { config: self.config.clone() });
        widget.protected.provide::<ColorState, dyn ColorMapper>(|s| s);
        widget.protected.chain_mut().extend("color", Placement::Before, update_color);
        widget.api.contribute(ColorApi { config: self.config });
        Ok(widget)
    }
}
