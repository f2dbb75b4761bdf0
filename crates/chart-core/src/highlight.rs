// File: crates/chart-core/src/highlight.rs
// Summary: Highlight component: dims marks whose data key is not among the highlighted keys.

use crate::compose::Component;
use crate::encode::encode;
use crate::error::ChartResult;
use crate::extend::Placement;
use crate::namespace::Namespace;
use crate::widget::{UpdateContext, Widget};

pub const DIMMED_CLASS: &str = "da-dimmed";
pub const DIMMED_RULES: &str = "opacity: 0.2;";

/// Read access to which data keys are highlighted.
pub trait Highlightable {
    fn highlighted(&self) -> &[String];

    fn is_highlighted(&self, key: &str) -> bool {
        self.highlighted().iter().any(|k| k == key)
    }

    /// Dimmed when something else is highlighted.
    fn is_dimmed(&self, key: &str) -> bool {
        !self.highlighted().is_empty() && !self.is_highlighted(key)
    }
}

/// Public `highlight` namespace.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HighlightApi {
    keys: Vec<String>,
}

impl Namespace for HighlightApi {
    const KEY: &'static str = "highlight";
}

impl HighlightApi {
    pub fn keys<I, S>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.keys.clear();
        self
    }
}

/// Protected `_highlight` namespace.
#[derive(Clone, Debug, PartialEq)]
pub struct HighlightState {
    selectors: Vec<String>,
    active: Vec<String>,
}

impl Namespace for HighlightState {
    const KEY: &'static str = "_highlight";
}

impl Highlightable for HighlightState {
    fn highlighted(&self) -> &[String] { &self.active }
}

/// Highlighting over the element tags in `selectors` (e.g. `path`,
/// `circle`). Marks are matched by their encoded data-key class.
///
/// Compose it after the components that draw its marks. Its hook runs in
/// chain order, so marks created by hooks registered later are only
/// dimmed from the following render.
pub struct Highlight {
    selectors: Vec<String>,
}

impl Highlight {
    pub fn new<I, S>(selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { selectors: selectors.into_iter().map(Into::into).collect() }
    }
}

fn update_highlight(ctx: &mut UpdateContext<'_>) {
    let keys = ctx.api.get::<HighlightApi>().map(|h| h.keys.clone()).unwrap_or_default();
    let Ok(state) = ctx.protected.get_mut::<HighlightState>() else { return };
    state.active = keys;
    let selectors = state.selectors.clone();
    let classes: Vec<String> = state.active.iter().map(|k| encode(k)).collect();

    ctx.styles.add_class(DIMMED_CLASS, DIMMED_RULES);
    let Some(plot_group) = ctx.plot_group() else { return };
    for node in ctx.document.descendants(plot_group) {
        let Some(el) = ctx.document.get_mut(node) else { continue };
        if !selectors.iter().any(|s| *s == el.tag) {
            continue;
        }
        let dim = !classes.is_empty() && !classes.iter().any(|c| el.has_class(c));
        el.toggle_class(DIMMED_CLASS, dim);
    }
}

impl Component for Highlight {
    fn apply(self: Box<Self>, mut widget: Widget) -> ChartResult<Widget> {
        widget.protected.contribute(HighlightState { selectors: self.selectors, active: Vec::new() });
        widget.protected.provide::<HighlightState, dyn Highlightable>(|s| s);
        widget.protected.chain_mut().extend("highlight", Placement::After, update_highlight);
        widget.api.contribute(HighlightApi::default());
        Ok(widget)
    }
}
