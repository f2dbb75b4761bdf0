// File: crates/chart-core/src/tooltip.rs
// Summary: Tooltip component with an overridable content hook (TooltipSource).

use std::cell::Cell;
use std::rc::Rc;

use crate::compose::Component;
use crate::dom::OnEnd;
use crate::error::ChartResult;
use crate::extend::Placement;
use crate::namespace::Namespace;
use crate::widget::{UpdateContext, Widget};

pub const TOOLTIP_CLASS: &str = "da-tooltip";

/// Provides tooltip text for a data key.
pub trait TooltipSource {
    fn content(&self, key: &str) -> Option<String>;
}

/// Public `tooltip` namespace.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipApi {
    enabled: bool,
}

impl Namespace for TooltipApi {
    const KEY: &'static str = "tooltip";
}

impl TooltipApi {
    pub fn enabled(&mut self, on: bool) -> &mut Self {
        self.enabled = on;
        self
    }
    pub fn is_enabled(&self) -> bool { self.enabled }
}

/// Protected `_tooltip` namespace. Its content hook is a placeholder meant
/// to be overridden by the widget that composes the tooltip.
#[derive(Clone, Debug, Default)]
pub struct TooltipState {
    // Shared with the transition-end callback that reveals the tooltip.
    visible: Rc<Cell<bool>>,
}

impl TooltipState {
    pub fn is_visible(&self) -> bool { self.visible.get() }
}

impl Namespace for TooltipState {
    const KEY: &'static str = "_tooltip";
}

impl TooltipSource for TooltipState {
    fn content(&self, key: &str) -> Option<String> {
        tracing::warn!(key, "tooltip content hook is not implemented; override it with TooltipContent");
        None
    }
}

/// Requires only the base widget.
pub struct Tooltip {
    enabled: bool,
}

impl Tooltip {
    pub fn new(enabled: bool) -> Self { Self { enabled } }
}

impl Default for Tooltip {
    fn default() -> Self { Self::new(true) }
}

fn update_tooltip(ctx: &mut UpdateContext<'_>) {
    let enabled = ctx.api.get::<TooltipApi>().map(|t| t.enabled).unwrap_or(false);
    let widget = ctx.widget();
    let shown = enabled && !widget.is_disabled();
    // Hidden while a transition is in flight so it never points at stale marks.
    let deferred = shown && widget.in_transition();
    let container = widget.container();
    let page = widget.page().clone();
    let Ok(visible) = ctx.protected.get::<TooltipState>().map(|t| t.visible.clone()) else { return };
    let Ok(node) = ctx.document.ensure_child(container, "div", TOOLTIP_CLASS) else { return };

    ctx.document.interrupt(node);
    if let Some(el) = ctx.document.get_mut(node) {
        el.style("display", if shown && !deferred { "block" } else { "none" })
            .style("position", "absolute")
            .style("pointer-events", "none");
    }
    visible.set(shown && !deferred);
    if deferred {
        let reveal: OnEnd = Box::new(move || {
            if let Some(el) = page.document().borrow_mut().get_mut(node) {
                el.style("display", "block");
            }
            visible.set(true);
        });
        // In transition implies a non-zero duration, so nothing completes here.
        let _ = ctx.document.transition(node, ctx.duration, Some(reveal));
    }
}

impl Component for Tooltip {
    fn apply(self: Box<Self>, mut widget: Widget) -> ChartResult<Widget> {
        widget.protected.contribute(TooltipState::default());
        widget.protected.provide::<TooltipState, dyn TooltipSource>(|s| s);
        widget.protected.chain_mut().extend("tooltip", Placement::After, update_tooltip);
        widget.api.contribute(TooltipApi { enabled: self.enabled });
        Ok(widget)
    }
}

/// Protected `_tooltip_content` namespace holding an explicit content hook.
pub struct ContentHook {
    f: Box<dyn Fn(&str) -> Option<String>>,
}

impl Namespace for ContentHook {
    const KEY: &'static str = "_tooltip_content";
}

impl TooltipSource for ContentHook {
    fn content(&self, key: &str) -> Option<String> {
        (self.f)(key)
    }
}

/// Overrides the tooltip content hook. Requires [`Tooltip`]; composing it
/// without one fails with `NothingToOverride`.
pub struct TooltipContent {
    f: Box<dyn Fn(&str) -> Option<String>>,
}

impl TooltipContent {
    pub fn new(f: impl Fn(&str) -> Option<String> + 'static) -> Self {
        Self { f: Box::new(f) }
    }
}

impl Component for TooltipContent {
    fn apply(self: Box<Self>, mut widget: Widget) -> ChartResult<Widget> {
        widget.protected.contribute(ContentHook { f: self.f });
        widget.protected.override_capability::<ContentHook, dyn TooltipSource>(|s| s)?;
        Ok(widget)
    }
}

impl Widget {
    /// Tooltip text for `key` from whichever content hook is in effect.
    pub fn tooltip_content(&self, key: &str) -> ChartResult<Option<String>> {
        Ok(self.capability::<dyn TooltipSource>()?.content(key))
    }
}
