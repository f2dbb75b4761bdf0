// File: crates/chart-core/src/widget.rs
// Summary: Foundational widget: mount point, geometry, staged setters and the render entry point.

use std::cell::Cell;
use std::rc::Rc;

use serde_json::Value;

use crate::compose::Protected;
use crate::dom::{Document, NodeId};
use crate::error::{ChartError, ChartResult};
use crate::extend::{Placement, UpdateChain};
use crate::namespace::{Namespace, Namespaces};
use crate::page::{Page, StyleRegistry};
use crate::types::{px, Anchor, Margins, Phase, Position, Size, WidgetOptions};

pub const CONTAINER_CLASS: &str = "da-widget";
pub const SVG_CLASS: &str = "da-svg";
pub const PLOT_CLASS: &str = "da-plot";
pub const DISABLED_CLASS: &str = "da-disabled";

/// The `_widget` namespace: geometry, flags and the update chain.
pub struct WidgetState {
    page: Page,
    container: NodeId,
    size: Size,
    margins: Margins,
    position: Position,
    transition: Rc<Cell<bool>>,
    disabled: bool,
    phase: Phase,
    duration_ms: u64,
    chain: UpdateChain,
}

impl WidgetState {
    pub fn page(&self) -> &Page { &self.page }
    pub fn container(&self) -> NodeId { self.container }
    pub fn size(&self) -> Size { self.size }
    pub fn margins(&self) -> Margins { self.margins }
    pub fn position(&self) -> Position { self.position }
    pub fn inner_width(&self) -> f64 { self.size.inner_width(&self.margins) }
    pub fn inner_height(&self) -> f64 { self.size.inner_height(&self.margins) }
    /// Whether a render transition is still in flight.
    pub fn in_transition(&self) -> bool { self.transition.get() }
    pub fn is_disabled(&self) -> bool { self.disabled }
    pub fn phase(&self) -> Phase { self.phase }
    pub fn default_duration(&self) -> u64 { self.duration_ms }
    pub fn chain(&self) -> &UpdateChain { &self.chain }
    pub fn chain_mut(&mut self) -> &mut UpdateChain { &mut self.chain }

    fn resolve_layout(&self, document: &mut Document) {
        let Some(el) = document.get_mut(self.container) else { return };
        el.style("position", "absolute");
        match self.position.x {
            Anchor::Start(v) => el.style("left", px(v)).remove_style("right"),
            Anchor::End(v) => el.style("right", px(v)).remove_style("left"),
        };
        match self.position.y {
            Anchor::Start(v) => el.style("top", px(v)).remove_style("bottom"),
            Anchor::End(v) => el.style("bottom", px(v)).remove_style("top"),
        };
        el.style("width", self.size.css_width())
            .style("height", self.size.css_height())
            .toggle_class(DISABLED_CLASS, self.disabled);
    }
}

/// What every update hook sees during a render.
///
/// The page document is already borrowed for the duration of the render;
/// hooks must use `document` rather than going through the page handle.
pub struct UpdateContext<'a> {
    pub duration: u64,
    pub protected: &'a mut Protected,
    pub api: &'a Namespaces,
    pub document: &'a mut Document,
    pub styles: &'a StyleRegistry,
}

impl UpdateContext<'_> {
    pub fn widget(&self) -> &WidgetState { self.protected.widget() }

    /// The widget's `svg` root, created on first use.
    pub fn svg(&mut self) -> Option<NodeId> {
        let container = self.widget().container();
        self.document.ensure_child(container, "svg", SVG_CLASS).ok()
    }

    /// The translated `g` holding the plot groups, created on first use.
    pub fn plot_group(&mut self) -> Option<NodeId> {
        let svg = self.svg()?;
        self.document.ensure_child(svg, "g", PLOT_CLASS).ok()
    }
}

fn update_widget(ctx: &mut UpdateContext<'_>) {
    let size = ctx.widget().size();
    let margins = ctx.widget().margins();
    if let Some(svg) = ctx.svg() {
        if let Some(el) = ctx.document.get_mut(svg) {
            el.attr("width", size.css_width()).attr("height", size.css_height());
        }
    }
    if let Some(plot) = ctx.plot_group() {
        if let Some(el) = ctx.document.get_mut(plot) {
            el.attr("transform", format!("translate({},{})", margins.left, margins.top));
        }
    }
}

/// A composed widget: protected state plus the public API namespaces.
///
/// Built by [`Widget::mount`] and extended by components through
/// [`crate::compose`]. Setters only stage configuration; nothing reaches
/// the document until [`Widget::render`].
pub struct Widget {
    pub protected: Protected,
    pub api: Namespaces,
}

impl Widget {
    /// Mount a new widget container under `parent`.
    pub fn mount(page: &Page, parent: NodeId, options: &WidgetOptions) -> ChartResult<Self> {
        let container = {
            let mut document = page.document().borrow_mut();
            if !document.contains(parent) {
                return Err(ChartError::missing_dom(format!("node {}", parent.index())));
            }
            let container = document.create(parent, "div")?;
            document.node_mut(container)?.add_class(CONTAINER_CLASS);
            container
        };
        let mut state = WidgetState {
            page: page.clone(),
            container,
            size: Size::new(options.width, options.height),
            margins: options.margins,
            position: Position { x: Anchor::from_signed(options.x), y: Anchor::from_signed(options.y) },
            transition: Rc::new(Cell::new(false)),
            disabled: options.disabled,
            phase: Phase::Configured,
            duration_ms: options.duration_ms,
            chain: UpdateChain::new(),
        };
        state.chain.extend("widget", Placement::After, update_widget);
        tracing::debug!(container = container.index(), "widget mounted");
        Ok(Self { protected: Protected::new(state), api: Namespaces::new() })
    }

    /// Mount under the element whose `id` attribute is `id`.
    pub fn mount_by_id(page: &Page, id: &str, options: &WidgetOptions) -> ChartResult<Self> {
        let parent = page
            .document()
            .borrow()
            .find_by_id(id)
            .ok_or_else(|| ChartError::missing_dom(format!("#{id}")))?;
        Self::mount(page, parent, options)
    }

    fn state(&mut self) -> &mut WidgetState {
        let state = self.protected.widget_mut();
        state.phase = Phase::Configured;
        state
    }

    /// Horizontal offset; negative values anchor to the right edge.
    pub fn x(&mut self, value: f64) -> &mut Self {
        self.state().position.x = Anchor::from_signed(value);
        self
    }

    /// Vertical offset; negative values anchor to the bottom edge.
    pub fn y(&mut self, value: f64) -> &mut Self {
        self.state().position.y = Anchor::from_signed(value);
        self
    }

    pub fn width(&mut self, value: f64) -> &mut Self {
        self.state().size.width = value;
        self
    }

    pub fn height(&mut self, value: f64) -> &mut Self {
        self.state().size.height = value;
        self
    }

    pub fn margins(&mut self, value: Margins) -> &mut Self {
        self.state().margins = value;
        self
    }

    pub fn disabled(&mut self, value: bool) -> &mut Self {
        self.state().disabled = value;
        self
    }

    /// Stage changes on a public API namespace. A namespace this widget was
    /// not composed with is skipped with a warning.
    pub fn configure<T: Namespace>(&mut self, f: impl FnOnce(&mut T)) -> &mut Self {
        match self.api.get_mut::<T>() {
            Ok(value) => f(value),
            Err(err) => tracing::warn!(%err, "configure skipped"),
        }
        self.state();
        self
    }

    pub fn api<T: Namespace>(&self) -> ChartResult<&T> {
        self.api.get()
    }

    pub fn capability<C: ?Sized + 'static>(&self) -> ChartResult<&C> {
        self.protected.capability()
    }

    pub fn container(&self) -> NodeId { self.protected.widget().container() }
    pub fn page(&self) -> &Page { self.protected.widget().page() }
    pub fn phase(&self) -> Phase { self.protected.widget().phase() }
    pub fn is_transitioning(&self) -> bool { self.protected.widget().in_transition() }

    /// Run the full update chain, then lay out the container.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn render(&mut self, duration_ms: u64) -> &mut Self {
        let page = self.protected.widget().page().clone();
        let mut document = page.document().borrow_mut();
        let container = self.container();
        if !document.contains(container) {
            tracing::warn!("render skipped: container is no longer in the document");
            return self;
        }

        self.protected.widget().transition.set(duration_ms > 0);
        let mut chain = std::mem::take(self.protected.chain_mut());
        {
            let mut ctx = UpdateContext {
                duration: duration_ms,
                protected: &mut self.protected,
                api: &self.api,
                document: &mut document,
                styles: page.styles(),
            };
            chain.run(&mut ctx);
        }
        let late = std::mem::replace(self.protected.chain_mut(), chain);
        if !late.is_empty() {
            tracing::debug!(hooks = late.len(), "hooks registered during render run from the next render");
            self.protected.chain_mut().absorb(late);
        }

        let state = self.protected.widget_mut();
        state.resolve_layout(&mut document);
        state.phase = Phase::Rendered;
        document.interrupt(container);
        let flag = state.transition.clone();
        let done = document.transition(container, duration_ms, Some(Box::new(move || flag.set(false))));
        drop(document);
        done.run();
        self
    }

    /// Render with the configured default duration.
    pub fn refresh(&mut self) -> &mut Self {
        let duration = self.protected.widget().default_duration();
        self.render(duration)
    }

    /// Document snapshot of this widget's container subtree.
    pub fn snapshot(&self) -> Value {
        self.page().document().borrow().snapshot(self.container())
    }

    /// Remove the widget's container from the page and drop the widget.
    pub fn dispose(self) {
        let container = self.container();
        let removed = self.page().document().borrow_mut().remove(container);
        tracing::debug!(container = container.index(), removed, "widget disposed");
    }
}
