// File: crates/chart-core/src/compose.rs
// Summary: Component trait and the composition fold that builds widgets from components.

use crate::error::ChartResult;
use crate::extend::UpdateChain;
use crate::namespace::{Capabilities, Namespace, Namespaces};
use crate::widget::{Widget, WidgetState};

/// Protected state (`self`): the `_widget` core, component namespaces and
/// the capabilities they declare. Visible to components, not meant for
/// end users of a rendered widget.
pub struct Protected {
    widget: WidgetState,
    namespaces: Namespaces,
    capabilities: Capabilities,
}

impl Protected {
    pub(crate) fn new(widget: WidgetState) -> Self {
        Self { widget, namespaces: Namespaces::new(), capabilities: Capabilities::new() }
    }

    pub fn widget(&self) -> &WidgetState { &self.widget }
    pub fn widget_mut(&mut self) -> &mut WidgetState { &mut self.widget }

    /// The update chain (`_widget.update`).
    pub fn chain_mut(&mut self) -> &mut UpdateChain { self.widget.chain_mut() }

    pub fn namespaces(&self) -> &Namespaces { &self.namespaces }
    pub fn namespaces_mut(&mut self) -> &mut Namespaces { &mut self.namespaces }
    pub fn capabilities(&self) -> &Capabilities { &self.capabilities }
    pub fn capabilities_mut(&mut self) -> &mut Capabilities { &mut self.capabilities }

    pub fn get<T: Namespace>(&self) -> ChartResult<&T> { self.namespaces.get() }
    pub fn get_mut<T: Namespace>(&mut self) -> ChartResult<&mut T> { self.namespaces.get_mut() }

    pub fn contribute<T: Namespace>(&mut self, value: T) -> bool { self.namespaces.contribute(value) }
    pub fn override_ns<T: Namespace>(&mut self, value: T) -> ChartResult<()> { self.namespaces.override_ns(value) }

    pub fn provide<T: Namespace, C: ?Sized + 'static>(&mut self, cast: fn(&T) -> &C) -> bool {
        self.capabilities.provide(cast)
    }

    pub fn override_capability<T: Namespace, C: ?Sized + 'static>(&mut self, cast: fn(&T) -> &C) -> ChartResult<()> {
        self.capabilities.override_capability(cast)
    }

    /// Look up whichever namespace currently provides `C`.
    pub fn capability<C: ?Sized + 'static>(&self) -> ChartResult<&C> {
        self.capabilities.resolve(&self.namespaces)
    }
}

/// A component factory: takes the accumulated widget and returns it
/// extended. Components only rely on other components they document as
/// dependencies; missing ones are reported as typed errors.
///
/// Any `FnOnce(Widget) -> ChartResult<Widget>` is a component. Components
/// that need composition-time parameters are plain structs built by a
/// constructor.
pub trait Component {
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    fn apply(self: Box<Self>, widget: Widget) -> ChartResult<Widget>;
}

impl<F> Component for F
where
    F: FnOnce(Widget) -> ChartResult<Widget>,
{
    fn name(&self) -> &'static str { "closure" }

    fn apply(self: Box<Self>, widget: Widget) -> ChartResult<Widget> {
        (*self)(widget)
    }
}

/// Apply `components` to `base` strictly in order. Each sees everything
/// staged by the ones before it, including hooks already on the chain.
pub fn compose<I>(base: Widget, components: I) -> ChartResult<Widget>
where
    I: IntoIterator<Item = Box<dyn Component>>,
{
    components.into_iter().try_fold(base, |acc, component| {
        tracing::debug!(component = component.name(), "composing");
        component.apply(acc)
    })
}

impl Widget {
    /// Compose a single component onto this widget.
    pub fn add(self, component: impl Component + 'static) -> ChartResult<Self> {
        compose(self, [Box::new(component) as Box<dyn Component>])
    }
}
