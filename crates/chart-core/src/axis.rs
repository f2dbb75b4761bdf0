// File: crates/chart-core/src/axis.rs
// Summary: Axis component (bottom / left) rendering tick groups from the matching scale.

use std::marker::PhantomData;

use crate::compose::Component;
use crate::error::{ChartError, ChartResult};
use crate::extend::Placement;
use crate::font::{FontState, DEFAULT_FONT_SIZE};
use crate::namespace::Namespace;
use crate::plot;
use crate::scale::{Horizontal, Orientation, ScaleMapper, Vertical};
use crate::widget::{UpdateContext, Widget, WidgetState};

pub const TICK_SIZE: f64 = 6.0;

/// Where an axis sits and how its ticks are drawn.
pub trait AxisSide: Orientation {
    const CLASS: &'static str;
    /// Translation of the axis group inside the plot group.
    fn origin(widget: &WidgetState) -> (f64, f64);
    /// Translation of one tick group, given its pixel position.
    fn tick_at(px: f64) -> (f64, f64);
    /// Tick line end point.
    fn tick_line() -> (f64, f64);
    /// Label position and text anchor.
    fn label(font_size: f64) -> ((f64, f64), &'static str);
}

impl AxisSide for Horizontal {
    const CLASS: &'static str = "da-axis-bottom";
    fn origin(widget: &WidgetState) -> (f64, f64) { (0.0, widget.inner_height()) }
    fn tick_at(px: f64) -> (f64, f64) { (px, 0.0) }
    fn tick_line() -> (f64, f64) { (0.0, TICK_SIZE) }
    fn label(font_size: f64) -> ((f64, f64), &'static str) { ((0.0, TICK_SIZE + font_size), "middle") }
}

impl AxisSide for Vertical {
    const CLASS: &'static str = "da-axis-left";
    fn origin(_widget: &WidgetState) -> (f64, f64) { (0.0, 0.0) }
    fn tick_at(px: f64) -> (f64, f64) { (0.0, px) }
    fn tick_line() -> (f64, f64) { (-TICK_SIZE, 0.0) }
    fn label(font_size: f64) -> ((f64, f64), &'static str) { ((-(TICK_SIZE + 3.0), font_size * 0.35), "end") }
}

/// Public `axis_x` / `axis_y` namespace.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisApi<O> {
    ticks: usize,
    precision: usize,
    _side: PhantomData<O>,
}

impl Namespace for AxisApi<Horizontal> {
    const KEY: &'static str = "axis_x";
}

impl Namespace for AxisApi<Vertical> {
    const KEY: &'static str = "axis_y";
}

impl<O> AxisApi<O> {
    pub fn ticks(&mut self, count: usize) -> &mut Self {
        self.ticks = count;
        self
    }
    pub fn precision(&mut self, digits: usize) -> &mut Self {
        self.precision = digits;
        self
    }
}

/// Protected `_axis_x` / `_axis_y` namespace: tick labels drawn at the last render.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisState<O> {
    pub labels: Vec<String>,
    _side: PhantomData<O>,
}

impl Namespace for AxisState<Horizontal> {
    const KEY: &'static str = "_axis_x";
}

impl Namespace for AxisState<Vertical> {
    const KEY: &'static str = "_axis_y";
}

/// Axis component. Requires the scale of the same orientation to be
/// composed first; uses the `_font` size when a `Font` is present.
pub struct Axis<O> {
    ticks: usize,
    precision: usize,
    _side: PhantomData<O>,
}

pub type BottomAxis = Axis<Horizontal>;
pub type LeftAxis = Axis<Vertical>;

impl<O> Axis<O> {
    pub fn new(ticks: usize) -> Self {
        Self { ticks, precision: 1, _side: PhantomData }
    }

    pub fn with_precision(mut self, digits: usize) -> Self {
        self.precision = digits;
        self
    }
}

impl<O> Default for Axis<O> {
    fn default() -> Self { Self::new(5) }
}

fn update_axis<O>(ctx: &mut UpdateContext<'_>)
where
    O: AxisSide,
    AxisApi<O>: Namespace,
    AxisState<O>: Namespace,
{
    let Ok(api) = ctx.api.get::<AxisApi<O>>() else { return };
    let (count, precision) = (api.ticks, api.precision);
    let ticks: Vec<(String, f64)> = match ctx.protected.capability::<dyn ScaleMapper<O>>() {
        Ok(scale) => scale.ticks(count).into_iter().map(|t| (format!("{t:.precision$}"), scale.map(t))).collect(),
        Err(err) => {
            tracing::warn!(%err, axis = O::NAME, "axis skipped");
            return;
        }
    };
    let font_size = ctx.protected.get::<FontState>().map(|f| f.size).unwrap_or(DEFAULT_FONT_SIZE);
    let (ox, oy) = O::origin(ctx.widget());
    let Some(plot_group) = ctx.plot_group() else { return };
    let Ok(axis) = ctx.document.ensure_child(plot_group, "g", O::CLASS) else { return };
    if let Some(el) = ctx.document.get_mut(axis) {
        el.attr("transform", format!("translate({ox},{oy})"));
    }

    // Keyed by position so repeated labels stay distinct groups.
    let keys: Vec<String> = (0..ticks.len()).map(|i| format!("tick {i}")).collect();
    let Ok(joined) = plot::join(ctx.document, axis, "g", &keys) else { return };
    let (x2, y2) = O::tick_line();
    let ((lx, ly), anchor) = O::label(font_size);
    for (&node, (label, px)) in joined.nodes.iter().zip(&ticks) {
        let (tx, ty) = O::tick_at(*px);
        if let Some(el) = ctx.document.get_mut(node) {
            el.attr("transform", format!("translate({tx},{ty})"));
        }
        if let Ok(line) = ctx.document.ensure_child(node, "line", "da-tick-line") {
            if let Some(el) = ctx.document.get_mut(line) {
                el.attr("x2", x2.to_string()).attr("y2", y2.to_string());
            }
        }
        if let Ok(text) = ctx.document.ensure_child(node, "text", "da-tick-label") {
            if let Some(el) = ctx.document.get_mut(text) {
                el.attr("x", lx.to_string())
                    .attr("y", ly.to_string())
                    .attr("text-anchor", anchor)
                    .attr("font-size", font_size.to_string())
                    .set_text(label.as_str());
            }
        }
    }
    if let Ok(state) = ctx.protected.get_mut::<AxisState<O>>() {
        state.labels = ticks.into_iter().map(|(label, _)| label).collect();
    }
}

impl<O> Component for Axis<O>
where
    O: AxisSide,
    AxisApi<O>: Namespace,
    AxisState<O>: Namespace,
{
    fn apply(self: Box<Self>, mut widget: Widget) -> ChartResult<Widget> {
        if !widget.protected.capabilities().has::<dyn ScaleMapper<O>>() {
            return Err(ChartError::missing_capability::<dyn ScaleMapper<O>>());
        }
        widget.protected.contribute(AxisState::<O> { labels: Vec::new(), _side: PhantomData });
        widget.protected.chain_mut().extend(format!("axis-{}", O::NAME), Placement::After, update_axis::<O>);
        widget.api.contribute(AxisApi::<O> { ticks: self.ticks, precision: self.precision, _side: PhantomData });
        Ok(widget)
    }
}
