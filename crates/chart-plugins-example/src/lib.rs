// File: crates/chart-plugins-example/src/lib.rs
// Summary: Example third-party components built only on chart-core's public composition API.

use chart_core::{
    plot, ChartError, ChartResult, ColorMapper, Component, Horizontal, Namespace, Placement, ScaleMapper, UpdateContext,
    Vertical, Widget,
};

pub const WATERMARK_CLASS: &str = "da-watermark";
pub const LINES_CLASS: &str = "da-lines";

/// Public `watermark` namespace.
#[derive(Clone, Debug, PartialEq)]
pub struct WatermarkApi {
    text: String,
    opacity: f64,
}

impl Namespace for WatermarkApi {
    const KEY: &'static str = "watermark";
}

impl WatermarkApi {
    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = text.into();
        self
    }
    pub fn opacity(&mut self, opacity: f64) -> &mut Self {
        self.opacity = opacity;
        self
    }
}

/// Faint text in the bottom-right corner of the svg. Requires only the base widget.
pub struct Watermark {
    text: String,
}

impl Watermark {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

fn update_watermark(ctx: &mut UpdateContext<'_>) {
    let Ok(api) = ctx.api.get::<WatermarkApi>() else { return };
    let (text, opacity) = (api.text.clone(), api.opacity);
    let size = ctx.widget().size();
    let margins = ctx.widget().margins();
    ctx.styles.add_class(WATERMARK_CLASS, "pointer-events: none; user-select: none;");
    let Some(svg) = ctx.svg() else { return };
    let Ok(node) = ctx.document.ensure_child(svg, "text", WATERMARK_CLASS) else { return };
    if let Some(el) = ctx.document.get_mut(node) {
        el.attr("x", (size.width - margins.right).to_string())
            .attr("y", (size.height - 4.0).to_string())
            .attr("text-anchor", "end")
            .attr("opacity", opacity.to_string())
            .set_text(text);
    }
}

impl Component for Watermark {
    fn apply(self: Box<Self>, mut widget: Widget) -> ChartResult<Widget> {
        widget.protected.chain_mut().extend("watermark", Placement::After, update_watermark);
        widget.api.contribute(WatermarkApi { text: self.text, opacity: 0.3 });
        Ok(widget)
    }
}

/// One named polyline in data coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

/// Public `lines` namespace.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LinesApi {
    series: Vec<LineSeries>,
    stroke_width: f64,
}

impl Namespace for LinesApi {
    const KEY: &'static str = "lines";
}

impl LinesApi {
    /// Add a series, replacing any series with the same name in place.
    pub fn series(&mut self, name: impl Into<String>, points: Vec<(f64, f64)>) -> &mut Self {
        let name = name.into();
        match self.series.iter_mut().find(|s| s.name == name) {
            Some(existing) => existing.points = points,
            None => self.series.push(LineSeries { name, points }),
        }
        self
    }

    pub fn remove(&mut self, name: &str) -> &mut Self {
        self.series.retain(|s| s.name != name);
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.series.clear();
        self
    }

    pub fn stroke_width(&mut self, width: f64) -> &mut Self {
        self.stroke_width = width;
        self
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.name.as_str())
    }
}

/// Line marks, one `path` per series keyed by its encoded name.
///
/// Requires `XScale`, `YScale` and `Color` to be composed first.
#[derive(Default)]
pub struct LineMarks {
    series: Vec<LineSeries>,
}

impl LineMarks {
    pub fn new() -> Self { Self::default() }

    pub fn with_series(mut self, name: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        self.series.push(LineSeries { name: name.into(), points });
        self
    }
}

/// SVG path data for `points` already mapped to pixels.
pub fn path_data(points: &[(f64, f64)]) -> String {
    let mut d = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        d.push(if i == 0 { 'M' } else { 'L' });
        d.push_str(&format!("{x},{y}"));
    }
    d
}

fn update_lines(ctx: &mut UpdateContext<'_>) {
    let Ok(api) = ctx.api.get::<LinesApi>() else { return };
    let stroke_width = api.stroke_width;
    let drawn: Vec<(String, String, String)> = {
        let protected = &*ctx.protected;
        let (Ok(x), Ok(y), Ok(colors)) = (
            protected.capability::<dyn ScaleMapper<Horizontal>>(),
            protected.capability::<dyn ScaleMapper<Vertical>>(),
            protected.capability::<dyn ColorMapper>(),
        ) else {
            tracing::warn!("line marks skipped: scales or colors unavailable");
            return;
        };
        api.series
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let px: Vec<(f64, f64)> = s.points.iter().map(|&(vx, vy)| (x.map(vx), y.map(vy))).collect();
                (s.name.clone(), path_data(&px), colors.color_of(&s.name, i))
            })
            .collect()
    };

    let Some(plot_group) = ctx.plot_group() else { return };
    let Ok(group) = ctx.document.ensure_child(plot_group, "g", LINES_CLASS) else { return };
    let names: Vec<&str> = drawn.iter().map(|(name, _, _)| name.as_str()).collect();
    let joined = match plot::join(ctx.document, group, "path", &names) {
        Ok(joined) => joined,
        Err(err) => {
            tracing::warn!(%err, "line join failed");
            return;
        }
    };
    tracing::debug!(entered = joined.entered.len(), exited = joined.exited, "line marks joined");
    for (&node, (_, d, stroke)) in joined.nodes.iter().zip(&drawn) {
        if let Some(el) = ctx.document.get_mut(node) {
            el.attr("d", d.as_str())
                .attr("stroke", stroke.as_str())
                .attr("stroke-width", stroke_width.to_string())
                .attr("fill", "none");
        }
    }
}

impl Component for LineMarks {
    fn apply(self: Box<Self>, mut widget: Widget) -> ChartResult<Widget> {
        let caps = widget.protected.capabilities();
        if !caps.has::<dyn ScaleMapper<Horizontal>>() {
            return Err(ChartError::missing_capability::<dyn ScaleMapper<Horizontal>>());
        }
        if !caps.has::<dyn ScaleMapper<Vertical>>() {
            return Err(ChartError::missing_capability::<dyn ScaleMapper<Vertical>>());
        }
        if !caps.has::<dyn ColorMapper>() {
            return Err(ChartError::missing_capability::<dyn ColorMapper>());
        }
        let mut api = LinesApi { series: Vec::new(), stroke_width: 1.5 };
        for s in self.series {
            api.series(s.name, s.points);
        }
        widget.protected.chain_mut().extend("lines", Placement::After, update_lines);
        widget.api.contribute(api);
        Ok(widget)
    }
}
