// File: crates/chart-core/src/scale.rs
// Summary: Continuous (linear / log10) scales and the Scale component that fits them to the widget's inner area.

use std::marker::PhantomData;

use crate::compose::Component;
use crate::error::ChartResult;
use crate::extend::Placement;
use crate::namespace::Namespace;
use crate::widget::{UpdateContext, Widget, WidgetState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleKind {
    Linear,
    Log10,
}

/// Evenly spaced values from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Maps a data domain onto a pixel range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContinuousScale {
    kind: ScaleKind,
    domain: (f64, f64),
    range: (f64, f64),
}

impl ContinuousScale {
    pub fn new(kind: ScaleKind, domain: (f64, f64), range: (f64, f64)) -> Self {
        let (mut lo, mut hi) = domain;
        match kind {
            ScaleKind::Linear => {
                if (hi - lo).abs() < 1e-12 { hi = lo + 1.0; }
            }
            ScaleKind::Log10 => {
                // Strictly positive domain for log scale
                let eps = 1e-12;
                lo = if lo <= eps { eps } else { lo };
                hi = if hi <= lo { lo * 10.0 } else { hi };
            }
        }
        Self { kind, domain: (lo, hi), range }
    }

    pub fn linear(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self::new(ScaleKind::Linear, domain, range)
    }

    pub fn kind(&self) -> ScaleKind { self.kind }
    pub fn domain(&self) -> (f64, f64) { self.domain }
    pub fn range(&self) -> (f64, f64) { self.range }

    #[inline]
    fn forward(&self, v: f64) -> f64 {
        match self.kind {
            ScaleKind::Linear => v,
            ScaleKind::Log10 => v.max(1e-12).log10(),
        }
    }

    #[inline]
    fn backward(&self, v: f64) -> f64 {
        match self.kind {
            ScaleKind::Linear => v,
            ScaleKind::Log10 => 10f64.powf(v),
        }
    }

    #[inline]
    pub fn map(&self, v: f64) -> f64 {
        let (d0, d1) = (self.forward(self.domain.0), self.forward(self.domain.1));
        let t = (self.forward(v) - d0) / (d1 - d0);
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    #[inline]
    pub fn invert(&self, px: f64) -> f64 {
        let (r0, r1) = self.range;
        let span = if (r1 - r0).abs() < 1e-12 { 1.0 } else { r1 - r0 };
        let t = (px - r0) / span;
        let (d0, d1) = (self.forward(self.domain.0), self.forward(self.domain.1));
        self.backward(d0 + t * (d1 - d0))
    }

    /// `count` ticks across the domain (evenly spaced in log space for log scales).
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        if count == 0 { return Vec::new(); }
        if count == 1 { return vec![self.domain.0]; }
        let (d0, d1) = (self.forward(self.domain.0), self.forward(self.domain.1));
        linspace(d0, d1, count).into_iter().map(|v| self.backward(v)).collect()
    }
}

/// Which side of the inner area a scale spans.
pub trait Orientation: 'static {
    const NAME: &'static str;
    const STATE_KEY: &'static str;
    const API_KEY: &'static str;

    /// Pixel range of the inner area along this orientation.
    fn range(widget: &WidgetState) -> (f64, f64);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Horizontal;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Vertical;

impl Orientation for Horizontal {
    const NAME: &'static str = "x";
    const STATE_KEY: &'static str = "_scale_x";
    const API_KEY: &'static str = "scale_x";

    fn range(widget: &WidgetState) -> (f64, f64) { (0.0, widget.inner_width()) }
}

impl Orientation for Vertical {
    const NAME: &'static str = "y";
    const STATE_KEY: &'static str = "_scale_y";
    const API_KEY: &'static str = "scale_y";

    // Screen y grows downward.
    fn range(widget: &WidgetState) -> (f64, f64) { (widget.inner_height(), 0.0) }
}

/// Data-to-pixel mapping along orientation `O`.
pub trait ScaleMapper<O: Orientation> {
    fn map(&self, v: f64) -> f64;
    fn invert(&self, px: f64) -> f64;
    fn ticks(&self, count: usize) -> Vec<f64>;
    fn domain(&self) -> (f64, f64);
}

/// Public `scale_x` / `scale_y` namespace.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleApi<O> {
    domain: (f64, f64),
    kind: ScaleKind,
    _orientation: PhantomData<O>,
}

impl<O: Orientation> Namespace for ScaleApi<O> {
    const KEY: &'static str = O::API_KEY;
}

impl<O> ScaleApi<O> {
    pub fn domain(&mut self, lo: f64, hi: f64) -> &mut Self {
        self.domain = (lo, hi);
        self
    }
    pub fn kind(&mut self, kind: ScaleKind) -> &mut Self {
        self.kind = kind;
        self
    }
}

/// Protected `_scale_x` / `_scale_y` namespace: the scale fitted at the last render.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleState<O> {
    scale: ContinuousScale,
    _orientation: PhantomData<O>,
}

impl<O: Orientation> Namespace for ScaleState<O> {
    const KEY: &'static str = O::STATE_KEY;
}

impl<O> ScaleState<O> {
    pub fn scale(&self) -> &ContinuousScale { &self.scale }
}

impl<O: Orientation> ScaleMapper<O> for ScaleState<O> {
    fn map(&self, v: f64) -> f64 { self.scale.map(v) }
    fn invert(&self, px: f64) -> f64 { self.scale.invert(px) }
    fn ticks(&self, count: usize) -> Vec<f64> { self.scale.ticks(count) }
    fn domain(&self) -> (f64, f64) { self.scale.domain() }
}

/// Scale component. Its hook runs before everything composed earlier so
/// marks and axes read a scale fitted to the current size.
pub struct Scale<O> {
    domain: (f64, f64),
    kind: ScaleKind,
    _orientation: PhantomData<O>,
}

pub type XScale = Scale<Horizontal>;
pub type YScale = Scale<Vertical>;

impl<O: Orientation> Scale<O> {
    pub fn new(lo: f64, hi: f64) -> Self {
        Self { domain: (lo, hi), kind: ScaleKind::Linear, _orientation: PhantomData }
    }

    pub fn log10(lo: f64, hi: f64) -> Self {
        Self { kind: ScaleKind::Log10, ..Self::new(lo, hi) }
    }
}

fn update_scale<O: Orientation>(ctx: &mut UpdateContext<'_>) {
    let Ok(api) = ctx.api.get::<ScaleApi<O>>() else { return };
    let scale = ContinuousScale::new(api.kind, api.domain, O::range(ctx.widget()));
    if let Ok(state) = ctx.protected.get_mut::<ScaleState<O>>() {
        state.scale = scale;
    }
}

impl<O: Orientation> Component for Scale<O> {
    fn apply(self: Box<Self>, mut widget: Widget) -> ChartResult<Widget> {
        let range = O::range(widget.protected.widget());
        widget.protected.contribute(ScaleState::<O> {
            scale: ContinuousScale::new(self.kind, self.domain, range),
            _orientation: PhantomData,
        });
        widget.protected.provide::<ScaleState<O>, dyn ScaleMapper<O>>(|s| s);
        widget.protected.chain_mut().extend(format!("scale-{}", O::NAME), Placement::Before, update_scale::<O>);
        widget.api.contribute(ScaleApi::<O> { domain: self.domain, kind: self.kind, _orientation: PhantomData });
        Ok(widget)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_maps_and_inverts() {
        let s = ContinuousScale::linear((0.0, 10.0), (0.0, 200.0));
        assert_eq!(s.map(5.0), 100.0);
        assert_eq!(s.invert(50.0), 2.5);
        assert_eq!(s.ticks(3), vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn inverted_range_for_vertical() {
        let s = ContinuousScale::linear((0.0, 4.0), (100.0, 0.0));
        assert_eq!(s.map(0.0), 100.0);
        assert_eq!(s.map(4.0), 0.0);
    }

    #[test]
    fn degenerate_domains_are_widened() {
        let s = ContinuousScale::linear((3.0, 3.0), (0.0, 10.0));
        assert_eq!(s.domain(), (3.0, 4.0));
        let l = ContinuousScale::new(ScaleKind::Log10, (-1.0, -5.0), (0.0, 10.0));
        assert!(l.domain().0 > 0.0);
        assert!(l.domain().1 > l.domain().0);
    }

    #[test]
    fn log_ticks_are_powers() {
        let s = ContinuousScale::new(ScaleKind::Log10, (1.0, 1000.0), (0.0, 300.0));
        let ticks = s.ticks(4);
        for (got, want) in ticks.iter().zip([1.0, 10.0, 100.0, 1000.0]) {
            assert!((got - want).abs() < 1e-9 * want, "{got} vs {want}");
        }
        assert!((s.map(10.0) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn linspace_endpoints() {
        assert_eq!(linspace(0.0, 1.0, 1), vec![0.0, 1.0]);
        assert_eq!(linspace(0.0, 1.0, 5).len(), 5);
    }
}
