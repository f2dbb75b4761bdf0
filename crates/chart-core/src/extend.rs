// File: crates/chart-core/src/extend.rs
// Summary: Function extension (`extend`) and the ordered update chain every component appends to.

use std::collections::VecDeque;

use crate::widget::UpdateContext;

/// Combine `base` and `extension` into one function that runs both, once
/// each, with the same argument. `extension` runs after `base` unless
/// `before` is set.
pub fn extend<A: Clone>(
    mut base: impl FnMut(A),
    mut extension: impl FnMut(A),
    before: bool,
) -> impl FnMut(A) {
    move |arg: A| {
        if before {
            extension(arg.clone());
            base(arg);
        } else {
            base(arg.clone());
            extension(arg);
        }
    }
}

/// Where a hook lands relative to the hooks registered so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Run after everything already in the chain.
    After,
    /// Run before everything already in the chain.
    Before,
}

impl From<bool> for Placement {
    fn from(before: bool) -> Self {
        if before { Placement::Before } else { Placement::After }
    }
}

pub type UpdateFn = Box<dyn FnMut(&mut UpdateContext<'_>)>;

struct Hook {
    label: String,
    run: UpdateFn,
}

/// The widget's update pipeline (`_widget.update`).
///
/// Order is exactly registration order adjusted by each hook's placement;
/// nothing is reordered by data dependencies.
#[derive(Default)]
pub struct UpdateChain {
    hooks: VecDeque<Hook>,
}

impl UpdateChain {
    pub fn new() -> Self { Self::default() }

    pub fn extend(
        &mut self,
        label: impl Into<String>,
        placement: Placement,
        run: impl FnMut(&mut UpdateContext<'_>) + 'static,
    ) -> &mut Self {
        let hook = Hook { label: label.into(), run: Box::new(run) };
        tracing::trace!(hook = %hook.label, ?placement, "extending update chain");
        match placement {
            Placement::After => self.hooks.push_back(hook),
            Placement::Before => self.hooks.push_front(hook),
        }
        self
    }

    /// Hook labels in execution order.
    pub fn labels(&self) -> Vec<&str> {
        self.hooks.iter().map(|h| h.label.as_str()).collect()
    }

    pub fn len(&self) -> usize { self.hooks.len() }
    pub fn is_empty(&self) -> bool { self.hooks.is_empty() }

    pub fn run(&mut self, ctx: &mut UpdateContext<'_>) {
        for hook in self.hooks.iter_mut() {
            tracing::trace!(hook = %hook.label, "update");
            (hook.run)(ctx);
        }
    }

    /// Append hooks registered while this chain was detached for a run.
    pub(crate) fn absorb(&mut self, mut other: UpdateChain) {
        self.hooks.append(&mut other.hooks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn extend_runs_base_then_extension() {
        let a = Cell::new(3);
        extend(|x: i32| a.set(a.get() * x), |x: i32| a.set(a.get() + x), false)(2);
        assert_eq!(a.get(), 8);
    }

    #[test]
    fn extend_before_runs_extension_first() {
        let a = Cell::new(3);
        extend(|x: i32| a.set(a.get() * x), |x: i32| a.set(a.get() + x), true)(2);
        assert_eq!(a.get(), 10);
    }

    #[test]
    fn placement_controls_labels() {
        let mut chain = UpdateChain::new();
        chain
            .extend("a", Placement::After, |_| {})
            .extend("b", Placement::After, |_| {})
            .extend("c", Placement::Before, |_| {})
            .extend("d", Placement::from(false), |_| {});
        assert_eq!(chain.labels(), vec!["c", "a", "b", "d"]);
    }
}
