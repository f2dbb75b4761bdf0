// File: crates/chart-core/src/dom.rs
// Summary: Minimal synchronous element tree standing in for the page DOM, with transition completion callbacks.

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{ChartError, ChartResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize { self.0 }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct Element {
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub attrs: IndexMap<String, String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub styles: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip)]
    children: Vec<NodeId>,
    #[serde(skip)]
    parent: Option<NodeId>,
}

impl Element {
    fn new(tag: &str, parent: Option<NodeId>) -> Self {
        Self { tag: tag.to_string(), parent, ..Self::default() }
    }

    pub fn attr(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.attrs.insert(name.to_string(), value.into());
        self
    }

    pub fn remove_attr(&mut self, name: &str) -> &mut Self {
        self.attrs.shift_remove(name);
        self
    }

    pub fn style(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.styles.insert(name.to_string(), value.into());
        self
    }

    pub fn remove_style(&mut self, name: &str) -> &mut Self {
        self.styles.shift_remove(name);
        self
    }

    pub fn set_text(&mut self, text: impl Into<String>) -> &mut Self {
        self.text = Some(text.into());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) -> &mut Self {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
        self
    }

    pub fn remove_class(&mut self, class: &str) -> &mut Self {
        self.classes.retain(|c| c != class);
        self
    }

    pub fn toggle_class(&mut self, class: &str, on: bool) -> &mut Self {
        if on { self.add_class(class) } else { self.remove_class(class) }
    }

    pub fn children(&self) -> &[NodeId] { &self.children }
    pub fn parent(&self) -> Option<NodeId> { self.parent }
}

/// Transition completion callback.
pub type OnEnd = Box<dyn FnOnce()>;

struct PendingTransition {
    node: NodeId,
    due: u64,
    on_end: Option<OnEnd>,
}

/// Transitions that completed, with their callbacks not yet run.
///
/// The document hands callbacks back instead of running them so they may
/// borrow the page's document again. Run them once the borrow is released.
#[must_use = "completion callbacks only fire through `run`"]
#[derive(Default)]
pub struct Completed {
    count: usize,
    callbacks: Vec<OnEnd>,
}

impl Completed {
    /// Number of transitions that completed.
    pub fn len(&self) -> usize { self.count }
    pub fn is_empty(&self) -> bool { self.count == 0 }

    /// Run the callbacks in completion order; returns [`Completed::len`].
    pub fn run(self) -> usize {
        for cb in self.callbacks {
            cb();
        }
        self.count
    }
}

/// Arena-backed element tree rooted at a `body` element.
///
/// All mutations are synchronous. Transitions only track completion: the
/// end-state attributes are written immediately by the caller, and the
/// completion callback fires once the simulated clock passes the duration.
///
/// Node ids are never reused: removal leaves an empty slot behind, so a
/// stale [`NodeId`] keeps reporting a missing node instead of aliasing a
/// newer element. The arena therefore grows with every element created
/// over the page's lifetime.
pub struct Document {
    nodes: Vec<Option<Element>>,
    root: NodeId,
    clock: u64,
    transitions: Vec<PendingTransition>,
}

impl Default for Document {
    fn default() -> Self { Self::new() }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Element::new("body", None))],
            root: NodeId(0),
            clock: 0,
            transitions: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId { self.root }

    pub fn contains(&self, node: NodeId) -> bool {
        matches!(self.nodes.get(node.0), Some(Some(_)))
    }

    pub fn get(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(node.0).and_then(Option::as_mut)
    }

    pub fn node_mut(&mut self, node: NodeId) -> ChartResult<&mut Element> {
        self.get_mut(node).ok_or(ChartError::MissingNode(node.0))
    }

    /// Append a new `tag` element under `parent`.
    pub fn create(&mut self, parent: NodeId, tag: &str) -> ChartResult<NodeId> {
        if !self.contains(parent) {
            return Err(ChartError::MissingNode(parent.0));
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(Some(Element::new(tag, Some(parent))));
        self.node_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// First child of `parent` with this tag and class, created when absent.
    pub fn ensure_child(&mut self, parent: NodeId, tag: &str, class: &str) -> ChartResult<NodeId> {
        let existing = self
            .get(parent)
            .ok_or(ChartError::MissingNode(parent.0))?
            .children
            .iter()
            .copied()
            .find(|&c| self.get(c).is_some_and(|e| e.tag == tag && e.has_class(class)));
        if let Some(found) = existing {
            return Ok(found);
        }
        let id = self.create(parent, tag)?;
        self.node_mut(id)?.add_class(class);
        Ok(id)
    }

    /// Detach and drop `node` with its whole subtree. Pending transitions on
    /// removed nodes are discarded without firing.
    pub fn remove(&mut self, node: NodeId) -> bool {
        if node == self.root || !self.contains(node) {
            return false;
        }
        let doomed = self.subtree(node);
        if let Some(parent) = self.get(node).and_then(|e| e.parent) {
            if let Some(p) = self.get_mut(parent) {
                p.children.retain(|&c| c != node);
            }
        }
        for id in &doomed {
            self.nodes[id.0] = None;
        }
        self.transitions.retain(|t| !doomed.contains(&t.node));
        true
    }

    /// `node` followed by all of its descendants, depth first.
    pub fn subtree(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(el) = self.get(id) {
                out.push(id);
                stack.extend(el.children.iter().rev().copied());
            }
        }
        out
    }

    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut all = self.subtree(node);
        if !all.is_empty() {
            all.remove(0);
        }
        all
    }

    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.subtree(self.root)
            .into_iter()
            .find(|&n| self.get(n).and_then(|e| e.id.as_deref()) == Some(id))
    }

    pub fn select_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&n| self.get(n).is_some_and(|e| e.has_class(class)))
            .collect()
    }

    /// Queue a completion callback for a transition on `node`.
    ///
    /// A zero duration completes immediately: the finished transition is
    /// returned for the caller to run after releasing the document.
    pub fn transition(&mut self, node: NodeId, duration_ms: u64, on_end: Option<OnEnd>) -> Completed {
        if !self.contains(node) {
            return Completed::default();
        }
        if duration_ms == 0 {
            return Completed { count: 1, callbacks: on_end.into_iter().collect() };
        }
        let due = self.clock.saturating_add(duration_ms);
        self.transitions.push(PendingTransition { node, due, on_end });
        Completed::default()
    }

    /// Drop pending transitions on `node` without running their callbacks.
    pub fn interrupt(&mut self, node: NodeId) -> usize {
        let before = self.transitions.len();
        self.transitions.retain(|t| t.node != node);
        before - self.transitions.len()
    }

    /// Advance the transition clock and collect the transitions that came due.
    pub fn advance(&mut self, elapsed_ms: u64) -> Completed {
        self.clock = self.clock.saturating_add(elapsed_ms);
        let now = self.clock;
        let (due, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.transitions).into_iter().partition(|t| t.due <= now);
        self.transitions = pending;
        Completed { count: due.len(), callbacks: due.into_iter().filter_map(|t| t.on_end).collect() }
    }

    pub fn clock(&self) -> u64 { self.clock }

    pub fn pending_transitions(&self) -> usize { self.transitions.len() }

    /// JSON view of `node` and its subtree.
    pub fn snapshot(&self, node: NodeId) -> Value {
        let Some(el) = self.get(node) else { return Value::Null };
        let mut v = serde_json::to_value(el).unwrap_or(Value::Null);
        let children: Vec<Value> = el.children.iter().map(|&c| self.snapshot(c)).collect();
        if !children.is_empty() {
            if let Value::Object(map) = &mut v {
                map.insert("children".to_string(), json!(children));
            }
        }
        v
    }
}
