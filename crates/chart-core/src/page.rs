// File: crates/chart-core/src/page.rs
// Summary: Page context (shared document + style registry) handed to every widget constructor.

use std::cell::RefCell;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::dom::Document;

/// Shared CSS rules keyed by class name, one registry per page.
///
/// Cloning yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct StyleRegistry {
    rules: Rc<RefCell<IndexMap<String, String>>>,
}

impl StyleRegistry {
    pub fn new() -> Self { Self::default() }

    /// Register `rules` for `.name`. The first registration wins; returns
    /// whether this call inserted anything.
    pub fn add_class(&self, name: &str, rules: &str) -> bool {
        let mut map = self.rules.borrow_mut();
        if map.contains_key(name) {
            return false;
        }
        tracing::debug!(class = name, "registering style rule");
        map.insert(name.to_string(), rules.to_string());
        true
    }

    pub fn rules(&self, name: &str) -> Option<String> {
        self.rules.borrow().get(name).cloned()
    }

    pub fn len(&self) -> usize { self.rules.borrow().len() }
    pub fn is_empty(&self) -> bool { self.rules.borrow().is_empty() }

    /// Stylesheet text in registration order.
    pub fn stylesheet(&self) -> String {
        self.rules
            .borrow()
            .iter()
            .map(|(name, rules)| format!(".{name} {{ {rules} }}\n"))
            .collect()
    }
}

/// One page: the document all its widgets mount into and its style registry.
///
/// Widgets keep a clone of the page; widgets on different pages never share state.
#[derive(Clone, Default)]
pub struct Page {
    document: Rc<RefCell<Document>>,
    styles: StyleRegistry,
}

impl Page {
    pub fn new() -> Self { Self::default() }

    pub fn document(&self) -> &Rc<RefCell<Document>> { &self.document }
    pub fn styles(&self) -> &StyleRegistry { &self.styles }

    /// Advance the page's transition clock and run the callbacks of the
    /// transitions that completed. Callbacks run with the document
    /// released, so they may read it, render or dispose widgets.
    pub fn advance(&self, elapsed_ms: u64) -> usize {
        let completed = self.document.borrow_mut().advance(elapsed_ms);
        completed.run()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_class_is_idempotent() {
        let styles = StyleRegistry::new();
        assert!(styles.add_class("da-dimmed", "opacity: 0.2;"));
        assert!(!styles.add_class("da-dimmed", "opacity: 0.9;"));
        assert_eq!(styles.rules("da-dimmed").as_deref(), Some("opacity: 0.2;"));
        assert_eq!(styles.len(), 1);
    }

    #[test]
    fn handles_share_rules() {
        let page = Page::new();
        let other = page.clone();
        other.styles().add_class("a", "fill: red;");
        assert_eq!(page.styles().stylesheet(), ".a { fill: red; }\n");
    }

    #[test]
    fn callbacks_may_touch_the_document() {
        use std::cell::Cell;

        let page = Page::new();
        let node = {
            let mut doc = page.document().borrow_mut();
            let root = doc.root();
            doc.create(root, "div").unwrap()
        };
        let seen = Rc::new(Cell::new(false));
        let (handle, flag) = (page.clone(), seen.clone());
        let _ = page.document().borrow_mut().transition(
            node,
            10,
            Some(Box::new(move || {
                let contains = handle.document().borrow().contains(node);
                handle.document().borrow_mut().remove(node);
                flag.set(contains);
            })),
        );
        assert_eq!(page.advance(10), 1);
        assert!(seen.get());
        assert!(!page.document().borrow().contains(node));
    }
}
