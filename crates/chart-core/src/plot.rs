// File: crates/chart-core/src/plot.rs
// Summary: Keyed enter/update/exit of per-series plot groups.

use crate::dom::{Document, NodeId};
use crate::encode::encode;
use crate::error::ChartResult;

pub const KEY_ATTR: &str = "data-key";

/// Outcome of [`join`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Join {
    /// One node per key, in key order.
    pub nodes: Vec<NodeId>,
    pub entered: Vec<NodeId>,
    pub updated: Vec<NodeId>,
    /// Number of stale groups removed.
    pub exited: usize,
}

/// Reconcile the `tag` children of `parent` with `keys`.
///
/// Children are matched by their encoded key (`data-key` attribute, also
/// set as a class), each child to at most one key. Keys that encode alike
/// (repeats, or names differing only in case) get one child each; children
/// left unmatched are removed and missing ones created.
pub fn join<S: AsRef<str>>(document: &mut Document, parent: NodeId, tag: &str, keys: &[S]) -> ChartResult<Join> {
    let mut pool: Vec<(NodeId, String)> = document
        .get(parent)
        .map(|p| p.children().to_vec())
        .unwrap_or_default()
        .into_iter()
        .filter_map(|c| {
            let el = document.get(c)?;
            (el.tag == tag).then(|| (c, el.attrs.get(KEY_ATTR).cloned().unwrap_or_default()))
        })
        .collect();

    let mut out = Join::default();
    for raw in keys {
        let key = encode(raw.as_ref());
        let node = match pool.iter().position(|(_, k)| *k == key) {
            Some(i) => {
                let (node, _) = pool.remove(i);
                out.updated.push(node);
                node
            }
            None => {
                let node = document.create(parent, tag)?;
                document.node_mut(node)?.add_class(&key).attr(KEY_ATTR, key.as_str()).attr("data-name", raw.as_ref());
                out.entered.push(node);
                node
            }
        };
        out.nodes.push(node);
    }
    for (node, _) in pool {
        document.remove(node);
        out.exited += 1;
    }
    Ok(out)
}
