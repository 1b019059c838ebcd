//! Route tree normalizer
//!
//! Turns a nested [`RouteNode`] tree into an ordered list of [`FlatRoute`]s
//! whose paths are absolute and canonical. Nesting survives only as shared
//! path prefixes.
//!
//! Rules, applied to each node with `full_base = base + (segment ? segment + "/" : "")`:
//!
//! 1. **View present**: emit `full_base`, then the node's children flattened
//!    under `full_base`.
//! 2. **No view, has children**: the first child with an empty segment and a
//!    view is the index; its view is emitted at `full_base`. Children that are
//!    not index candidates are flattened under `full_base`.
//! 3. **Neither**: nothing.
//!
//! Output is pre-order and siblings keep their relative order. Nothing here
//! fails; a misconfigured branch contributes zero entries.

use serde::Serialize;
use tracing::{debug, warn};

use crate::node::RouteNode;
use crate::path::{join_segment, normalize_path};

/// One normalized route
///
/// `children` is always empty for entries produced by [`flatten_routes`];
/// it is filled in only when a caller nests flat routes under a wrapper.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlatRoute<V> {
    pub path: String,
    pub view: V,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FlatRoute<V>>,
}

impl<V> FlatRoute<V> {
    pub fn new(path: impl Into<String>, view: V) -> Self {
        Self {
            path: path.into(),
            view,
            children: Vec::new(),
        }
    }
}

/// Flattens `tree` into absolute routes, resolving segments against `base`
///
/// # Examples
///
/// ```
/// use routefold::{flatten_routes, RouteNode};
///
/// let tree = vec![RouteNode::branch("a", vec![
///     RouteNode::index("V1"),
///     RouteNode::page("b", "V2"),
/// ])];
///
/// let flat = flatten_routes(&tree, "");
/// let paths: Vec<&str> = flat.iter().map(|r| r.path.as_str()).collect();
/// assert_eq!(paths, vec!["/a", "/a/b"]);
/// assert_eq!(flat[0].view, "V1");
/// ```
pub fn flatten_routes<V: Clone>(tree: &[RouteNode<V>], base: &str) -> Vec<FlatRoute<V>> {
    let mut out = Vec::new();
    flatten_into(tree, base, &mut out);
    out
}

fn flatten_into<V: Clone>(nodes: &[RouteNode<V>], base: &str, out: &mut Vec<FlatRoute<V>>) {
    for node in nodes {
        let full_base = join_segment(base, node.segment_str());

        if let Some(view) = &node.view {
            out.push(FlatRoute::new(normalize_path(&full_base), view.clone()));
            flatten_into(&node.children, &full_base, out);
            continue;
        }

        if node.children.is_empty() {
            debug!(path = %normalize_path(&full_base), "dropping route node with no view and no children");
            continue;
        }

        let index_pos = node.children.iter().position(RouteNode::is_index);

        match index_pos {
            Some(pos) => {
                let extra = node.children[pos + 1..].iter().filter(|c| c.is_index()).count();
                if extra > 0 {
                    warn!(
                        path = %normalize_path(&full_base),
                        ignored = extra,
                        "multiple index routes; using the first, dropping the rest"
                    );
                }
                if let Some(view) = &node.children[pos].view {
                    out.push(FlatRoute::new(normalize_path(&full_base), view.clone()));
                }
            }
            None => {
                debug!(path = %normalize_path(&full_base), "no index route; path itself is not routable");
            }
        }

        for child in node.children.iter().filter(|c| !c.is_index()) {
            flatten_into(std::slice::from_ref(child), &full_base, out);
        }
    }
}
