//! Input side of the normalizer: the hierarchical route declaration tree

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque reference to a renderable page
///
/// Usually the page file path relative to the pages directory
/// (`admin/dashboard/index.vue`). Routing code only clones and compares it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewRef(pub String);

impl ViewRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViewRef {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// One node of the route declaration tree
///
/// `segment` is relative to the parent; an empty segment marks the index
/// route of the parent. Accepts `path`/`component` keys so JSON dumps of an
/// auto-generated route tree deserialize directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "V: Deserialize<'de>"))]
pub struct RouteNode<V = ViewRef> {
    #[serde(default, alias = "path", skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
    #[serde(default, alias = "component", skip_serializing_if = "Option::is_none")]
    pub view: Option<V>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteNode<V>>,
}

impl<V> Default for RouteNode<V> {
    fn default() -> Self {
        Self {
            segment: None,
            view: None,
            children: Vec::new(),
        }
    }
}

impl<V> RouteNode<V> {
    /// A leaf carrying a view
    pub fn page(segment: impl Into<String>, view: V) -> Self {
        Self {
            segment: Some(segment.into()),
            view: Some(view),
            children: Vec::new(),
        }
    }

    /// An index page (`segment == ""`) for its parent
    pub fn index(view: V) -> Self {
        Self::page("", view)
    }

    /// A view-less node that only groups children
    pub fn branch(segment: impl Into<String>, children: Vec<RouteNode<V>>) -> Self {
        Self {
            segment: Some(segment.into()),
            view: None,
            children,
        }
    }

    pub fn with_view(mut self, view: V) -> Self {
        self.view = Some(view);
        self
    }

    pub fn with_child(mut self, child: RouteNode<V>) -> Self {
        self.children.push(child);
        self
    }

    /// Segment as a string slice; absent and empty are the same thing
    pub fn segment_str(&self) -> &str {
        self.segment.as_deref().unwrap_or("")
    }

    /// True for an index route: empty segment carrying a view
    pub fn is_index(&self) -> bool {
        self.segment_str().is_empty() && self.view.is_some()
    }

    /// Nodes with neither a view nor children never produce routes
    pub fn is_empty(&self) -> bool {
        self.view.is_none() && self.children.is_empty()
    }

    /// Every view in this subtree, pre-order
    pub fn views(&self) -> Vec<&V> {
        let mut out = Vec::new();
        self.collect_views(&mut out);
        out
    }

    fn collect_views<'a>(&'a self, out: &mut Vec<&'a V>) {
        if let Some(view) = &self.view {
            out.push(view);
        }
        for child in &self.children {
            child.collect_views(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_detection() {
        let node: RouteNode = RouteNode::index(ViewRef::from("index.vue"));
        assert!(node.is_index());

        let bare: RouteNode = RouteNode::branch("", vec![]);
        assert!(!bare.is_index());
        assert!(bare.is_empty());
    }

    #[test]
    fn test_deserialize_auto_route_shape() {
        let json = r#"[
            {"path": "/admin", "children": [
                {"path": "", "component": "admin/index.vue"},
                {"path": "users", "component": "admin/users.vue"}
            ]}
        ]"#;
        let tree: Vec<RouteNode> = serde_json::from_str(json).unwrap();

        assert_eq!(tree[0].segment_str(), "/admin");
        assert!(tree[0].view.is_none());
        assert_eq!(tree[0].children.len(), 2);
        assert_eq!(tree[0].children[0].view, Some(ViewRef::from("admin/index.vue")));
    }

    #[test]
    fn test_deserialize_view_without_default() {
        // ViewRef has no Default impl; absent views must still deserialize.
        let node: RouteNode<ViewRef> = serde_json::from_str(
            r#"{"path": "/history", "children": [{"path": ":id", "children": [{"path": "", "component": "history/detail.vue"}]}]}"#,
        )
        .unwrap();

        assert!(node.view.is_none());
        assert!(node.children[0].view.is_none());
        assert_eq!(node.children[0].children[0].view, Some(ViewRef::from("history/detail.vue")));
        assert!(node.children[0].children[0].is_index());
    }

    #[test]
    fn test_views_pre_order() {
        let node = RouteNode::page("a", ViewRef::from("a"))
            .with_child(RouteNode::page("b", ViewRef::from("b")))
            .with_child(RouteNode::branch("c", vec![RouteNode::index(ViewRef::from("c"))]));

        let views: Vec<&str> = node.views().into_iter().map(ViewRef::as_str).collect();
        assert_eq!(views, vec!["a", "b", "c"]);
    }
}
