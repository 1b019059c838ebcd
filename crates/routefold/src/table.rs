//! Final route table assembly
//!
//! The normalizer knows nothing about application layout. This module applies
//! the caller-level policy on top of it: an ordered list of [`PrefixRule`]s
//! pulls specific top-level subtrees out of the tree and either wraps them in
//! a synthetic parent entry or promotes their children to the top level.
//! Everything else is flattened as-is, and the not-found page plus a wildcard
//! redirect close the table.

use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::flatten::{flatten_routes, FlatRoute};
use crate::node::RouteNode;
use crate::path::{is_within, normalize_path};

/// Default path of the not-found page
pub const NOT_FOUND_PATH: &str = "/404";

/// Route name attached to the not-found page
pub const NOT_FOUND_NAME: &str = "NotFound";

/// Pattern matching every path the table does not otherwise handle
pub const WILDCARD_PATTERN: &str = "/:pathMatch(.*)*";

/// What happens to a subtree claimed by a [`PrefixRule`]
#[derive(Debug, Clone, PartialEq)]
pub enum Placement<V> {
    /// Emit one wrapper entry at the prefix owning `view`, with the subtree's
    /// flattened routes as its children. Routes rendering `view` itself are
    /// left out.
    Wrap { view: V, redirect: Option<String> },
    /// Append the subtree's flattened routes directly to the table
    Promote,
}

/// Special handling for one top-level subtree
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixRule<V> {
    /// Canonical path of the top-level node this rule claims
    pub prefix: String,
    /// Base the subtree's children are flattened against
    pub base: String,
    pub placement: Placement<V>,
}

impl<V> PrefixRule<V> {
    pub fn wrap(prefix: &str, base: impl Into<String>, view: V) -> Self {
        Self {
            prefix: normalize_path(prefix).into_owned(),
            base: base.into(),
            placement: Placement::Wrap { view, redirect: None },
        }
    }

    pub fn promote(prefix: &str, base: impl Into<String>) -> Self {
        Self {
            prefix: normalize_path(prefix).into_owned(),
            base: base.into(),
            placement: Placement::Promote,
        }
    }

    /// Sets the wrapper's default redirect; no effect on promote rules
    pub fn with_redirect(mut self, target: &str) -> Self {
        if let Placement::Wrap { redirect, .. } = &mut self.placement {
            *redirect = Some(normalize_path(target).into_owned());
        }
        self
    }

    /// True when `node` is the top-level node this rule claims
    pub fn claims(&self, node: &RouteNode<V>) -> bool {
        node.segment
            .as_deref()
            .is_some_and(|segment| normalize_path(segment) == self.prefix)
    }
}

/// The rules used by the dashboard layout
///
/// - `/user`: children promoted to the root, prefix dropped
/// - `/admin`: wrapped, children mounted under `/admin`, redirects to `/admin/dashboard`
/// - `/templates`: wrapped, children flattened under `/templates/`
pub fn default_rules<V>(admin_view: V, templates_view: V) -> Vec<PrefixRule<V>> {
    vec![
        PrefixRule::promote("/user", "/"),
        PrefixRule::wrap("/admin", "", admin_view).with_redirect("/admin/dashboard"),
        PrefixRule::wrap("/templates", "/templates/", templates_view),
    ]
}

/// One entry of the final route table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRecord<V> {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<V>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RouteRecord<V>>,
}

impl<V> RouteRecord<V> {
    /// A redirect-only entry
    pub fn redirect(path: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: None,
            view: None,
            redirect: Some(target.into()),
            children: Vec::new(),
        }
    }

    /// True when `path` matches this record's pattern
    ///
    /// `:name` matches one segment, `:name?` zero or one, `:name(.*)*` the rest.
    pub fn matches(&self, path: &str) -> bool {
        let pattern: Vec<&str> = self.path.split('/').filter(|s| !s.is_empty()).collect();
        let target: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match_segments(&pattern, &target)
    }
}

impl<V> From<FlatRoute<V>> for RouteRecord<V> {
    fn from(route: FlatRoute<V>) -> Self {
        Self {
            path: route.path,
            name: None,
            view: Some(route.view),
            redirect: None,
            children: route.children.into_iter().map(RouteRecord::from).collect(),
        }
    }
}

fn match_segments(pattern: &[&str], path: &[&str]) -> bool {
    let Some((head, rest)) = pattern.split_first() else {
        return path.is_empty();
    };

    if head.starts_with(':') && head.ends_with(")*") {
        return true;
    }

    if head.starts_with(':') && head.ends_with('?') {
        // Try consuming one segment first, then skipping the optional one.
        if let Some((_, path_rest)) = path.split_first() {
            if match_segments(rest, path_rest) {
                return true;
            }
        }
        return match_segments(rest, path);
    }

    match path.split_first() {
        Some((segment, path_rest)) => {
            (head.starts_with(':') || head == segment) && match_segments(rest, path_rest)
        }
        None => false,
    }
}

/// The finished, ordered route list handed to the router
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RouteTable<V> {
    records: Vec<RouteRecord<V>>,
}

impl<V> RouteTable<V> {
    pub fn records(&self) -> &[RouteRecord<V>] {
        &self.records
    }

    pub fn into_records(self) -> Vec<RouteRecord<V>> {
        self.records
    }

    /// Number of top-level records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The record that would render `path`, searching wrapper children first
    ///
    /// Redirect-only records (no view) never resolve, so the wildcard fallback
    /// does not hide missing routes.
    pub fn resolve(&self, path: &str) -> Option<&RouteRecord<V>> {
        let path = normalize_path(path);
        find_record(&self.records, &path)
    }

    /// Every record path, depth-first
    pub fn paths(&self) -> Vec<&str> {
        let mut out = Vec::new();
        walk(&self.records, &mut |record| out.push(record.path.as_str()));
        out
    }

    /// Number of routes that render a view, wrapper children included
    ///
    /// Redirect-only records such as the wildcard are not counted.
    pub fn route_count(&self) -> usize {
        self.views().len()
    }

    /// Every view in the table, depth-first
    pub fn views(&self) -> Vec<&V> {
        let mut out = Vec::new();
        walk(&self.records, &mut |record| {
            if let Some(view) = &record.view {
                out.push(view);
            }
        });
        out
    }
}

fn walk<'a, V>(records: &'a [RouteRecord<V>], visit: &mut impl FnMut(&'a RouteRecord<V>)) {
    for record in records {
        visit(record);
        walk(&record.children, visit);
    }
}

fn find_record<'a, V>(records: &'a [RouteRecord<V>], path: &str) -> Option<&'a RouteRecord<V>> {
    records.iter().find_map(|record| {
        find_record(&record.children, path)
            .or_else(|| (record.view.is_some() && record.matches(path)).then_some(record))
    })
}

/// Assembles a [`RouteTable`] from a route tree
///
/// # Examples
///
/// ```
/// use routefold::{RouteNode, RouteTableBuilder, default_rules};
///
/// let tree = vec![RouteNode::branch("/admin", vec![RouteNode::index("Dash")])];
/// let table = RouteTableBuilder::new("NotFound")
///     .rules(default_rules("AdminLayout", "TemplatesLayout"))
///     .build(&tree);
///
/// let admin = table.resolve("/admin").unwrap();
/// assert_eq!(admin.redirect.as_deref(), Some("/admin/dashboard"));
/// assert_eq!(table.resolve("/admin/dashboard").unwrap().view, Some("Dash"));
/// ```
#[derive(Debug, Clone)]
pub struct RouteTableBuilder<V> {
    rules: Vec<PrefixRule<V>>,
    not_found_path: String,
    not_found_view: V,
    wildcard_pattern: String,
}

impl<V: Clone + PartialEq> RouteTableBuilder<V> {
    pub fn new(not_found_view: V) -> Self {
        Self {
            rules: Vec::new(),
            not_found_path: NOT_FOUND_PATH.to_string(),
            not_found_view,
            wildcard_pattern: WILDCARD_PATTERN.to_string(),
        }
    }

    /// Appends one rule; rules contribute in the order they were added
    pub fn rule(mut self, rule: PrefixRule<V>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(mut self, rules: impl IntoIterator<Item = PrefixRule<V>>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn not_found_path(mut self, path: &str) -> Self {
        self.not_found_path = normalize_path(path).into_owned();
        self
    }

    pub fn wildcard_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.wildcard_pattern = pattern.into();
        self
    }

    /// Builds the table. Never fails: unmatched rules yield empty wrappers and
    /// misconfigured branches are dropped by the normalizer.
    pub fn build(&self, tree: &[RouteNode<V>]) -> RouteTable<V> {
        let ordinary: Vec<RouteNode<V>> = tree
            .iter()
            .filter(|node| !self.rules.iter().any(|rule| rule.claims(node)))
            .cloned()
            .collect();

        let mut records: Vec<RouteRecord<V>> = flatten_routes(&ordinary, "")
            .into_iter()
            .map(RouteRecord::from)
            .collect();

        for rule in &self.rules {
            records.extend(self.apply_rule(rule, tree));
        }

        records.push(RouteRecord {
            path: self.not_found_path.clone(),
            name: Some(NOT_FOUND_NAME.to_string()),
            view: Some(self.not_found_view.clone()),
            redirect: None,
            children: Vec::new(),
        });
        records.push(RouteRecord::redirect(
            self.wildcard_pattern.clone(),
            self.not_found_path.clone(),
        ));

        info!(records = records.len(), rules = self.rules.len(), "route table built");
        RouteTable { records }
    }

    fn apply_rule(&self, rule: &PrefixRule<V>, tree: &[RouteNode<V>]) -> Vec<RouteRecord<V>> {
        let subtree = tree.iter().find(|node| rule.claims(node));
        let children = subtree.map(|node| node.children.as_slice()).unwrap_or(&[]);

        match subtree {
            None => debug!(prefix = %rule.prefix, "no subtree for rule"),
            Some(node) if node.view.is_some() => {
                debug!(prefix = %rule.prefix, "subtree view replaced by rule placement")
            }
            Some(_) => {}
        }

        let flat = flatten_routes(children, &rule.base);

        match &rule.placement {
            Placement::Promote => flat.into_iter().map(RouteRecord::from).collect(),
            Placement::Wrap { view, redirect } => {
                let rooted = is_within(&rule.prefix, &normalize_path(&rule.base));
                let mut mounted = HashSet::new();
                let children = flat
                    .into_iter()
                    .filter(|route| {
                        let own = route.view == *view;
                        if own {
                            debug!(prefix = %rule.prefix, path = %route.path, "dropping child that renders the wrapper view");
                        }
                        !own
                    })
                    .map(|route| {
                        let path = mount(&rule.prefix, rooted, &route.path, redirect.as_deref());
                        if !mounted.insert(path.clone()) {
                            warn!(prefix = %rule.prefix, path = %path, "wrapped routes share a path; the first one wins");
                        }
                        RouteRecord::from(FlatRoute { path, ..route })
                    })
                    .collect();

                vec![RouteRecord {
                    path: rule.prefix.clone(),
                    name: None,
                    view: Some(view.clone()),
                    redirect: redirect.clone(),
                    children,
                }]
            }
        }
    }
}

/// Places a wrapped route under its wrapper's prefix
///
/// `rooted` is decided once per rule: when the rule's base already lies under
/// the prefix, flattened paths carry it and stay put. Otherwise every path is
/// re-rooted beneath the prefix, including one whose first segment happens to
/// repeat it. A route that lands on the prefix itself moves to the redirect
/// target when the wrapper redirects, since the wrapper owns that path.
fn mount(prefix: &str, rooted: bool, path: &str, redirect: Option<&str>) -> String {
    let mounted = if rooted {
        path.to_string()
    } else {
        normalize_path(&format!("{}/{}", prefix, path)).into_owned()
    };

    match redirect {
        Some(target) if mounted == prefix => target.to_string(),
        _ => mounted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_mount() {
        assert_eq!(mount("/admin", false, "/users", None), "/admin/users");
        assert_eq!(mount("/admin", false, "/", None), "/admin");
        assert_eq!(mount("/admin", false, "/", Some("/admin/dashboard")), "/admin/dashboard");
        assert_eq!(mount("/admin", false, "/admin/settings", None), "/admin/admin/settings");
        assert_eq!(mount("/templates", true, "/templates/stats", None), "/templates/stats");
        assert_eq!(mount("/templates", true, "/templates", None), "/templates");
    }

    #[test]
    fn test_match_segments() {
        let record: RouteRecord<()> = RouteRecord::redirect("/history/:id", "/");
        assert!(record.matches("/history/42"));
        assert!(!record.matches("/history"));
        assert!(!record.matches("/history/42/edit"));

        let optional: RouteRecord<()> = RouteRecord::redirect("/list/:page?", "/");
        assert!(optional.matches("/list"));
        assert!(optional.matches("/list/2"));

        let catch_all: RouteRecord<()> = RouteRecord::redirect("/:pathMatch(.*)*", "/404");
        assert!(catch_all.matches("/"));
        assert!(catch_all.matches("/a/b/c"));
    }

    #[test]
    fn test_claims_normalizes_segment() {
        let rule: PrefixRule<&str> = PrefixRule::promote("/user/", "/");
        assert_eq!(rule.prefix, "/user");
        assert!(rule.claims(&RouteNode::branch("/user", vec![])));
        assert!(rule.claims(&RouteNode::branch("user/", vec![])));
        assert!(!rule.claims(&RouteNode::branch("/users", vec![])));
        assert!(!rule.claims(&RouteNode::default()));
    }

    #[test]
    fn test_with_redirect_ignored_for_promote() {
        let rule: PrefixRule<&str> = PrefixRule::promote("/user", "/").with_redirect("/x");
        assert_eq!(rule.placement, Placement::Promote);
    }

    #[test]
    fn test_wrap_drops_wrapper_view_child() {
        let tree = vec![RouteNode::branch(
            "/templates",
            vec![RouteNode::index("Layout"), RouteNode::page("stats", "Stats")],
        )];
        let table = RouteTableBuilder::new("NF")
            .rule(PrefixRule::wrap("/templates", "/templates/", "Layout"))
            .build(&tree);

        let wrapper = &table.records()[0];
        assert_eq!(wrapper.children.len(), 1);
        assert_eq!(wrapper.children[0].path, "/templates/stats");
    }

    #[test]
    fn test_catch_alls_always_last() {
        let table = RouteTableBuilder::new("NF").build(&[RouteNode::index("Home")]);
        let paths = table.paths();
        assert_eq!(paths, vec!["/", "/404", "/:pathMatch(.*)*"]);

        let last = &table.records()[2];
        assert_eq!(last.redirect.as_deref(), Some("/404"));
        assert_eq!(last.view, None);
    }

    #[test]
    fn test_resolve_skips_redirect_only_records() {
        let table = RouteTableBuilder::new("NF").build(&[RouteNode::page("/about", "About")]);
        assert!(table.resolve("/about").is_some());
        assert!(table.resolve("/nowhere").is_none());
        assert_eq!(table.resolve("/404").and_then(|r| r.name.as_deref()), Some("NotFound"));
    }

    #[test]
    fn test_child_repeating_prefix_is_rerooted() {
        let tree = vec![RouteNode::branch(
            "/admin",
            vec![
                RouteNode::page("settings", "Settings"),
                RouteNode::branch("admin", vec![RouteNode::page("settings", "NestedAdminSettings")]),
            ],
        )];
        let table = RouteTableBuilder::new("NF")
            .rule(PrefixRule::wrap("/admin", "", "AdminLayout").with_redirect("/admin/dashboard"))
            .build(&tree);

        let children: Vec<(&str, Option<&str>)> = table.records()[0]
            .children
            .iter()
            .map(|r| (r.path.as_str(), r.view))
            .collect();
        assert_eq!(
            children,
            vec![
                ("/admin/settings", Some("Settings")),
                ("/admin/admin/settings", Some("NestedAdminSettings")),
            ]
        );
        assert_eq!(
            table.resolve("/admin/admin/settings").and_then(|r| r.view),
            Some("NestedAdminSettings")
        );
    }

    #[test]
    fn test_index_and_dashboard_collide_first_wins() {
        let tree = vec![RouteNode::branch(
            "/admin",
            vec![RouteNode::index("AdminHome"), RouteNode::page("dashboard", "Dashboard")],
        )];
        let table = RouteTableBuilder::new("NF")
            .rule(PrefixRule::wrap("/admin", "", "AdminLayout").with_redirect("/admin/dashboard"))
            .build(&tree);

        let paths: Vec<&str> = table.records()[0].children.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/admin/dashboard", "/admin/dashboard"]);
        assert_eq!(table.resolve("/admin/dashboard").and_then(|r| r.view), Some("AdminHome"));
    }

    #[test]
    fn test_route_count_skips_redirects() {
        let tree = vec![
            RouteNode::page("/about", "About"),
            RouteNode::branch("/admin", vec![RouteNode::page("users", "Users")]),
        ];
        let table = RouteTableBuilder::new("NF")
            .rule(PrefixRule::wrap("/admin", "", "AdminLayout").with_redirect("/admin/dashboard"))
            .build(&tree);

        // about, admin wrapper, admin/users, not-found; the wildcard redirect is left out
        assert_eq!(table.paths().len(), 5);
        assert_eq!(table.route_count(), 4);
    }
}
