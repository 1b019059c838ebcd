//! Navigation menus and post-hoc route checks
//!
//! The normalizer drops misconfigured branches without complaint. The checks
//! here catch the consequences: menu links that no longer resolve, and pages
//! that never made it into the route table.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::node::RouteNode;
use crate::path::{normalize_path, PathHierarchy};
use crate::table::RouteTable;

/// Entry of the main header menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    /// Display label or an i18n key such as `menu.index`
    pub label: String,
    pub href: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Hidden items are still routable and still checked
    #[serde(default)]
    pub hide: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuItem>,
}

/// Entry of the admin sidebar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminMenuItem {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub path: String,
    #[serde(default)]
    pub hide: bool,
    /// Sub-menu entries, checked like their parent
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<AdminMenuItem>,
}

/// A menu link that does not resolve to a rendered route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuIssue {
    pub id: String,
    pub href: String,
    /// Closest ancestor path that does resolve
    pub nearest: Option<String>,
}

impl fmt::Display for MenuIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "menu item '{}' links to unrouted path {}", self.id, self.href)?;
        if let Some(nearest) = &self.nearest {
            write!(f, " (nearest route: {})", nearest)?;
        }
        Ok(())
    }
}

/// Checks every header menu link, children included
pub fn validate_menu<V>(items: &[MenuItem], table: &RouteTable<V>) -> Vec<MenuIssue> {
    let mut issues = Vec::new();
    collect_menu_issues(items, table, &mut issues);
    issues
}

fn collect_menu_issues<V>(items: &[MenuItem], table: &RouteTable<V>, issues: &mut Vec<MenuIssue>) {
    for item in items {
        issues.extend(check_link(&item.id, &item.href, table));
        collect_menu_issues(&item.children, table, issues);
    }
}

/// Checks every admin sidebar link, sub-menus included
pub fn validate_admin_menu<V>(items: &[AdminMenuItem], table: &RouteTable<V>) -> Vec<MenuIssue> {
    let mut issues = Vec::new();
    collect_admin_issues(items, table, &mut issues);
    issues
}

fn collect_admin_issues<V>(items: &[AdminMenuItem], table: &RouteTable<V>, issues: &mut Vec<MenuIssue>) {
    for item in items {
        issues.extend(check_link(&item.id, &item.path, table));
        collect_admin_issues(&item.children, table, issues);
    }
}

fn check_link<V>(id: &str, href: &str, table: &RouteTable<V>) -> Option<MenuIssue> {
    let path = normalize_path(href);
    if table.resolve(&path).is_some() {
        return None;
    }

    let nearest = PathHierarchy::new(&path)
        .skip(1)
        .find(|candidate| table.resolve(candidate).is_some())
        .map(str::to_string);

    Some(MenuIssue {
        id: id.to_string(),
        href: href.to_string(),
        nearest,
    })
}

/// Views declared in `tree` that appear nowhere in `table`
///
/// Each returned view was silently dropped during flattening or belongs to a
/// subtree no rule and no ordinary pass picked up.
pub fn unreachable_views<'a, V: PartialEq>(tree: &'a [RouteNode<V>], table: &RouteTable<V>) -> Vec<&'a V> {
    let routed = table.views();
    tree.iter()
        .flat_map(RouteNode::views)
        .filter(|view| !routed.contains(view))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::RouteTableBuilder;
    use pretty_assertions::assert_eq;

    fn item(id: &str, href: &str) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            label: id.to_string(),
            href: href.to_string(),
            icon: None,
            hide: false,
            children: Vec::new(),
        }
    }

    #[test]
    fn test_menu_issue_reports_nearest_route() {
        let tree = vec![RouteNode::page("/knowledge", "Knowledge")];
        let table = RouteTableBuilder::new("NF").build(&tree);

        let issues = validate_menu(&[item("k", "/knowledge/"), item("x", "/knowledge/x/y")], &table);
        assert_eq!(
            issues,
            vec![MenuIssue {
                id: "x".to_string(),
                href: "/knowledge/x/y".to_string(),
                nearest: Some("/knowledge".to_string()),
            }]
        );
        assert_eq!(
            issues[0].to_string(),
            "menu item 'x' links to unrouted path /knowledge/x/y (nearest route: /knowledge)"
        );
    }

    #[test]
    fn test_menu_children_checked() {
        let table = RouteTableBuilder::new("NF").build(&[RouteNode::index("Home")]);
        let mut parent = item("templates", "/");
        parent.children.push(item("stats", "/templates/stats"));

        let issues = validate_menu(&[parent], &table);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].id, "stats");
        assert_eq!(issues[0].nearest.as_deref(), Some("/"));
    }

    fn admin_item(id: &str, path: &str) -> AdminMenuItem {
        AdminMenuItem {
            id: id.to_string(),
            title: id.to_string(),
            icon: None,
            path: path.to_string(),
            hide: false,
            children: Vec::new(),
        }
    }

    #[test]
    fn test_admin_menu() {
        let mut dashboard = admin_item("1", "/about");
        dashboard.icon = Some("Odometer".to_string());
        let table = RouteTableBuilder::new("NF").build(&[RouteNode::page("/about", "About")]);
        assert!(validate_admin_menu(&[dashboard], &table).is_empty());
    }

    #[test]
    fn test_admin_sub_menu_checked() {
        let tree = vec![RouteNode::branch(
            "/admin",
            vec![RouteNode::branch("orders", vec![RouteNode::index("Orders")])],
        )];
        let table = RouteTableBuilder::new("NF").build(&tree);

        let mut orders = admin_item("4", "/admin/orders");
        orders.children.push(admin_item("4-1", "/admin/orders"));
        orders.children.push(admin_item("4-2", "/admin/orders/list"));

        let issues = validate_admin_menu(&[orders], &table);
        assert_eq!(
            issues,
            vec![MenuIssue {
                id: "4-2".to_string(),
                href: "/admin/orders/list".to_string(),
                nearest: Some("/admin/orders".to_string()),
            }]
        );
    }

    #[test]
    fn test_admin_menu_nested_from_toml_shape() {
        let items: Vec<AdminMenuItem> = serde_json::from_str(
            r#"[{"id": "6", "title": "Settings", "path": "/admin/settings", "hide": true,
                 "children": [{"id": "6-1", "title": "Basic", "path": "/admin/settings/basic"}]}]"#,
        )
        .unwrap();

        assert!(items[0].hide);
        assert!(!items[0].children[0].hide);
        assert_eq!(items[0].children[0].path, "/admin/settings/basic");
    }

    #[test]
    fn test_unreachable_views() {
        let tree = vec![
            RouteNode::page("/about", "About"),
            RouteNode::branch("/broken", vec![RouteNode::branch("", vec![])]),
        ];
        let table = RouteTableBuilder::new("NF").build(&tree);
        assert!(unreachable_views(&tree, &table).is_empty());

        // Only the first index candidate is routed.
        let tree = vec![RouteNode::branch(
            "/a",
            vec![RouteNode::index("First"), RouteNode::index("Second")],
        )];
        let table = RouteTableBuilder::new("NF").build(&tree);
        assert_eq!(unreachable_views(&tree, &table), vec![&"Second"]);
    }
}
