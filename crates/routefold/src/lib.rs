//! # routefold
//!
//! Turns a file-based route tree into the flat route table a client-side
//! router consumes:
//! - Canonical absolute paths (`//a//b/` → `/a/b`, `""` → `/`)
//! - Index pages promoted onto their parent's path
//! - Prefix rules that wrap or promote whole subtrees (`/admin`, `/templates`, `/user`)
//! - A not-found page and a wildcard redirect closing every table
//!
//! ## Failure model
//!
//! Flattening never fails. A node without a view and without routable
//! children simply produces nothing. Use [`validate_menu`] and
//! [`unreachable_views`] afterwards when a dropped page should fail a build.
//!
//! ## Example
//!
//! ```
//! use routefold::{default_rules, RouteNode, RouteTableBuilder};
//!
//! let tree = vec![
//!     RouteNode::page("/", "Home"),
//!     RouteNode::branch("/user", vec![RouteNode::page("system_film", "Films")]),
//! ];
//!
//! let table = RouteTableBuilder::new("NotFound")
//!     .rules(default_rules("AdminLayout", "TemplatesLayout"))
//!     .build(&tree);
//!
//! assert_eq!(table.resolve("/system_film").unwrap().view, Some("Films"));
//! assert!(table.resolve("/user/system_film").is_none());
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod config;
mod error;
pub mod flatten;
pub mod menu;
pub mod node;
pub mod path;
pub mod route;
pub mod scan;
pub mod table;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{Config, PlacementKind, RoutingConfig, RuleConfig};
pub use error::ScanError;
pub use flatten::{flatten_routes, FlatRoute};
pub use menu::{unreachable_views, validate_admin_menu, validate_menu, AdminMenuItem, MenuIssue, MenuItem};
pub use node::{RouteNode, ViewRef};
pub use path::{is_valid_path, normalize_path, PathHierarchy};
pub use scan::PageScanner;
pub use table::{default_rules, Placement, PrefixRule, RouteRecord, RouteTable, RouteTableBuilder};
