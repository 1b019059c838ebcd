/// Path utilities for building and canonicalizing route paths
///
/// All functions are **pure**: given same input, always produce same output with no side effects.

use std::borrow::Cow;

pub mod hierarchy;
pub use hierarchy::PathHierarchy;

/// Validates if a path is in canonical form
///
/// # Rules
///
/// - Must start with `/`
/// - Must not contain `//` or `\`
/// - Must not end with `/` (except root `/`)
/// - Must not be empty
///
/// # Examples
///
/// ```
/// use routefold::path::is_valid_path;
///
/// assert!(is_valid_path("/"));
/// assert!(is_valid_path("/admin/dashboard"));
///
/// assert!(!is_valid_path(""));
/// assert!(!is_valid_path("admin")); // Missing leading /
/// assert!(!is_valid_path("/admin/")); // Trailing /
/// assert!(!is_valid_path("/admin//users")); // Double //
/// ```
pub fn is_valid_path(path: &str) -> bool {
    if path.is_empty() || !path.starts_with('/') {
        return false;
    }

    if path.contains("//") || path.contains('\\') {
        return false;
    }

    path == "/" || !path.ends_with('/')
}

/// Normalize a path to canonical form
///
/// Returns `Cow::Borrowed` when the input is already canonical, so normalizing
/// twice never allocates the second time.
///
/// - Repeated slashes collapse: `//a//b` → `/a/b`
/// - Trailing slash is stripped: `/a/b/` → `/a/b`
/// - Backslashes become slashes: `\a\b` → `/a/b`
/// - A leading slash is always present: `a/b/` → `/a/b`
/// - Nothing left means root: `""` → `/`
///
/// # Examples
///
/// ```
/// use routefold::path::normalize_path;
/// use std::borrow::Cow;
///
/// assert!(matches!(normalize_path("/about"), Cow::Borrowed("/about")));
/// assert_eq!(normalize_path("//a//b/"), "/a/b");
/// assert_eq!(normalize_path(""), "/");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if is_valid_path(path) {
        return Cow::Borrowed(path);
    }

    let normalized = path
        .replace('\\', "/")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        Cow::Borrowed("/")
    } else {
        Cow::Owned(format!("/{}", normalized))
    }
}

/// Appends one segment to a base under construction
///
/// The result keeps a trailing slash whenever a segment was appended; an empty
/// segment leaves the base untouched. Call [`normalize_path`] on the result to
/// get the canonical form.
///
/// ```
/// use routefold::path::join_segment;
///
/// assert_eq!(join_segment("", "a"), "a/");
/// assert_eq!(join_segment("/a/", "b"), "/a/b/");
/// assert_eq!(join_segment("/a/", ""), "/a/");
/// ```
pub fn join_segment(base: &str, segment: &str) -> String {
    if segment.is_empty() {
        base.to_string()
    } else {
        format!("{}{}/", base, segment)
    }
}

/// Returns true when `path` is `prefix` itself or lies underneath it
///
/// Both arguments are expected in canonical form. Root contains every path.
///
/// ```
/// use routefold::path::is_within;
///
/// assert!(is_within("/admin", "/admin"));
/// assert!(is_within("/admin", "/admin/users"));
/// assert!(!is_within("/admin", "/administrators"));
/// ```
pub fn is_within(prefix: &str, path: &str) -> bool {
    if prefix == "/" {
        return path.starts_with('/');
    }

    match path.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with('/'),
        None => false,
    }
}
