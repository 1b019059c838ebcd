//! Page directory scanner
//!
//! Builds the route declaration tree from a pages directory using the
//! auto-route file conventions:
//!
//! | file                          | node                                   |
//! |-------------------------------|----------------------------------------|
//! | `pages/index.vue`             | `/` with view                          |
//! | `pages/about.vue`             | `/about` with view                     |
//! | `pages/history/index.vue`     | `/history` → index child               |
//! | `pages/history/[id].vue`      | `/history` → `:id`                     |
//! | `pages/admin.vue` + `admin/`  | one `/admin` node with view + children |
//! | `pages/(auth)/login.vue`      | `/login` (groups add no segment)       |
//!
//! Top-level segments carry a leading `/`, nested ones are relative.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::ScanError;
use crate::node::{RouteNode, ViewRef};
use crate::route::pattern::classify_segment;

/// Default page file extension
pub const DEFAULT_EXTENSION: &str = "vue";

const INDEX_STEM: &str = "index";

/// Walks a pages directory and produces its route tree
#[derive(Debug, Clone)]
pub struct PageScanner {
    root: PathBuf,
    extension: String,
}

impl PageScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Page file extension without the dot
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scans the directory. Entries are visited in file-name order, so the
    /// resulting tree is deterministic.
    pub fn scan(&self) -> Result<Vec<RouteNode<ViewRef>>, ScanError> {
        if !self.root.is_dir() {
            return Err(ScanError::MissingDir(self.root.clone()));
        }

        let mut tree = Vec::new();
        let mut pages = 0usize;

        for entry in WalkDir::new(&self.root).min_depth(1).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(self.extension.as_str()) {
                debug!(path = %path.display(), "skipping non-page file");
                continue;
            }

            let relative = path.strip_prefix(&self.root).unwrap_or(path);
            let components = relative
                .iter()
                .map(|c| c.to_str().ok_or_else(|| ScanError::InvalidName(path.to_path_buf())))
                .collect::<Result<Vec<&str>, _>>()?;

            let view = ViewRef::new(components.join("/"));
            insert_page(&mut tree, &components, &self.extension, view);
            pages += 1;
        }

        info!(root = %self.root.display(), pages, "scanned pages directory");
        Ok(tree)
    }
}

/// Inserts one page file, given its path components relative to the pages root
fn insert_page(tree: &mut Vec<RouteNode<ViewRef>>, components: &[&str], extension: &str, view: ViewRef) {
    let Some((file, dirs)) = components.split_last() else {
        return;
    };

    let stem = file
        .strip_suffix(extension)
        .and_then(|s| s.strip_suffix('.'))
        .unwrap_or(file);

    let mut segments: Vec<String> = dirs
        .iter()
        .filter_map(|dir| classify_segment(dir).to_route_segment())
        .collect();

    let leaf = if stem == INDEX_STEM {
        None
    } else {
        classify_segment(stem).to_route_segment()
    };
    let is_index = leaf.is_none();
    segments.extend(leaf);

    insert_segments(tree, &segments, is_index, view, 0);
}

fn insert_segments(
    level: &mut Vec<RouteNode<ViewRef>>,
    segments: &[String],
    is_index: bool,
    view: ViewRef,
    depth: usize,
) {
    let Some((head, rest)) = segments.split_first() else {
        if depth == 0 {
            set_view(find_or_insert(level, "/".to_string()), view);
        } else {
            level.push(RouteNode::index(view));
        }
        return;
    };

    let segment = if depth == 0 {
        format!("/{}", head)
    } else {
        head.clone()
    };
    let node = find_or_insert(level, segment);

    if rest.is_empty() && !is_index {
        set_view(node, view);
    } else {
        insert_segments(&mut node.children, rest, is_index, view, depth + 1);
    }
}

fn find_or_insert(level: &mut Vec<RouteNode<ViewRef>>, segment: String) -> &mut RouteNode<ViewRef> {
    let found = level.iter().position(|n| n.segment_str() == segment);
    let pos = match found {
        Some(pos) => pos,
        None => {
            level.push(RouteNode::branch(segment, Vec::new()));
            level.len() - 1
        }
    };
    &mut level[pos]
}

fn set_view(node: &mut RouteNode<ViewRef>, view: ViewRef) {
    match &node.view {
        Some(existing) => {
            warn!(kept = %existing, ignored = %view, "two page files map to one route");
        }
        None => node.view = Some(view),
    }
}
