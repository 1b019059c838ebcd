pub mod build;
pub mod check;
pub mod list;
pub mod tree;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use routefold::{Config, PageScanner, RouteNode, RouteTable, ViewRef};
use tracing::{debug, info};

/// Configuration plus the route tree every command works from
pub struct Project {
    pub config: Config,
    pub tree: Vec<RouteNode<ViewRef>>,
}

impl Project {
    /// Loads the config, then reads the tree from `tree_file` or scans the pages directory
    ///
    /// A relative `pages_dir` is resolved against the config file's directory.
    pub fn load(config_path: &Path, tree_file: Option<&Path>) -> Result<Self> {
        debug!(path = ?config_path, exists = config_path.exists(), "loading config");
        let config = Config::load(config_path)?;

        let tree: Vec<RouteNode<ViewRef>> = match tree_file {
            Some(path) => {
                info!(path = ?path, "reading route tree");
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read route tree: {:?}", path))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse route tree: {:?}", path))?
            }
            None => {
                let pages_dir = pages_dir(config_path, &config.routing.pages_dir);
                info!(dir = ?pages_dir, extension = %config.routing.extension, "scanning pages");
                PageScanner::new(&pages_dir)
                    .with_extension(&config.routing.extension)
                    .scan()
                    .with_context(|| format!("Failed to scan pages: {:?}", pages_dir))?
            }
        };

        debug!(top_level = tree.len(), "route tree loaded");
        Ok(Self { config, tree })
    }

    pub fn table(&self) -> Result<RouteTable<ViewRef>> {
        Ok(self.config.table_builder()?.build(&self.tree))
    }
}

fn pages_dir(config_path: &Path, pages_dir: &str) -> PathBuf {
    let pages = Path::new(pages_dir);
    if pages.is_absolute() {
        return pages.to_path_buf();
    }

    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(pages),
        _ => pages.to_path_buf(),
    }
}
