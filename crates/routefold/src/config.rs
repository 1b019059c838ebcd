// File: src/config.rs
// Purpose: Configuration parsing from routefold.toml

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::menu::{AdminMenuItem, MenuItem};
use crate::node::ViewRef;
use crate::table::{PrefixRule, RouteTableBuilder, NOT_FOUND_PATH, WILDCARD_PATTERN};

/// Default configuration file name
pub const CONFIG_FILE: &str = "routefold.toml";

/// Project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Prefix rules, applied in order
    #[serde(default = "default_rules")]
    pub rules: Vec<RuleConfig>,

    #[serde(default)]
    pub menu: Vec<MenuItem>,

    #[serde(default)]
    pub admin_menu: Vec<AdminMenuItem>,
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Directory containing page files (default: "src/pages")
    #[serde(default = "default_pages_dir")]
    pub pages_dir: String,

    /// Page file extension (default: "vue")
    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default = "default_not_found_path")]
    pub not_found_path: String,

    #[serde(default = "default_not_found_view")]
    pub not_found_view: String,

    #[serde(default = "default_wildcard_pattern")]
    pub wildcard_pattern: String,
}

/// How a claimed subtree is placed in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementKind {
    Wrap,
    Promote,
}

/// One `[[rules]]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub prefix: String,

    #[serde(default)]
    pub base: String,

    pub placement: PlacementKind,

    /// Wrapper view; required for `wrap`
    #[serde(default)]
    pub view: Option<String>,

    #[serde(default)]
    pub redirect: Option<String>,
}

impl RuleConfig {
    fn wrap(prefix: &str, base: &str, view: &str, redirect: Option<&str>) -> Self {
        Self {
            prefix: prefix.to_string(),
            base: base.to_string(),
            placement: PlacementKind::Wrap,
            view: Some(view.to_string()),
            redirect: redirect.map(str::to_string),
        }
    }

    fn promote(prefix: &str, base: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            base: base.to_string(),
            placement: PlacementKind::Promote,
            view: None,
            redirect: None,
        }
    }

    /// Converts to a [`PrefixRule`], rejecting wrap rules without a view
    pub fn to_rule(&self) -> Result<PrefixRule<ViewRef>> {
        match self.placement {
            PlacementKind::Promote => {
                if self.view.is_some() || self.redirect.is_some() {
                    tracing::warn!(prefix = %self.prefix, "view/redirect ignored on promote rule");
                }
                Ok(PrefixRule::promote(&self.prefix, self.base.clone()))
            }
            PlacementKind::Wrap => {
                let Some(view) = &self.view else {
                    bail!("wrap rule for '{}' needs a view", self.prefix);
                };
                let rule = PrefixRule::wrap(&self.prefix, self.base.clone(), ViewRef::new(view.clone()));
                Ok(match &self.redirect {
                    Some(target) => rule.with_redirect(target),
                    None => rule,
                })
            }
        }
    }
}

// Default values
fn default_pages_dir() -> String {
    "src/pages".to_string()
}

fn default_extension() -> String {
    crate::scan::DEFAULT_EXTENSION.to_string()
}

fn default_not_found_path() -> String {
    NOT_FOUND_PATH.to_string()
}

fn default_not_found_view() -> String {
    "404/index.vue".to_string()
}

fn default_wildcard_pattern() -> String {
    WILDCARD_PATTERN.to_string()
}

fn default_rules() -> Vec<RuleConfig> {
    vec![
        RuleConfig::promote("/user", "/"),
        RuleConfig::wrap("/admin", "", "admin/index.vue", Some("/admin/dashboard")),
        RuleConfig::wrap("/templates", "/templates/", "templates/index.vue", None),
    ]
}

// Default implementations
impl Default for Config {
    fn default() -> Self {
        Self {
            routing: RoutingConfig::default(),
            rules: default_rules(),
            menu: Vec::new(),
            admin_menu: Vec::new(),
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            pages_dir: default_pages_dir(),
            extension: default_extension(),
            not_found_path: default_not_found_path(),
            not_found_view: default_not_found_view(),
            wildcard_pattern: default_wildcard_pattern(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::parse(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./routefold.toml)
    pub fn load_default() -> Result<Self> {
        Self::load(CONFIG_FILE)
    }

    /// Parse configuration text; blank input yields defaults
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Builder preloaded with the configured rules and catch-alls
    pub fn table_builder(&self) -> Result<RouteTableBuilder<ViewRef>> {
        let rules = self
            .rules
            .iter()
            .map(RuleConfig::to_rule)
            .collect::<Result<Vec<_>>>()?;

        Ok(RouteTableBuilder::new(ViewRef::new(self.routing.not_found_view.clone()))
            .not_found_path(&self.routing.not_found_path)
            .wildcard_pattern(self.routing.wildcard_pattern.clone())
            .rules(rules))
    }
}
