use anyhow::{bail, Result};
use colored::Colorize;
use routefold::{unreachable_views, validate_admin_menu, validate_menu};
use tracing::debug;

use super::Project;

pub fn execute(project: &Project, strict: bool) -> Result<()> {
    let table = project.table()?;

    let mut issues = validate_menu(&project.config.menu, &table);
    issues.extend(validate_admin_menu(&project.config.admin_menu, &table));

    for issue in &issues {
        println!("{} {}", "✗".red().bold(), issue);
    }

    let unreachable = unreachable_views(&project.tree, &table);
    debug!(menu_issues = issues.len(), unreachable = unreachable.len(), strict, "route check finished");
    for view in &unreachable {
        let marker = if strict { "✗".red().bold() } else { "⚠".yellow().bold() };
        println!("{} page {} is not routed", marker, view.as_str().cyan());
    }

    let failures = issues.len() + if strict { unreachable.len() } else { 0 };
    if failures > 0 {
        bail!("{} route check(s) failed", failures);
    }

    println!("{} {} routes checked", "✓".green().bold(), table.route_count());
    Ok(())
}
