use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use tracing::info;

use super::Project;

pub fn execute(project: &Project, out: Option<&Path>, pretty: bool) -> Result<()> {
    let table = project.table()?;

    let json = if pretty {
        serde_json::to_string_pretty(&table)?
    } else {
        serde_json::to_string(&table)?
    };

    match out {
        Some(path) => {
            info!(path = ?path, bytes = json.len(), "writing route table");
            fs::write(path, json + "\n")
                .with_context(|| format!("Failed to write route table: {:?}", path))?;
            eprintln!(
                "{} {} routes -> {}",
                "✓".green().bold(),
                table.route_count(),
                path.display().to_string().cyan()
            );
        }
        None => println!("{}", json),
    }

    Ok(())
}
