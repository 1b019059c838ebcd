use anyhow::Result;
use colored::Colorize;
use routefold::{RouteRecord, ViewRef};

use super::Project;

pub fn execute(project: &Project) -> Result<()> {
    let table = project.table()?;

    println!("{}", "Routes".green().bold());
    println!();
    for record in table.records() {
        print_record(record, 0);
    }
    println!();
    println!("{} routes", table.route_count());

    Ok(())
}

fn print_record(record: &RouteRecord<ViewRef>, depth: usize) {
    let indent = "  ".repeat(depth + 1);
    let mut line = format!("{}{}", indent, record.path.bold());

    if let Some(view) = &record.view {
        line.push_str(&format!(" -> {}", view.as_str().cyan()));
    }
    if let Some(target) = &record.redirect {
        line.push_str(&format!(" => {}", target.yellow()));
    }
    if let Some(name) = &record.name {
        line.push_str(&format!(" [{}]", name.dimmed()));
    }
    println!("{}", line);

    for child in &record.children {
        print_record(child, depth + 1);
    }
}
