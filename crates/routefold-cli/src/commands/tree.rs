use colored::Colorize;
use routefold::{RouteNode, ViewRef};

use super::Project;

pub fn execute(project: &Project) {
    if project.tree.is_empty() {
        println!("{}", "No pages found".yellow());
        return;
    }

    for node in &project.tree {
        print_node(node, 0);
    }
}

fn print_node(node: &RouteNode<ViewRef>, depth: usize) {
    let indent = "  ".repeat(depth);
    let segment = match node.segment_str() {
        "" => "(index)".dimmed().to_string(),
        s => s.bold().to_string(),
    };

    match &node.view {
        Some(view) => println!("{}{} {}", indent, segment, view.as_str().cyan()),
        None if node.children.is_empty() => println!("{}{} {}", indent, segment, "(empty)".red()),
        None => println!("{}{}", indent, segment),
    }

    for child in &node.children {
        print_node(child, depth + 1);
    }
}
