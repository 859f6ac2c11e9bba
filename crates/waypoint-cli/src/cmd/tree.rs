//! `wp tree`: the filtered view nested by parent.

use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;
use waypoint_core::model::Project;
use waypoint_nav::hierarchy::count_nodes;
use waypoint_nav::{ProjectNode, build_hierarchy, filter_for_navigator, flatten_with_depth};

use super::{FilterArgs, Session};
use crate::output::{pretty_section, render_mode};

#[derive(Debug, Serialize)]
pub struct TreeReport<'a> {
    pub total_count: usize,
    pub visible_count: usize,
    pub roots: Vec<ProjectNode<'a>>,
}

/// Execute `wp tree`.
///
/// Projects whose parent was filtered out are shown as roots.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the configured filter
/// defaults are invalid, or output rendering fails.
pub fn run_tree(args: &FilterArgs, session: &Session) -> Result<()> {
    let catalog = session.load_catalog()?;
    let filters = args.to_filters(session)?;

    let result = filter_for_navigator(catalog.projects(), &filters);
    let visible: Vec<Project> = result.visible.iter().map(|&p| p.clone()).collect();

    let report = TreeReport {
        total_count: result.total_count,
        visible_count: result.visible_count,
        roots: build_hierarchy(&visible),
    };

    render_mode(
        session.output,
        &report,
        |r, w| render_tree_text(r, w),
        |r, w| render_tree_pretty(r, w),
    )
}

/// Titles indented two spaces per level.
pub fn render_tree_text(report: &TreeReport<'_>, w: &mut dyn Write) -> io::Result<()> {
    for (depth, project) in flatten_with_depth(&report.roots) {
        writeln!(w, "{:indent$}{}", "", project.title, indent = depth * 2)?;
    }
    Ok(())
}

fn render_tree_pretty(report: &TreeReport<'_>, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(
        w,
        &format!(
            "Project tree ({} of {})",
            count_nodes(&report.roots),
            report.total_count
        ),
    )?;
    if report.roots.is_empty() {
        writeln!(w, "No projects match the current filters.")?;
        return Ok(());
    }

    for (idx, root) in report.roots.iter().enumerate() {
        let last = idx + 1 == report.roots.len();
        write_branch(w, root, "", last, true)?;
    }
    Ok(())
}

fn write_branch(
    w: &mut dyn Write,
    node: &ProjectNode<'_>,
    prefix: &str,
    last: bool,
    root: bool,
) -> io::Result<()> {
    let connector = if root {
        ""
    } else if last {
        "└─ "
    } else {
        "├─ "
    };
    writeln!(
        w,
        "{prefix}{connector}{} [{}]",
        node.project.title, node.project.status
    )?;

    let child_prefix = if root {
        String::new()
    } else if last {
        format!("{prefix}   ")
    } else {
        format!("{prefix}│  ")
    };
    for (idx, child) in node.children.iter().enumerate() {
        write_branch(
            w,
            child,
            &child_prefix,
            idx + 1 == node.children.len(),
            false,
        )?;
    }
    Ok(())
}
