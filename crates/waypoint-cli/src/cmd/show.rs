//! `wp show`: one project with its structural context.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use waypoint_core::ErrorCode;
use waypoint_core::model::Project;
use waypoint_nav::{ProjectGraph, descendants, related_projects};

use super::Session;
use crate::output::{CliError, pretty_kv, pretty_rule, pretty_section, render_error, render_mode};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Exact project title.
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct ShowReport<'a> {
    pub project: &'a Project,
    /// Root first, direct parent last.
    pub path: Vec<&'a str>,
    pub children: Vec<&'a str>,
    pub descendant_count: usize,
    pub related: Vec<&'a str>,
}

/// Execute `wp show <title>`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the title is unknown, or
/// output rendering fails.
pub fn run_show(args: &ShowArgs, session: &Session) -> Result<()> {
    let catalog = session.load_catalog()?;

    let Some(project) = catalog.get(&args.title) else {
        render_error(
            session.output,
            &CliError::with_code(
                ErrorCode::ProjectNotFound,
                format!("project '{}' not found", args.title),
            ),
        )?;
        anyhow::bail!("project '{}' not found", args.title);
    };

    let graph = ProjectGraph::build(catalog.projects());
    let report = ShowReport {
        project,
        path: parent_path(&graph, &project.title),
        children: graph.children(&project.title).to_vec(),
        descendant_count: descendants(&graph, &project.title).len(),
        related: related_projects(project, catalog.projects())
            .into_iter()
            .map(|p| p.title.as_str())
            .collect(),
    };

    render_mode(
        session.output,
        &report,
        |r, w| render_show_text(r, w),
        |r, w| render_show_pretty(r, w),
    )
}

/// Parent chain from the root down to the direct parent. Stops on a repeat.
fn parent_path<'a>(graph: &ProjectGraph<'a>, title: &str) -> Vec<&'a str> {
    let mut path: Vec<&'a str> = Vec::new();
    let mut current = title;
    while let Some(parent) = graph.parent(current) {
        if parent == title || path.contains(&parent) {
            break;
        }
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}

fn render_show_text(report: &ShowReport<'_>, w: &mut dyn Write) -> io::Result<()> {
    let p = report.project;
    writeln!(w, "title\t{}", p.title)?;
    writeln!(w, "id\t{}", p.id)?;
    writeln!(w, "status\t{}", p.status)?;
    if let Some(project_type) = p.project_type {
        writeln!(w, "type\t{project_type}")?;
    }
    if let Some(category) = p.category {
        writeln!(w, "category\t{category}")?;
    }
    if !report.path.is_empty() {
        writeln!(w, "path\t{}", report.path.join(" > "))?;
    }
    if !report.children.is_empty() {
        writeln!(w, "children\t{}", report.children.join(", "))?;
    }
    writeln!(w, "descendants\t{}", report.descendant_count)?;
    if !report.related.is_empty() {
        writeln!(w, "related\t{}", report.related.join(", "))?;
    }
    Ok(())
}

fn render_show_pretty(report: &ShowReport<'_>, w: &mut dyn Write) -> io::Result<()> {
    let p = report.project;
    pretty_section(w, &p.title)?;
    pretty_kv(w, "ID", &p.id)?;
    pretty_kv(w, "Status", p.status.as_str())?;
    if let Some(project_type) = p.project_type {
        pretty_kv(w, "Type", project_type.as_str())?;
    }
    if let Some(category) = p.category {
        pretty_kv(w, "Category", category.as_str())?;
    }
    if let Some(version) = &p.version {
        pretty_kv(w, "Version", version)?;
    }
    if !p.tags.is_empty() {
        pretty_kv(w, "Tags", p.tags.join(", "))?;
    }
    if let Some(link) = &p.link {
        pretty_kv(w, "Link", link)?;
    }
    if let Some(github) = &p.github {
        pretty_kv(w, "GitHub", github)?;
    }
    if !p.description.is_empty() {
        writeln!(w)?;
        writeln!(w, "{}", p.description)?;
    }

    writeln!(w)?;
    pretty_rule(w)?;
    if report.path.is_empty() {
        pretty_kv(w, "Path", "(root)")?;
    } else {
        pretty_kv(w, "Path", report.path.join(" › "))?;
    }
    pretty_kv(
        w,
        "Children",
        format!(
            "{} direct, {} total",
            report.children.len(),
            report.descendant_count
        ),
    )?;
    for child in &report.children {
        writeln!(w, "  - {child}")?;
    }
    if !report.related.is_empty() {
        pretty_kv(w, "Related", report.related.join(", "))?;
    }

    if !p.roadmap.is_empty() {
        writeln!(w)?;
        writeln!(w, "Roadmap")?;
        for entry in &p.roadmap {
            writeln!(w, "  {} ({})", entry.version, entry.release_status)?;
            for item in &entry.items {
                writeln!(w, "    - {item}")?;
            }
        }
    }
    Ok(())
}
