//! `wp filter`: the navigator's flat, ordered project list.

use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;
use waypoint_core::model::{Category, Project, ProjectType};
use waypoint_nav::{FilterResult, filter_for_navigator, search_active};

use super::{FilterArgs, Session};
use crate::output::{pretty_kv, pretty_section, render_mode};

/// JSON shape of `wp filter`.
#[derive(Debug, Serialize)]
pub struct FilterReport<'a> {
    pub catalog_hash: &'a str,
    pub search_active: bool,
    pub filters_active: bool,
    #[serde(flatten)]
    pub result: FilterResult<'a>,
}

/// Execute `wp filter`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded, the configured filter
/// defaults are invalid, or output rendering fails.
pub fn run_filter(args: &FilterArgs, session: &Session) -> Result<()> {
    let catalog = session.load_catalog()?;
    let filters = args.to_filters(session)?;

    let report = FilterReport {
        catalog_hash: catalog.content_hash(),
        search_active: search_active(&filters.query),
        filters_active: filters.has_active_filters(),
        result: filter_for_navigator(catalog.projects(), &filters),
    };

    render_mode(
        session.output,
        &report,
        |r, w| render_filter_text(r, w),
        |r, w| render_filter_pretty(r, w),
    )
}

fn project_type_label(project: &Project) -> &'static str {
    project.project_type.map_or("-", ProjectType::as_str)
}

fn category_label(project: &Project) -> &'static str {
    project.category.map_or("-", Category::as_str)
}

/// One tab-separated row per visible project, after a counters line.
pub fn render_filter_text(report: &FilterReport<'_>, w: &mut dyn Write) -> io::Result<()> {
    let result = &report.result;
    writeln!(
        w,
        "visible={} total={} matched={} primary={} focus={}",
        result.visible_count,
        result.total_count,
        result.matched_count,
        result.primary_matched_count,
        result.focus_count
    )?;
    for project in &result.visible {
        writeln!(
            w,
            "{}\t{}\t{}\t{}",
            project.title,
            project.status,
            project_type_label(project),
            category_label(project)
        )?;
    }
    Ok(())
}

fn render_filter_pretty(report: &FilterReport<'_>, w: &mut dyn Write) -> io::Result<()> {
    let result = &report.result;
    pretty_section(
        w,
        &format!(
            "Projects ({} of {})",
            result.visible_count, result.total_count
        ),
    )?;

    if result.is_empty() {
        writeln!(w, "No projects match the current filters.")?;
    }
    for project in &result.visible {
        writeln!(
            w,
            "{:<32} {:<12} {:<13} {}",
            project.title,
            project.status.as_str(),
            project_type_label(project),
            category_label(project)
        )?;
    }

    if report.search_active || report.filters_active {
        writeln!(w)?;
        pretty_kv(w, "Matched", result.matched_count.to_string())?;
        pretty_kv(w, "Primary", result.primary_matched_count.to_string())?;
    }
    if result.focus_count > 0 {
        pretty_kv(w, "In focus", result.focus_count.to_string())?;
    }
    Ok(())
}
