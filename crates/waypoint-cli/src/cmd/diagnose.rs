//! `wp diagnose`: catalog health report.
//!
//! Reads the catalog without title or status validation so that the defects
//! validated loading would reject (duplicate titles, unknown statuses) show
//! up in the report instead of aborting it.
//!
//! JSON output schema is stable for automation. Fields are added in a
//! backward-compatible way; existing field names and types do not change.

use std::io::{self, Write};

use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::warn;
use waypoint_core::catalog::read_projects;
use waypoint_nav::{CatalogDiagnostics, diagnose};

use super::Session;
use crate::output::{pretty_kv, pretty_section, render_mode};

#[derive(Debug, Serialize)]
pub struct DiagnoseReport {
    pub generated_at: String,
    pub catalog: String,
    pub healthy: bool,
    pub issue_count: usize,
    #[serde(flatten)]
    pub diagnostics: CatalogDiagnostics,
}

/// Execute `wp diagnose`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read, if output rendering fails,
/// or under `--strict` when the catalog has problems.
pub fn run_diagnose(session: &Session) -> Result<()> {
    let path = session.catalog_path();
    let projects = read_projects(&path).map_err(|err| session.fail_catalog(&path, err))?;

    let diagnostics = diagnose(&projects);
    let report = DiagnoseReport {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        catalog: path.display().to_string(),
        healthy: diagnostics.is_healthy(),
        issue_count: diagnostics.issue_count(),
        diagnostics,
    };

    render_mode(
        session.output,
        &report,
        |r, w| render_diagnose_text(r, w),
        |r, w| render_diagnose_pretty(r, w),
    )?;

    if session.strict && !report.healthy {
        warn!(issues = report.issue_count, "catalog is unhealthy");
        anyhow::bail!("catalog has {} issue(s)", report.issue_count);
    }
    Ok(())
}

/// One `kind\tsubject\tdetail` row per issue.
fn issue_rows(d: &CatalogDiagnostics) -> Vec<(&'static str, String, String)> {
    let mut rows = Vec::with_capacity(d.issue_count());
    for dup in &d.duplicate_titles {
        rows.push(("duplicate_title", dup.title.clone(), dup.ids.join(",")));
    }
    for dangling in &d.unresolved_parents {
        rows.push((
            "unresolved_parent",
            dangling.title.clone(),
            dangling.target.clone(),
        ));
    }
    for title in &d.self_parented {
        rows.push(("self_parent", title.clone(), title.clone()));
    }
    for cycle in &d.parent_cycles {
        rows.push(("parent_cycle", cycle.join(","), String::new()));
    }
    for unknown in &d.unknown_statuses {
        rows.push((
            "unknown_status",
            unknown.title.clone(),
            unknown.value.clone(),
        ));
    }
    for dangling in &d.unresolved_links {
        rows.push((
            "unresolved_link",
            dangling.title.clone(),
            dangling.target.clone(),
        ));
    }
    rows
}

fn render_diagnose_text(report: &DiagnoseReport, w: &mut dyn Write) -> io::Result<()> {
    writeln!(
        w,
        "healthy={} total={} roots={} issues={}",
        report.healthy,
        report.diagnostics.total,
        report.diagnostics.root_count,
        report.issue_count
    )?;
    for (kind, subject, detail) in issue_rows(&report.diagnostics) {
        writeln!(w, "{kind}\t{subject}\t{detail}")?;
    }
    Ok(())
}

fn render_diagnose_pretty(report: &DiagnoseReport, w: &mut dyn Write) -> io::Result<()> {
    let d = &report.diagnostics;
    pretty_section(w, "Catalog diagnostics")?;
    pretty_kv(w, "Catalog", &report.catalog)?;
    pretty_kv(w, "Generated", &report.generated_at)?;
    pretty_kv(w, "Projects", d.total.to_string())?;
    pretty_kv(w, "Roots", d.root_count.to_string())?;
    pretty_kv(
        w,
        "Health",
        if report.healthy {
            "ok".to_string()
        } else {
            format!("{} issue(s)", report.issue_count)
        },
    )?;

    if report.healthy {
        return Ok(());
    }

    writeln!(w)?;
    for (kind, subject, detail) in issue_rows(d) {
        if detail.is_empty() {
            writeln!(w, "  {kind:<18} {subject}")?;
        } else {
            writeln!(w, "  {kind:<18} {subject} → {detail}")?;
        }
    }
    Ok(())
}
