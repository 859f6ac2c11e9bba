//! Catalog health report.
//!
//! The engine tolerates every defect listed here (see the fail-soft notes on
//! [`crate::graph`] and [`crate::hierarchy`]). This module makes them visible
//! so content authors can fix the data instead of relying on the fallbacks.
//!
//! JSON field names are stable; new fields are only ever added.

#![allow(clippy::module_name_repetitions)]

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, instrument};
use waypoint_core::model::Project;

use crate::graph::{ProjectGraph, find_parent_cycles};
use crate::hierarchy::build_hierarchy;

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogDiagnostics {
    pub total: usize,
    /// Top-level nodes of the full hierarchy.
    pub root_count: usize,
    pub duplicate_titles: Vec<DuplicateTitle>,
    /// `parentProject` values naming no known title. These projects are
    /// shown as roots.
    pub unresolved_parents: Vec<DanglingReference>,
    pub self_parented: Vec<String>,
    /// Multi-member parent cycles, each as sorted member titles.
    pub parent_cycles: Vec<Vec<String>>,
    /// Status values outside the known set. These projects never become
    /// filter candidates.
    pub unknown_statuses: Vec<UnknownStatus>,
    pub unresolved_links: Vec<DanglingReference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateTitle {
    pub title: String,
    /// Ids of every record carrying the title, in input order.
    pub ids: Vec<String>,
}

/// A title reference from `title` to `target` that does not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DanglingReference {
    pub title: String,
    pub target: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnknownStatus {
    pub title: String,
    pub value: String,
}

impl CatalogDiagnostics {
    /// Total number of reported problems.
    #[must_use]
    pub fn issue_count(&self) -> usize {
        self.duplicate_titles.len()
            + self.unresolved_parents.len()
            + self.self_parented.len()
            + self.parent_cycles.len()
            + self.unknown_statuses.len()
            + self.unresolved_links.len()
    }

    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.issue_count() == 0
    }
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// Inspect `projects` for relational and data-hygiene defects.
#[instrument(skip_all, fields(total = projects.len()))]
pub fn diagnose(projects: &[Project]) -> CatalogDiagnostics {
    let graph = ProjectGraph::build(projects);

    let mut ids_by_title: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for project in projects {
        ids_by_title
            .entry(project.title.as_str())
            .or_default()
            .push(project.id.clone());
    }
    let duplicate_titles = ids_by_title
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|(title, ids)| DuplicateTitle {
            title: title.to_string(),
            ids,
        })
        .collect();

    let mut unresolved_parents = Vec::new();
    let mut self_parented = Vec::new();
    let mut unknown_statuses = Vec::new();
    let mut unresolved_links = Vec::new();

    for project in projects {
        if let Some(parent) = project.parent_title() {
            if parent == project.title {
                self_parented.push(project.title.clone());
            } else if !graph.contains(parent) {
                unresolved_parents.push(DanglingReference {
                    title: project.title.clone(),
                    target: parent.to_string(),
                });
            }
        }

        if project.status.known().is_none() {
            unknown_statuses.push(UnknownStatus {
                title: project.title.clone(),
                value: project.status.as_str().to_string(),
            });
        }

        unresolved_links.extend(
            project
                .linked_projects
                .iter()
                .filter(|link| !graph.contains(link))
                .map(|link| DanglingReference {
                    title: project.title.clone(),
                    target: link.clone(),
                }),
        );
    }

    let parent_cycles: Vec<Vec<String>> = find_parent_cycles(&graph)
        .into_iter()
        .filter(|cycle| cycle.len() > 1)
        .collect();

    let report = CatalogDiagnostics {
        total: projects.len(),
        root_count: build_hierarchy(projects).len(),
        duplicate_titles,
        unresolved_parents,
        self_parented,
        parent_cycles,
        unknown_statuses,
        unresolved_links,
    };

    debug!(issues = report.issue_count(), "catalog diagnosed");
    report
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_core::model::StatusField;

    fn project(title: &str, parent: Option<&str>) -> Project {
        let mut p = Project::new(title.to_lowercase(), title);
        p.parent_project = parent.map(str::to_string);
        p
    }

    #[test]
    fn clean_catalog_is_healthy() {
        let mut leaf = project("Leaf", Some("Root"));
        leaf.linked_projects = vec!["Root".to_string()];
        let projects = vec![project("Root", None), leaf];

        let report = diagnose(&projects);
        assert!(report.is_healthy());
        assert_eq!(report.total, 2);
        assert_eq!(report.root_count, 1);
    }

    #[test]
    fn empty_catalog_is_healthy() {
        let report = diagnose(&[]);
        assert!(report.is_healthy());
        assert_eq!(report.total, 0);
        assert_eq!(report.root_count, 0);
    }

    #[test]
    fn reports_every_defect_kind() {
        let mut dup_a = project("Dup", None);
        dup_a.id = "dup-a".to_string();
        let mut dup_b = project("Dup", None);
        dup_b.id = "dup-b".to_string();
        let mut odd = project("Odd", None);
        odd.status = StatusField::Unrecognized("deprecated".to_string());
        odd.linked_projects = vec!["Nowhere".to_string()];

        let projects = vec![
            dup_a,
            dup_b,
            project("Orphan", Some("Ghost")),
            project("Loop", Some("Loop")),
            project("A", Some("B")),
            project("B", Some("A")),
            odd,
        ];

        let report = diagnose(&projects);
        assert!(!report.is_healthy());
        assert_eq!(
            report.duplicate_titles,
            vec![DuplicateTitle {
                title: "Dup".to_string(),
                ids: vec!["dup-a".to_string(), "dup-b".to_string()],
            }]
        );
        assert_eq!(
            report.unresolved_parents,
            vec![DanglingReference {
                title: "Orphan".to_string(),
                target: "Ghost".to_string(),
            }]
        );
        assert_eq!(report.self_parented, vec!["Loop".to_string()]);
        assert_eq!(
            report.parent_cycles,
            vec![vec!["A".to_string(), "B".to_string()]]
        );
        assert_eq!(
            report.unknown_statuses,
            vec![UnknownStatus {
                title: "Odd".to_string(),
                value: "deprecated".to_string(),
            }]
        );
        assert_eq!(report.unresolved_links.len(), 1);
        assert_eq!(report.issue_count(), 6);
        // Dup x2, Orphan, Loop, A (cycle cut), Odd.
        assert_eq!(report.root_count, 6);
    }
}
