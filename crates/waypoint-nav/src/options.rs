//! Helpers behind the navigator's controls.

use std::collections::HashMap;

use waypoint_core::model::Project;

use crate::order::compare_titles;

/// Every title, sorted case-insensitively: the focus selector's options.
#[must_use]
pub fn focus_options(projects: &[Project]) -> Vec<String> {
    let mut titles: Vec<String> = projects.iter().map(|p| p.title.clone()).collect();
    titles.sort_by(|a, b| compare_titles(a, b));
    titles
}

/// Resolve `project.linked_projects` to records, in link order. Links that
/// name no known title are dropped.
#[must_use]
pub fn related_projects<'a>(project: &Project, projects: &'a [Project]) -> Vec<&'a Project> {
    if project.linked_projects.is_empty() {
        return Vec::new();
    }

    let by_title: HashMap<&str, &'a Project> =
        projects.iter().map(|p| (p.title.as_str(), p)).collect();

    project
        .linked_projects
        .iter()
        .filter_map(|title| by_title.get(title.as_str()).copied())
        .collect()
}

/// Whether a raw query counts as an active search.
#[must_use]
pub fn search_active(query: &str) -> bool {
    !query.trim().is_empty()
}
