//! Parent/child graph construction from a flat project list.
//!
//! ## Edge Direction
//!
//! `children_by_title[P]` lists every project whose `parentProject` is `P`,
//! in input order. Walking upward uses each record's own `parentProject`
//! field through `by_title`.
//!
//! ## Unresolved Parents
//!
//! A `parentProject` that names no known title adds no edge: the project is
//! simply a root. No placeholder node is created for the missing parent.
//!
//! ## Duplicate Titles
//!
//! Titles are keys. When the input bypassed [`waypoint_core::Catalog`]
//! validation and repeats a title, the later record wins in `by_title`.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use tracing::{instrument, trace};
use waypoint_core::model::Project;

// ---------------------------------------------------------------------------
// ProjectGraph
// ---------------------------------------------------------------------------

/// Title-keyed lookup plus parent → children adjacency, borrowed from the
/// project slice it was built from.
#[derive(Debug, Clone, Default)]
pub struct ProjectGraph<'a> {
    /// Title → project record.
    pub by_title: HashMap<&'a str, &'a Project>,
    /// Title → child titles in input order. Every known title has an entry.
    pub children_by_title: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> ProjectGraph<'a> {
    /// Build the graph in two passes: register every title, then attach each
    /// project to its parent when the parent title resolves.
    #[instrument(skip_all, fields(count = projects.len()))]
    pub fn build(projects: &'a [Project]) -> Self {
        let mut by_title: HashMap<&'a str, &'a Project> = HashMap::with_capacity(projects.len());
        let mut children_by_title: HashMap<&'a str, Vec<&'a str>> =
            HashMap::with_capacity(projects.len());

        for project in projects {
            by_title.insert(project.title.as_str(), project);
            children_by_title.insert(project.title.as_str(), Vec::new());
        }

        let mut edges = 0usize;
        for project in projects {
            let Some(parent) = project.parent_title() else {
                continue;
            };
            if let Some(children) = children_by_title.get_mut(parent) {
                children.push(project.title.as_str());
                edges += 1;
            } else {
                trace!(title = %project.title, parent, "unresolved parent; treating as root");
            }
        }

        trace!(nodes = by_title.len(), edges, "project graph built");

        Self {
            by_title,
            children_by_title,
        }
    }

    /// Number of distinct titles.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.by_title.len()
    }

    #[must_use]
    pub fn contains(&self, title: &str) -> bool {
        self.by_title.contains_key(title)
    }

    #[must_use]
    pub fn project(&self, title: &str) -> Option<&'a Project> {
        self.by_title.get(title).copied()
    }

    /// Direct children of `title`, in input order. Empty for unknown titles.
    #[must_use]
    pub fn children(&self, title: &str) -> &[&'a str] {
        self.children_by_title
            .get(title)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The parent of `title` if it names a known project.
    #[must_use]
    pub fn parent(&self, title: &str) -> Option<&'a str> {
        let parent = self.project(title)?.parent_title()?;
        self.by_title.get_key_value(parent).map(|(key, _)| *key)
    }

    /// Titles whose parent does not resolve (or who have none), in
    /// arbitrary order.
    pub fn roots(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.by_title
            .keys()
            .copied()
            .filter(|title| self.parent(title).is_none())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn project(title: &str, parent: Option<&str>) -> Project {
        let mut p = Project::new(title.to_lowercase(), title);
        p.parent_project = parent.map(str::to_string);
        p
    }

    #[test]
    fn empty_input_produces_empty_graph() {
        let projects: Vec<Project> = Vec::new();
        let graph = ProjectGraph::build(&projects);
        assert_eq!(graph.node_count(), 0);
        assert!(graph.children_by_title.is_empty());
    }

    #[test]
    fn every_project_has_a_children_entry() {
        let projects = vec![project("Core", None), project("Leaf", Some("Core"))];
        let graph = ProjectGraph::build(&projects);
        assert_eq!(graph.children("Core"), &["Leaf"]);
        assert!(graph.children_by_title.contains_key("Leaf"));
        assert!(graph.children("Leaf").is_empty());
    }

    #[test]
    fn children_keep_input_order() {
        let projects = vec![
            project("Zed", Some("Core")),
            project("Core", None),
            project("Alpha", Some("Core")),
        ];
        let graph = ProjectGraph::build(&projects);
        assert_eq!(graph.children("Core"), &["Zed", "Alpha"]);
    }

    #[test]
    fn unresolved_parent_adds_no_entry() {
        let projects = vec![project("Orphan", Some("Ghost"))];
        let graph = ProjectGraph::build(&projects);
        assert!(!graph.contains("Ghost"));
        assert!(!graph.children_by_title.contains_key("Ghost"));
        assert_eq!(graph.parent("Orphan"), None);
        assert_eq!(graph.roots().collect::<Vec<_>>(), vec!["Orphan"]);
    }

    #[test]
    fn later_duplicate_wins_lookup() {
        let mut first = project("Dup", None);
        first.id = "first".to_string();
        let mut second = project("Dup", None);
        second.id = "second".to_string();
        let projects = vec![first, second];

        let graph = ProjectGraph::build(&projects);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.project("Dup").map(|p| p.id.as_str()), Some("second"));
    }

    #[test]
    fn unknown_title_has_no_children() {
        let projects = vec![project("Core", None)];
        let graph = ProjectGraph::build(&projects);
        assert!(graph.children("Missing").is_empty());
        assert!(graph.project("Missing").is_none());
    }
}
