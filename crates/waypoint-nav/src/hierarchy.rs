//! Nesting a flat project list into a display forest.
//!
//! # Placement
//!
//! A project goes under its parent only when the parent title is present in
//! the *same* input list; otherwise it is promoted to a root. Feeding the
//! filtered list from [`crate::filter_for_navigator`] therefore makes a
//! project whose real parent was filtered out show up as a visible root.
//!
//! # Totality
//!
//! Every input record is wrapped exactly once, including records that share
//! a title. Parent links are resolved per position (a repeated title resolves
//! to its last occurrence) and self-parents become roots. A parent cycle
//! would leave its members unreachable from any root, so each cycle is cut
//! at its first member in input order, which becomes a root.
//!
//! # Ordering
//!
//! Roots and every children list are sorted with
//! [`crate::order::compare_projects`], recursively.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;
use tracing::{debug, instrument, warn};
use waypoint_core::model::Project;

use crate::order::compare_projects;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A project with its nested children.
///
/// Serializes as the project's own fields plus a `children` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectNode<'a> {
    #[serde(flatten)]
    pub project: &'a Project,
    pub children: Vec<ProjectNode<'a>>,
}

impl<'a> ProjectNode<'a> {
    #[must_use]
    pub fn title(&self) -> &'a str {
        self.project.title.as_str()
    }

    /// This node plus every node below it.
    #[must_use]
    pub fn node_count(&self) -> usize {
        count_nodes(std::slice::from_ref(self))
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Total node count of a forest.
#[must_use]
pub fn count_nodes(nodes: &[ProjectNode<'_>]) -> usize {
    let mut count = 0;
    let mut stack: Vec<&ProjectNode<'_>> = nodes.iter().collect();
    while let Some(node) = stack.pop() {
        count += 1;
        stack.extend(node.children.iter());
    }
    count
}

// ---------------------------------------------------------------------------
// Build
// ---------------------------------------------------------------------------

/// Nest `projects` into a sorted forest. Never fails; an empty input gives an
/// empty forest.
#[instrument(skip_all, fields(count = projects.len()))]
pub fn build_hierarchy(projects: &[Project]) -> Vec<ProjectNode<'_>> {
    if projects.is_empty() {
        return Vec::new();
    }

    let mut last_index: HashMap<&str, usize> = HashMap::with_capacity(projects.len());
    for (idx, project) in projects.iter().enumerate() {
        last_index.insert(project.title.as_str(), idx);
    }

    let mut parent_of: Vec<Option<usize>> = projects
        .iter()
        .enumerate()
        .map(|(idx, project)| {
            project
                .parent_title()
                .and_then(|parent| last_index.get(parent).copied())
                .filter(|&parent| parent != idx)
        })
        .collect();

    let cut = break_parent_cycles(&mut parent_of);
    if cut > 0 {
        warn!(cut, "parent cycles cut; members promoted to roots");
    }

    let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); projects.len()];
    let mut roots: Vec<usize> = Vec::new();
    for (idx, parent) in parent_of.iter().enumerate() {
        match parent {
            Some(parent) => children_of[*parent].push(idx),
            None => roots.push(idx),
        }
    }

    let forest = build_forest(projects, &children_of, &roots);

    debug!(roots = forest.len(), "hierarchy built");
    forest
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unseen,
    OnPath,
    Done,
}

/// Cut every parent cycle at its lowest input position, which becomes a root.
/// Each position is walked once. Returns the number of cuts.
fn break_parent_cycles(parent_of: &mut [Option<usize>]) -> usize {
    let mut marks = vec![Mark::Unseen; parent_of.len()];
    let mut path: Vec<usize> = Vec::new();
    let mut cuts = 0;

    for start in 0..parent_of.len() {
        let mut current = Some(start);
        while let Some(node) = current {
            match marks[node] {
                Mark::Done => break,
                Mark::OnPath => {
                    let entry = path.iter().position(|&n| n == node);
                    if let Some(&first) = entry.and_then(|entry| path[entry..].iter().min()) {
                        parent_of[first] = None;
                        cuts += 1;
                    }
                    break;
                }
                Mark::Unseen => {
                    marks[node] = Mark::OnPath;
                    path.push(node);
                    current = parent_of[node];
                }
            }
        }
        for node in path.drain(..) {
            marks[node] = Mark::Done;
        }
    }

    cuts
}

/// Assemble nodes bottom-up: reversed pre-order visits every child before
/// its parent, so no recursion is needed however deep the chain.
fn build_forest<'a>(
    projects: &'a [Project],
    children_of: &[Vec<usize>],
    roots: &[usize],
) -> Vec<ProjectNode<'a>> {
    let mut order: Vec<usize> = Vec::with_capacity(projects.len());
    let mut stack: Vec<usize> = roots.to_vec();
    while let Some(idx) = stack.pop() {
        order.push(idx);
        stack.extend(children_of[idx].iter().copied());
    }

    let mut built: Vec<Option<ProjectNode<'a>>> = (0..projects.len()).map(|_| None).collect();
    for &idx in order.iter().rev() {
        let mut children: Vec<ProjectNode<'a>> = children_of[idx]
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        sort_nodes(&mut children);
        built[idx] = Some(ProjectNode {
            project: &projects[idx],
            children,
        });
    }

    let mut forest: Vec<ProjectNode<'a>> =
        roots.iter().filter_map(|&idx| built[idx].take()).collect();
    sort_nodes(&mut forest);
    forest
}

fn sort_nodes(nodes: &mut [ProjectNode<'_>]) {
    nodes.sort_by(|a, b| compare_projects(a.project, b.project));
}

// ---------------------------------------------------------------------------
// Consumers
// ---------------------------------------------------------------------------

/// Depth-first rows in display order: `(depth, project)` with roots at depth
/// zero. This is the accordion list's row order.
#[must_use]
pub fn flatten_with_depth<'a>(nodes: &[ProjectNode<'a>]) -> Vec<(usize, &'a Project)> {
    let mut rows = Vec::with_capacity(count_nodes(nodes));
    let mut stack: Vec<(usize, &ProjectNode<'a>)> =
        nodes.iter().rev().map(|node| (0, node)).collect();

    while let Some((depth, node)) = stack.pop() {
        rows.push((depth, node.project));
        stack.extend(node.children.iter().rev().map(|child| (depth + 1, child)));
    }

    rows
}

/// Every title in the forest. List consumers expand all of these while a
/// search or focus is active.
#[must_use]
pub fn expanded_titles<'a>(nodes: &[ProjectNode<'a>]) -> BTreeSet<&'a str> {
    flatten_with_depth(nodes)
        .into_iter()
        .map(|(_, project)| project.title.as_str())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
