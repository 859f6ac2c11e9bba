//! Ancestor and descendant closures over a [`ProjectGraph`].
//!
//! Both walks are total: an unknown start title yields an empty set. Neither
//! includes the start title. The parent field does not structurally forbid
//! loops, so each walk carries a visited set and stops on a repeat.

use std::collections::{BTreeSet, HashSet, VecDeque};

use super::build::ProjectGraph;

/// Strict ancestors of `title`: every resolvable title reached by following
/// `parentProject` links upward.
///
/// Stops at the first project without a resolvable parent or at the first
/// repeated title. A parent chain of length *n* costs *O(n)* lookups.
#[must_use]
pub fn ancestors<'a>(graph: &ProjectGraph<'a>, title: &str) -> BTreeSet<&'a str> {
    let mut ancestors = BTreeSet::new();
    let Some((&start, _)) = graph.by_title.get_key_value(title) else {
        return ancestors;
    };

    let mut visited: HashSet<&'a str> = HashSet::from([start]);
    let mut current = start;
    while let Some(parent) = graph.parent(current) {
        if !visited.insert(parent) {
            break;
        }
        ancestors.insert(parent);
        current = parent;
    }

    ancestors
}

/// Strict descendants of `title`, found breadth-first through
/// `children_by_title`. Each title is visited at most once.
#[must_use]
pub fn descendants<'a>(graph: &ProjectGraph<'a>, title: &str) -> BTreeSet<&'a str> {
    let mut descendants = BTreeSet::new();
    let Some((&start, _)) = graph.by_title.get_key_value(title) else {
        return descendants;
    };

    let mut visited: HashSet<&'a str> = HashSet::from([start]);
    let mut queue: VecDeque<&'a str> = VecDeque::from([start]);

    while let Some(current) = queue.pop_front() {
        for &child in graph.children(current) {
            if visited.insert(child) {
                descendants.insert(child);
                queue.push_back(child);
            }
        }
    }

    descendants
}

/// `{title} ∪ ancestors(title) ∪ descendants(title)`, or `None` when `title`
/// is not in the graph.
#[must_use]
pub fn focus_branch<'a>(graph: &ProjectGraph<'a>, title: &str) -> Option<BTreeSet<&'a str>> {
    let (&start, _) = graph.by_title.get_key_value(title)?;

    let mut branch = ancestors(graph, start);
    branch.insert(start);
    branch.extend(descendants(graph, start));
    Some(branch)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
