//! Parent-cycle detection.
//!
//! # Edge Direction
//!
//! The petgraph view uses `child → parent` edges, one per resolvable
//! `parentProject` link. A strongly connected component with more than one
//! member, or a node with a self-loop, is a parent cycle: none of its
//! members can reach a root.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use super::build::ProjectGraph;

/// Project the parent links of `graph` into a petgraph `DiGraph`.
#[must_use]
pub fn parent_digraph(graph: &ProjectGraph<'_>) -> DiGraph<String, ()> {
    let mut titles: Vec<&str> = graph.by_title.keys().copied().collect();
    titles.sort_unstable();

    let mut digraph = DiGraph::<String, ()>::with_capacity(titles.len(), titles.len());
    let mut node_map: HashMap<&str, NodeIndex> = HashMap::with_capacity(titles.len());
    for &title in &titles {
        node_map.insert(title, digraph.add_node(title.to_string()));
    }

    for &title in &titles {
        if let Some(parent) = graph.parent(title) {
            digraph.add_edge(node_map[title], node_map[parent], ());
        }
    }

    digraph
}

/// Every parent cycle in `graph`.
///
/// Each entry is the sorted member titles of one cycle; entries are sorted.
/// A self-parented project is a one-element cycle.
#[must_use]
pub fn find_parent_cycles(graph: &ProjectGraph<'_>) -> Vec<Vec<String>> {
    let digraph = parent_digraph(graph);

    let mut cycles: Vec<Vec<String>> = tarjan_scc(&digraph)
        .into_iter()
        .filter(|component| {
            component.len() > 1
                || component
                    .first()
                    .is_some_and(|node| digraph.find_edge(*node, *node).is_some())
        })
        .map(|component| {
            let mut titles: Vec<String> = component
                .into_iter()
                .filter_map(|idx| digraph.node_weight(idx).cloned())
                .collect();
            titles.sort_unstable();
            titles
        })
        .collect();

    cycles.sort_unstable();
    cycles
}
