//! Navigator filtering: category/status candidacy, text search with
//! structural context, and focus-branch isolation.
//!
//! # Pipeline
//!
//! ```text
//! projects
//!    ↓  category selector + known, allowed status
//! candidates
//!    ↓  query match (haystack) / primary match (title or id)
//! matched ⊇ primary
//!    ↓  seed = primary if any, else matched
//!    ↓  + candidate ancestors of every seed
//!    ↓  + candidate descendants of every primary match
//! visible
//!    ↓  ∩ focus branch, then + candidate ancestors of what remains
//! visible (final), sorted by type bucket then title
//! ```
//!
//! Context expansion only ever adds candidates, so the result is always a
//! subset of the candidate list.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;
use tracing::{debug, instrument, trace};
use waypoint_core::model::{CategoryFilter, Project, Status};

use crate::graph::{ProjectGraph, ancestors, descendants, focus_branch};
use crate::order::sort_projects;
use crate::query::{is_primary_match, matches_query, normalize_query};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The user-controlled filter state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NavigatorFilters {
    /// Raw search text; trimmed and lower-cased before matching.
    pub query: String,
    /// Statuses a candidate may carry.
    pub statuses: BTreeSet<Status>,
    pub category: CategoryFilter,
    /// Title of the branch to isolate, if any.
    pub focus_title: Option<String>,
}

impl Default for NavigatorFilters {
    fn default() -> Self {
        Self {
            query: String::new(),
            statuses: Status::ALL.into_iter().collect(),
            category: CategoryFilter::All,
            focus_title: None,
        }
    }
}

impl NavigatorFilters {
    /// Reset state with the given status set and category selector.
    #[must_use]
    pub fn with_defaults(
        statuses: impl IntoIterator<Item = Status>,
        category: CategoryFilter,
    ) -> Self {
        Self {
            statuses: statuses.into_iter().collect(),
            category,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    #[must_use]
    pub fn focus(mut self, title: impl Into<String>) -> Self {
        self.focus_title = Some(title.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    #[must_use]
    pub fn statuses(mut self, statuses: impl IntoIterator<Item = Status>) -> Self {
        self.statuses = statuses.into_iter().collect();
        self
    }

    /// True when anything differs from the reset state.
    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        !self.query.trim().is_empty()
            || self.category != CategoryFilter::All
            || self.statuses.len() != Status::ALL.len()
            || self.focus_title.is_some()
    }

    /// Toggle `status` in the allowed set. The last remaining status cannot
    /// be removed this way.
    ///
    /// Returns whether the set changed.
    pub fn toggle_status(&mut self, status: Status) -> bool {
        if self.statuses.contains(&status) {
            if self.statuses.len() == 1 {
                return false;
            }
            self.statuses.remove(&status)
        } else {
            self.statuses.insert(status)
        }
    }
}

/// Output of [`filter_for_navigator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterResult<'a> {
    /// Visible projects, deduplicated and sorted.
    pub visible: Vec<&'a Project>,
    /// Candidates matching the query (all candidates when the query is empty).
    pub matched_count: usize,
    /// Candidates whose title or id contains the query (all candidates when
    /// the query is empty).
    pub primary_matched_count: usize,
    pub visible_count: usize,
    pub total_count: usize,
    /// Visible titles inside the focus branch before ancestor re-expansion;
    /// zero without a resolvable focus.
    pub focus_count: usize,
}

impl<'a> FilterResult<'a> {
    /// The all-zero result.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            visible: Vec::new(),
            matched_count: 0,
            primary_matched_count: 0,
            visible_count: 0,
            total_count: 0,
            focus_count: 0,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Visible titles in display order.
    pub fn titles(&self) -> impl Iterator<Item = &'a str> + use<'_, 'a> {
        self.visible.iter().map(|&project| project.title.as_str())
    }
}

// ---------------------------------------------------------------------------
// Core
// ---------------------------------------------------------------------------

/// Whether `project` passes the category selector and carries a known status
/// that is in the allowed set.
#[must_use]
pub fn is_candidate(project: &Project, filters: &NavigatorFilters) -> bool {
    if !filters.category.accepts(project.category) {
        return false;
    }
    project
        .status
        .known()
        .is_some_and(|status| filters.statuses.contains(&status))
}

/// Compute the visible, ordered project list and its counters.
#[instrument(skip_all, fields(total = projects.len(), focus = filters.focus_title.as_deref()))]
pub fn filter_for_navigator<'a>(
    projects: &'a [Project],
    filters: &NavigatorFilters,
) -> FilterResult<'a> {
    if projects.is_empty() {
        return FilterResult::empty();
    }

    let graph = ProjectGraph::build(projects);
    let normalized_query = normalize_query(&filters.query);

    // Step 1: candidates.
    let candidates: Vec<&'a Project> = projects
        .iter()
        .filter(|project| is_candidate(project, filters))
        .collect();
    let candidate_titles: HashSet<&'a str> =
        candidates.iter().map(|project| project.title.as_str()).collect();

    // Step 2: query matching over candidates only.
    let mut matched: BTreeSet<&'a str> = BTreeSet::new();
    let mut primary: BTreeSet<&'a str> = BTreeSet::new();
    for project in &candidates {
        if !matches_query(project, &normalized_query) {
            continue;
        }
        matched.insert(project.title.as_str());
        if is_primary_match(project, &normalized_query) {
            primary.insert(project.title.as_str());
        }
    }

    // Step 3: visibility from the query.
    let mut visible: BTreeSet<&'a str> = if normalized_query.is_empty() {
        candidate_titles.iter().copied().collect()
    } else {
        expand_query_matches(&graph, &candidate_titles, &matched, &primary)
    };

    // Step 4: focus narrowing.
    let mut focus_count = 0;
    if let Some(branch) = filters
        .focus_title
        .as_deref()
        .and_then(|title| focus_branch(&graph, title))
    {
        let focused: BTreeSet<&'a str> = visible.intersection(&branch).copied().collect();
        focus_count = focused.len();

        let mut with_context = focused.clone();
        for title in &focused {
            with_context.extend(candidate_ancestors(&graph, &candidate_titles, title));
        }
        trace!(branch = branch.len(), focused = focus_count, "focus applied");
        visible = with_context;
    }

    // Step 5: order.
    let mut visible_projects: Vec<&'a Project> = candidates
        .iter()
        .copied()
        .filter(|project| visible.contains(project.title.as_str()))
        .collect();
    sort_projects(&mut visible_projects);

    let (matched_count, primary_matched_count) = if normalized_query.is_empty() {
        (candidates.len(), candidates.len())
    } else {
        (matched.len(), primary.len())
    };

    debug!(
        candidates = candidates.len(),
        matched = matched_count,
        primary = primary_matched_count,
        visible = visible_projects.len(),
        focus = focus_count,
        "navigator filter computed"
    );

    FilterResult {
        visible_count: visible_projects.len(),
        visible: visible_projects,
        matched_count,
        primary_matched_count,
        total_count: projects.len(),
        focus_count,
    }
}

/// Seed from primary matches when there are any, otherwise from every match,
/// then add candidate ancestors of the seed and candidate descendants of the
/// primary matches.
fn expand_query_matches<'a>(
    graph: &ProjectGraph<'a>,
    candidate_titles: &HashSet<&'a str>,
    matched: &BTreeSet<&'a str>,
    primary: &BTreeSet<&'a str>,
) -> BTreeSet<&'a str> {
    let seed = if primary.is_empty() { matched } else { primary };
    let mut visible = seed.clone();

    for title in seed {
        visible.extend(candidate_ancestors(graph, candidate_titles, title));
    }

    for title in primary {
        visible.extend(
            descendants(graph, title)
                .into_iter()
                .filter(|descendant| candidate_titles.contains(descendant)),
        );
    }

    visible
}

fn candidate_ancestors<'a>(
    graph: &ProjectGraph<'a>,
    candidate_titles: &HashSet<&'a str>,
    title: &str,
) -> Vec<&'a str> {
    ancestors(graph, title)
        .into_iter()
        .filter(|ancestor| candidate_titles.contains(ancestor))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_core::model::{Category, ProjectType, StatusField};

    fn project(title: &str, parent: Option<&str>) -> Project {
        let mut p = Project::new(title.to_lowercase(), title);
        p.parent_project = parent.map(str::to_string);
        p.category = Some(Category::Projects);
        p.project_type = Some(ProjectType::Project);
        p
    }

    fn titles<'a>(result: &'a FilterResult<'_>) -> Vec<&'a str> {
        result.titles().collect()
    }

    fn tree() -> Vec<Project> {
        let mut root = project("Tools", None);
        root.project_type = Some(ProjectType::Category);
        let mut parser = project("Parser", Some("Tools"));
        parser.tags = vec!["cli".to_string()];
        let lexer = project("Lexer", Some("Parser"));
        let mut docs = project("Docs", Some("Tools"));
        docs.status = Status::Archived.into();
        let mut other = project("Garden", None);
        other.category = Some(Category::Contributing);
        vec![root, parser, lexer, docs, other]
    }

    #[test]
    fn empty_input_is_all_zero() {
        let result = filter_for_navigator(&[], &NavigatorFilters::default().query("x"));
        assert_eq!(result, FilterResult::empty());
        assert!(result.is_empty());
    }

    #[test]
    fn empty_query_shows_all_candidates_sorted() {
        let projects = tree();
        let result = filter_for_navigator(&projects, &NavigatorFilters::default());
        assert_eq!(
            titles(&result),
            vec!["Tools", "Docs", "Garden", "Lexer", "Parser"]
        );
        assert_eq!(result.matched_count, 5);
        assert_eq!(result.primary_matched_count, 5);
        assert_eq!(result.visible_count, 5);
        assert_eq!(result.total_count, 5);
        assert_eq!(result.focus_count, 0);
    }

    #[test]
    fn category_and_status_define_candidates() {
        let projects = tree();
        let filters = NavigatorFilters::default()
            .category(CategoryFilter::Only(Category::Projects))
            .statuses([Status::Active]);
        let result = filter_for_navigator(&projects, &filters);
        assert_eq!(titles(&result), vec!["Tools", "Lexer", "Parser"]);
    }

    #[test]
    fn primary_match_reveals_candidate_subtree_and_path() {
        let projects = tree();
        let result = filter_for_navigator(&projects, &NavigatorFilters::default().query("pars"));
        assert_eq!(result.primary_matched_count, 1);
        assert_eq!(titles(&result), vec!["Tools", "Lexer", "Parser"]);
    }

    #[test]
    fn descendant_expansion_skips_non_candidates() {
        let projects = tree();
        let filters = NavigatorFilters::default()
            .query("tools")
            .statuses([Status::Active]);
        let result = filter_for_navigator(&projects, &filters);
        assert_eq!(titles(&result), vec!["Tools", "Lexer", "Parser"]);
        assert!(!titles(&result).contains(&"Docs"));
    }

    #[test]
    fn secondary_matches_get_ancestors_but_not_descendants() {
        let projects = tree();
        let result = filter_for_navigator(&projects, &NavigatorFilters::default().query("cli"));
        assert_eq!(result.primary_matched_count, 0);
        assert_eq!(result.matched_count, 1);
        assert_eq!(titles(&result), vec!["Tools", "Parser"]);
    }

    #[test]
    fn primary_matches_take_precedence_over_text_hits() {
        let mut projects = tree();
        projects[3].status = Status::Active.into();
        projects[3].tags = vec!["lexer-guide".to_string()];
        let result = filter_for_navigator(&projects, &NavigatorFilters::default().query("lexer"));
        assert_eq!(result.matched_count, 2);
        assert_eq!(result.primary_matched_count, 1);
        assert_eq!(titles(&result), vec!["Tools", "Lexer", "Parser"]);
    }

    #[test]
    fn focus_isolates_branch_with_path_to_root() {
        let projects = tree();
        let result = filter_for_navigator(&projects, &NavigatorFilters::default().focus("Parser"));
        assert_eq!(titles(&result), vec!["Tools", "Lexer", "Parser"]);
        assert_eq!(result.focus_count, 3);
    }

    #[test]
    fn focus_re_expands_candidate_ancestors_only() {
        let mut projects = tree();
        projects[0].status = StatusField::Unrecognized("deprecated".to_string());
        let result = filter_for_navigator(&projects, &NavigatorFilters::default().focus("Lexer"));
        assert_eq!(titles(&result), vec!["Lexer", "Parser"]);
        assert_eq!(result.focus_count, 2);
    }

    #[test]
    fn unknown_focus_has_no_effect() {
        let projects = tree();
        let base = filter_for_navigator(&projects, &NavigatorFilters::default());
        let focused =
            filter_for_navigator(&projects, &NavigatorFilters::default().focus("Nowhere"));
        assert_eq!(base.visible, focused.visible);
        assert_eq!(focused.focus_count, 0);
    }

    #[test]
    fn focus_on_excluded_project_can_empty_the_view() {
        let projects = tree();
        let filters = NavigatorFilters::default()
            .category(CategoryFilter::Only(Category::Contributing))
            .focus("Lexer");
        let result = filter_for_navigator(&projects, &filters);
        assert!(result.is_empty());
        assert_eq!(result.focus_count, 0);
        assert_eq!(result.total_count, 5);
    }

    #[test]
    fn query_and_focus_compose() {
        let projects = tree();
        let filters = NavigatorFilters::default().query("garden").focus("Parser");
        let result = filter_for_navigator(&projects, &filters);
        assert!(result.is_empty());
        assert_eq!(result.matched_count, 1);
    }

    #[test]
    fn has_active_filters_tracks_every_control() {
        let base = NavigatorFilters::default();
        assert!(!base.has_active_filters());
        assert!(!base.clone().query("   ").has_active_filters());
        assert!(base.clone().query("x").has_active_filters());
        assert!(base.clone().focus("Tools").has_active_filters());
        assert!(
            base.clone()
                .category(CategoryFilter::Only(Category::Projects))
                .has_active_filters()
        );
        assert!(base.statuses([Status::Active]).has_active_filters());
    }

    #[test]
    fn toggle_status_never_empties_the_set() {
        let mut filters = NavigatorFilters::default().statuses([Status::Active, Status::Archived]);
        assert!(filters.toggle_status(Status::Archived));
        assert!(!filters.toggle_status(Status::Active));
        assert_eq!(filters.statuses, BTreeSet::from([Status::Active]));
        assert!(filters.toggle_status(Status::Completed));
        assert_eq!(
            filters.statuses,
            BTreeSet::from([Status::Active, Status::Completed])
        );
    }
}
