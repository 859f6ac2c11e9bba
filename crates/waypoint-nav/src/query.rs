//! Free-text matching over project records.
//!
//! Matching is plain substring containment over a lower-cased haystack. No
//! tokenization, stemming or fuzzy scoring.

use waypoint_core::model::{Category, Project, ProjectType};

/// Trim and lower-case a raw query.
#[must_use]
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// The lower-cased text a query is matched against.
///
/// Fields are joined by single spaces in this order: title, description,
/// version, project type, category, each tag, then the roadmap text (every
/// milestone's version, release status and items). Absent optional fields
/// contribute an empty string.
#[must_use]
pub fn searchable_text(project: &Project) -> String {
    let roadmap_text = project
        .roadmap
        .iter()
        .flat_map(|entry| {
            [entry.version.as_str(), entry.release_status.as_str()]
                .into_iter()
                .chain(entry.items.iter().map(String::as_str))
        })
        .collect::<Vec<_>>()
        .join(" ");

    let mut parts: Vec<&str> = vec![
        project.title.as_str(),
        project.description.as_str(),
        project.version.as_deref().unwrap_or_default(),
        project.project_type.map(ProjectType::as_str).unwrap_or_default(),
        project.category.map(Category::as_str).unwrap_or_default(),
    ];
    parts.extend(project.tags.iter().map(String::as_str));
    parts.push(roadmap_text.as_str());

    parts.join(" ").to_lowercase()
}

/// Whether `project` matches an already-normalized query.
///
/// An empty query matches everything.
#[must_use]
pub fn matches_query(project: &Project, normalized_query: &str) -> bool {
    if normalized_query.is_empty() {
        return true;
    }
    searchable_text(project).contains(normalized_query)
}

/// Whether the title or id itself contains an already-normalized, non-empty
/// query. This is the stronger signal used to seed visibility.
#[must_use]
pub fn is_primary_match(project: &Project, normalized_query: &str) -> bool {
    if normalized_query.is_empty() {
        return false;
    }
    project.title.to_lowercase().contains(normalized_query)
        || project.id.to_lowercase().contains(normalized_query)
}
