//! Display ordering shared by the flat navigator list and the hierarchy.
//!
//! Two levels: the project-type bucket (`category` < `project` < anything
//! else), then a base-letter title comparison. Titles that differ only by
//! case or accents compare equal, so stable sorts keep their input order.

use std::cmp::Ordering;

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};
use waypoint_core::model::{Project, ProjectType};

/// Compatibility-decompose, drop combining marks, lowercase.
fn folded(title: &str) -> impl Iterator<Item = char> + '_ {
    title
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// Title comparison ignoring case and diacritics.
#[must_use]
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    folded(a).cmp(folded(b))
}

/// The two-level navigator comparator.
#[must_use]
pub fn compare_projects(a: &Project, b: &Project) -> Ordering {
    ProjectType::sort_bucket(a.project_type)
        .cmp(&ProjectType::sort_bucket(b.project_type))
        .then_with(|| compare_titles(&a.title, &b.title))
}

/// Stable in-place sort with [`compare_projects`].
pub fn sort_projects(projects: &mut [&Project]) {
    projects.sort_by(|a, b| compare_projects(a, b));
}
