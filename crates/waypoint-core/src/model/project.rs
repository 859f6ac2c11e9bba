use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The four known lifecycle states of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Maintenance,
    Completed,
    Archived,
}

impl Status {
    /// Every known status, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Active,
        Self::Maintenance,
        Self::Completed,
        Self::Archived,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Maintenance => "maintenance",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }

    /// Exact match against the canonical lowercase names.
    ///
    /// Stored records use this; [`FromStr`] is the forgiving parser for
    /// command-line and config input.
    #[must_use]
    pub fn from_canonical(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == raw)
    }
}

/// The status value a record actually carries.
///
/// Content data is not guaranteed to stay inside the known set, so an
/// unrecognized value is kept verbatim instead of failing deserialization.
/// Unrecognized values never become filter candidates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StatusField {
    Known(Status),
    Unrecognized(String),
}

impl StatusField {
    /// The known status, if this value is one.
    #[must_use]
    pub const fn known(&self) -> Option<Status> {
        match self {
            Self::Known(status) => Some(*status),
            Self::Unrecognized(_) => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(status) => status.as_str(),
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl Default for StatusField {
    fn default() -> Self {
        Self::Known(Status::Active)
    }
}

impl From<Status> for StatusField {
    fn from(status: Status) -> Self {
        Self::Known(status)
    }
}

impl From<String> for StatusField {
    fn from(raw: String) -> Self {
        Status::from_canonical(&raw).map_or(Self::Unrecognized(raw), Self::Known)
    }
}

impl From<StatusField> for String {
    fn from(field: StatusField) -> Self {
        match field {
            StatusField::Known(status) => status.as_str().to_string(),
            StatusField::Unrecognized(raw) => raw,
        }
    }
}

/// Top-level grouping of a project on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Projects,
    Contributing,
}

impl Category {
    pub const ALL: [Self; 2] = [Self::Projects, Self::Contributing];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Contributing => "contributing",
        }
    }
}

/// Category selector: everything, or one specific category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Whether a project carrying `category` passes this selector.
    ///
    /// `All` accepts uncategorized projects too; `Only` requires an exact match.
    #[must_use]
    pub fn accepts(self, category: Option<Category>) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => category == Some(wanted),
        }
    }
}

/// Node role in the hierarchy; drives display ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Category,
    Project,
    Contribution,
}

impl ProjectType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Project => "project",
            Self::Contribution => "contribution",
        }
    }

    /// Ordering bucket: categories first, then projects, then everything else.
    ///
    /// A missing type shares the last bucket with `contribution`.
    #[must_use]
    pub const fn sort_bucket(project_type: Option<Self>) -> u8 {
        match project_type {
            Some(Self::Category) => 0,
            Some(Self::Project) => 1,
            Some(Self::Contribution) | None => 2,
        }
    }
}

/// Release state of a roadmap milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseStatus {
    Release,
    Dev,
    Close,
}

impl ReleaseStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Release => "release",
            Self::Dev => "dev",
            Self::Close => "close",
        }
    }
}

/// One milestone on a project's roadmap.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapEntry {
    pub version: String,
    pub release_status: ReleaseStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
}

/// A project record as supplied by the content store.
///
/// `title` is the graph key; `parent_project` references another record's
/// title, not its id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default)]
    pub status: StatusField,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_type: Option<ProjectType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_project: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub linked_projects: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roadmap: Vec<RoadmapEntry>,
}

impl Project {
    /// Minimal record with the given id and title; everything else defaulted.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// The parent title, treating an empty string as no parent.
    #[must_use]
    pub fn parent_title(&self) -> Option<&str> {
        self.parent_project.as_deref().filter(|parent| !parent.is_empty())
    }
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid {}: '{}'", self.expected, self.got)
    }
}

impl std::error::Error for ParseEnumError {}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for StatusField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(category) => f.write_str(category.as_str()),
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ReleaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn normalize(input: &str) -> String {
    input.trim().to_ascii_lowercase()
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "maintenance" => Ok(Self::Maintenance),
            "completed" => Ok(Self::Completed),
            "archived" => Ok(Self::Archived),
            _ => Err(ParseEnumError {
                expected: "status",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for Category {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "projects" => Ok(Self::Projects),
            "contributing" => Ok(Self::Contributing),
            _ => Err(ParseEnumError {
                expected: "category",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if normalize(s) == "all" {
            return Ok(Self::All);
        }
        Category::from_str(s)
            .map(Self::Only)
            .map_err(|_| ParseEnumError {
                expected: "category filter",
                got: s.to_string(),
            })
    }
}

impl FromStr for ProjectType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "category" => Ok(Self::Category),
            "project" => Ok(Self::Project),
            "contribution" => Ok(Self::Contribution),
            _ => Err(ParseEnumError {
                expected: "project type",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for ReleaseStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.as_str() {
            "release" => Ok(Self::Release),
            "dev" => Ok(Self::Dev),
            "close" => Ok(Self::Close),
            _ => Err(ParseEnumError {
                expected: "release status",
                got: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Category, CategoryFilter, Project, ProjectType, ReleaseStatus, Status, StatusField,
    };
    use std::str::FromStr;

    #[test]
    fn enum_json_roundtrips() {
        assert_eq!(serde_json::to_string(&Status::Maintenance).unwrap(), "\"maintenance\"");
        assert_eq!(serde_json::to_string(&Category::Contributing).unwrap(), "\"contributing\"");
        assert_eq!(serde_json::to_string(&ProjectType::Category).unwrap(), "\"category\"");
        assert_eq!(serde_json::to_string(&ReleaseStatus::Close).unwrap(), "\"close\"");

        assert_eq!(
            serde_json::from_str::<Status>("\"archived\"").unwrap(),
            Status::Archived
        );
        assert_eq!(
            serde_json::from_str::<ReleaseStatus>("\"dev\"").unwrap(),
            ReleaseStatus::Dev
        );
    }

    #[test]
    fn status_field_keeps_unknown_values() {
        let known: StatusField = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(known, StatusField::Known(Status::Completed));
        assert_eq!(known.known(), Some(Status::Completed));

        let unknown: StatusField = serde_json::from_str("\"deprecated\"").unwrap();
        assert_eq!(unknown, StatusField::Unrecognized("deprecated".to_string()));
        assert_eq!(unknown.known(), None);
        assert_eq!(serde_json::to_string(&unknown).unwrap(), "\"deprecated\"");
    }

    #[test]
    fn stored_status_must_be_canonical() {
        for raw in ["Active", " archived ", "ACTIVE"] {
            let field: StatusField = serde_json::from_str(&format!("\"{raw}\"")).unwrap();
            assert_eq!(field, StatusField::Unrecognized(raw.to_string()));
            assert_eq!(serde_json::to_string(&field).unwrap(), format!("\"{raw}\""));
        }
        assert_eq!(Status::from_str(" ARCHIVED ").unwrap(), Status::Archived);
        assert_eq!(Status::from_canonical("maintenance"), Some(Status::Maintenance));
    }

    #[test]
    fn parse_rejects_unknown_values() {
        assert!(Status::from_str("deprecated").is_err());
        assert!(Category::from_str("blog").is_err());
        assert!(ProjectType::from_str("epic").is_err());
        assert!(ReleaseStatus::from_str("beta").is_err());
        assert!(CategoryFilter::from_str("everything").is_err());
    }

    #[test]
    fn category_filter_parsing_and_acceptance() {
        assert_eq!(CategoryFilter::from_str(" ALL ").unwrap(), CategoryFilter::All);
        let only = CategoryFilter::from_str("projects").unwrap();
        assert_eq!(only, CategoryFilter::Only(Category::Projects));

        assert!(CategoryFilter::All.accepts(None));
        assert!(only.accepts(Some(Category::Projects)));
        assert!(!only.accepts(Some(Category::Contributing)));
        assert!(!only.accepts(None));
    }

    #[test]
    fn sort_bucket_puts_missing_type_last() {
        assert_eq!(ProjectType::sort_bucket(Some(ProjectType::Category)), 0);
        assert_eq!(ProjectType::sort_bucket(Some(ProjectType::Project)), 1);
        assert_eq!(ProjectType::sort_bucket(Some(ProjectType::Contribution)), 2);
        assert_eq!(ProjectType::sort_bucket(None), 2);
    }

    #[test]
    fn project_deserializes_content_schema() {
        let json = r#"{
            "id": "sub",
            "title": "Sub",
            "description": "child project",
            "status": "maintenance",
            "tags": ["cli"],
            "projectType": "project",
            "category": "projects",
            "parentProject": "Core",
            "linkedProjects": ["Other"],
            "roadmap": [{"version": "1.0", "releaseStatus": "release", "items": ["ship"]}]
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.parent_title(), Some("Core"));
        assert_eq!(project.status.known(), Some(Status::Maintenance));
        assert_eq!(project.project_type, Some(ProjectType::Project));
        assert_eq!(project.roadmap[0].release_status, ReleaseStatus::Release);
        assert_eq!(project.linked_projects, vec!["Other".to_string()]);
    }

    #[test]
    fn project_defaults_match_content_schema() {
        let project: Project = serde_json::from_str(r#"{"title": "Bare"}"#).unwrap();
        assert_eq!(project.status, StatusField::Known(Status::Active));
        assert!(project.tags.is_empty());
        assert!(project.roadmap.is_empty());
        assert!(project.parent_title().is_none());
    }

    #[test]
    fn empty_parent_is_no_parent() {
        let mut project = Project::new("a", "A");
        project.parent_project = Some(String::new());
        assert!(project.parent_title().is_none());
    }
}
