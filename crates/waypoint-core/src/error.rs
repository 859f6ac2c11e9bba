use std::fmt;
use std::path::PathBuf;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotInitialized,
    ConfigParseError,
    CatalogNotFound,
    CatalogParseError,
    UnsupportedCatalogFormat,
    DuplicateTitle,
    EmptyTitle,
    UnknownStatus,
    ProjectNotFound,
    InvalidFilterValue,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotInitialized => "E1001",
            Self::ConfigParseError => "E1002",
            Self::CatalogNotFound => "E2001",
            Self::CatalogParseError => "E2002",
            Self::UnsupportedCatalogFormat => "E2003",
            Self::DuplicateTitle => "E3001",
            Self::EmptyTitle => "E3002",
            Self::UnknownStatus => "E3003",
            Self::ProjectNotFound => "E4001",
            Self::InvalidFilterValue => "E4002",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotInitialized => "No catalog configured",
            Self::ConfigParseError => "Config file parse error",
            Self::CatalogNotFound => "Catalog not found",
            Self::CatalogParseError => "Catalog parse error",
            Self::UnsupportedCatalogFormat => "Unsupported catalog format",
            Self::DuplicateTitle => "Duplicate project title",
            Self::EmptyTitle => "Project title is empty",
            Self::UnknownStatus => "Unknown project status",
            Self::ProjectNotFound => "Project not found",
            Self::InvalidFilterValue => "Invalid status/category value",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NotInitialized => {
                Some("Pass --catalog or set [catalog] path in .waypoint/config.toml.")
            }
            Self::ConfigParseError => Some("Fix syntax in .waypoint/config.toml and retry."),
            Self::CatalogNotFound => Some("Check the catalog path points at a file or directory."),
            Self::CatalogParseError => Some("Fix the project record shape and retry."),
            Self::UnsupportedCatalogFormat => {
                Some("Use a .json or .yaml file, or a directory of .md content files.")
            }
            Self::DuplicateTitle => Some("Titles are graph keys; rename one of the projects."),
            Self::EmptyTitle => Some("Give every project a non-empty title."),
            Self::UnknownStatus => {
                Some("Use one of: active, maintenance, completed, archived.")
            }
            Self::ProjectNotFound => Some("Run `wp titles` to list known project titles."),
            Self::InvalidFilterValue => {
                Some("Statuses: active|maintenance|completed|archived. Categories: all|projects|contributing.")
            }
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Failures while turning raw content into a validated [`Catalog`].
///
/// [`Catalog`]: crate::catalog::Catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("unsupported catalog format: {}", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("duplicate title '{title}' (ids '{first_id}' and '{second_id}')")]
    DuplicateTitle {
        title: String,
        first_id: String,
        second_id: String,
    },

    #[error("project '{id}' has an empty title")]
    EmptyTitle { id: String },

    #[error("project '{id}' has unknown status '{value}'")]
    UnknownStatus { id: String, value: String },
}

impl CatalogError {
    /// The stable code for this failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::CatalogNotFound,
            Self::UnsupportedFormat { .. } => ErrorCode::UnsupportedCatalogFormat,
            Self::Io { .. } => ErrorCode::InternalUnexpected,
            Self::Parse { .. } => ErrorCode::CatalogParseError,
            Self::DuplicateTitle { .. } => ErrorCode::DuplicateTitle,
            Self::EmptyTitle { .. } => ErrorCode::EmptyTitle,
            Self::UnknownStatus { .. } => ErrorCode::UnknownStatus,
        }
    }
}
