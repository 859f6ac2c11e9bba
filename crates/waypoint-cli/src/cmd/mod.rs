//! Command handlers for `wp`.
//!
//! Every handler takes a [`Session`], which carries the resolved config, the
//! output mode and the catalog location shared by all subcommands.

pub mod completions;
pub mod diagnose;
pub mod filter;
pub mod show;
pub mod titles;
pub mod tree;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;
use tracing::{debug, info};
use waypoint_core::config::EffectiveConfig;
use waypoint_core::model::{CategoryFilter, Status};
use waypoint_core::{Catalog, CatalogError, ErrorCode, IngestOptions};
use waypoint_nav::NavigatorFilters;

use crate::output::{CliError, OutputMode, render_error};

/// Resolved invocation context.
#[derive(Debug)]
pub struct Session {
    pub project_root: PathBuf,
    pub config: EffectiveConfig,
    pub output: OutputMode,
    /// `--catalog`, when given.
    pub catalog_override: Option<PathBuf>,
    /// `--strict`.
    pub strict: bool,
}

impl Session {
    /// The catalog path: the `--catalog` flag, else `[catalog] path`.
    pub fn catalog_path(&self) -> PathBuf {
        self.catalog_override.clone().unwrap_or_else(|| {
            self.config
                .project
                .catalog
                .resolved_path(&self.project_root)
        })
    }

    /// Ingestion options; `--strict` forces strict status checking.
    pub const fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            strict_status: self.strict || self.config.project.catalog.strict_status,
        }
    }

    /// Load and validate the catalog, rendering any failure before returning
    /// it.
    pub fn load_catalog(&self) -> Result<Catalog> {
        let path = self.catalog_path();
        debug!(path = %path.display(), "loading catalog");

        match Catalog::load(&path, &self.ingest_options()) {
            Ok(catalog) => {
                info!(
                    projects = catalog.len(),
                    hash = catalog.content_hash(),
                    "catalog loaded"
                );
                Ok(catalog)
            }
            Err(err) => Err(self.fail_catalog(&path, err)),
        }
    }

    /// Render a catalog failure and convert it for propagation. A missing
    /// catalog at the configured default location is reported as an
    /// unconfigured project rather than a bad path.
    pub fn fail_catalog(&self, path: &Path, err: CatalogError) -> anyhow::Error {
        let cli_error = if matches!(err, CatalogError::NotFound { .. })
            && self.catalog_override.is_none()
        {
            CliError::with_code(
                ErrorCode::NotInitialized,
                format!("no catalog at {}", path.display()),
            )
        } else {
            CliError::from(&err)
        };

        if let Err(render_err) = render_error(self.output, &cli_error) {
            return render_err;
        }
        err.into()
    }
}

/// Filter controls shared by `wp filter` and `wp tree`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Search text, matched against titles, descriptions, tags and roadmaps.
    pub query: Option<String>,

    /// Allowed status (repeatable). Defaults to `[navigator] statuses`.
    #[arg(long = "status", value_name = "STATUS")]
    pub statuses: Vec<Status>,

    /// `all` or a category name. Defaults to `[navigator] category`.
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<CategoryFilter>,

    /// Isolate the branch around this title.
    #[arg(long, value_name = "TITLE")]
    pub focus: Option<String>,
}

impl FilterArgs {
    /// Combine the flags with the configured navigator defaults.
    pub fn to_filters(&self, session: &Session) -> Result<NavigatorFilters> {
        let navigator = &session.config.project.navigator;

        let category = match self.category {
            Some(category) => category,
            None => match navigator.category_filter() {
                Ok(category) => category,
                Err(err) => {
                    render_error(
                        session.output,
                        &CliError::with_code(ErrorCode::InvalidFilterValue, format!("{err:#}")),
                    )?;
                    return Err(err);
                }
            },
        };

        let statuses: Vec<Status> = if self.statuses.is_empty() {
            navigator.statuses.clone()
        } else {
            self.statuses.clone()
        };

        let mut filters = NavigatorFilters::with_defaults(statuses, category);
        if let Some(query) = &self.query {
            filters = filters.query(query.clone());
        }
        if let Some(focus) = &self.focus {
            filters = filters.focus(focus.clone());
        }

        debug!(?filters, "navigator filters resolved");
        Ok(filters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_core::config::{ProjectConfig, UserConfig};
    use waypoint_core::model::Category;

    fn session(config: ProjectConfig) -> Session {
        Session {
            project_root: PathBuf::from("/site"),
            config: EffectiveConfig {
                project: config,
                user: UserConfig::default(),
                resolved_output: "text".to_string(),
            },
            output: OutputMode::Text,
            catalog_override: None,
            strict: false,
        }
    }

    #[test]
    fn catalog_path_prefers_flag() {
        let mut s = session(ProjectConfig::default());
        assert_eq!(s.catalog_path(), PathBuf::from("/site/content/projects"));
        s.catalog_override = Some(PathBuf::from("other.json"));
        assert_eq!(s.catalog_path(), PathBuf::from("other.json"));
    }

    #[test]
    fn strict_flag_forces_strict_status() {
        let mut s = session(ProjectConfig::default());
        assert!(!s.ingest_options().strict_status);
        s.strict = true;
        assert!(s.ingest_options().strict_status);
    }

    #[test]
    fn flags_override_navigator_config() {
        let mut config = ProjectConfig::default();
        config.navigator.statuses = vec![Status::Active];
        config.navigator.category = "projects".to_string();
        let s = session(config);

        let defaults = FilterArgs::default().to_filters(&s).expect("filters");
        assert_eq!(defaults.statuses.len(), 1);
        assert_eq!(defaults.category, CategoryFilter::Only(Category::Projects));
        assert!(defaults.query.is_empty());

        let args = FilterArgs {
            query: Some("cli".to_string()),
            statuses: vec![Status::Archived, Status::Completed],
            category: Some(CategoryFilter::All),
            focus: Some("Core".to_string()),
        };
        let filters = args.to_filters(&s).expect("filters");
        assert_eq!(filters.statuses.len(), 2);
        assert_eq!(filters.category, CategoryFilter::All);
        assert_eq!(filters.query, "cli");
        assert_eq!(filters.focus_title.as_deref(), Some("Core"));
    }
}
