use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::catalog::IngestOptions;
use crate::model::{CategoryFilter, Status};

/// Per-site settings from `.waypoint/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub navigator: NavigatorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog location, relative to the project root unless absolute.
    #[serde(default = "default_catalog_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub strict_status: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: default_catalog_path(),
            strict_status: false,
        }
    }
}

impl CatalogConfig {
    #[must_use]
    pub const fn ingest_options(&self) -> IngestOptions {
        IngestOptions {
            strict_status: self.strict_status,
        }
    }

    /// The catalog path resolved against `project_root`.
    #[must_use]
    pub fn resolved_path(&self, project_root: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            project_root.join(&self.path)
        }
    }
}

/// Initial filter state for navigator commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigatorConfig {
    #[serde(default = "default_statuses")]
    pub statuses: Vec<Status>,
    #[serde(default = "default_category")]
    pub category: String,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            statuses: default_statuses(),
            category: default_category(),
        }
    }
}

impl NavigatorConfig {
    /// Parse the configured category selector.
    ///
    /// # Errors
    ///
    /// Returns an error if `category` is neither `all` nor a known category.
    pub fn category_filter(&self) -> Result<CategoryFilter> {
        CategoryFilter::from_str(&self.category)
            .with_context(|| format!("Invalid [navigator] category '{}'", self.category))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub resolved_output: String,
}

/// Load `.waypoint/config.toml` under `project_root`, or defaults if absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(".waypoint/config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load `<config_dir>/waypoint/config.toml`, or defaults if absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("waypoint/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Merge project config, user config and environment into one view.
///
/// # Errors
///
/// Returns an error if either config file fails to load.
pub fn resolve_config(project_root: &Path, cli_json: bool) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root)?;
    let user = load_user_config()?;

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(
        cli_json,
        user.output.as_deref(),
        env_format.as_deref(),
        std::io::stdout().is_terminal(),
    );

    Ok(EffectiveConfig {
        project,
        user,
        resolved_output,
    })
}

/// Normalize an output mode name, accepting a couple of aliases.
#[must_use]
pub fn normalize_output_mode(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "pretty" | "human" => Some("pretty"),
        "text" | "plain" => Some("text"),
        "json" => Some("json"),
        _ => None,
    }
}

fn resolve_output(
    cli_json: bool,
    user_output: Option<&str>,
    env_format: Option<&str>,
    is_tty: bool,
) -> String {
    if cli_json {
        return "json".to_string();
    }

    if let Some(mode) = env_format.and_then(normalize_output_mode) {
        return mode.to_string();
    }

    if let Some(mode) = user_output.and_then(normalize_output_mode) {
        return mode.to_string();
    }

    if is_tty {
        "pretty".to_string()
    } else {
        "text".to_string()
    }
}

fn default_catalog_path() -> PathBuf {
    PathBuf::from("content/projects")
}

fn default_statuses() -> Vec<Status> {
    Status::ALL.to_vec()
}

fn default_category() -> String {
    "all".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    #[test]
    fn missing_project_config_uses_defaults() {
        let root = tempfile::tempdir().expect("temp dir");
        let cfg = load_project_config(root.path()).expect("load should succeed");
        assert_eq!(cfg.catalog.path, PathBuf::from("content/projects"));
        assert!(!cfg.catalog.strict_status);
        assert_eq!(cfg.navigator.statuses, Status::ALL.to_vec());
        assert_eq!(
            cfg.navigator.category_filter().expect("valid"),
            CategoryFilter::All
        );
    }

    #[test]
    fn project_config_overrides_sections() {
        let root = tempfile::tempdir().expect("temp dir");
        std::fs::create_dir_all(root.path().join(".waypoint")).expect("create config dir");
        std::fs::write(
            root.path().join(".waypoint/config.toml"),
            r#"
[catalog]
path = "data/projects.json"
strict_status = true

[navigator]
statuses = ["active", "maintenance"]
category = "contributing"
"#,
        )
        .expect("write config");

        let cfg = load_project_config(root.path()).expect("load should succeed");
        assert_eq!(
            cfg.catalog.resolved_path(root.path()),
            root.path().join("data/projects.json")
        );
        assert!(cfg.catalog.ingest_options().strict_status);
        assert_eq!(
            cfg.navigator.statuses,
            vec![Status::Active, Status::Maintenance]
        );
        assert_eq!(
            cfg.navigator.category_filter().expect("valid"),
            CategoryFilter::Only(Category::Contributing)
        );
    }

    #[test]
    fn malformed_project_config_reports_path() {
        let root = tempfile::tempdir().expect("temp dir");
        std::fs::create_dir_all(root.path().join(".waypoint")).expect("create config dir");
        std::fs::write(root.path().join(".waypoint/config.toml"), "[catalog\npath=").expect("write");

        let err = load_project_config(root.path()).expect_err("parse must fail");
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn invalid_category_is_rejected() {
        let cfg = NavigatorConfig {
            statuses: default_statuses(),
            category: "blog".to_string(),
        };
        assert!(cfg.category_filter().is_err());
    }

    #[test]
    fn absolute_catalog_path_is_kept() {
        let cfg = CatalogConfig {
            path: PathBuf::from("/srv/site/projects"),
            strict_status: false,
        };
        assert_eq!(
            cfg.resolved_path(Path::new("/elsewhere")),
            PathBuf::from("/srv/site/projects")
        );
    }

    #[test]
    fn cli_json_overrides_env_and_config() {
        assert_eq!(resolve_output(true, Some("pretty"), Some("text"), true), "json");
    }

    #[test]
    fn env_beats_user_config() {
        assert_eq!(resolve_output(false, Some("json"), Some("text"), true), "text");
    }

    #[test]
    fn aliases_are_normalized_and_unknown_falls_through() {
        assert_eq!(resolve_output(false, Some("human"), None, false), "pretty");
        assert_eq!(resolve_output(false, Some("bogus"), Some("nope"), false), "text");
        assert_eq!(resolve_output(false, None, None, true), "pretty");
    }
}
