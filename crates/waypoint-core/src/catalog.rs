//! Validated project catalog.
//!
//! The navigator engine keys everything by project title, so a collection
//! with two records sharing a title silently corrupts the parent graph.
//! [`Catalog`] is the ingestion boundary that rejects such collections up
//! front with a [`CatalogError`] instead.
//!
//! # Sources
//!
//! - `.json`: an array of project records.
//! - `.yaml` / `.yml`: a sequence of project records.
//! - `.md`: a single content file whose YAML front matter is the record.
//! - a directory: every `*.md` file in it (non-recursive, sorted by name).
//!
//! For Markdown content the record `id` defaults to the file stem and
//! `projectType` defaults to `project`, matching the content schema.

#![allow(clippy::module_name_repetitions)]

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use pulldown_cmark::{Event, MetadataBlockKind, Options, Parser, Tag, TagEnd};
use tracing::{debug, info, instrument, warn};

use crate::error::CatalogError;
use crate::model::{Category, Project, ProjectType, StatusField};

// ---------------------------------------------------------------------------
// ProjectKey
// ---------------------------------------------------------------------------

/// A project title that has been checked unique within its catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectKey(String);

impl ProjectKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ProjectKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Ingestion policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestOptions {
    /// Reject records whose status is outside the known set instead of
    /// keeping them (they are never filter candidates either way).
    pub strict_status: bool,
}

/// An immutable project collection with unique, non-empty titles.
#[derive(Debug, Clone)]
pub struct Catalog {
    projects: Vec<Project>,
    index: HashMap<ProjectKey, usize>,
    content_hash: String,
}

impl Catalog {
    /// Validate `projects` and build the catalog, preserving input order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyTitle`] for a blank title,
    /// [`CatalogError::DuplicateTitle`] when two records share a title, and
    /// [`CatalogError::UnknownStatus`] for an unrecognized status when
    /// `options.strict_status` is set.
    #[instrument(skip_all, fields(count = projects.len(), strict = options.strict_status))]
    pub fn from_projects(
        projects: Vec<Project>,
        options: &IngestOptions,
    ) -> Result<Self, CatalogError> {
        let mut index: HashMap<ProjectKey, usize> = HashMap::with_capacity(projects.len());

        for (position, project) in projects.iter().enumerate() {
            if project.title.trim().is_empty() {
                return Err(CatalogError::EmptyTitle {
                    id: project.id.clone(),
                });
            }

            if let StatusField::Unrecognized(value) = &project.status {
                if options.strict_status {
                    return Err(CatalogError::UnknownStatus {
                        id: project.id.clone(),
                        value: value.clone(),
                    });
                }
                warn!(
                    id = %project.id,
                    status = %value,
                    "keeping project with unknown status; it will never be a filter candidate"
                );
            }

            if let Some(&first) = index.get(project.title.as_str()) {
                return Err(CatalogError::DuplicateTitle {
                    title: project.title.clone(),
                    first_id: projects[first].id.clone(),
                    second_id: project.id.clone(),
                });
            }
            index.insert(ProjectKey(project.title.clone()), position);
        }

        let content_hash = compute_content_hash(&projects);
        let catalog = Self {
            projects,
            index,
            content_hash,
        };

        for (title, parent) in catalog.unresolved_parents() {
            warn!(
                %title,
                %parent,
                "parent project not in catalog; the project will be shown as a root"
            );
        }
        debug!(hash = %catalog.content_hash, "catalog validated");

        Ok(catalog)
    }

    /// Load and validate a catalog from a file or directory.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] when `path` does not exist,
    /// [`CatalogError::UnsupportedFormat`] for an unknown extension, I/O and
    /// parse errors with the offending path, and any validation error from
    /// [`Catalog::from_projects`].
    #[instrument(skip(options))]
    pub fn load(path: &Path, options: &IngestOptions) -> Result<Self, CatalogError> {
        let projects = read_projects(path)?;
        info!(count = projects.len(), path = %path.display(), "loaded project catalog");
        Self::from_projects(projects, options)
    }

    /// All projects in input order.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Look up a project by title.
    #[must_use]
    pub fn get(&self, title: &str) -> Option<&Project> {
        self.index.get(title).map(|&position| &self.projects[position])
    }

    /// Validated keys in input order.
    pub fn keys(&self) -> impl Iterator<Item = &ProjectKey> {
        let mut keyed: Vec<(&ProjectKey, usize)> =
            self.index.iter().map(|(key, &position)| (key, position)).collect();
        keyed.sort_unstable_by_key(|(_, position)| *position);
        keyed.into_iter().map(|(key, _)| key)
    }

    /// `(title, parent)` pairs whose parent title is not in the catalog, in
    /// input order.
    pub fn unresolved_parents(&self) -> impl Iterator<Item = (&str, &str)> {
        self.projects.iter().filter_map(|project| {
            project
                .parent_title()
                .filter(|parent| !self.index.contains_key(*parent))
                .map(|parent| (project.title.as_str(), parent))
        })
    }

    /// BLAKE3 hash of the catalog contents, stable across loads of the same
    /// data. Suitable as the collection-identity half of a memoization key.
    #[must_use]
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// Consume the catalog, returning the projects in input order.
    #[must_use]
    pub fn into_projects(self) -> Vec<Project> {
        self.projects
    }
}

// ---------------------------------------------------------------------------
// Readers
// ---------------------------------------------------------------------------

/// Read raw project records from `path` without validating them.
///
/// # Errors
///
/// See [`Catalog::load`].
pub fn read_projects(path: &Path) -> Result<Vec<Project>, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::NotFound {
            path: path.to_path_buf(),
        });
    }

    if path.is_dir() {
        return read_markdown_dir(path);
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => {
            let content = read_file(path)?;
            serde_json::from_str::<Vec<Project>>(&content).map_err(|e| CatalogError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        }
        Some("yaml" | "yml") => {
            let content = read_file(path)?;
            serde_yaml::from_str::<Vec<Project>>(&content).map_err(|e| CatalogError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        }
        Some("md") => read_markdown_file(path).map(|project| vec![project]),
        _ => Err(CatalogError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

fn read_file(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_markdown_dir(dir: &Path) -> Result<Vec<Project>, CatalogError> {
    let entries = fs::read_dir(dir).map_err(|source| CatalogError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CatalogError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_markdown = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("md"));
        if path.is_file() && is_markdown {
            paths.push(path);
        }
    }
    paths.sort();

    paths.iter().map(|path| read_markdown_file(path)).collect()
}

fn read_markdown_file(path: &Path) -> Result<Project, CatalogError> {
    let content = read_file(path)?;
    let Some(front_matter) = extract_front_matter(&content) else {
        return Err(CatalogError::Parse {
            path: path.to_path_buf(),
            message: "missing YAML front matter".to_string(),
        });
    };

    let mut project: Project =
        serde_yaml::from_str(&front_matter).map_err(|e| CatalogError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if project.id.is_empty() {
        project.id = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_default()
            .to_string();
    }
    project.project_type.get_or_insert(ProjectType::Project);

    Ok(project)
}

/// Return the text of the leading YAML metadata block, if the document has one.
#[must_use]
pub fn extract_front_matter(markdown: &str) -> Option<String> {
    let parser = Parser::new_ext(markdown, Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);

    let mut inside = false;
    let mut block = String::new();
    for event in parser {
        match event {
            Event::Start(Tag::MetadataBlock(MetadataBlockKind::YamlStyle)) => inside = true,
            Event::End(TagEnd::MetadataBlock(MetadataBlockKind::YamlStyle)) => {
                return Some(block);
            }
            Event::Text(text) if inside => block.push_str(&text),
            _ if !inside => return None,
            _ => {}
        }
    }
    None
}

// ---------------------------------------------------------------------------
// Hashing
// ---------------------------------------------------------------------------

fn compute_content_hash(projects: &[Project]) -> String {
    let mut hasher = blake3::Hasher::new();
    for project in projects {
        hash_str(&mut hasher, &project.id);
        hash_str(&mut hasher, &project.title);
        hash_str(&mut hasher, &project.description);
        hash_opt(&mut hasher, project.version.as_deref());
        hash_str(&mut hasher, project.status.as_str());
        hash_list(&mut hasher, &project.tags);
        hash_opt(&mut hasher, project.link.as_deref());
        hash_opt(&mut hasher, project.github.as_deref());
        hash_opt(&mut hasher, project.project_type.map(ProjectType::as_str));
        hash_opt(&mut hasher, project.category.map(Category::as_str));
        hash_opt(&mut hasher, project.parent_project.as_deref());
        hash_list(&mut hasher, &project.linked_projects);
        for entry in &project.roadmap {
            hash_str(&mut hasher, &entry.version);
            hash_str(&mut hasher, entry.release_status.as_str());
            hash_list(&mut hasher, &entry.items);
        }
        hasher.update(b"\x1e");
    }
    format!("blake3:{}", hasher.finalize())
}

fn hash_str(hasher: &mut blake3::Hasher, value: &str) {
    hasher.update(value.as_bytes());
    hasher.update(b"\x00");
}

fn hash_opt(hasher: &mut blake3::Hasher, value: Option<&str>) {
    match value {
        Some(value) => {
            hasher.update(b"\x01");
            hash_str(hasher, value);
        }
        None => {
            hasher.update(b"\x02");
        }
    }
}

fn hash_list(hasher: &mut blake3::Hasher, values: &[String]) {
    hasher.update(&(values.len() as u64).to_le_bytes());
    for value in values {
        hash_str(hasher, value);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
