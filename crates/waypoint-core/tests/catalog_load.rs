//! Catalog loading from every supported source format.

use std::fs;

use tempfile::TempDir;
use waypoint_core::catalog::{Catalog, IngestOptions};
use waypoint_core::error::{CatalogError, ErrorCode};
use waypoint_core::model::{Category, ProjectType, ReleaseStatus, Status, StatusField};

const CORE_MD: &str = "---
title: Core
description: Umbrella for first-party work
projectType: category
category: projects
status: active
tags: [rust]
featured: true
lang: en
---

Long-form body that the navigator ignores.
";

const SUB_MD: &str = "---
title: Sub
description: A command-line tool
parentProject: Core
category: projects
status: maintenance
tags:
  - cli
roadmap:
  - version: \"0.1\"
    releaseStatus: release
    items: [parser]
  - version: \"0.2\"
    releaseStatus: dev
---
";

#[test]
fn loads_markdown_directory_in_file_name_order() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("b-sub.md"), SUB_MD).expect("write sub");
    fs::write(dir.path().join("a-core.md"), CORE_MD).expect("write core");
    fs::write(dir.path().join("notes.txt"), "ignored").expect("write noise");

    let catalog = Catalog::load(dir.path(), &IngestOptions::default()).expect("load dir");
    let titles: Vec<&str> = catalog.projects().iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Core", "Sub"]);

    let core = catalog.get("Core").expect("core present");
    assert_eq!(core.id, "a-core");
    assert_eq!(core.project_type, Some(ProjectType::Category));
    assert_eq!(core.category, Some(Category::Projects));

    let sub = catalog.get("Sub").expect("sub present");
    assert_eq!(sub.id, "b-sub");
    assert_eq!(sub.project_type, Some(ProjectType::Project), "schema default");
    assert_eq!(sub.parent_title(), Some("Core"));
    assert_eq!(sub.status, StatusField::Known(Status::Maintenance));
    assert_eq!(sub.roadmap.len(), 2);
    assert_eq!(sub.roadmap[1].release_status, ReleaseStatus::Dev);
    assert!(sub.roadmap[1].items.is_empty());
}

#[test]
fn loads_json_array() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("projects.json");
    fs::write(
        &path,
        r#"[
            {"id": "core", "title": "Core", "status": "active", "projectType": "category"},
            {"id": "old", "title": "Old", "status": "deprecated", "parentProject": "Core"}
        ]"#,
    )
    .expect("write json");

    let catalog = Catalog::load(&path, &IngestOptions::default()).expect("load json");
    assert_eq!(catalog.len(), 2);
    assert_eq!(
        catalog.get("Old").map(|p| p.status.clone()),
        Some(StatusField::Unrecognized("deprecated".to_string()))
    );
    assert_eq!(catalog.get("Old").and_then(|p| p.project_type), None);
}

#[test]
fn strict_json_rejects_unknown_status() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("projects.json");
    fs::write(&path, r#"[{"id": "old", "title": "Old", "status": "deprecated"}]"#)
        .expect("write json");

    let err = Catalog::load(
        &path,
        &IngestOptions {
            strict_status: true,
        },
    )
    .expect_err("strict mode must fail");
    assert_eq!(err.code(), ErrorCode::UnknownStatus);
}

#[test]
fn loads_yaml_sequence() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("projects.yml");
    fs::write(
        &path,
        "- id: core\n  title: Core\n- id: sub\n  title: Sub\n  parentProject: Core\n  tags: [cli]\n",
    )
    .expect("write yaml");

    let catalog = Catalog::load(&path, &IngestOptions::default()).expect("load yaml");
    assert_eq!(catalog.len(), 2);
    assert_eq!(
        catalog.get("Sub").map(|p| p.tags.clone()),
        Some(vec!["cli".to_string()])
    );
}

#[test]
fn duplicate_titles_across_files_are_rejected() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("one.md"), CORE_MD).expect("write one");
    fs::write(dir.path().join("two.md"), CORE_MD).expect("write two");

    let err = Catalog::load(dir.path(), &IngestOptions::default()).expect_err("duplicate");
    assert!(matches!(
        err,
        CatalogError::DuplicateTitle { ref first_id, ref second_id, .. }
            if first_id == "one" && second_id == "two"
    ));
}

#[test]
fn markdown_without_front_matter_is_a_parse_error() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("bare.md"), "# Just a heading\n").expect("write md");

    let err = Catalog::load(dir.path(), &IngestOptions::default()).expect_err("parse error");
    assert_eq!(err.code(), ErrorCode::CatalogParseError);
}

#[test]
fn missing_and_unsupported_paths_have_distinct_codes() {
    let dir = TempDir::new().expect("temp dir");

    let missing = Catalog::load(&dir.path().join("nope.json"), &IngestOptions::default())
        .expect_err("missing");
    assert_eq!(missing.code(), ErrorCode::CatalogNotFound);

    let csv = dir.path().join("projects.csv");
    fs::write(&csv, "title\nCore\n").expect("write csv");
    let unsupported = Catalog::load(&csv, &IngestOptions::default()).expect_err("unsupported");
    assert_eq!(unsupported.code(), ErrorCode::UnsupportedCatalogFormat);
}

#[test]
fn empty_directory_is_an_empty_catalog() {
    let dir = TempDir::new().expect("temp dir");
    let catalog = Catalog::load(dir.path(), &IngestOptions::default()).expect("load empty");
    assert!(catalog.is_empty());
}
