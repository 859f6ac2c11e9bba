#![forbid(unsafe_code)]
//! waypoint-core library.
//!
//! Project records, the validated [`catalog::Catalog`] ingestion boundary,
//! configuration loading and stable error codes.
//!
//! # Conventions
//!
//! - **Errors**: ingestion returns [`error::CatalogError`]; config loading uses
//!   `anyhow::Result` with path context.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod catalog;
pub mod config;
pub mod error;
pub mod model;

pub use catalog::{Catalog, IngestOptions, ProjectKey};
pub use error::{CatalogError, ErrorCode};
pub use model::{
    Category, CategoryFilter, Project, ProjectType, ReleaseStatus, RoadmapEntry, Status,
    StatusField,
};
