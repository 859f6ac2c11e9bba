#![forbid(unsafe_code)]
//! waypoint-nav library.
//!
//! The navigator engine: given a flat project list related by a single
//! `parentProject` title reference, compute the visible, ordered subset for a
//! set of filter controls, and nest any list into a display hierarchy.
//!
//! ```text
//! &[Project] ──► filter_for_navigator(&NavigatorFilters) ──► FilterResult
//!                                                               │ visible
//!                                                               ▼
//!                                                    build_hierarchy ──► Vec<ProjectNode>
//! ```
//!
//! Every operation is pure, synchronous and total. Relational defects
//! (unresolved parents, cycles, duplicate titles, unknown statuses) degrade
//! to well-defined fallbacks instead of errors; [`diagnostics::diagnose`]
//! reports them.
//!
//! # Conventions
//!
//! - **Errors**: engine operations never fail; ingestion errors live in
//!   `waypoint_core::CatalogError`.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod diagnostics;
pub mod filter;
pub mod graph;
pub mod hierarchy;
pub mod options;
pub mod order;
pub mod query;

pub use diagnostics::{CatalogDiagnostics, diagnose};
pub use filter::{FilterResult, NavigatorFilters, filter_for_navigator};
pub use graph::{ProjectGraph, ancestors, descendants, focus_branch};
pub use hierarchy::{ProjectNode, build_hierarchy, expanded_titles, flatten_with_depth};
pub use options::{focus_options, related_projects, search_active};
