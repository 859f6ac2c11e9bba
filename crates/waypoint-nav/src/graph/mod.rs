//! Parent/child graph over a flat project list.
//!
//! # Overview
//!
//! ```text
//! &[Project]
//!        ↓  build::ProjectGraph::build()
//! ProjectGraph (by_title + children_by_title)
//!        ├─ closure::ancestors() / descendants() / focus_branch()
//!        └─ cycles::find_parent_cycles()   (petgraph SCCs, diagnostics only)
//! ```
//!
//! The graph borrows from the project slice and is rebuilt on every engine
//! call; nothing is cached across calls.

pub mod build;
pub mod closure;
pub mod cycles;

pub use build::ProjectGraph;
pub use closure::{ancestors, descendants, focus_branch};
pub use cycles::find_parent_cycles;
