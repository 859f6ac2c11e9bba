//! Project records as supplied by the content store.

pub mod project;

pub use project::{
    Category, CategoryFilter, ParseEnumError, Project, ProjectType, ReleaseStatus, RoadmapEntry,
    Status, StatusField,
};
