//! Graph module for project dependency modeling.
//!
//! This module provides the [`Projects`] registry, which owns every
//! [`Project`] node of one analysis run along with their outgoing
//! [`Dependency`] edges, [`Size`] buckets and config values.
//!
//! # Example
//!
//! ```rust
//! use archscope::graph::{FilterType, Projects, ProjectType, Size};
//!
//! let mut projects = Projects::new();
//! let app = projects.get("/repo", ":app").unwrap();
//! let guava = projects.get("/repo", "com.google.guava:guava:32.0").unwrap();
//! projects[app].project_type = ProjectType::Code;
//! projects[app].add_size("main", Size { lines: 1200, files: 14, ..Size::default() });
//!
//! projects.add_dependency(app, guava);
//!
//! assert_eq!(projects.len(), 2);
//! assert_eq!(projects.list_projects(FilterType::ExcludeExternal).len(), 1);
//! ```

mod config_store;
mod dependency;
mod project;
mod projects;
mod size;

pub use config_store::ConfigStore;
pub use dependency::Dependency;
pub use project::{FilterType, Project, ProjectId, ProjectType, IGNORE_KEY};
pub use projects::{GraphError, GraphResult, Projects};
pub use size::Size;
