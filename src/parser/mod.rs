//! Parser module for archscope.
//!
//! This module turns build-tool report text into entries of a
//! [`Projects`](crate::graph::Projects) registry.
//!
//! # Supported Formats
//!
//! - **`gradle projects`** - module listing, see [`parse_projects`]
//! - **`gradle <module>:dependencies`** - dependency tree, see [`parse_deps`]
//!
//! # Example
//!
//! ```
//! use archscope::graph::{FilterType, Projects};
//! use archscope::parser::{parse_deps, parse_projects};
//!
//! let modules = parse_projects("Root project 'shop'\n+--- Project ':core'\n");
//! assert_eq!(modules, vec!["shop", ":core"]);
//!
//! let mut projects = Projects::new();
//! parse_deps(&mut projects, "Project ':core'\n\\--- com.acme:lib:1.0\n", "/shop").unwrap();
//! assert_eq!(projects.list_projects(FilterType::ExcludeExternal).len(), 1);
//! ```

pub mod gradle;
pub mod lines;

// Re-export commonly used items for convenience
pub use gradle::{parse_deps, parse_projects, DepsReport, ParseError, ParseResult};
