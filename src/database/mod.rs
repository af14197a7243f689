//! Database schema import.
//!
//! Tables become [`ProjectType::Database`](crate::graph::ProjectType)
//! projects rooted at their schema, with a `"table"` size bucket; foreign
//! keys become dependency edges between tables.
//!
//! # Example
//!
//! ```
//! use archscope::database::{import_foreign_keys, import_tables, ForeignKeyInfo, TableInfo};
//! use archscope::graph::Projects;
//!
//! let mut projects = Projects::new();
//! import_tables(
//!     &mut projects,
//!     &[TableInfo::new("shop", "orders"), TableInfo::new("shop", "customers")],
//! )
//! .unwrap();
//! import_foreign_keys(&mut projects, &[ForeignKeyInfo::new("shop", "orders", "customers")]).unwrap();
//!
//! assert_eq!(projects.dependency_count(), 1);
//! ```

pub mod importer;
pub mod schema;

pub use importer::{import_foreign_keys, import_tables, TABLE_SIZE_CATEGORY};
pub use schema::{foreign_keys_from_json, tables_from_json, ForeignKeyInfo, TableInfo};
