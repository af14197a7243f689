//! Feeds schema introspection rows into a project registry.

use std::collections::BTreeSet;

use tracing::{debug, info};

use super::schema::{ForeignKeyInfo, TableInfo};
use crate::graph::{GraphResult, ProjectId, ProjectType, Projects, Size};

/// Size category under which table metrics are stored.
pub const TABLE_SIZE_CATEGORY: &str = "table";

/// Named counter for the data part of a table's bytes.
pub const DATA_COUNTER: &str = "data";

/// Named counter for the index part of a table's bytes.
pub const INDEXES_COUNTER: &str = "indexes";

/// Records one database project per table, with its size.
///
/// Each table becomes the project `(schema, table)`, typed as a database
/// entity, with its `"table"` size bucket set to the row count as lines,
/// data plus index bytes as bytes, and both parts as named counters. Its
/// name parts are the `_`-separated words of the table name, so
/// [`Project::simple_name`](crate::graph::Project::simple_name) can shorten
/// `user_users` to `users`.
///
/// Returns the ids of the projects that were touched, in row order.
///
/// # Example
///
/// ```
/// use archscope::database::{import_tables, TableInfo};
/// use archscope::graph::Projects;
///
/// let mut orders = TableInfo::new("shop", "orders");
/// orders.rows = 10;
/// orders.data_bytes = 4096;
///
/// let mut projects = Projects::new();
/// let changed = import_tables(&mut projects, &[orders]).unwrap();
///
/// assert_eq!(projects[changed[0]].get_size().lines, 10);
/// ```
pub fn import_tables(projects: &mut Projects, tables: &[TableInfo]) -> GraphResult<Vec<ProjectId>> {
    let mut changed = Vec::with_capacity(tables.len());

    for table in tables {
        debug!(
            schema = %table.schema,
            table = %table.table,
            data_bytes = table.data_bytes,
            index_bytes = table.index_bytes,
            "importing table"
        );

        let id = projects.get(&table.schema, &table.table)?;
        let project = &mut projects[id];
        project.project_type = ProjectType::Database;

        let mut size = Size {
            lines: table.rows,
            bytes: table.total_bytes(),
            ..Size::default()
        };
        size.other.insert(DATA_COUNTER.to_string(), table.data_bytes);
        size.other.insert(INDEXES_COUNTER.to_string(), table.index_bytes);
        project.add_size(TABLE_SIZE_CATEGORY, size);

        changed.push(id);
    }

    create_table_name_parts(projects, &changed);

    info!(tables = changed.len(), "imported database tables");
    Ok(changed)
}

/// Sets the name parts of each table project from its `_`-separated words.
fn create_table_name_parts(projects: &mut Projects, ids: &[ProjectId]) {
    for &id in ids {
        let parts = table_name_parts(projects[id].name());
        projects[id].name_parts = parts;
    }
}

fn table_name_parts(table: &str) -> Vec<String> {
    table
        .split('_')
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

/// Records one edge per foreign key, from the referencing table to the
/// referenced table of the same schema.
///
/// Returns the distinct ids of the referencing projects, in id order.
pub fn import_foreign_keys(
    projects: &mut Projects,
    foreign_keys: &[ForeignKeyInfo],
) -> GraphResult<Vec<ProjectId>> {
    let mut changed = BTreeSet::new();

    for fk in foreign_keys {
        debug!(
            schema = %fk.schema,
            table = %fk.table,
            referenced = %fk.referenced_table,
            "importing foreign key"
        );

        let source = projects.get(&fk.schema, &fk.table)?;
        let target = projects.get(&fk.schema, &fk.referenced_table)?;
        projects.add_dependency(source, target);

        changed.insert(source);
    }

    info!(
        foreign_keys = foreign_keys.len(),
        tables = changed.len(),
        "imported foreign keys"
    );
    Ok(changed.into_iter().collect())
}
