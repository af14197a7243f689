//! Schema introspection rows handed to the importer.
//!
//! These mirror what `information_schema.TABLES` and
//! `information_schema.REFERENTIAL_CONSTRAINTS` return. Fetching them is
//! left to the caller; they can also be read from JSON dumps.

use serde::{Deserialize, Serialize};

/// Size information for one base table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    #[serde(alias = "TABLE_SCHEMA", alias = "schema_name")]
    pub schema: String,

    #[serde(alias = "TABLE_NAME", alias = "table_name")]
    pub table: String,

    /// Estimated row count
    #[serde(default, alias = "TABLE_ROWS")]
    pub rows: u64,

    #[serde(default, alias = "DATA_LENGTH", alias = "data_size")]
    pub data_bytes: u64,

    #[serde(default, alias = "INDEX_LENGTH", alias = "index_size")]
    pub index_bytes: u64,
}

impl TableInfo {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
            rows: 0,
            data_bytes: 0,
            index_bytes: 0,
        }
    }

    /// Data plus index bytes.
    pub fn total_bytes(&self) -> u64 {
        self.data_bytes + self.index_bytes
    }
}

/// A foreign key from `schema.table` to `schema.referenced_table`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyInfo {
    #[serde(alias = "CONSTRAINT_SCHEMA", alias = "schema_name")]
    pub schema: String,

    #[serde(alias = "TABLE_NAME", alias = "table_name")]
    pub table: String,

    #[serde(alias = "REFERENCED_TABLE_NAME", alias = "referenced_table_name")]
    pub referenced_table: String,
}

impl ForeignKeyInfo {
    pub fn new(
        schema: impl Into<String>,
        table: impl Into<String>,
        referenced_table: impl Into<String>,
    ) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
            referenced_table: referenced_table.into(),
        }
    }
}

/// Parses a JSON array of [`TableInfo`] rows.
pub fn tables_from_json(content: &str) -> serde_json::Result<Vec<TableInfo>> {
    serde_json::from_str(content)
}

/// Parses a JSON array of [`ForeignKeyInfo`] rows.
pub fn foreign_keys_from_json(content: &str) -> serde_json::Result<Vec<ForeignKeyInfo>> {
    serde_json::from_str(content)
}
