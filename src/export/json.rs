//! JSON export implementation.
//!
//! Exports the project graph in JSON format for machine-readable output.

use super::{ExportData, Exporter};
use crate::graph::{ConfigStore, ProjectType, Size};
use serde::Serialize;
use std::io::{self, Write};

/// JSON exporter implementation.
pub struct JsonExporter;

/// Serializable project for JSON output.
#[derive(Serialize)]
struct JsonProject<'a> {
    root: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<&'a str>,
    #[serde(rename = "type")]
    project_type: ProjectType,
    size: &'a Size,
    dependencies: usize,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    ignored: bool,
    #[serde(skip_serializing_if = "no_config")]
    config: &'a ConfigStore,
}

/// Serializable edge for JSON output.
#[derive(Serialize)]
struct JsonDependency<'a> {
    source: &'a str,
    target: &'a str,
    #[serde(skip_serializing_if = "no_config")]
    config: &'a ConfigStore,
}

/// Summary statistics for JSON output.
#[derive(Serialize)]
struct JsonSummary {
    total_projects: usize,
    code: usize,
    database: usize,
    external: usize,
    dependencies: usize,
    total_lines: u64,
    total_bytes: u64,
}

fn no_config(config: &&ConfigStore) -> bool {
    config.is_empty()
}

/// Root JSON export structure.
#[derive(Serialize)]
struct JsonExport<'a> {
    summary: JsonSummary,
    projects: Vec<JsonProject<'a>>,
    dependencies: Vec<JsonDependency<'a>>,
}

impl Exporter for JsonExporter {
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()> {
        let projects: Vec<JsonProject> = data
            .projects
            .iter()
            .map(|p| JsonProject {
                root: &p.root,
                name: &p.name,
                display_name: (p.display_name != p.name).then_some(p.display_name.as_str()),
                project_type: p.project_type,
                size: &p.size,
                dependencies: p.dependency_count,
                ignored: p.ignored,
                config: &p.config,
            })
            .collect();

        let dependencies: Vec<JsonDependency> = data
            .edges
            .iter()
            .map(|e| JsonDependency {
                source: &data.projects[e.source].name,
                target: &data.projects[e.target].name,
                config: &e.config,
            })
            .collect();

        let total = data.total_size();
        let export = JsonExport {
            summary: JsonSummary {
                total_projects: data.projects.len(),
                code: data.count_of(ProjectType::Code),
                database: data.count_of(ProjectType::Database),
                external: data.count_of(ProjectType::ExternalDependency),
                dependencies: data.edges.len(),
                total_lines: total.lines,
                total_bytes: total.bytes,
            },
            projects,
            dependencies,
        };

        let json = serde_json::to_string_pretty(&export)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        writeln!(writer, "{}", json)
    }
}
