//! Export functionality for project graphs.
//!
//! This module provides exporters for writing a [`Projects`] registry in
//! various formats: JSON, CSV, and Graphviz DOT.

pub mod csv;
pub mod dot;
pub mod json;

use crate::graph::{ConfigStore, FilterType, ProjectId, ProjectType, Projects, Size};
use petgraph::graph::DiGraph;
use std::collections::HashMap;
use std::io::{self, Write};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// JSON format - machine-readable, full data
    #[default]
    Json,
    /// CSV format - spreadsheet-friendly, one row per project
    Csv,
    /// Graphviz DOT format - for rendering the graph
    Dot,
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            "dot" | "graphviz" => Ok(ExportFormat::Dot),
            _ => Err(format!(
                "Unknown export format: '{}'. Valid formats: json, csv, dot",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Dot => write!(f, "dot"),
        }
    }
}

/// One project as it appears in an export.
#[derive(Debug, Clone)]
pub struct ExportProject {
    pub root: String,
    pub name: String,
    /// Name shown in the export (the simple name when requested)
    pub display_name: String,
    pub project_type: ProjectType,
    /// Sum of all size buckets
    pub size: Size,
    pub dependency_count: usize,
    pub ignored: bool,
    pub config: ConfigStore,
}

/// One edge as it appears in an export; endpoints index into
/// [`ExportData::projects`].
#[derive(Debug, Clone)]
pub struct ExportEdge {
    pub source: usize,
    pub target: usize,
    pub config: ConfigStore,
}

/// Data container for export operations.
///
/// Holds a sorted snapshot of the registry, so every exporter renders
/// projects and edges in the same order.
#[derive(Debug, Clone)]
pub struct ExportData {
    /// Projects in listing order
    pub projects: Vec<ExportProject>,
    /// Edges in listing order
    pub edges: Vec<ExportEdge>,
    /// The same nodes and edges, nodes labeled with display names
    pub graph: DiGraph<String, String>,
}

impl ExportData {
    /// Snapshot the projects and edges accepted by `filter`.
    pub fn new(projects: &Projects, filter: FilterType, simple_names: bool) -> Self {
        let display = |id: ProjectId| {
            let project = &projects[id];
            if simple_names {
                project.simple_name()
            } else {
                project.name().to_string()
            }
        };

        let ids = projects.list_project_ids(filter);
        let positions: HashMap<ProjectId, usize> =
            ids.iter().enumerate().map(|(pos, &id)| (id, pos)).collect();

        let export_projects = ids
            .iter()
            .map(|&id| {
                let project = &projects[id];
                ExportProject {
                    root: project.root().to_string(),
                    name: project.name().to_string(),
                    display_name: display(id),
                    project_type: project.project_type,
                    size: project.get_size(),
                    dependency_count: projects.list_dependencies(id, filter).len(),
                    ignored: project.is_ignored(),
                    config: project.config().clone(),
                }
            })
            .collect();

        let edges = projects
            .list_all_dependencies(filter)
            .into_iter()
            .filter_map(|dep| {
                Some(ExportEdge {
                    source: *positions.get(&dep.source())?,
                    target: *positions.get(&dep.target())?,
                    config: dep.config().clone(),
                })
            })
            .collect();

        let graph = projects
            .to_petgraph(filter)
            .map(|_, &id| display(id), |_, _| String::new());

        Self {
            projects: export_projects,
            edges,
            graph,
        }
    }

    /// Count of projects of the given type
    pub fn count_of(&self, project_type: ProjectType) -> usize {
        self.projects
            .iter()
            .filter(|p| p.project_type == project_type)
            .count()
    }

    /// Sum of every exported project's size
    pub fn total_size(&self) -> Size {
        let mut total = Size::new();
        for project in &self.projects {
            total.add(&project.size);
        }
        total
    }
}

/// Trait for exporters.
pub trait Exporter {
    /// Export the data to the given writer.
    fn export<W: Write>(&self, data: &ExportData, writer: &mut W) -> io::Result<()>;
}

/// Export data in the specified format.
pub fn export<W: Write>(
    format: ExportFormat,
    data: &ExportData,
    writer: &mut W,
) -> io::Result<()> {
    match format {
        ExportFormat::Json => json::JsonExporter.export(data, writer),
        ExportFormat::Csv => csv::CsvExporter.export(data, writer),
        ExportFormat::Dot => dot::DotExporter.export(data, writer),
    }
}

/// Export data to a string.
pub fn export_to_string(format: ExportFormat, data: &ExportData) -> io::Result<String> {
    let mut buffer = Vec::new();
    export(format, data, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::graph::{ProjectType, Projects, Size};

    /// `:app -> :core -> guava`, `:app -> guava`, plus one table.
    pub fn sample_projects() -> Projects {
        let mut projects = Projects::new();
        let app = projects.get("/repo", ":app").unwrap();
        let core = projects.get("/repo", ":core").unwrap();
        let guava = projects.get("/repo", "com.google.guava:guava:32.0").unwrap();
        let orders = projects.get("shop", "orders").unwrap();

        projects[app].project_type = ProjectType::Code;
        projects[app].name_parts = vec!["app".to_string()];
        projects[core].project_type = ProjectType::Code;
        projects[orders].project_type = ProjectType::Database;

        projects[app].add_size("main", Size { lines: 100, files: 4, bytes: 2048, ..Size::default() });
        projects[core].add_size("main", Size { lines: 50, files: 2, bytes: 1024, ..Size::default() });

        projects.add_dependency(app, core).set_config("kind", "api");
        projects.add_dependency(app, guava);
        projects.add_dependency(core, guava);

        projects
    }
}
