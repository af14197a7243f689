//! Parsers for Gradle's textual reports.
//!
//! [`parse_projects`] reads the output of `gradle projects` and returns the
//! module names. [`parse_deps`] reads the output of
//! `gradle <module>:dependencies` and records every edge of the printed tree
//! in a [`Projects`] registry.

use std::collections::BTreeSet;

use tracing::debug;

use super::lines::{
    dependency_line, is_tree_start, nested_project_label, project_label, root_project_label,
};
use crate::graph::{GraphError, ProjectId, ProjectType, Projects};

/// Errors that can occur while parsing a Gradle report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A line inside the dependency tree did not look like a dependency.
    #[error("invalid dependency line: {0}")]
    InvalidDependencyLine(String),

    /// The registry rejected a project key.
    #[error("invalid project key: {0}")]
    Graph(#[from] GraphError),
}

/// Result type alias for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Summary of one parsed dependency report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepsReport {
    /// The module the report belongs to, if its header was found
    pub root: Option<ProjectId>,
    /// Number of tree entries recorded as edges
    pub edges: usize,
    /// Every project the report mentions, in id order
    pub projects: Vec<ProjectId>,
}

/// Extracts module names from `gradle projects` output.
///
/// The first `Root project '<name>'` line contributes the root module, and
/// every tree line of the form `+--- Project '<name>'` contributes a nested
/// module, in file order. Other lines are skipped.
///
/// # Example
///
/// ```
/// use archscope::parser::gradle::parse_projects;
///
/// let output = "Root project 'app'\n+--- Project 'core'\n";
/// assert_eq!(parse_projects(output), vec!["app", "core"]);
/// ```
pub fn parse_projects(content: &str) -> Vec<String> {
    let mut result = Vec::new();
    let mut root_added = false;

    for line in content.lines() {
        if !root_added {
            if let Some(name) = root_project_label(line) {
                result.push(name.to_string());
                root_added = true;
            }
        }

        if let Some(name) = nested_project_label(line) {
            result.push(name.to_string());
        }
    }

    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    WaitingRoot,
    WaitingDeps,
    ParsingDeps,
}

/// A node on the path from the report root to the line being parsed.
#[derive(Debug, Clone, Copy)]
struct StackEntry {
    project: ProjectId,
    depth: usize,
}

/// Parses one module's `gradle dependencies` output into `projects`.
///
/// Every name in the tree is resolved under `root` and an edge is added
/// from each entry's parent to the entry. The parent is found from the
/// length of the tree-drawing prefix. Parsing stops at the first empty line
/// after the tree starts.
///
/// # Errors
///
/// Returns [`ParseError::InvalidDependencyLine`] carrying the line verbatim
/// when a non-empty line inside the tree is not a dependency entry. Edges
/// recorded before that line are kept.
///
/// # Example
///
/// ```
/// use archscope::graph::{FilterType, Projects};
/// use archscope::parser::gradle::parse_deps;
///
/// let report = "\
/// Root project ':app'
///
/// compileClasspath
/// +--- project :core
/// \\--- com.x:lib:1.0
///
/// ";
///
/// let mut projects = Projects::new();
/// let summary = parse_deps(&mut projects, report, "/repo").unwrap();
///
/// assert_eq!(projects.len(), 3);
/// assert_eq!(summary.edges, 2);
/// let app = summary.root.unwrap();
/// assert_eq!(projects.list_dependencies(app, FilterType::All).len(), 2);
/// ```
pub fn parse_deps(projects: &mut Projects, content: &str, root: &str) -> ParseResult<DepsReport> {
    let mut state = State::WaitingRoot;
    let mut report_root: Option<ProjectId> = None;
    let mut stack: Vec<StackEntry> = Vec::new();
    let mut edges = 0;
    let mut touched = BTreeSet::new();

    for line in content.lines() {
        if state == State::WaitingRoot {
            if let Some(name) = project_label(line) {
                let id = resolve(projects, root, name, true)?;
                debug!(root, name, "found dependency report root");
                report_root = Some(id);
                touched.insert(id);
                stack.push(StackEntry {
                    project: id,
                    depth: 0,
                });
                state = State::WaitingDeps;
            }
            continue;
        }

        if state == State::WaitingDeps && is_tree_start(line) {
            state = State::ParsingDeps;
        }

        if state == State::ParsingDeps {
            if line.is_empty() {
                break;
            }

            let entry = dependency_line(line)
                .ok_or_else(|| ParseError::InvalidDependencyLine(line.to_string()))?;
            let id = resolve(projects, root, entry.name, entry.is_project)?;
            touched.insert(id);

            while stack.last().is_some_and(|top| entry.depth <= top.depth) {
                stack.pop();
            }

            // The root entry has depth 0 and every tree entry a positive
            // depth, so the root is never popped.
            if let Some(parent) = stack.last() {
                debug!(
                    parent = projects[parent.project].name(),
                    child = entry.name,
                    depth = entry.depth,
                    "dependency"
                );
                projects.add_dependency(parent.project, id);
                edges += 1;
            }

            stack.push(StackEntry {
                project: id,
                depth: entry.depth,
            });
        }
    }

    Ok(DepsReport {
        root: report_root,
        edges,
        projects: touched.into_iter().collect(),
    })
}

/// Looks up a tree node, typing first-party modules as code.
fn resolve(
    projects: &mut Projects,
    root: &str,
    name: &str,
    is_project: bool,
) -> ParseResult<ProjectId> {
    let id = projects.get(root, name)?;

    if is_project {
        let project = &mut projects[id];
        project.project_type = ProjectType::Code;
        if project.name_parts.is_empty() {
            project.name_parts = module_path_parts(name);
        }
    }

    Ok(id)
}

/// Splits a Gradle module path like `:core:data` into `["core", "data"]`.
fn module_path_parts(name: &str) -> Vec<String> {
    name.split(':')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
