//! The project registry.
//!
//! [`Projects`] deduplicates nodes by `(root, name)`, owns every
//! [`Project`] and hands out [`ProjectId`] handles. All listings are sorted
//! so that the same graph always renders in the same order.

use petgraph::graph::{DiGraph, NodeIndex};
use std::cmp::Ordering;
use std::collections::HashMap;

use super::dependency::Dependency;
use super::project::{FilterType, Project, ProjectId};

/// Errors raised by registry operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// A project root was empty.
    #[error("empty root not supported (name: '{name}')")]
    EmptyRoot { name: String },

    /// A project name was empty.
    #[error("empty name not supported (root: '{root}')")]
    EmptyName { root: String },
}

/// Result type alias for registry operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Registry of every project known to one analysis run.
///
/// # Example
///
/// ```rust
/// use archscope::graph::{FilterType, Projects, ProjectType};
///
/// let mut projects = Projects::new();
/// let app = projects.get("/repo", ":app").unwrap();
/// let core = projects.get("/repo", ":core").unwrap();
/// projects[app].project_type = ProjectType::Code;
/// projects[core].project_type = ProjectType::Code;
///
/// projects.add_dependency(app, core);
///
/// assert_eq!(projects.get("/repo", ":app").unwrap(), app);
/// assert_eq!(projects.list_dependencies(app, FilterType::All).len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Projects {
    all: Vec<Project>,
    index: HashMap<(String, String), ProjectId>,
}

impl Projects {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the project for `(root, name)`, creating it on first use.
    ///
    /// # Errors
    ///
    /// Fails with [`GraphError::EmptyRoot`] or [`GraphError::EmptyName`] if
    /// either part of the key is empty.
    pub fn get(&mut self, root: &str, name: &str) -> GraphResult<ProjectId> {
        validate_key(root, name)?;

        if let Some(&id) = self.index.get(&(root.to_string(), name.to_string())) {
            return Ok(id);
        }

        let id = ProjectId::from_index(self.all.len());
        self.all.push(Project::new(root, name));
        self.index.insert((root.to_string(), name.to_string()), id);
        Ok(id)
    }

    /// Like [`get`](Self::get), returning the project itself.
    pub fn get_mut(&mut self, root: &str, name: &str) -> GraphResult<&mut Project> {
        let id = self.get(root, name)?;
        Ok(&mut self.all[id.index()])
    }

    /// Looks up a project without creating it.
    pub fn find(&self, root: &str, name: &str) -> Option<ProjectId> {
        self.index
            .get(&(root.to_string(), name.to_string()))
            .copied()
    }

    /// Returns the project behind `id`, if it belongs to this registry.
    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.all.get(id.index())
    }

    pub fn project_mut(&mut self, id: ProjectId) -> Option<&mut Project> {
        self.all.get_mut(id.index())
    }

    /// Records that `source` depends on `target`.
    ///
    /// The edge is stored on `source` under the target's name. An edge
    /// previously stored under that name is replaced, config included.
    ///
    /// # Panics
    ///
    /// Panics if either id does not belong to this registry.
    pub fn add_dependency(&mut self, source: ProjectId, target: ProjectId) -> &mut Dependency {
        let target_name = self[target].name().to_string();
        self[source].insert_dependency(&target_name, Dependency::new(source, target))
    }

    /// Lists projects sorted for presentation.
    ///
    /// Code and database projects come before external dependencies; within
    /// a group names compare with leading `:` stripped.
    pub fn list_projects(&self, filter: FilterType) -> Vec<&Project> {
        let mut result: Vec<&Project> = self
            .all
            .iter()
            .filter(|p| filter.accepts(p.project_type))
            .collect();

        result.sort_by(|a, b| compare_projects(a, b));
        result
    }

    /// Like [`list_projects`](Self::list_projects), returning handles.
    pub fn list_project_ids(&self, filter: FilterType) -> Vec<ProjectId> {
        let mut result: Vec<ProjectId> = self
            .ids()
            .filter(|&id| filter.accepts(self[id].project_type))
            .collect();

        result.sort_by(|&a, &b| compare_projects(&self[a], &self[b]));
        result
    }

    /// Lists the outgoing edges of `source`, sorted by target.
    ///
    /// With [`FilterType::ExcludeExternal`], edges pointing at external
    /// dependencies are dropped.
    pub fn list_dependencies(&self, source: ProjectId, filter: FilterType) -> Vec<&Dependency> {
        let Some(project) = self.project(source) else {
            return Vec::new();
        };

        let mut result: Vec<&Dependency> = project
            .dependencies()
            .filter(|d| filter.accepts(self[d.target()].project_type))
            .collect();

        self.sort_dependencies(&mut result);
        result
    }

    /// Lists every edge in the registry, sorted by source then target.
    ///
    /// With [`FilterType::ExcludeExternal`], edges touching an external
    /// dependency on either end are dropped.
    pub fn list_all_dependencies(&self, filter: FilterType) -> Vec<&Dependency> {
        let mut result: Vec<&Dependency> = self
            .all
            .iter()
            .filter(|p| filter.accepts(p.project_type))
            .flat_map(|p| p.dependencies())
            .filter(|d| filter.accepts(self[d.target()].project_type))
            .collect();

        self.sort_dependencies(&mut result);
        result
    }

    fn sort_dependencies(&self, deps: &mut [&Dependency]) {
        deps.sort_by(|a, b| {
            compare_projects(&self[a.source()], &self[b.source()])
                .then_with(|| compare_projects(&self[a.target()], &self[b.target()]))
        });
    }

    /// Builds a petgraph view of the listed projects and edges.
    ///
    /// Node weights are project ids, in listing order.
    pub fn to_petgraph(&self, filter: FilterType) -> DiGraph<ProjectId, ()> {
        let ids = self.list_project_ids(filter);
        let mut graph = DiGraph::with_capacity(ids.len(), ids.len());
        let mut nodes: HashMap<ProjectId, NodeIndex> = HashMap::with_capacity(ids.len());

        for id in ids {
            nodes.insert(id, graph.add_node(id));
        }

        for dep in self.list_all_dependencies(filter) {
            if let (Some(&from), Some(&to)) = (nodes.get(&dep.source()), nodes.get(&dep.target())) {
                graph.add_edge(from, to, ());
            }
        }

        graph
    }

    /// Iterates over every id in creation order.
    pub fn ids(&self) -> impl Iterator<Item = ProjectId> {
        (0..self.all.len()).map(ProjectId::from_index)
    }

    /// Returns the number of projects.
    pub fn len(&self) -> usize {
        self.all.len()
    }

    /// Checks if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }

    /// Returns the total number of edges across all projects.
    pub fn dependency_count(&self) -> usize {
        self.all.iter().map(Project::dependency_count).sum()
    }

    /// Renders an edge as `source -> target`.
    pub fn describe(&self, dep: &Dependency) -> String {
        format!("{} -> {}", self[dep.source()], self[dep.target()])
    }
}

impl std::ops::Index<ProjectId> for Projects {
    type Output = Project;

    fn index(&self, id: ProjectId) -> &Project {
        &self.all[id.index()]
    }
}

impl std::ops::IndexMut<ProjectId> for Projects {
    fn index_mut(&mut self, id: ProjectId) -> &mut Project {
        &mut self.all[id.index()]
    }
}

fn validate_key(root: &str, name: &str) -> GraphResult<()> {
    if root.is_empty() {
        return Err(GraphError::EmptyRoot {
            name: name.to_string(),
        });
    }
    if name.is_empty() {
        return Err(GraphError::EmptyName {
            root: root.to_string(),
        });
    }
    Ok(())
}

fn compare_projects(a: &Project, b: &Project) -> Ordering {
    a.sort_key().cmp(&b.sort_key())
}
