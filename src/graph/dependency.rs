//! Directed "depends on" edges between projects.

use super::config_store::ConfigStore;
use super::project::ProjectId;

/// An edge from a source project to the project it depends on.
///
/// Edges are owned by their source project. Both endpoints are handles into
/// the [`Projects`](super::Projects) registry that created them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    source: ProjectId,
    target: ProjectId,
    config: ConfigStore,
}

impl Dependency {
    pub(crate) fn new(source: ProjectId, target: ProjectId) -> Self {
        Self {
            source,
            target,
            config: ConfigStore::new(),
        }
    }

    /// The dependent project.
    pub fn source(&self) -> ProjectId {
        self.source
    }

    /// The project depended upon.
    pub fn target(&self) -> ProjectId {
        self.target
    }

    /// Sets an edge-scoped config value; an empty value removes the key.
    ///
    /// Returns `true` if the stored value changed.
    pub fn set_config(&mut self, key: &str, value: &str) -> bool {
        self.config.set(key, value)
    }

    /// Returns the edge-scoped config value, or `""` if absent.
    pub fn get_config(&self, key: &str) -> &str {
        self.config.get(key)
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }
}
