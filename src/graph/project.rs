//! Project nodes of the dependency graph.

use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use super::config_store::ConfigStore;
use super::dependency::Dependency;
use super::size::Size;

/// Config key marking a project as ignored by downstream tooling.
pub const IGNORE_KEY: &str = "ignore";

/// Handle to a project stored in a [`Projects`](super::Projects) registry.
///
/// Two handles from the same registry are equal exactly when they refer to
/// the same project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId(usize);

impl ProjectId {
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Position of the project in its registry's storage.
    pub fn index(self) -> usize {
        self.0
    }
}

/// What kind of entity a project represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    /// Code outside the analyzed system (third-party libraries)
    #[default]
    ExternalDependency,
    /// A first-party module
    Code,
    /// A database table
    Database,
}

impl ProjectType {
    /// Returns a short label for the project type.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectType::ExternalDependency => "external",
            ProjectType::Code => "code",
            ProjectType::Database => "database",
        }
    }

    /// Sort precedence: first-party entities come before external ones.
    ///
    /// Database ranks with Code on purpose. Comparing Database by name
    /// against both Code and external entities would not be transitive, so
    /// the listing order would depend on the input order.
    pub(crate) fn rank(&self) -> u8 {
        match self {
            ProjectType::Code | ProjectType::Database => 0,
            ProjectType::ExternalDependency => 1,
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectType::ExternalDependency => write!(f, "ExternalDependency"),
            ProjectType::Code => write!(f, "Code"),
            ProjectType::Database => write!(f, "Database"),
        }
    }
}

/// Controls which entities a listing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterType {
    /// Everything
    #[default]
    All,
    /// Drop external dependencies (and edges pointing at them)
    ExcludeExternal,
}

impl FilterType {
    pub(crate) fn accepts(&self, project_type: ProjectType) -> bool {
        match self {
            FilterType::All => true,
            FilterType::ExcludeExternal => project_type != ProjectType::ExternalDependency,
        }
    }
}

/// A module, package or table in the graph, identified by `(root, name)`.
///
/// Projects are created by [`Projects::get`](super::Projects::get) and live
/// as long as their registry. Outgoing edges, size buckets and config values
/// accumulate across imports.
#[derive(Debug, Clone)]
pub struct Project {
    root: String,
    name: String,

    /// Segments of `name` used to build a shortened display name
    pub name_parts: Vec<String>,
    pub project_type: ProjectType,

    pub root_dir: Option<PathBuf>,
    pub dir: Option<PathBuf>,
    pub project_file: Option<PathBuf>,

    /// Directory where persisted data for this project lives
    pub data_dir: Option<PathBuf>,

    dependencies: HashMap<String, Dependency>,
    sizes: HashMap<String, Size>,
    config: ConfigStore,
}

impl Project {
    pub(crate) fn new(root: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            name: name.into(),
            name_parts: Vec::new(),
            project_type: ProjectType::default(),
            root_dir: None,
            dir: None,
            project_file: None,
            data_dir: None,
            dependencies: HashMap::new(),
            sizes: HashMap::new(),
            config: ConfigStore::new(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `root:name`.
    pub fn full_name(&self) -> String {
        format!("{}:{}", self.root, self.name)
    }

    pub fn is_code(&self) -> bool {
        self.project_type == ProjectType::Code
    }

    pub fn is_external_dependency(&self) -> bool {
        self.project_type == ProjectType::ExternalDependency
    }

    pub fn is_database(&self) -> bool {
        self.project_type == ProjectType::Database
    }

    /// Returns true if the `ignore` config key holds a truthy value.
    pub fn is_ignored(&self) -> bool {
        is_truthy(self.get_config(IGNORE_KEY))
    }

    /// Returns a shortened display name built from all name parts.
    pub fn simple_name(&self) -> String {
        self.level_simple_name(0)
    }

    /// Returns a shortened display name built from the first `level` name
    /// parts (`0` means all of them).
    ///
    /// Leading parts that prefix the following part are dropped, so
    /// `["acme", "acme-billing", "acme-billing-api"]` becomes
    /// `"acme-billing-api"`. The full name is returned whenever the result
    /// would not be shorter.
    pub fn level_simple_name(&self, level: usize) -> String {
        if self.name_parts.is_empty() {
            return self.name.clone();
        }

        let mut parts: &[String] = &self.name_parts;
        if level > 0 && level < parts.len() {
            parts = &parts[..level];
        }

        let result = simplify_prefixes(parts).join(":");

        if self.name.len() <= result.len() {
            return self.name.clone();
        }

        result
    }

    /// Overwrites the size bucket stored under `category`.
    pub fn add_size(&mut self, category: impl Into<String>, size: Size) {
        self.sizes.insert(category.into(), size);
    }

    /// Returns the sum of every size bucket.
    pub fn get_size(&self) -> Size {
        let mut total = Size::new();
        for size in self.sizes.values() {
            total.add(size);
        }
        total
    }

    /// Returns the size bucket for `category`, or a zero size if absent.
    pub fn get_size_of(&self, category: &str) -> Size {
        self.sizes.get(category).cloned().unwrap_or_default()
    }

    /// All size buckets, keyed by category.
    pub fn sizes(&self) -> &HashMap<String, Size> {
        &self.sizes
    }

    /// Sets a config value; an empty value removes the key.
    ///
    /// Returns `true` if the stored value changed.
    pub fn set_config(&mut self, key: &str, value: &str) -> bool {
        self.config.set(key, value)
    }

    /// Returns the config value, or `""` if absent.
    pub fn get_config(&self, key: &str) -> &str {
        self.config.get(key)
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    /// Outgoing edges in storage order. Use
    /// [`Projects::list_dependencies`](super::Projects::list_dependencies)
    /// for a filtered, sorted listing.
    pub fn dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies.values()
    }

    /// Returns the outgoing edge to the target with the given name.
    pub fn dependency_to(&self, target_name: &str) -> Option<&Dependency> {
        self.dependencies.get(target_name)
    }

    pub fn dependency_to_mut(&mut self, target_name: &str) -> Option<&mut Dependency> {
        self.dependencies.get_mut(target_name)
    }

    pub fn dependency_count(&self) -> usize {
        self.dependencies.len()
    }

    /// Stores `dependency` keyed by its target's name, replacing any edge
    /// already stored under that name.
    pub(crate) fn insert_dependency(
        &mut self,
        target_name: &str,
        dependency: Dependency,
    ) -> &mut Dependency {
        match self.dependencies.entry(target_name.to_string()) {
            Entry::Occupied(mut entry) => {
                entry.insert(dependency);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(dependency),
        }
    }

    /// Key giving the listing order: first-party before external, then the
    /// name without leading colons. The full name and root break ties.
    pub(crate) fn sort_key(&self) -> (u8, &str, &str, &str) {
        (
            self.project_type.rank(),
            self.name.trim_start_matches(':'),
            &self.name,
            &self.root,
        )
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.project_type)
    }
}

/// Drops leading parts while the next part starts with the current one.
fn simplify_prefixes(mut parts: &[String]) -> &[String] {
    while parts.len() > 1 && parts[1].starts_with(parts[0].as_str()) {
        parts = &parts[1..];
    }
    parts
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "1" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_parts(name: &str, parts: &[&str]) -> Project {
        let mut project = Project::new("root", name);
        project.name_parts = parts.iter().map(|p| p.to_string()).collect();
        project
    }

    #[test]
    fn test_new_project_defaults() {
        let project = Project::new("/repo", ":app");
        assert_eq!(project.root(), "/repo");
        assert_eq!(project.name(), ":app");
        assert_eq!(project.project_type, ProjectType::ExternalDependency);
        assert_eq!(project.dependency_count(), 0);
        assert!(project.get_size().is_zero());
        assert!(!project.is_ignored());
    }

    #[test]
    fn test_full_name_and_display() {
        let mut project = Project::new("shop", "orders");
        project.project_type = ProjectType::Database;
        assert_eq!(project.full_name(), "shop:orders");
        assert_eq!(project.to_string(), "orders[Database]");
    }

    #[test]
    fn test_simple_name_without_parts_is_name() {
        let project = Project::new("root", ":very:long:name");
        assert_eq!(project.simple_name(), ":very:long:name");
    }

    #[test]
    fn test_simple_name_collapses_prefixes() {
        let project = with_parts(
            ":faire:faire-sub:faire-sub-x",
            &["faire", "faire-sub", "faire-sub-x"],
        );
        assert_eq!(project.simple_name(), "faire-sub-x");
    }

    #[test]
    fn test_simple_name_without_shared_prefix() {
        let project = with_parts(":a:b", &["a", "b"]);
        assert_eq!(project.simple_name(), "a:b");
    }

    #[test]
    fn test_simple_name_falls_back_when_not_shorter() {
        let project = with_parts("a:b", &["a", "b"]);
        assert_eq!(project.simple_name(), "a:b");

        let project = with_parts("ab", &["alpha", "beta"]);
        assert_eq!(project.simple_name(), "ab");
    }

    #[test]
    fn test_level_simple_name_truncates() {
        let project = with_parts(":core:data:cache", &["core", "data", "cache"]);
        assert_eq!(project.level_simple_name(1), "core");
        assert_eq!(project.level_simple_name(2), "core:data");
        assert_eq!(project.level_simple_name(0), "core:data:cache");
        assert_eq!(project.level_simple_name(10), "core:data:cache");
    }

    #[test]
    fn test_level_simple_name_collapses_after_truncation() {
        let project = with_parts(":web:web-api:handlers", &["web", "web-api", "handlers"]);
        assert_eq!(project.level_simple_name(2), "web-api");
        assert_eq!(project.simple_name(), "web-api:handlers");
    }

    #[test]
    fn test_simple_name_never_longer_than_name() {
        let cases: &[(&str, &[&str])] = &[
            ("x", &["xxxxxxxx", "yyyyyyyy"]),
            (":a:b:c", &["a", "b", "c"]),
            ("org:org-sub", &["org", "org-sub"]),
        ];
        for (name, parts) in cases {
            let project = with_parts(name, parts);
            assert!(project.simple_name().len() <= name.len());
        }
    }

    #[test]
    fn test_add_size_overwrites_category() {
        let mut project = Project::new("root", "app");
        project.add_size("source", Size { lines: 10, ..Size::default() });
        project.add_size("source", Size { lines: 3, ..Size::default() });

        assert_eq!(project.get_size_of("source").lines, 3);
        assert_eq!(project.get_size().lines, 3);
    }

    #[test]
    fn test_get_size_sums_categories() {
        let mut project = Project::new("root", "app");
        project.add_size("main", Size { lines: 10, files: 2, ..Size::default() });
        project.add_size("test", Size { lines: 5, files: 1, ..Size::default() });

        let total = project.get_size();
        assert_eq!(total.lines, 15);
        assert_eq!(total.files, 3);
    }

    #[test]
    fn test_get_size_of_missing_is_zero() {
        let project = Project::new("root", "app");
        assert!(project.get_size_of("missing").is_zero());
    }

    #[test]
    fn test_config_empty_value_equals_unset() {
        let mut project = Project::new("root", "app");
        assert!(project.set_config("owner", "team-a"));
        assert!(project.set_config("owner", ""));
        assert_eq!(project.get_config("owner"), "");
        assert_eq!(project.get_config("never-set"), "");
    }

    #[test]
    fn test_is_ignored() {
        let mut project = Project::new("root", "app");
        project.set_config(IGNORE_KEY, "true");
        assert!(project.is_ignored());

        project.set_config(IGNORE_KEY, "Yes");
        assert!(project.is_ignored());

        project.set_config(IGNORE_KEY, "false");
        assert!(!project.is_ignored());
    }

    #[test]
    fn test_filter_accepts() {
        assert!(FilterType::All.accepts(ProjectType::ExternalDependency));
        assert!(!FilterType::ExcludeExternal.accepts(ProjectType::ExternalDependency));
        assert!(FilterType::ExcludeExternal.accepts(ProjectType::Code));
        assert!(FilterType::ExcludeExternal.accepts(ProjectType::Database));
    }

    #[test]
    fn test_project_type_label() {
        assert_eq!(ProjectType::ExternalDependency.label(), "external");
        assert_eq!(ProjectType::Code.label(), "code");
        assert_eq!(ProjectType::Database.label(), "database");
    }
}
