//! JSON persistence of imported projects.
//!
//! Each project gets its own directory under the storage root, named after
//! its root and name, holding one file per concern:
//!
//! - `basic.json` - identity, type, paths and config
//! - `size.json` - size buckets by category
//! - `deps.json` - outgoing edges, sorted, with their config
//!
//! Writing any of these records the directory as the project's `data_dir`.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::graph::{ConfigStore, FilterType, ProjectId, ProjectType, Projects, Size};

pub const BASIC_INFO_FILE: &str = "basic.json";
pub const SIZE_FILE: &str = "size.json";
pub const DEPS_FILE: &str = "deps.json";

/// Errors that can occur while persisting projects.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The id does not belong to the registry.
    #[error("Unknown project id: {0:?}")]
    UnknownProject(ProjectId),

    /// Failed to create a directory or write a file.
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize project data.
    #[error("Failed to serialize {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Serialize)]
struct BasicInfoFile<'a> {
    root: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "no_parts")]
    name_parts: &'a [String],
    #[serde(rename = "type")]
    project_type: ProjectType,
    #[serde(skip_serializing_if = "Option::is_none")]
    root_dir: Option<&'a Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dir: Option<&'a Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    project_file: Option<&'a Path>,
    #[serde(skip_serializing_if = "no_config")]
    config: &'a ConfigStore,
}

#[derive(Serialize)]
struct DepsFile<'a> {
    dependencies: Vec<DepEntry<'a>>,
}

#[derive(Serialize)]
struct DepEntry<'a> {
    root: &'a str,
    name: &'a str,
    #[serde(skip_serializing_if = "no_config")]
    config: &'a ConfigStore,
}

fn no_config(config: &&ConfigStore) -> bool {
    config.is_empty()
}

fn no_parts(parts: &&[String]) -> bool {
    parts.is_empty()
}

/// Writes project data below a root directory.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Directory holding the files of `(root, name)`.
    pub fn project_dir(&self, root: &str, name: &str) -> PathBuf {
        self.dir.join(sanitize(root)).join(sanitize(name))
    }

    /// Writes `basic.json` for a project.
    pub fn write_basic_info(
        &self,
        projects: &mut Projects,
        id: ProjectId,
    ) -> StorageResult<PathBuf> {
        let project = projects.project(id).ok_or(StorageError::UnknownProject(id))?;
        let content = BasicInfoFile {
            root: project.root(),
            name: project.name(),
            name_parts: &project.name_parts,
            project_type: project.project_type,
            root_dir: project.root_dir.as_deref(),
            dir: project.dir.as_deref(),
            project_file: project.project_file.as_deref(),
            config: project.config(),
        };
        let dir = self.project_dir(project.root(), project.name());
        let path = write_json(&dir, BASIC_INFO_FILE, &content)?;

        projects[id].data_dir = Some(dir);
        Ok(path)
    }

    /// Writes `size.json` for a project.
    pub fn write_size(&self, projects: &mut Projects, id: ProjectId) -> StorageResult<PathBuf> {
        let project = projects.project(id).ok_or(StorageError::UnknownProject(id))?;
        let content: BTreeMap<&str, &Size> = project
            .sizes()
            .iter()
            .map(|(category, size)| (category.as_str(), size))
            .collect();
        let dir = self.project_dir(project.root(), project.name());
        let path = write_json(&dir, SIZE_FILE, &content)?;

        projects[id].data_dir = Some(dir);
        Ok(path)
    }

    /// Writes `deps.json` for a project.
    pub fn write_deps(&self, projects: &mut Projects, id: ProjectId) -> StorageResult<PathBuf> {
        let project = projects.project(id).ok_or(StorageError::UnknownProject(id))?;
        let content = DepsFile {
            dependencies: projects
                .list_dependencies(id, FilterType::All)
                .into_iter()
                .map(|dep| {
                    let target = &projects[dep.target()];
                    DepEntry {
                        root: target.root(),
                        name: target.name(),
                        config: dep.config(),
                    }
                })
                .collect(),
        };
        let dir = self.project_dir(project.root(), project.name());
        let path = write_json(&dir, DEPS_FILE, &content)?;

        projects[id].data_dir = Some(dir);
        Ok(path)
    }

    /// Writes all three files for a project.
    pub fn write_project(&self, projects: &mut Projects, id: ProjectId) -> StorageResult<()> {
        self.write_basic_info(projects, id)?;
        self.write_size(projects, id)?;
        self.write_deps(projects, id)?;
        Ok(())
    }
}

fn write_json<T: Serialize>(dir: &Path, file_name: &str, content: &T) -> StorageResult<PathBuf> {
    let path = dir.join(file_name);

    fs::create_dir_all(dir).map_err(|source| StorageError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let json = serde_json::to_string_pretty(content).map_err(|source| StorageError::Json {
        path: path.clone(),
        source,
    })?;

    fs::write(&path, json).map_err(|source| StorageError::Io {
        path: path.clone(),
        source,
    })?;

    debug!(path = %path.display(), "wrote project data");
    Ok(path)
}

/// Maps a project root or name to a single safe path component.
///
/// ASCII letters, digits, `-` and `.` are kept. Every other byte, `_`
/// included, becomes `_` followed by two hex digits, so distinct inputs
/// never share a directory. A component made only of dots is fully escaped.
fn sanitize(component: &str) -> String {
    if component.is_empty() {
        return "_".to_string();
    }

    let all_dots = component.bytes().all(|b| b == b'.');
    let mut cleaned = String::with_capacity(component.len());

    for byte in component.bytes() {
        let keep = byte.is_ascii_alphanumeric() || byte == b'-' || (byte == b'.' && !all_dots);
        if keep {
            cleaned.push(char::from(byte));
        } else {
            cleaned.push_str(&format!("_{:02x}", byte));
        }
    }

    cleaned
}
