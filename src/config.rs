//! Configuration file support for archscope.
//!
//! Provides YAML-based configuration through `archscope.config.yml` files,
//! including data structures, file loading, validation, and applying
//! per-project settings to a registry.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::export::ExportFormat;
use crate::graph::Projects;

pub const CONFIG_FILENAME: &str = "archscope.config.yml";

/// Errors that can occur while loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Config values for one project: key -> value.
pub type ProjectSettings = BTreeMap<String, String>;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Root identifier used for Gradle reports
    pub root: Option<String>,
    pub format: Option<String>,
    pub exclude_external: Option<bool>,
    pub simple_names: Option<bool>,
    /// Per-project config, as `root -> name -> settings`
    #[serde(default)]
    pub projects: BTreeMap<String, BTreeMap<String, ProjectSettings>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// Parses and validates a config from YAML text.
    pub fn from_yaml(content: &str, path: &Path) -> ConfigResult<Self> {
        let config: ConfigFile =
            serde_yaml_ng::from_str(content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;
        config.warn_unknown_fields();
        Ok(config)
    }

    /// The configured export format, if any.
    pub fn export_format(&self) -> ConfigResult<Option<ExportFormat>> {
        self.format
            .as_deref()
            .map(|f| f.parse::<ExportFormat>().map_err(ConfigError::Invalid))
            .transpose()
    }

    /// Validate the loaded configuration.
    fn validate(&self) -> ConfigResult<()> {
        self.export_format()?;

        if self.root.as_deref().is_some_and(|r| r.trim().is_empty()) {
            return Err(ConfigError::Invalid("root must not be empty".to_string()));
        }

        for (root, names) in &self.projects {
            if root.is_empty() {
                return Err(ConfigError::Invalid(
                    "projects: root keys must not be empty".to_string(),
                ));
            }
            if names.keys().any(|name| name.is_empty()) {
                return Err(ConfigError::Invalid(format!(
                    "projects.{}: project names must not be empty",
                    root
                )));
            }
        }

        Ok(())
    }

    /// Warn about unknown fields in the config file.
    fn warn_unknown_fields(&self) {
        for key in self.unknown_fields.keys() {
            warn!(field = %key, "unknown config field will be ignored");
        }
    }

    /// Applies the per-project settings to projects already in the registry.
    ///
    /// Settings for projects the registry does not contain are skipped with
    /// a warning. Returns the number of values that changed.
    pub fn apply_project_settings(&self, projects: &mut Projects) -> usize {
        let mut changed = 0;

        for (root, names) in &self.projects {
            for (name, settings) in names {
                let Some(id) = projects.find(root, name) else {
                    warn!(root = %root, name = %name, "config refers to unknown project");
                    continue;
                };

                for (key, value) in settings {
                    if projects[id].set_config(key, value) {
                        changed += 1;
                    }
                }
            }
        }

        changed
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> ConfigResult<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    ConfigFile::from_yaml(&content, path)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> ConfigResult<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    load_config_from_path(&config_path).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
root: /home/me/shop
format: dot
exclude_external: true
simple_names: false
projects:
  /home/me/shop:
    ":legacy":
      ignore: "true"
      owner: payments
  shop:
    audit_log:
      ignore: "yes"
"#;

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.yml");
        fs::write(&config_path, SAMPLE).unwrap();

        let config = load_config_from_path(&config_path).unwrap();
        assert_eq!(config.root.as_deref(), Some("/home/me/shop"));
        assert_eq!(config.export_format().unwrap(), Some(ExportFormat::Dot));
        assert_eq!(config.exclude_external, Some(true));
        assert_eq!(config.simple_names, Some(false));
        assert_eq!(
            config.projects["/home/me/shop"][":legacy"]["owner"],
            "payments"
        );
        assert!(config.unknown_fields.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_config_from_path(&dir.path().join("nope.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = ConfigFile::from_yaml("root: [unclosed", Path::new("x.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_invalid_format() {
        let err = ConfigFile::from_yaml("format: xml", Path::new("x.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn test_empty_root() {
        let err = ConfigFile::from_yaml("root: '  '", Path::new("x.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_unknown_fields_are_kept() {
        let config = ConfigFile::from_yaml("colour: blue\n", Path::new("x.yml")).unwrap();
        assert!(config.unknown_fields.contains_key("colour"));
    }

    #[test]
    fn test_discover_config() {
        let dir = TempDir::new().unwrap();
        assert!(discover_config(dir.path()).unwrap().is_none());

        fs::write(dir.path().join(CONFIG_FILENAME), "format: csv\n").unwrap();
        let config = discover_config(dir.path()).unwrap().unwrap();
        assert_eq!(config.export_format().unwrap(), Some(ExportFormat::Csv));
    }

    #[test]
    fn test_apply_project_settings() {
        let config = ConfigFile::from_yaml(SAMPLE, Path::new("x.yml")).unwrap();
        let mut projects = Projects::new();
        let legacy = projects.get("/home/me/shop", ":legacy").unwrap();

        // audit_log is not in the registry and is skipped
        assert_eq!(config.apply_project_settings(&mut projects), 2);
        assert!(projects[legacy].is_ignored());
        assert_eq!(projects[legacy].get_config("owner"), "payments");
        assert_eq!(projects.len(), 1);

        // Applying again changes nothing
        assert_eq!(config.apply_project_settings(&mut projects), 0);
    }
}
