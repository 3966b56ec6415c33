//! Configuration file discovery and loading.
//!
//! This module finds and loads configuration files in priority order.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::merger::merge_configs;
use crate::config::schema::ProbeConfig;
use crate::error::{ProbeError, Result};

/// Directory holding project configuration.
pub const CONFIG_DIR: &str = ".depprobe";

/// Paths to configuration files in merge order (later overrides earlier).
///
/// 1. Project config (`.depprobe/config.yml`)
/// 2. Local overrides (`.depprobe/config.local.yml`)
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub project: Option<PathBuf>,
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        let dir = project_root.join(CONFIG_DIR);
        Self {
            project: existing(dir.join("config.yml")),
            project_local: existing(dir.join("config.local.yml")),
        }
    }

    /// All existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        self.project.iter().chain(self.project_local.iter()).collect()
    }

    pub fn has_project_config(&self) -> bool {
        self.project.is_some()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Find the project root by walking up from `start`.
///
/// A `.depprobe` directory wins over a `.git` directory at the same level.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_DIR).is_dir() || current.join(".git").exists() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Load a config file as a raw YAML value (for merging).
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = read_config(path)?;
    // An empty file is an empty config, not a null document.
    if content.trim().is_empty() {
        return Ok(serde_yaml::Value::Mapping(Default::default()));
    }
    serde_yaml::from_str(&content).map_err(|e| ProbeError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and parse a single config file.
pub fn load_config_file(path: &Path) -> Result<ProbeConfig> {
    let value = load_config_value(path)?;
    parse_config_value(value, path)
}

/// Load and merge the project config with its local overrides.
///
/// # Errors
///
/// Returns `ConfigNotFound` if `.depprobe/config.yml` does not exist.
pub fn load_merged_config(project_root: &Path) -> Result<ProbeConfig> {
    let paths = ConfigPaths::discover(project_root);
    let primary = project_root.join(CONFIG_DIR).join("config.yml");

    if !paths.has_project_config() {
        return Err(ProbeError::ConfigNotFound { path: primary });
    }

    let values = paths
        .all_existing()
        .into_iter()
        .map(|p| load_config_value(p))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!("merging {} config layer(s)", values.len());
    parse_config_value(merge_configs(&values), &primary)
}

/// Load config with an optional path override.
///
/// An explicit path is loaded alone, without local overrides.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<ProbeConfig> {
    match config_override {
        Some(path) => load_config_file(path),
        None => load_merged_config(project_root),
    }
}

fn read_config(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ProbeError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ProbeError::Io(e)
        }
    })
}

fn parse_config_value(value: serde_yaml::Value, path: &Path) -> Result<ProbeConfig> {
    serde_yaml::from_value(value).map_err(|e| ProbeError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ProbeMode;
    use tempfile::TempDir;

    fn setup(config: &str, local: Option<&str>) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), config).unwrap();
        if let Some(local) = local {
            fs::write(dir.join("config.local.yml"), local).unwrap();
        }
        temp
    }

    #[test]
    fn discover_finds_project_and_local() {
        let temp = setup("", Some(""));
        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.has_project_config());
        assert!(paths.project_local.is_some());
        assert_eq!(paths.all_existing().len(), 2);
        assert!(paths.all_existing()[0].ends_with("config.yml"));
    }

    #[test]
    fn discover_returns_none_for_missing_configs() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::discover(temp.path());
        assert!(!paths.has_project_config());
        assert!(paths.all_existing().is_empty());
    }

    #[test]
    fn find_project_root_walks_up() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("src").join("spep");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir_all(temp.path().join(CONFIG_DIR)).unwrap();
        assert_eq!(find_project_root(&nested), Some(temp.path().to_path_buf()));
    }

    #[test]
    fn find_project_root_prefers_nearest_marker() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("modspep");
        fs::create_dir_all(nested.join(CONFIG_DIR)).unwrap();
        fs::create_dir_all(temp.path().join(".git")).unwrap();
        assert_eq!(find_project_root(&nested), Some(nested));
    }

    #[test]
    fn load_merged_config_applies_local_overrides() {
        let temp = setup(
            "preset: spep\ntoolchain:\n  mode: compile\n  cxx: g++\n",
            Some("toolchain:\n  mode: search\n"),
        );
        let config = load_merged_config(temp.path()).unwrap();
        assert_eq!(config.preset.as_deref(), Some("spep"));
        assert_eq!(config.toolchain.mode, ProbeMode::Search);
        assert_eq!(config.toolchain.cxx.as_deref(), Some("g++"));
    }

    #[test]
    fn load_merged_config_without_project_config_fails() {
        let temp = TempDir::new().unwrap();
        let err = load_merged_config(temp.path()).unwrap_err();
        assert!(matches!(err, ProbeError::ConfigNotFound { .. }));
    }

    #[test]
    fn empty_config_file_is_valid() {
        let temp = setup("", None);
        let config = load_merged_config(temp.path()).unwrap();
        assert!(config.dependencies.is_empty());
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = setup("dependencies: [unclosed", None);
        let err = load_merged_config(temp.path()).unwrap_err();
        assert!(matches!(err, ProbeError::ConfigParseError { .. }));
    }

    #[test]
    fn override_path_skips_local_layer() {
        let temp = setup("preset: saml2\n", Some("preset: spep\n"));
        let path = temp.path().join(CONFIG_DIR).join("config.yml");
        let config = load_config(temp.path(), Some(&path)).unwrap();
        assert_eq!(config.preset.as_deref(), Some("saml2"));
    }

    #[test]
    fn missing_override_path_is_not_found() {
        let temp = TempDir::new().unwrap();
        let err = load_config(temp.path(), Some(&temp.path().join("nope.yml"))).unwrap_err();
        assert!(matches!(err, ProbeError::ConfigNotFound { .. }));
    }
}
