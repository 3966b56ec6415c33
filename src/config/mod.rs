//! Configuration loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Layer merging in [`merger`]
//! - Build options (`OS`, `libdirs`, ...) in [`options`]
//! - `${var}` interpolation in [`interpolation`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use depprobe::config::load_merged_config;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let dir = temp.path().join(".depprobe");
//! fs::create_dir_all(&dir).unwrap();
//! fs::write(dir.join("config.yml"), "preset: spep").unwrap();
//!
//! let config = load_merged_config(temp.path()).unwrap();
//! assert_eq!(config.preset.as_deref(), Some("spep"));
//! ```
//!
//! # Configuration File Locations
//!
//! 1. Project config (`.depprobe/config.yml`)
//! 2. Local overrides (`.depprobe/config.local.yml`)

pub mod interpolation;
pub mod loader;
pub mod merger;
pub mod options;
pub mod schema;
pub mod validator;

pub use interpolation::{
    extract_variables, parse_interpolation, resolve_string, InterpolationContext, Segment,
};
pub use loader::{
    find_project_root, load_config, load_config_file, load_config_value, load_merged_config,
    ConfigPaths, CONFIG_DIR,
};
pub use merger::{deep_merge, merge_configs, merge_dependencies};
pub use options::{parse_assignment, parse_path_list, BuildOptions, OptionOverrides};
pub use schema::{
    DependencyConfig, OptionsConfig, PresetManifest, ProbeConfig, ProbeMode, ToolchainConfig,
};
pub use validator::{validate, validate_dependencies, ValidationError};
