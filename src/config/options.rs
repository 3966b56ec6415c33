//! Build options: `OS`, `libdirs`, `includedirs`, `boostsuffix`.
//!
//! Options are layered, later layers winning:
//!
//! 1. `options:` in the config file
//! 2. `DEPPROBE_*` environment variables / `--os`-style flags
//! 3. `KEY=VALUE` assignments on the command line (`OS=win32 libdirs=/a:/b`)
//!
//! Search path options append to what earlier layers set; `OS` and
//! `boostsuffix` replace it.

use std::path::PathBuf;

use crate::config::interpolation::InterpolationContext;
use crate::config::schema::OptionsConfig;
use crate::error::{ProbeError, Result};
use crate::platform::Platform;

/// Resolved build options for one configuration pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub os: Option<String>,
    pub libdirs: Vec<PathBuf>,
    pub includedirs: Vec<PathBuf>,
    pub boostsuffix: String,
}

/// Overrides gathered from CLI flags and their environment variables.
#[derive(Debug, Clone, Default)]
pub struct OptionOverrides {
    pub os: Option<String>,
    pub libdirs: Option<String>,
    pub includedirs: Option<String>,
    pub boostsuffix: Option<String>,
    /// Trailing `KEY=VALUE` arguments, applied last.
    pub assignments: Vec<String>,
}

impl BuildOptions {
    /// Start from the config file's `options:` section.
    pub fn from_config(config: &OptionsConfig) -> Self {
        Self {
            os: config.os.clone(),
            libdirs: config.libdirs.clone(),
            includedirs: config.includedirs.clone(),
            boostsuffix: config.boostsuffix.clone().unwrap_or_default(),
        }
    }

    /// Apply flag/env overrides, then `KEY=VALUE` assignments.
    pub fn apply_overrides(&mut self, overrides: &OptionOverrides) -> Result<()> {
        if let Some(os) = &overrides.os {
            self.set("OS", os)?;
        }
        if let Some(libdirs) = &overrides.libdirs {
            self.set("libdirs", libdirs)?;
        }
        if let Some(includedirs) = &overrides.includedirs {
            self.set("includedirs", includedirs)?;
        }
        if let Some(suffix) = &overrides.boostsuffix {
            self.set("boostsuffix", suffix)?;
        }
        for assignment in &overrides.assignments {
            let (key, value) = parse_assignment(assignment)?;
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Set a single option by its build-tool name (case-insensitive).
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key.to_ascii_lowercase().as_str() {
            "os" => self.os = Some(value.to_string()),
            "libdirs" => self.libdirs.extend(parse_path_list(value)),
            "includedirs" => self.includedirs.extend(parse_path_list(value)),
            "boostsuffix" => self.boostsuffix = value.to_string(),
            _ => {
                return Err(ProbeError::InvalidOption {
                    message: format!(
                        "unknown option '{}' (expected OS, libdirs, includedirs or boostsuffix)",
                        key
                    ),
                })
            }
        }
        tracing::debug!("option {} = {}", key, value);
        Ok(())
    }

    /// Variables available to `${...}` in dependency manifests.
    pub fn interpolation_context(&self, platform: Platform) -> InterpolationContext {
        InterpolationContext::new()
            .with("boostsuffix", self.boostsuffix.clone())
            .with(
                "os",
                self.os.clone().unwrap_or_else(|| platform.as_str().to_string()),
            )
            .with("platform", platform.as_str())
    }
}

/// Split `KEY=VALUE`.
pub fn parse_assignment(arg: &str) -> Result<(&str, &str)> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => Err(ProbeError::InvalidOption {
            message: format!("expected KEY=VALUE, got '{}'", arg),
        }),
    }
}

/// Split a path list on the host path separator and on commas.
pub fn parse_path_list(value: &str) -> Vec<PathBuf> {
    value
        .split(',')
        .flat_map(|part| std::env::split_paths(part).collect::<Vec<_>>())
        .filter(|p| !p.as_os_str().is_empty())
        .collect()
}
