//! Built-in dependency presets.
//!
//! Each preset is an embedded YAML manifest describing what one component
//! of the SAML2 stack needs installed. Presets may `extends` another preset;
//! the parent's dependencies come first and same-named entries are replaced.
//!
//! | Preset    | Component                      | Extends |
//! |-----------|--------------------------------|---------|
//! | `saml2`   | SAML2 library                  |         |
//! | `spep`    | SPEP library                   | `saml2` |
//! | `spepd`   | SPEP daemon                    | `spep`  |
//! | `modspep` | Apache httpd module            | `spep`  |
//!
//! # Example
//!
//! ```
//! use depprobe::presets::PresetRegistry;
//!
//! let registry = PresetRegistry::builtin().unwrap();
//! let deps = registry.resolve("spep").unwrap();
//! assert!(deps.iter().any(|d| d.name == "xerces-c"));
//! assert!(deps.iter().any(|d| d.name == "asio"));
//! ```

use std::collections::{BTreeMap, HashSet};

use crate::config::merger::merge_dependencies;
use crate::config::schema::{DependencyConfig, PresetManifest};
use crate::config::validator::validate;
use crate::error::{ProbeError, Result};

const MAX_EXTENDS_DEPTH: usize = 5;

const BUILTIN: &[(&str, &str)] = &[
    ("saml2", include_str!("saml2.yml")),
    ("spep", include_str!("spep.yml")),
    ("spepd", include_str!("spepd.yml")),
    ("modspep", include_str!("modspep.yml")),
];

/// Registry of named preset manifests.
#[derive(Debug, Clone, Default)]
pub struct PresetRegistry {
    presets: BTreeMap<String, PresetManifest>,
}

impl PresetRegistry {
    /// Registry holding the embedded presets.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::default();
        for (name, source) in BUILTIN {
            let manifest: PresetManifest =
                serde_yaml::from_str(source).map_err(|e| ProbeError::ConfigParseError {
                    path: format!("<preset {}>", name).into(),
                    message: e.to_string(),
                })?;
            registry.insert(*name, manifest);
        }
        Ok(registry)
    }

    pub fn insert(&mut self, name: impl Into<String>, manifest: PresetManifest) {
        self.presets.insert(name.into(), manifest);
    }

    pub fn get(&self, name: &str) -> Option<&PresetManifest> {
        self.presets.get(name)
    }

    /// Preset names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    /// Resolve a preset to its flattened dependency list, parents first.
    ///
    /// # Errors
    ///
    /// `UnknownPreset` for a missing name anywhere in the chain, and
    /// `ConfigValidationError` for cycles or chains deeper than the limit.
    pub fn resolve(&self, name: &str) -> Result<Vec<DependencyConfig>> {
        let mut visiting = HashSet::new();
        self.resolve_recursive(name, &mut visiting, 0)
    }

    fn resolve_recursive(
        &self,
        name: &str,
        visiting: &mut HashSet<String>,
        depth: usize,
    ) -> Result<Vec<DependencyConfig>> {
        if depth > MAX_EXTENDS_DEPTH {
            return Err(ProbeError::ConfigValidationError {
                message: format!(
                    "Preset chain exceeds max depth of {} at '{}'",
                    MAX_EXTENDS_DEPTH, name
                ),
            });
        }
        if !visiting.insert(name.to_string()) {
            return Err(ProbeError::ConfigValidationError {
                message: format!("Circular preset extends detected at '{}'", name),
            });
        }

        let manifest = self.get(name).ok_or_else(|| ProbeError::UnknownPreset {
            name: name.to_string(),
        })?;

        validate(&manifest.dependencies)?;

        let base = match &manifest.extends {
            Some(parent) => self.resolve_recursive(parent, visiting, depth + 1)?,
            None => Vec::new(),
        };

        visiting.remove(name);
        Ok(merge_dependencies(base, &manifest.dependencies))
    }
}
