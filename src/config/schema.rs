//! Configuration schema types.
//!
//! These types mirror `.depprobe/config.yml` and the embedded preset
//! manifests.
//!
//! ```yaml
//! preset: spep
//! options:
//!   boostsuffix: -gcc41-mt
//!   includedirs: [/opt/xerces/include]
//! toolchain:
//!   mode: search
//! dependencies:
//!   - name: curl
//!     header: curl/curl.h
//!     library: curl
//!     language: c
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::interpolation::{resolve_string, InterpolationContext};
use crate::error::Result;
use crate::probe::{DependencySpec, Language};

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Built-in manifest whose dependencies come first.
    pub preset: Option<String>,

    /// Defaults for the build options.
    pub options: OptionsConfig,

    /// Compiler selection and flags.
    pub toolchain: ToolchainConfig,

    /// Declared dependencies, in probe order.
    pub dependencies: Vec<DependencyConfig>,
}

/// Build option defaults (`OS`, `libdirs`, `includedirs`, `boostsuffix`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsConfig {
    pub os: Option<String>,
    pub libdirs: Vec<PathBuf>,
    pub includedirs: Vec<PathBuf>,
    pub boostsuffix: Option<String>,
}

/// How dependencies are probed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ProbeMode {
    /// Compile (and link) a trivial test program per dependency.
    #[default]
    Compile,
    /// Look for headers and library files on the search paths only.
    Search,
}

impl ProbeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeMode::Compile => "compile",
            ProbeMode::Search => "search",
        }
    }
}

/// Toolchain section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolchainConfig {
    pub mode: ProbeMode,
    /// C compiler (defaults to `CC`, then the platform default).
    pub cc: Option<String>,
    /// C++ compiler (defaults to `CXX`, then the platform default).
    pub cxx: Option<String>,
    pub cflags: Vec<String>,
    pub cxxflags: Vec<String>,
    pub linkflags: Vec<String>,
    pub defines: Vec<String>,
}

/// A dependency as written in YAML, before interpolation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependencyConfig {
    pub name: String,
    pub header: String,
    #[serde(default)]
    pub library: Option<String>,
    #[serde(default)]
    pub language: Language,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default)]
    pub windows_header_only: bool,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_required() -> bool {
    true
}

impl DependencyConfig {
    /// Interpolate variables and produce the immutable probe spec.
    pub fn resolve(&self, ctx: &InterpolationContext) -> Result<DependencySpec> {
        Ok(DependencySpec {
            name: self.name.clone(),
            header: resolve_string(&self.header, ctx)?,
            library: self
                .library
                .as_deref()
                .map(|lib| resolve_string(lib, ctx))
                .transpose()?,
            language: self.language,
            required: self.required,
            windows_header_only: self.windows_header_only,
            description: self.description.clone(),
        })
    }
}

/// An embedded preset manifest.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PresetManifest {
    pub description: Option<String>,
    /// Parent preset whose dependencies come first.
    pub extends: Option<String>,
    pub dependencies: Vec<DependencyConfig>,
}
