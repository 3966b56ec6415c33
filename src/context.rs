//! Build context: the environment a configuration pass probes against.
//!
//! [`BuildContext`] is the explicit value handed to the prober. It holds
//! everything the original build scripts kept in their global environment
//! object: search paths, flags, defines, and compilers. It is assembled once
//! from the config, the build options, and the selected [`Platform`].

use std::path::PathBuf;

use serde::Serialize;

use crate::config::options::BuildOptions;
use crate::config::schema::{ProbeConfig, ProbeMode};
use crate::error::Result;
use crate::platform::Platform;
use crate::probe::Language;

/// Resolved environment for one configuration pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildContext {
    pub platform: Platform,
    pub mode: ProbeMode,
    /// User include directories, passed to the compiler and searched first.
    pub include_dirs: Vec<PathBuf>,
    /// User library directories, passed to the linker and searched first.
    pub lib_dirs: Vec<PathBuf>,
    /// Platform include directories, searched after the user's.
    pub system_include_dirs: Vec<PathBuf>,
    /// Platform library directories, searched after the user's.
    pub system_lib_dirs: Vec<PathBuf>,
    pub defines: Vec<String>,
    pub cflags: Vec<String>,
    pub cxxflags: Vec<String>,
    pub linkflags: Vec<String>,
    pub cc: String,
    pub cxx: String,
    pub boostsuffix: String,
}

impl BuildContext {
    /// Build the context using the process environment for `CC`/`CXX`.
    pub fn from_config(config: &ProbeConfig, options: &BuildOptions) -> Result<Self> {
        Self::from_config_with_env(config, options, |key: &str| std::env::var(key))
    }

    /// Build the context with a custom environment lookup.
    pub fn from_config_with_env<F>(
        config: &ProbeConfig,
        options: &BuildOptions,
        env_fn: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<String, std::env::VarError>,
    {
        let platform = Platform::select(options.os.as_deref())?;
        let toolchain = &config.toolchain;

        let compiler = |configured: &Option<String>, var: &str, default: &str| {
            configured
                .clone()
                .or_else(|| env_fn(var).ok().filter(|v| !v.trim().is_empty()))
                .unwrap_or_else(|| default.to_string())
        };
        let cc = compiler(&toolchain.cc, "CC", platform.default_cc());
        let cxx = compiler(&toolchain.cxx, "CXX", platform.default_cxx());

        let mut defines = platform.base_defines();
        defines.extend(toolchain.defines.iter().cloned());

        let mut cflags = platform.base_cflags();
        cflags.extend(toolchain.cflags.iter().cloned());

        let mut linkflags = platform.base_linkflags();
        linkflags.extend(toolchain.linkflags.iter().cloned());

        let ctx = Self {
            platform,
            mode: toolchain.mode,
            include_dirs: dedup(options.includedirs.clone()),
            lib_dirs: dedup(options.libdirs.clone()),
            system_include_dirs: platform.default_include_dirs(),
            system_lib_dirs: platform.default_lib_dirs(),
            defines,
            cflags,
            cxxflags: toolchain.cxxflags.clone(),
            linkflags,
            cc,
            cxx,
            boostsuffix: options.boostsuffix.clone(),
        };

        tracing::debug!(
            "build context: platform={} mode={} cc={} cxx={}",
            ctx.platform,
            ctx.mode.as_str(),
            ctx.cc,
            ctx.cxx
        );
        Ok(ctx)
    }

    /// Override the probe mode (e.g. from `--mode`).
    pub fn with_mode(mut self, mode: ProbeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Compiler driver for a language.
    pub fn compiler_for(&self, language: Language) -> &str {
        match language {
            Language::C => &self.cc,
            Language::Cxx => &self.cxx,
        }
    }

    /// Compile flags for a language: shared cflags, then C++-only flags.
    pub fn compile_flags_for(&self, language: Language) -> Vec<String> {
        let mut flags = self.cflags.clone();
        if language == Language::Cxx {
            flags.extend(self.cxxflags.iter().cloned());
        }
        flags
    }

    /// Include directories in search order (user, then system).
    pub fn header_search_path(&self) -> impl Iterator<Item = &PathBuf> {
        self.include_dirs.iter().chain(self.system_include_dirs.iter())
    }

    /// Library directories in search order (user, then system).
    pub fn library_search_path(&self) -> impl Iterator<Item = &PathBuf> {
        self.lib_dirs.iter().chain(self.system_lib_dirs.iter())
    }
}

fn dedup(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = Vec::with_capacity(paths.len());
    for path in paths {
        if !out.contains(&path) {
            out.push(path);
        }
    }
    out
}
