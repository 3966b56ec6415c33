//! Assembling a configuration pass.
//!
//! A [`ConfigurationPass`] bundles what one invocation probes: the loaded
//! config, the layered build options, the [`BuildContext`], and the
//! resolved dependency list (preset first, then the project's own entries).

use std::path::{Path, PathBuf};

use crate::config::loader::load_config;
use crate::config::merger::merge_dependencies;
use crate::config::options::{BuildOptions, OptionOverrides};
use crate::config::schema::{ProbeConfig, ProbeMode};
use crate::config::validator::validate;
use crate::context::BuildContext;
use crate::error::{ProbeError, Result};
use crate::presets::PresetRegistry;
use crate::probe::{toolchain_for, DependencySpec, ProbeReport, ProbeResult, Prober, Toolchain};

/// Inputs gathered from the command line.
#[derive(Debug, Clone, Default)]
pub struct PassInputs {
    pub project_root: PathBuf,
    /// Explicit config file (`--config`), loaded without local overrides.
    pub config_path: Option<PathBuf>,
    /// Preset to use instead of (or in the absence of) the config's.
    pub preset: Option<String>,
    pub overrides: OptionOverrides,
    /// Probe mode override (`--mode`).
    pub mode: Option<ProbeMode>,
}

impl PassInputs {
    pub fn new(project_root: &Path) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            ..Default::default()
        }
    }
}

/// Everything one configuration pass needs, resolved up front.
#[derive(Debug, Clone)]
pub struct ConfigurationPass {
    pub config: ProbeConfig,
    pub options: BuildOptions,
    pub context: BuildContext,
    pub dependencies: Vec<DependencySpec>,
    /// Preset the dependency list started from, if any.
    pub preset: Option<String>,
}

impl ConfigurationPass {
    /// Load config, layer options, build the context and resolve dependencies.
    ///
    /// Without a project config, a `--preset` alone is enough to run.
    pub fn prepare(inputs: &PassInputs) -> Result<Self> {
        let config = match load_config(&inputs.project_root, inputs.config_path.as_deref()) {
            Ok(config) => config,
            Err(ProbeError::ConfigNotFound { .. })
                if inputs.config_path.is_none() && inputs.preset.is_some() =>
            {
                tracing::debug!("no project config, using preset only");
                ProbeConfig::default()
            }
            Err(e) => return Err(e),
        };
        Self::from_config(config, inputs)
    }

    /// Build a pass from an already-loaded config.
    pub fn from_config(config: ProbeConfig, inputs: &PassInputs) -> Result<Self> {
        let mut options = BuildOptions::from_config(&config.options);
        options.apply_overrides(&inputs.overrides)?;

        let mut context = BuildContext::from_config(&config, &options)?;
        if let Some(mode) = inputs.mode {
            context = context.with_mode(mode);
        }

        let preset = inputs.preset.clone().or_else(|| config.preset.clone());
        let declared = match &preset {
            Some(name) => PresetRegistry::builtin()?.resolve(name)?,
            None => Vec::new(),
        };
        // Merging is keyed by name, so duplicates must be caught per source first.
        validate(&config.dependencies)?;
        let declared = merge_dependencies(declared, &config.dependencies);
        validate(&declared)?;

        let vars = options.interpolation_context(context.platform);
        let dependencies = declared
            .iter()
            .map(|dep| dep.resolve(&vars))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            "configuration pass: {} dependencies, preset {:?}",
            dependencies.len(),
            preset
        );

        Ok(Self {
            config,
            options,
            context,
            dependencies,
            preset,
        })
    }

    /// Probe, stopping at the first missing required dependency.
    pub fn run_with(&self, toolchain: &dyn Toolchain) -> Result<Vec<ProbeResult>> {
        Prober::new(&self.context, toolchain).probe(&self.dependencies)
    }

    /// Short-circuiting run that also collects what was probed into a report.
    ///
    /// The report includes the failing dependency; the error is still returned.
    pub fn run_reported(&self, toolchain: &dyn Toolchain) -> (ProbeReport, Result<()>) {
        let mut report = ProbeReport::new(&self.context, toolchain.name());
        let outcome = Prober::new(&self.context, toolchain)
            .probe_observed(&self.dependencies, |result| report.push(result.clone()))
            .map(|_| ());
        (report, outcome)
    }

    /// Probe everything and report all misses.
    pub fn report(&self) -> Result<ProbeReport> {
        let toolchain = toolchain_for(self.context.mode);
        self.report_with(toolchain.as_ref())
    }

    pub fn report_with(&self, toolchain: &dyn Toolchain) -> Result<ProbeReport> {
        Prober::new(&self.context, toolchain).probe_all(&self.dependencies)
    }
}
