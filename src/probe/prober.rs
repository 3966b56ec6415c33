//! The dependency prober.
//!
//! [`Prober`] walks a dependency list in order. For each spec it resolves the
//! header, then, if the dependency names a library and the platform does not
//! degrade it to header-only, links a test program against the library.
//! The first required dependency that is not found stops the pass.
//!
//! Results are cached per run by dependency name, so a spec listed twice
//! (or probed by both `probe` and `probe_all`) runs the toolchain once.

use std::collections::HashMap;

use crate::context::BuildContext;
use crate::error::{ProbeError, Result};
use crate::probe::report::ProbeReport;
use crate::probe::spec::{DependencySpec, ProbeOutcome, ProbeResult};
use crate::probe::toolchain::Toolchain;

/// Probes dependencies against a build context.
pub struct Prober<'a> {
    ctx: &'a BuildContext,
    toolchain: &'a dyn Toolchain,
    cache: HashMap<String, ProbeResult>,
}

impl<'a> Prober<'a> {
    pub fn new(ctx: &'a BuildContext, toolchain: &'a dyn Toolchain) -> Self {
        Self {
            ctx,
            toolchain,
            cache: HashMap::new(),
        }
    }

    /// Probe every spec, stopping at the first missing required dependency.
    ///
    /// # Errors
    ///
    /// `MissingDependency` naming the first required dependency not found;
    /// toolchain errors propagate unchanged.
    pub fn probe(&mut self, specs: &[DependencySpec]) -> Result<Vec<ProbeResult>> {
        self.probe_observed(specs, |_| {})
    }

    /// Like [`probe`](Self::probe), but hands every result to `observe`,
    /// including the fatal one, before returning.
    pub fn probe_observed<F>(
        &mut self,
        specs: &[DependencySpec],
        mut observe: F,
    ) -> Result<Vec<ProbeResult>>
    where
        F: FnMut(&ProbeResult),
    {
        let mut results = Vec::with_capacity(specs.len());
        for spec in specs {
            let result = self.check_one(spec)?;
            observe(&result);
            if result.is_fatal() {
                tracing::debug!(
                    "stopping after {} of {} dependencies",
                    results.len() + 1,
                    specs.len()
                );
                return Err(ProbeError::MissingDependency {
                    library: spec.name.clone(),
                });
            }
            results.push(result);
        }
        tracing::info!("all {} dependencies found", specs.len());
        Ok(results)
    }

    /// Probe every spec without stopping, collecting a report.
    pub fn probe_all(&mut self, specs: &[DependencySpec]) -> Result<ProbeReport> {
        let mut report = ProbeReport::new(self.ctx, self.toolchain.name());
        for spec in specs {
            let result = self.check_one(spec)?;
            report.push(result);
        }
        Ok(report)
    }

    /// Probe a single spec, using the cache when available.
    pub fn check_one(&mut self, spec: &DependencySpec) -> Result<ProbeResult> {
        if let Some(cached) = self.cache.get(&spec.name) {
            if cached.spec == *spec {
                return Ok(cached.clone());
            }
        }
        let result = self.evaluate(spec)?;
        self.cache.insert(spec.name.clone(), result.clone());
        Ok(result)
    }

    fn evaluate(&self, spec: &DependencySpec) -> Result<ProbeResult> {
        tracing::debug!(
            "probing {} ({} header {})",
            spec.name,
            spec.language,
            spec.header
        );

        let header = self.toolchain.check_header(self.ctx, spec)?;
        if !header.found {
            return Ok(self.miss(spec, ProbeOutcome::HeaderMissing, "header"));
        }

        let outcome = match &spec.library {
            None => ProbeOutcome::Found,
            Some(_) if self.ctx.platform.skips_link_for(spec) => {
                tracing::debug!("{}: link step skipped on {}", spec.name, self.ctx.platform);
                ProbeOutcome::FoundHeaderOnly
            }
            Some(library) => {
                if self.toolchain.check_link(self.ctx, spec, library)? {
                    ProbeOutcome::Found
                } else {
                    return Ok(self.miss(spec, ProbeOutcome::LinkFailed, "library"));
                }
            }
        };

        tracing::debug!("{}: found", spec.name);
        Ok(ProbeResult::new(spec.clone(), outcome, header.location))
    }

    fn miss(&self, spec: &DependencySpec, outcome: ProbeOutcome, what: &str) -> ProbeResult {
        if spec.required {
            tracing::debug!("{}: {} not found", spec.name, what);
            ProbeResult::new(spec.clone(), outcome, None)
        } else {
            tracing::info!("optional dependency {} not found ({})", spec.name, what);
            ProbeResult::new(spec.clone(), ProbeOutcome::SkippedOptional, None)
        }
    }
}
