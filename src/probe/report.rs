//! Summary of a whole configuration pass, serializable for `--json`.

use serde::Serialize;

use crate::config::schema::ProbeMode;
use crate::context::BuildContext;
use crate::platform::Platform;
use crate::probe::spec::ProbeResult;

/// Outcome of probing a dependency list.
#[derive(Debug, Clone, Serialize)]
pub struct ProbeReport {
    pub platform: Platform,
    pub mode: ProbeMode,
    pub toolchain: String,
    pub results: Vec<ProbeResult>,
    /// Names of required dependencies that were not found, in probe order.
    pub missing: Vec<String>,
}

impl ProbeReport {
    pub fn new(ctx: &BuildContext, toolchain: &str) -> Self {
        Self {
            platform: ctx.platform,
            mode: ctx.mode,
            toolchain: toolchain.to_string(),
            results: Vec::new(),
            missing: Vec::new(),
        }
    }

    pub fn push(&mut self, result: ProbeResult) {
        if result.is_fatal() {
            self.missing.push(result.spec.name.clone());
        }
        self.results.push(result);
    }

    pub fn is_success(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn first_missing(&self) -> Option<&str> {
        self.missing.first().map(String::as_str)
    }

    pub fn found_count(&self) -> usize {
        self.results.iter().filter(|r| r.found).count()
    }
}
