//! The seam between the prober and whatever answers "is this installed?".

use crate::config::schema::ProbeMode;
use crate::context::BuildContext;
use crate::error::Result;
use crate::probe::compiler::CompilerToolchain;
use crate::probe::search::SearchToolchain;
use crate::probe::spec::{DependencySpec, HeaderCheck};

/// Answers header and link probes for a build context.
///
/// Implementations return `Ok(false)`/missing for an absent dependency and
/// reserve `Err` for a toolchain that cannot run at all.
pub trait Toolchain {
    /// Short name for logs and reports.
    fn name(&self) -> &str;

    /// Resolve the dependency's header on the include search path.
    fn check_header(&self, ctx: &BuildContext, spec: &DependencySpec) -> Result<HeaderCheck>;

    /// Check that `library` can be linked.
    fn check_link(&self, ctx: &BuildContext, spec: &DependencySpec, library: &str)
        -> Result<bool>;
}

/// Toolchain implementing the context's probe mode.
pub fn toolchain_for(mode: ProbeMode) -> Box<dyn Toolchain> {
    match mode {
        ProbeMode::Compile => Box::new(CompilerToolchain::new()),
        ProbeMode::Search => Box::new(SearchToolchain::new()),
    }
}
