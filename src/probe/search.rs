//! Filesystem-only probing.
//!
//! Headers are looked up as `<include dir>/<header>` and libraries as the
//! platform's library file names in each library directory. Nothing is
//! compiled, so this works on machines without a toolchain and in tests.

use std::path::PathBuf;

use crate::context::BuildContext;
use crate::error::Result;
use crate::probe::spec::{DependencySpec, HeaderCheck};
use crate::probe::toolchain::Toolchain;

/// Probes by searching the context's include and library directories.
#[derive(Debug, Clone, Default)]
pub struct SearchToolchain;

impl SearchToolchain {
    pub fn new() -> Self {
        Self
    }

    /// First include directory containing `header`.
    pub fn find_header(&self, ctx: &BuildContext, header: &str) -> Option<PathBuf> {
        ctx.header_search_path()
            .map(|dir| dir.join(header))
            .find(|candidate| candidate.is_file())
    }

    /// First library file matching one of the platform's candidate names.
    pub fn find_library(&self, ctx: &BuildContext, library: &str) -> Option<PathBuf> {
        let candidates = ctx.platform.library_candidates(library);
        ctx.library_search_path().find_map(|dir| {
            candidates
                .iter()
                .map(|name| dir.join(name))
                .find(|candidate| candidate.is_file())
        })
    }
}

impl Toolchain for SearchToolchain {
    fn name(&self) -> &str {
        "search"
    }

    fn check_header(&self, ctx: &BuildContext, spec: &DependencySpec) -> Result<HeaderCheck> {
        Ok(match self.find_header(ctx, &spec.header) {
            Some(path) => HeaderCheck::found_at(path),
            None => HeaderCheck::missing(),
        })
    }

    fn check_link(
        &self,
        ctx: &BuildContext,
        _spec: &DependencySpec,
        library: &str,
    ) -> Result<bool> {
        let found = self.find_library(ctx, library);
        if let Some(path) = &found {
            tracing::debug!("library {} found at {}", library, path.display());
        }
        Ok(found.is_some())
    }
}
