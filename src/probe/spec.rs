//! Dependency declarations and per-probe results.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Source language a dependency is consumed from.
///
/// Selects the compiler driver and the test program's file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "c", alias = "C")]
    C,
    #[default]
    #[serde(rename = "c++", alias = "C++", alias = "cxx", alias = "cpp")]
    Cxx,
}

impl Language {
    pub fn source_extension(&self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cxx => "cpp",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::C => f.write_str("C"),
            Language::Cxx => f.write_str("C++"),
        }
    }
}

/// A single declared dependency, resolved and immutable for the pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencySpec {
    /// Name used in diagnostics (`Missing dependency: <name>`).
    pub name: String,
    /// Header path relative to an include directory (e.g. `curl/curl.h`).
    pub header: String,
    /// Library to link against. `None` means header-only.
    pub library: Option<String>,
    pub language: Language,
    /// Optional dependencies are reported but never fail the pass.
    pub required: bool,
    /// On Windows, check only the header.
    pub windows_header_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl DependencySpec {
    /// Create a required header-only dependency.
    pub fn header_only(
        name: impl Into<String>,
        header: impl Into<String>,
        language: Language,
    ) -> Self {
        Self {
            name: name.into(),
            header: header.into(),
            library: None,
            language,
            required: true,
            windows_header_only: false,
            description: None,
        }
    }

    /// Create a required dependency that is also linked against.
    pub fn with_library(
        name: impl Into<String>,
        header: impl Into<String>,
        library: impl Into<String>,
        language: Language,
    ) -> Self {
        Self {
            library: Some(library.into()),
            ..Self::header_only(name, header, language)
        }
    }

    /// Mark the dependency optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// How a probe concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// Header resolved and, where applicable, the library linked.
    Found,
    /// Header resolved, link step skipped by the platform.
    FoundHeaderOnly,
    /// Header could not be resolved on the include path.
    HeaderMissing,
    /// Header resolved but the test program did not link.
    LinkFailed,
    /// Optional dependency that was not found.
    SkippedOptional,
}

impl ProbeOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, ProbeOutcome::Found | ProbeOutcome::FoundHeaderOnly)
    }
}

/// Result of a header probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCheck {
    pub found: bool,
    /// Where the header was found, when the toolchain can tell.
    pub location: Option<PathBuf>,
}

impl HeaderCheck {
    pub fn found_at(location: PathBuf) -> Self {
        Self {
            found: true,
            location: Some(location),
        }
    }

    pub fn found() -> Self {
        Self {
            found: true,
            location: None,
        }
    }

    pub fn missing() -> Self {
        Self {
            found: false,
            location: None,
        }
    }
}

/// The result of probing one dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub spec: DependencySpec,
    pub found: bool,
    pub outcome: ProbeOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_location: Option<PathBuf>,
}

impl ProbeResult {
    pub fn new(
        spec: DependencySpec,
        outcome: ProbeOutcome,
        header_location: Option<PathBuf>,
    ) -> Self {
        Self {
            found: outcome.is_found(),
            spec,
            outcome,
            header_location,
        }
    }

    /// Whether this result fails the configuration pass.
    pub fn is_fatal(&self) -> bool {
        !self.found && self.spec.required
    }
}
