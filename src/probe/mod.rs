//! Dependency probing.
//!
//! - [`spec`] - dependency declarations and per-probe results
//! - [`toolchain`] - the [`Toolchain`] trait and mode-based factory
//! - [`compiler`] - compile-and-link probes through the C/C++ compiler
//! - [`search`] - filesystem-only probes
//! - [`prober`] - the short-circuiting [`Prober`]
//! - [`report`] - serializable pass summary
//!
//! # Example
//!
//! ```
//! use depprobe::config::{BuildOptions, ProbeConfig};
//! use depprobe::context::BuildContext;
//! use depprobe::probe::{DependencySpec, Language, Prober, SearchToolchain};
//! use depprobe::ProbeError;
//! use tempfile::TempDir;
//!
//! let root = TempDir::new().unwrap();
//! std::fs::create_dir_all(root.path().join("curl")).unwrap();
//! std::fs::write(root.path().join("curl/curl.h"), "").unwrap();
//!
//! let options = BuildOptions {
//!     os: Some("linux".into()),
//!     includedirs: vec![root.path().to_path_buf()],
//!     ..Default::default()
//! };
//! let mut ctx = BuildContext::from_config(&ProbeConfig::default(), &options).unwrap();
//! ctx.system_include_dirs.clear();
//!
//! let toolchain = SearchToolchain::new();
//! let mut prober = Prober::new(&ctx, &toolchain);
//! let specs = [
//!     DependencySpec::header_only("curl", "curl/curl.h", Language::C),
//!     DependencySpec::header_only("asio", "asio.hpp", Language::Cxx),
//! ];
//! match prober.probe(&specs) {
//!     Err(ProbeError::MissingDependency { library }) => assert_eq!(library, "asio"),
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

pub mod compiler;
pub mod prober;
pub mod report;
pub mod search;
pub mod spec;
pub mod toolchain;

pub use compiler::CompilerToolchain;
pub use prober::Prober;
pub use report::ProbeReport;
pub use search::SearchToolchain;
pub use spec::{DependencySpec, HeaderCheck, Language, ProbeOutcome, ProbeResult};
pub use toolchain::{toolchain_for, Toolchain};
