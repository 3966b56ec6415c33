//! depprobe - Build configuration checks for C/C++ projects.
//!
//! depprobe verifies that the third-party libraries a project builds against
//! (OpenSSL, Xerces-C, Boost, ICU, cURL, Asio, APR/httpd, ...) are present
//! before a build starts. Each dependency's header must resolve on the
//! include path and, where it names a library, a test program must link.
//! The first missing required dependency stops the pass.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, merging, validation and interpolation
//! - [`context`] - The resolved build context for one pass
//! - [`error`] - Error types and result aliases
//! - [`pass`] - Assembling and running a configuration pass
//! - [`platform`] - Per-OS compiler and linker conventions
//! - [`presets`] - Embedded dependency lists for the SAML2/SPEP stack
//! - [`probe`] - Dependency specs, toolchains and the prober
//! - [`ui`] - Terminal output
//!
//! # Example
//!
//! ```
//! use depprobe::config::{resolve_string, InterpolationContext};
//!
//! let ctx = InterpolationContext::new().with("boostsuffix", "-gcc41-mt");
//! let library = resolve_string("boost_thread${boostsuffix}", &ctx).unwrap();
//! assert_eq!(library, "boost_thread-gcc41-mt");
//! ```

pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod pass;
pub mod platform;
pub mod presets;
pub mod probe;
pub mod ui;

pub use error::{ProbeError, Result};
