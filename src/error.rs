//! Error types for depprobe operations.
//!
//! This module defines [`ProbeError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - A missing dependency is [`ProbeError::MissingDependency`] and ends the
//!   configuration pass with exit status 1
//! - Configuration problems get their own variants so the CLI can map them
//!   to distinct exit codes
//! - Use `anyhow::Error` (via `ProbeError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for depprobe operations.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// A required library or header could not be found by the toolchain.
    #[error("Missing dependency: {library}")]
    MissingDependency { library: String },

    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Referenced preset does not exist.
    #[error("Unknown preset: {name}")]
    UnknownPreset { name: String },

    /// A build option (`OS=...`, `libdirs=...`) could not be understood.
    #[error("Invalid option: {message}")]
    InvalidOption { message: String },

    /// The compiler could not be started at all.
    #[error("Toolchain unavailable ({compiler}): {message}")]
    ToolchainUnavailable { compiler: String, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for depprobe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;
