//! Dependency manifest validation.
//!
//! Rules:
//! - Names must be non-empty and unique
//! - Headers must be non-empty and relative to an include directory
//! - Library names, when given, must be non-empty
//! - Only known `${...}` variables may be referenced

use std::collections::HashSet;
use std::path::Path;

use crate::config::interpolation::{extract_variables, KNOWN_VARIABLES};
use crate::config::schema::DependencyConfig;
use crate::error::{ProbeError, Result};

/// Validation error with context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    pub message: String,
    /// Dependency name if the error is dependency-specific
    pub dependency: Option<String>,
}

impl ValidationError {
    fn new(rule: &str, dependency: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
            dependency: Some(dependency.to_string()),
        }
    }
}

/// Validate a dependency list and return all errors.
///
/// Collects every error rather than stopping at the first one.
pub fn validate_dependencies(deps: &[DependencyConfig]) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for dep in deps {
        if dep.name.trim().is_empty() {
            errors.push(ValidationError {
                rule: "empty-name".to_string(),
                message: format!("Dependency with header '{}' has no name", dep.header),
                dependency: None,
            });
        } else if !seen.insert(dep.name.as_str()) {
            errors.push(ValidationError::new(
                "duplicate-name",
                &dep.name,
                format!("Dependency '{}' is declared more than once", dep.name),
            ));
        }

        if dep.header.trim().is_empty() {
            errors.push(ValidationError::new(
                "empty-header",
                &dep.name,
                format!("Dependency '{}' has an empty header", dep.name),
            ));
        } else if Path::new(&dep.header).has_root() {
            errors.push(ValidationError::new(
                "absolute-header",
                &dep.name,
                format!(
                    "Dependency '{}' header '{}' must be relative to an include directory",
                    dep.name, dep.header
                ),
            ));
        }

        if let Some(library) = &dep.library {
            if library.trim().is_empty() {
                errors.push(ValidationError::new(
                    "empty-library",
                    &dep.name,
                    format!(
                        "Dependency '{}' has an empty library; omit it for header-only",
                        dep.name
                    ),
                ));
            }
        }

        let mut vars = extract_variables(&dep.header);
        if let Some(library) = &dep.library {
            vars.extend(extract_variables(library));
        }
        for var in vars {
            if !KNOWN_VARIABLES.contains(&var.as_str()) {
                errors.push(ValidationError::new(
                    "unknown-variable",
                    &dep.name,
                    format!(
                        "Dependency '{}' references unknown variable ${{{}}}",
                        dep.name, var
                    ),
                ));
            }
        }
    }

    errors
}

/// Validate and return Result (for convenience).
///
/// # Errors
///
/// Returns `ConfigValidationError` joining every failed rule's message.
pub fn validate(deps: &[DependencyConfig]) -> Result<()> {
    let errors = validate_dependencies(deps);
    if errors.is_empty() {
        return Ok(());
    }
    let messages: Vec<_> = errors.iter().map(|e| e.message.clone()).collect();
    Err(ProbeError::ConfigValidationError {
        message: messages.join("; "),
    })
}
