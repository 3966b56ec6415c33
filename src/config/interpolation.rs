//! `${variable}` substitution in dependency headers and library names.
//!
//! Library names often carry a build-specific suffix (Boost's
//! `boost_thread-gcc41-mt`), so manifests write `boost_thread${boostsuffix}`
//! and the suffix comes from the build options.
//!
//! # Syntax
//!
//! - `${name}` - replaced with the variable's value
//! - `$${name}` - produces a literal `${name}`

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{ProbeError, Result};

/// Variables every manifest may reference.
pub const KNOWN_VARIABLES: &[&str] = &["boostsuffix", "os", "platform"];

/// A piece of an interpolated string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Variable(String),
}

/// Split a string into literal and `${variable}` segments.
pub fn parse_interpolation(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        literal.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(escaped) = tail.strip_prefix("$${") {
            // `$${x}` stays as the literal `${x}`
            let end = escaped.find('}').map(|i| i + 1).unwrap_or(escaped.len());
            literal.push_str("${");
            literal.push_str(&escaped[..end]);
            rest = &escaped[end..];
        } else if let Some(open) = tail.strip_prefix("${") {
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            match open.find('}') {
                Some(end) => {
                    segments.push(Segment::Variable(open[..end].to_string()));
                    rest = &open[end + 1..];
                }
                None => {
                    segments.push(Segment::Variable(open.to_string()));
                    rest = "";
                }
            }
        } else {
            literal.push('$');
            rest = &tail[1..];
        }
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}

/// Variable names referenced by a string.
pub fn extract_variables(input: &str) -> BTreeSet<String> {
    parse_interpolation(input)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Variable(name) => Some(name),
            Segment::Literal(_) => None,
        })
        .collect()
}

/// Values available to `${...}` references.
#[derive(Debug, Clone, Default)]
pub struct InterpolationContext {
    vars: BTreeMap<String, String>,
}

impl InterpolationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

/// Substitute every variable in `input`.
///
/// # Errors
///
/// Returns `ConfigValidationError` naming the first unresolved variable.
pub fn resolve_string(input: &str, context: &InterpolationContext) -> Result<String> {
    let mut out = String::with_capacity(input.len());
    for segment in parse_interpolation(input) {
        match segment {
            Segment::Literal(text) => out.push_str(&text),
            Segment::Variable(name) => {
                let value =
                    context
                        .resolve(&name)
                        .ok_or_else(|| ProbeError::ConfigValidationError {
                            message: format!("Unresolved variable: ${{{}}}", name),
                        })?;
                out.push_str(value);
            }
        }
    }
    Ok(out)
}
