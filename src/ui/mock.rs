//! Mock UI implementation for testing.
//!
//! `MockUI` implements [`UserInterface`] and captures every line for later
//! assertion.
//!
//! # Example
//!
//! ```
//! use depprobe::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.success("curl");
//! ui.error("Missing dependency: asio");
//!
//! assert_eq!(ui.successes(), ["curl".to_string()]);
//! assert!(ui.has_error("asio"));
//! ```

use super::{OutputMode, UserInterface};

/// Captures UI interactions.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    details: Vec<(String, String)>,
    headers: Vec<String>,
}

impl MockUI {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn details(&self) -> &[(String, String)] {
        &self.details
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Whether any error line contains `needle`.
    pub fn has_error(&self, needle: &str) -> bool {
        self.errors.iter().any(|e| e.contains(needle))
    }

    /// Whether any plain message contains `needle`.
    pub fn has_message(&self, needle: &str) -> bool {
        self.messages.iter().any(|m| m.contains(needle))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn detail(&mut self, key: &str, value: &str) {
        self.details.push((key.to_string(), value.to_string()));
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }
}
