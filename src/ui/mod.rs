//! Terminal output.
//!
//! - [`UserInterface`] trait for output abstraction
//! - [`TerminalUI`] for real terminals (status on stdout, errors on stderr)
//! - [`MockUI`] for tests

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, ProbeTheme};

/// Trait for user-facing output.
///
/// Commands write through this trait so tests can capture what was shown.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a plain line.
    fn message(&mut self, msg: &str);

    /// Display a success line.
    fn success(&mut self, msg: &str);

    /// Display a warning line.
    fn warning(&mut self, msg: &str);

    /// Display an error line.
    fn error(&mut self, msg: &str);

    /// Display an indented `key: value` line.
    fn detail(&mut self, key: &str, value: &str);

    /// Display a header.
    fn show_header(&mut self, title: &str);
}
