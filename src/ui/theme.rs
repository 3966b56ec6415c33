//! Visual theme and styling.

use console::Style;

/// Terminal styles for probe output.
#[derive(Debug, Clone)]
pub struct ProbeTheme {
    /// Found dependencies (green).
    pub success: Style,
    /// Optional misses and degraded checks (orange).
    pub warning: Style,
    /// Missing dependencies (red bold).
    pub error: Style,
    /// Dim/secondary text such as paths.
    pub dim: Style,
    pub highlight: Style,
    /// Headers (magenta bold).
    pub header: Style,
    /// Labels in key-value displays (bold).
    pub key: Style,
}

impl Default for ProbeTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbeTheme {
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().magenta(),
            key: Style::new().bold(),
        }
    }

    /// Theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            key: Style::new(),
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(title))
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_theme_formats_icons() {
        let theme = ProbeTheme::plain();
        assert_eq!(theme.format_success("curl"), "✓ curl");
        assert_eq!(theme.format_warning("asio"), "⚠ asio");
        assert_eq!(theme.format_error("icu"), "✗ icu");
        assert_eq!(theme.format_header("Probing"), "Probing");
    }

    #[test]
    fn default_impl_matches_new() {
        let default = ProbeTheme::default();
        let new = ProbeTheme::new();
        assert_eq!(default.format_success("test"), new.format_success("test"));
    }
}
