//! List command implementation.
//!
//! `depprobe list` shows the dependency list a check would probe, in order,
//! after preset resolution, overlay merging and interpolation.

use serde::Serialize;

use crate::cli::args::ListArgs;
use crate::error::{ProbeError, Result};
use crate::pass::{ConfigurationPass, PassInputs};
use crate::presets::PresetRegistry;
use crate::probe::DependencySpec;
use crate::ui::{should_use_colors, ProbeTheme, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    inputs: PassInputs,
    args: ListArgs,
}

#[derive(Serialize)]
struct Listing<'a> {
    preset: Option<&'a str>,
    platform: &'a str,
    dependencies: &'a [DependencySpec],
}

impl ListCommand {
    pub fn new(mut inputs: PassInputs, args: ListArgs) -> Self {
        if args.preset.is_some() {
            inputs.preset = args.preset.clone();
        }
        Self { inputs, args }
    }

    fn show_presets(&self, ui: &mut dyn UserInterface, theme: &ProbeTheme) -> Result<()> {
        let registry = PresetRegistry::builtin()?;
        ui.message(&format!("  {}", theme.key.apply_to("Presets:")));
        for name in registry.names() {
            let detail = registry
                .get(name)
                .and_then(|m| m.description.clone())
                .unwrap_or_default();
            ui.message(&format!(
                "    {} {}",
                theme.highlight.apply_to(name),
                theme.dim.apply_to(detail)
            ));
        }
        Ok(())
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let theme = if should_use_colors() {
            ProbeTheme::new()
        } else {
            ProbeTheme::plain()
        };

        let pass = match ConfigurationPass::prepare(&self.inputs) {
            Ok(pass) => pass,
            Err(ProbeError::ConfigNotFound { .. }) => {
                let result = super::no_config(ui);
                if !self.args.json {
                    self.show_presets(ui, &theme)?;
                }
                return Ok(result);
            }
            Err(e) => return Err(e),
        };

        if self.args.json {
            let listing = Listing {
                preset: pass.preset.as_deref(),
                platform: pass.context.platform.as_str(),
                dependencies: &pass.dependencies,
            };
            let json =
                serde_json::to_string_pretty(&listing).map_err(|e| ProbeError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        let title = match &pass.preset {
            Some(preset) => format!("Dependencies (preset {}, {})", preset, pass.context.platform),
            None => format!("Dependencies ({})", pass.context.platform),
        };
        ui.show_header(&title);

        let width = pass
            .dependencies
            .iter()
            .map(|d| d.name.len())
            .max()
            .unwrap_or(0);
        for dep in &pass.dependencies {
            let mut line = format!(
                "  {:width$}  {}",
                dep.name,
                theme.dim.apply_to(&dep.header),
                width = width
            );
            match &dep.library {
                Some(library) if pass.context.platform.skips_link_for(dep) => {
                    line.push_str(&format!(" ({} link skipped)", library));
                }
                Some(library) => {
                    line.push(' ');
                    line.push_str(&pass.context.platform.link_lib_flag(library));
                }
                None => {}
            }
            if !dep.required {
                line.push_str(" [optional]");
            }
            ui.message(&line);
        }
        Ok(CommandResult::success())
    }
}
