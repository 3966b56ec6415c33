//! Check command implementation.
//!
//! `depprobe check` runs one configuration pass. By default it stops at the
//! first missing required dependency; `--keep-going` probes everything and
//! names every miss.

use crate::cli::args::CheckArgs;
use crate::error::{ProbeError, Result};
use crate::pass::{ConfigurationPass, PassInputs};
use crate::probe::{toolchain_for, ProbeOutcome, ProbeReport, ProbeResult};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    inputs: PassInputs,
    args: CheckArgs,
}

impl CheckCommand {
    pub fn new(mut inputs: PassInputs, args: CheckArgs) -> Self {
        if args.preset.is_some() {
            inputs.preset = args.preset.clone();
        }
        if args.mode.is_some() {
            inputs.mode = args.mode;
        }
        Self { inputs, args }
    }

    fn probe(&self, pass: &ConfigurationPass) -> Result<ProbeReport> {
        if self.args.keep_going {
            return pass.report();
        }
        let toolchain = toolchain_for(pass.context.mode);
        let (report, outcome) = pass.run_reported(toolchain.as_ref());
        match outcome {
            Ok(()) | Err(ProbeError::MissingDependency { .. }) => Ok(report),
            Err(e) => Err(e),
        }
    }

    fn show_result(&self, ui: &mut dyn UserInterface, result: &ProbeResult) {
        let name = &result.spec.name;
        match result.outcome {
            ProbeOutcome::Found => ui.success(name),
            ProbeOutcome::FoundHeaderOnly => ui.success(&format!("{} (header only)", name)),
            ProbeOutcome::SkippedOptional => ui.warning(&format!("{} not found (optional)", name)),
            // Reported as errors once probing is done.
            ProbeOutcome::HeaderMissing | ProbeOutcome::LinkFailed => return,
        }
        if ui.output_mode().shows_details() {
            if let Some(location) = &result.header_location {
                ui.detail("header", &location.display().to_string());
            }
            if let Some(library) = &result.spec.library {
                ui.detail("library", library);
            }
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let pass = match ConfigurationPass::prepare(&self.inputs) {
            Ok(pass) => pass,
            Err(ProbeError::ConfigNotFound { .. }) => return Ok(super::no_config(ui)),
            Err(e) => return Err(e),
        };

        let human = !self.args.json;
        if human {
            ui.show_header(&format!(
                "Probing {} dependencies ({}, {} mode)",
                pass.dependencies.len(),
                pass.context.platform,
                pass.context.mode.as_str()
            ));
        }

        let report = self.probe(&pass)?;

        if self.args.json {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| ProbeError::Other(e.into()))?;
            ui.message(&json);
        } else if ui.output_mode().shows_progress() {
            for result in &report.results {
                self.show_result(ui, result);
            }
        }

        for name in &report.missing {
            let missing = ProbeError::MissingDependency {
                library: name.clone(),
            };
            ui.error(&missing.to_string());
        }

        if report.is_success() {
            if human && ui.output_mode().shows_progress() {
                ui.message(&format!(
                    "{} of {} dependencies found",
                    report.found_count(),
                    report.results.len()
                ));
            }
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::CONFIG_DIR;
    use crate::config::schema::ProbeMode;
    use crate::ui::{MockUI, OutputMode};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// A project whose config probes curl then asio from its own include dir.
    fn project(with_asio: bool) -> TempDir {
        let temp = TempDir::new().unwrap();
        let include = temp.path().join("include");
        fs::create_dir_all(include.join("depprobe_check")).unwrap();
        fs::write(include.join("depprobe_check/curl.h"), "").unwrap();
        if with_asio {
            fs::write(include.join("depprobe_check/asio.hpp"), "").unwrap();
        }

        let dir = temp.path().join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("config.yml"),
            format!(
                r#"
options:
  os: linux
  includedirs: ["{}"]
toolchain:
  mode: search
dependencies:
  - name: curl
    header: depprobe_check/curl.h
    language: c
  - name: asio
    header: depprobe_check/asio.hpp
  - name: icu
    header: depprobe_check/icu.h
    required: false
"#,
                include.display()
            ),
        )
        .unwrap();
        temp
    }

    fn run(root: &Path, args: CheckArgs, ui: &mut MockUI) -> CommandResult {
        CheckCommand::new(PassInputs::new(root), args)
            .execute(ui)
            .unwrap()
    }

    #[test]
    fn all_found_succeeds() {
        let temp = project(true);
        let mut ui = MockUI::new();
        let result = run(temp.path(), CheckArgs::default(), &mut ui);

        assert!(result.success);
        assert_eq!(ui.successes(), ["curl".to_string(), "asio".to_string()]);
        assert!(ui.warnings()[0].contains("icu"));
        assert!(ui.has_message("2 of 3 dependencies found"));
    }

    #[test]
    fn missing_dependency_fails_naming_it() {
        let temp = project(false);
        let mut ui = MockUI::new();
        let result = run(temp.path(), CheckArgs::default(), &mut ui);

        assert_eq!(result.exit_code, 1);
        assert_eq!(ui.errors(), ["Missing dependency: asio".to_string()]);
        assert!(!ui.has_error("curl"));
        // Short-circuit: the optional dependency after asio is never probed.
        assert!(ui.warnings().is_empty());
    }

    #[test]
    fn keep_going_reports_every_result() {
        let temp = project(false);
        let mut ui = MockUI::new();
        let args = CheckArgs {
            keep_going: true,
            ..Default::default()
        };
        let result = run(temp.path(), args, &mut ui);

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("asio"));
        assert_eq!(ui.warnings().len(), 1);
    }

    #[test]
    fn json_prints_report() {
        let temp = project(false);
        let mut ui = MockUI::new();
        let args = CheckArgs {
            json: true,
            ..Default::default()
        };
        run(temp.path(), args, &mut ui);

        let report: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(report["missing"][0], "asio");
        assert_eq!(report["mode"], "search");
        assert!(ui.successes().is_empty());
    }

    #[test]
    fn quiet_hides_status_lines() {
        let temp = project(true);
        let mut ui = MockUI::with_mode(OutputMode::Quiet);
        let result = run(temp.path(), CheckArgs::default(), &mut ui);

        assert!(result.success);
        assert!(ui.successes().is_empty());
        assert!(ui.messages().is_empty());
    }

    #[test]
    fn no_config_exits_two() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let result = run(temp.path(), CheckArgs::default(), &mut ui);

        assert_eq!(result.exit_code, 2);
    }

    #[test]
    fn args_override_inputs() {
        let cmd = CheckCommand::new(
            PassInputs::new(Path::new("/p")),
            CheckArgs {
                preset: Some("spep".to_string()),
                mode: Some(ProbeMode::Search),
                ..Default::default()
            },
        );
        assert_eq!(cmd.inputs.preset.as_deref(), Some("spep"));
        assert_eq!(cmd.inputs.mode, Some(ProbeMode::Search));
    }
}
