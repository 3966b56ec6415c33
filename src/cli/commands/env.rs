//! Env command implementation.
//!
//! `depprobe env` prints the build context a check would use: platform,
//! compilers, search paths and flags. A project config is optional here.

use crate::cli::args::EnvArgs;
use crate::config::loader::load_config;
use crate::config::schema::ProbeConfig;
use crate::error::{ProbeError, Result};
use crate::pass::{ConfigurationPass, PassInputs};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The env command implementation.
pub struct EnvCommand {
    inputs: PassInputs,
    args: EnvArgs,
}

fn join<T: AsRef<std::path::Path>>(items: &[T]) -> String {
    items
        .iter()
        .map(|p| p.as_ref().display().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl EnvCommand {
    pub fn new(inputs: PassInputs, args: EnvArgs) -> Self {
        Self { inputs, args }
    }

    fn load(&self) -> Result<ProbeConfig> {
        match load_config(&self.inputs.project_root, self.inputs.config_path.as_deref()) {
            Ok(config) => Ok(config),
            Err(ProbeError::ConfigNotFound { .. }) if self.inputs.config_path.is_none() => {
                Ok(ProbeConfig::default())
            }
            Err(e) => Err(e),
        }
    }
}

impl Command for EnvCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let pass = ConfigurationPass::from_config(self.load()?, &self.inputs)?;
        let ctx = &pass.context;

        if self.args.json {
            let json =
                serde_json::to_string_pretty(ctx).map_err(|e| ProbeError::Other(e.into()))?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        ui.show_header("Build context");
        ui.detail("platform", ctx.platform.as_str());
        ui.detail("mode", ctx.mode.as_str());
        ui.detail("cc", &ctx.cc);
        ui.detail("cxx", &ctx.cxx);
        let includes: Vec<_> = ctx.header_search_path().collect();
        ui.detail("includedirs", &join(&includes));
        let libs: Vec<_> = ctx.library_search_path().collect();
        ui.detail("libdirs", &join(&libs));
        ui.detail("defines", &ctx.defines.join(" "));
        ui.detail("cflags", &ctx.cflags.join(" "));
        ui.detail("cxxflags", &ctx.cxxflags.join(" "));
        ui.detail("linkflags", &ctx.linkflags.join(" "));
        ui.detail("boostsuffix", &ctx.boostsuffix);
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::OptionOverrides;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn detail<'a>(ui: &'a MockUI, key: &str) -> &'a str {
        ui.details()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    fn run(assignments: &[&str], json: bool) -> MockUI {
        let temp = TempDir::new().unwrap();
        let inputs = PassInputs {
            overrides: OptionOverrides {
                assignments: assignments.iter().map(|s| s.to_string()).collect(),
                ..Default::default()
            },
            ..PassInputs::new(temp.path())
        };
        let mut ui = MockUI::new();
        let args = EnvArgs {
            json,
            ..Default::default()
        };
        let result = EnvCommand::new(inputs, args)
            .execute(&mut ui)
            .unwrap();
        assert!(result.success);
        ui
    }

    #[test]
    fn works_without_config() {
        let ui = run(&["OS=linux"], false);
        assert_eq!(detail(&ui, "platform"), "unix");
        assert!(detail(&ui, "cflags").contains("-pthread"));
    }

    #[test]
    fn user_dirs_come_first() {
        let ui = run(&["OS=linux", "includedirs=/opt/xerces/include"], false);
        assert!(detail(&ui, "includedirs").starts_with("/opt/xerces/include"));
    }

    #[test]
    fn windows_defines_are_listed() {
        let ui = run(&["OS=win32"], false);
        assert!(detail(&ui, "defines").contains("WIN32_LEAN_AND_MEAN"));
    }

    #[test]
    fn json_prints_context() {
        let ui = run(&["OS=darwin", "boostsuffix=-mt"], true);
        let ctx: serde_json::Value = serde_json::from_str(&ui.messages()[0]).unwrap();
        assert_eq!(ctx["platform"], "macos");
        assert_eq!(ctx["boostsuffix"], "-mt");
    }
}
