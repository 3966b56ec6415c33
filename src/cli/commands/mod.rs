//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed by
//! [`CommandDispatcher`]. Commands that load configuration receive a
//! [`PassInputs`](crate::pass::PassInputs) built from the global flags.

pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod env;
pub mod list;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};

use crate::ui::UserInterface;

/// Message shown when neither a config file nor a preset is available.
pub(crate) const NO_CONFIG_HINT: &str =
    "No configuration found. Create .depprobe/config.yml or pass --preset.";

/// Report a missing configuration the way every command does.
pub(crate) fn no_config(ui: &mut dyn UserInterface) -> CommandResult {
    ui.error(NO_CONFIG_HINT);
    CommandResult::failure(2)
}
