//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::{Path, PathBuf};

use crate::config::options::OptionOverrides;
use crate::config::schema::ProbeMode;
use crate::pass::PassInputs;

/// depprobe - Check that a C/C++ project's third-party libraries are installed.
#[derive(Debug, Parser)]
#[command(name = "depprobe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides default .depprobe/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Target operating system (win32, linux, darwin, ...)
    #[arg(long, global = true, env = "DEPPROBE_OS", value_name = "OS")]
    pub os: Option<String>,

    /// Extra library directories (comma or path-separator delimited)
    #[arg(long, global = true, env = "DEPPROBE_LIBDIRS", value_name = "DIRS")]
    pub libdirs: Option<String>,

    /// Extra include directories (comma or path-separator delimited)
    #[arg(long, global = true, env = "DEPPROBE_INCLUDEDIRS", value_name = "DIRS")]
    pub includedirs: Option<String>,

    /// Suffix appended to Boost library names (e.g. -gcc41-mt)
    #[arg(long, global = true, env = "DEPPROBE_BOOSTSUFFIX", value_name = "SUFFIX")]
    pub boostsuffix: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Option overrides from the global flags and the given `KEY=VALUE` list.
    pub fn overrides(&self, assignments: &[String]) -> OptionOverrides {
        OptionOverrides {
            os: self.os.clone(),
            libdirs: self.libdirs.clone(),
            includedirs: self.includedirs.clone(),
            boostsuffix: self.boostsuffix.clone(),
            assignments: assignments.to_vec(),
        }
    }

    /// Pass inputs shared by every command that loads configuration.
    pub fn pass_inputs(&self, project_root: &Path, assignments: &[String]) -> PassInputs {
        PassInputs {
            config_path: self.config.clone(),
            overrides: self.overrides(assignments),
            ..PassInputs::new(project_root)
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Probe every dependency (default if no command specified)
    Check(CheckArgs),

    /// Show the dependency list a check would probe
    List(ListArgs),

    /// Show the resolved build context
    Env(EnvArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Preset to probe (saml2, spep, spepd, modspep)
    #[arg(long)]
    pub preset: Option<String>,

    /// How to probe: compile test programs or search directories
    #[arg(long, value_enum)]
    pub mode: Option<ProbeMode>,

    /// Probe every dependency and report all that are missing
    #[arg(short, long)]
    pub keep_going: bool,

    /// Print a JSON report instead of status lines
    #[arg(long)]
    pub json: bool,

    /// Option assignments (OS=win32, libdirs=/opt/lib, ...)
    #[arg(value_name = "KEY=VALUE")]
    pub assignments: Vec<String>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Preset to list
    #[arg(long)]
    pub preset: Option<String>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `env` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct EnvArgs {
    /// Print JSON instead of key/value lines
    #[arg(long)]
    pub json: bool,

    /// Option assignments (OS=win32, libdirs=/opt/lib, ...)
    #[arg(value_name = "KEY=VALUE")]
    pub assignments: Vec<String>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
