//! Compile-and-link probing.
//!
//! For each probe a trivial test program is written to a scratch directory
//! and handed to the context's compiler. A header probe compiles a
//! translation unit that only includes the header; a link probe builds an
//! executable from the same source with a `main` and the library on the
//! link line. Exit status 0 means found.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use crate::context::BuildContext;
use crate::error::{ProbeError, Result};
use crate::probe::spec::{DependencySpec, HeaderCheck, Language};
use crate::probe::toolchain::Toolchain;

/// Probes by invoking the C/C++ compiler.
#[derive(Debug, Clone, Default)]
pub struct CompilerToolchain;

/// Source of the test program for a dependency.
pub fn test_source(spec: &DependencySpec, with_main: bool) -> String {
    let mut source = format!("#include <{}>\n", spec.header);
    if with_main {
        match spec.language {
            Language::C => source.push_str("\nint main(void)\n{\n    return 0;\n}\n"),
            Language::Cxx => source.push_str("\nint main()\n{\n    return 0;\n}\n"),
        }
    }
    source
}

/// Arguments for a compile-only header probe.
pub fn header_probe_args(
    ctx: &BuildContext,
    spec: &DependencySpec,
    source: &Path,
    object: &Path,
) -> Vec<String> {
    let mut args = common_args(ctx, spec);
    args.push(ctx.platform.compile_only_flag().to_string());
    args.push(source.display().to_string());
    args.extend(ctx.platform.object_output_flag(object));
    args
}

/// Arguments for a compile-and-link probe.
///
/// Library flags go after the source file so single-pass linkers see the
/// unresolved references first.
pub fn link_probe_args(
    ctx: &BuildContext,
    spec: &DependencySpec,
    library: &str,
    source: &Path,
    executable: &Path,
) -> Vec<String> {
    let platform = ctx.platform;
    let mut args = common_args(ctx, spec);
    args.push(source.display().to_string());
    args.extend(platform.output_flag(executable));
    if let Some(marker) = platform.link_section_marker() {
        args.push(marker.to_string());
    }
    args.extend(ctx.lib_dirs.iter().map(|dir| platform.lib_dir_flag(dir)));
    args.extend(ctx.linkflags.iter().cloned());
    args.push(platform.link_lib_flag(library));
    args
}

fn common_args(ctx: &BuildContext, spec: &DependencySpec) -> Vec<String> {
    let platform = ctx.platform;
    let mut args = ctx.compile_flags_for(spec.language);
    args.extend(ctx.defines.iter().map(|d| platform.define_flag(d)));
    args.extend(ctx.include_dirs.iter().map(|dir| platform.include_flag(dir)));
    args
}

impl CompilerToolchain {
    pub fn new() -> Self {
        Self
    }

    fn write_source(&self, dir: &Path, spec: &DependencySpec, with_main: bool) -> Result<PathBuf> {
        let path = dir.join(format!("probe.{}", spec.language.source_extension()));
        std::fs::write(&path, test_source(spec, with_main))?;
        Ok(path)
    }

    fn run(&self, compiler: &str, args: &[String], cwd: &Path) -> Result<Output> {
        tracing::debug!("running {} {}", compiler, args.join(" "));
        Command::new(compiler)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ProbeError::ToolchainUnavailable {
                compiler: compiler.to_string(),
                message: e.to_string(),
            })
    }

    fn succeeded(&self, what: &str, output: &Output) -> bool {
        if output.status.success() {
            return true;
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stdout = String::from_utf8_lossy(&output.stdout);
        tracing::debug!(
            "{} probe failed ({}): {}{}",
            what,
            output.status,
            stderr.trim(),
            stdout.trim()
        );
        false
    }
}

fn scratch_dir() -> Result<tempfile::TempDir> {
    Ok(tempfile::Builder::new().prefix("depprobe-").tempdir()?)
}

impl Toolchain for CompilerToolchain {
    fn name(&self) -> &str {
        "compile"
    }

    fn check_header(&self, ctx: &BuildContext, spec: &DependencySpec) -> Result<HeaderCheck> {
        let dir = scratch_dir()?;
        let source = self.write_source(dir.path(), spec, false)?;
        let object = dir.path().join(ctx.platform.object_name("probe"));
        let args = header_probe_args(ctx, spec, &source, &object);

        let output = self.run(ctx.compiler_for(spec.language), &args, dir.path())?;
        Ok(if self.succeeded("header", &output) {
            HeaderCheck::found()
        } else {
            HeaderCheck::missing()
        })
    }

    fn check_link(
        &self,
        ctx: &BuildContext,
        spec: &DependencySpec,
        library: &str,
    ) -> Result<bool> {
        let dir = scratch_dir()?;
        let source = self.write_source(dir.path(), spec, true)?;
        let executable = dir.path().join(ctx.platform.executable_name("probe"));
        let args = link_probe_args(ctx, spec, library, &source, &executable);

        let output = self.run(ctx.compiler_for(spec.language), &args, dir.path())?;
        Ok(self.succeeded("link", &output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::BuildOptions;
    use crate::config::schema::{ProbeConfig, ToolchainConfig};
    use std::env::VarError;

    fn context(os: &str, cxx: &str) -> BuildContext {
        let config = ProbeConfig {
            toolchain: ToolchainConfig {
                cc: Some(cxx.to_string()),
                cxx: Some(cxx.to_string()),
                defines: vec!["HAVE_CONFIG".to_string()],
                ..Default::default()
            },
            ..Default::default()
        };
        let options = BuildOptions {
            os: Some(os.to_string()),
            includedirs: vec![PathBuf::from("/opt/curl/include")],
            libdirs: vec![PathBuf::from("/opt/curl/lib")],
            ..Default::default()
        };
        BuildContext::from_config_with_env(&config, &options, |_| Err(VarError::NotPresent))
            .unwrap()
    }

    fn curl() -> DependencySpec {
        DependencySpec::with_library("curl", "curl/curl.h", "curl", Language::C)
    }

    #[test]
    fn header_source_only_includes() {
        assert_eq!(test_source(&curl(), false), "#include <curl/curl.h>\n");
    }

    #[test]
    fn link_source_has_main() {
        let src = test_source(&curl(), true);
        assert!(src.starts_with("#include <curl/curl.h>"));
        assert!(src.contains("int main(void)"));

        let asio = DependencySpec::header_only("asio", "asio.hpp", Language::Cxx);
        assert!(test_source(&asio, true).contains("int main()"));
    }

    #[test]
    fn unix_link_args_put_library_last() {
        let ctx = context("linux", "gcc");
        let args = link_probe_args(
            &ctx,
            &curl(),
            "curl",
            Path::new("probe.c"),
            Path::new("probe"),
        );
        assert_eq!(
            args,
            vec![
                "-pthread",
                "-DHAVE_CONFIG",
                "-I/opt/curl/include",
                "probe.c",
                "-o",
                "probe",
                "-L/opt/curl/lib",
                "-pthread",
                "-lcurl",
            ]
        );
    }

    #[test]
    fn windows_link_args_use_link_section() {
        let ctx = context("win32", "cl");
        let args = link_probe_args(
            &ctx,
            &curl(),
            "libcurl",
            Path::new("probe.c"),
            Path::new("probe.exe"),
        );
        let marker = args.iter().position(|a| a == "/link").unwrap();
        let libpath = args.iter().position(|a| a == "/LIBPATH:/opt/curl/lib").unwrap();
        assert!(marker < libpath);
        assert_eq!(args.last().map(String::as_str), Some("libcurl.lib"));
        assert!(args.contains(&"/DWIN32".to_string()));
        assert!(args.contains(&"/Feprobe.exe".to_string()));
    }

    #[test]
    fn header_args_compile_only() {
        let ctx = context("linux", "gcc");
        let args = header_probe_args(&ctx, &curl(), Path::new("probe.c"), Path::new("probe.o"));
        assert!(args.contains(&"-c".to_string()));
        assert!(!args.iter().any(|a| a.starts_with("-l")));
        assert_eq!(&args[args.len() - 2..], &["-o".to_string(), "probe.o".to_string()]);
    }

    #[test]
    fn unspawnable_compiler_is_toolchain_error() {
        let ctx = context("linux", "/nonexistent/depprobe-cc");
        let err = CompilerToolchain::new()
            .check_header(&ctx, &curl())
            .unwrap_err();
        assert!(matches!(err, ProbeError::ToolchainUnavailable { .. }));
    }

    /// Host C compiler context, or `None` when `cc` cannot be run here.
    #[cfg(unix)]
    fn host_cc_context() -> Option<BuildContext> {
        let available = Command::new("cc")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false);
        if !available {
            eprintln!("skipping: no host cc");
            return None;
        }
        let config = ProbeConfig {
            toolchain: ToolchainConfig {
                cc: Some("cc".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let options = BuildOptions {
            os: Some(std::env::consts::OS.to_string()),
            ..Default::default()
        };
        BuildContext::from_config_with_env(&config, &options, |_| Err(VarError::NotPresent)).ok()
    }

    #[cfg(unix)]
    #[test]
    fn host_compiler_outcomes() {
        use crate::probe::{ProbeOutcome, Prober};

        let Some(ctx) = host_cc_context() else {
            return;
        };
        let toolchain = CompilerToolchain::new();
        let mut prober = Prober::new(&ctx, &toolchain);

        let libm = DependencySpec::with_library("libm", "math.h", "m", Language::C);
        let nolib = DependencySpec::with_library(
            "nolib",
            "stdio.h",
            "depprobe_nonexistent",
            Language::C,
        );
        let nohdr = DependencySpec::header_only("nohdr", "depprobe_missing.h", Language::C);

        assert_eq!(prober.check_one(&libm).unwrap().outcome, ProbeOutcome::Found);
        assert_eq!(
            prober.check_one(&nolib).unwrap().outcome,
            ProbeOutcome::LinkFailed
        );
        assert_eq!(
            prober.check_one(&nohdr).unwrap().outcome,
            ProbeOutcome::HeaderMissing
        );

        let err = prober.probe(&[libm, nohdr]).unwrap_err();
        assert!(matches!(err, ProbeError::MissingDependency { library } if library == "nohdr"));
    }
}
