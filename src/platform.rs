//! Target platform selection.
//!
//! The platform is picked once at startup (from the `OS` option or the
//! host) and every platform-conditional rule of the configuration pass hangs
//! off [`Platform`]: compiler flag syntax, default compilers and search
//! paths, base defines, and which probes degrade to header-only checks.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::error::ProbeError;
use crate::probe::DependencySpec;

/// Platform the dependencies are probed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    MacOS,
    Unix,
}

impl Platform {
    /// Detect the host platform.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOS
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Unix
        }
    }

    /// Select the platform from an optional `OS` override, falling back to the host.
    pub fn select(os: Option<&str>) -> Result<Self, ProbeError> {
        match os {
            Some(value) if !value.trim().is_empty() => value.parse(),
            _ => Ok(Self::current()),
        }
    }

    /// Short lowercase name, also used for `${platform}` interpolation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::MacOS => "macos",
            Platform::Unix => "unix",
        }
    }

    pub fn is_windows(&self) -> bool {
        matches!(self, Platform::Windows)
    }

    /// Whether the link step is skipped for this dependency.
    ///
    /// Libraries without stable import names on Windows (Boost auto-linking,
    /// versioned vendor builds) are only checked for their header there.
    pub fn skips_link_for(&self, spec: &DependencySpec) -> bool {
        self.is_windows() && spec.windows_header_only
    }

    pub fn include_flag(&self, dir: &Path) -> String {
        match self {
            Platform::Windows => format!("/I{}", dir.display()),
            _ => format!("-I{}", dir.display()),
        }
    }

    pub fn lib_dir_flag(&self, dir: &Path) -> String {
        match self {
            Platform::Windows => format!("/LIBPATH:{}", dir.display()),
            _ => format!("-L{}", dir.display()),
        }
    }

    pub fn link_lib_flag(&self, library: &str) -> String {
        match self {
            Platform::Windows => format!("{}.lib", library),
            _ => format!("-l{}", library),
        }
    }

    pub fn define_flag(&self, define: &str) -> String {
        match self {
            Platform::Windows => format!("/D{}", define),
            _ => format!("-D{}", define),
        }
    }

    /// Flag naming the output executable.
    pub fn output_flag(&self, path: &Path) -> Vec<String> {
        match self {
            Platform::Windows => vec![format!("/Fe{}", path.display())],
            _ => vec!["-o".to_string(), path.display().to_string()],
        }
    }

    /// Flag naming the object file of a compile-only run.
    pub fn object_output_flag(&self, path: &Path) -> Vec<String> {
        match self {
            Platform::Windows => vec![format!("/Fo{}", path.display())],
            _ => vec!["-o".to_string(), path.display().to_string()],
        }
    }

    pub fn object_name(&self, stem: &str) -> String {
        match self {
            Platform::Windows => format!("{}.obj", stem),
            _ => format!("{}.o", stem),
        }
    }

    /// Flag that stops after compilation (header probes).
    pub fn compile_only_flag(&self) -> &'static str {
        match self {
            Platform::Windows => "/c",
            _ => "-c",
        }
    }

    /// Marker that separates compiler arguments from linker arguments.
    ///
    /// MSVC needs `/link` before `/LIBPATH:`; gcc-style drivers take both inline.
    pub fn link_section_marker(&self) -> Option<&'static str> {
        match self {
            Platform::Windows => Some("/link"),
            _ => None,
        }
    }

    pub fn executable_name(&self, stem: &str) -> String {
        match self {
            Platform::Windows => format!("{}.exe", stem),
            _ => stem.to_string(),
        }
    }

    pub fn default_cc(&self) -> &'static str {
        match self {
            Platform::Windows => "cl",
            Platform::MacOS => "clang",
            Platform::Unix => "cc",
        }
    }

    pub fn default_cxx(&self) -> &'static str {
        match self {
            Platform::Windows => "cl",
            Platform::MacOS => "clang++",
            Platform::Unix => "c++",
        }
    }

    /// System include directories searched after the user's.
    ///
    /// Windows relies on the `INCLUDE` environment of the developer prompt.
    pub fn default_include_dirs(&self) -> Vec<PathBuf> {
        self.include_dirs_under(Path::new("/"))
    }

    /// System library directories searched after the user's.
    pub fn default_lib_dirs(&self) -> Vec<PathBuf> {
        self.lib_dirs_under(Path::new("/"))
    }

    /// System include directories relative to a filesystem root.
    pub fn include_dirs_under(&self, root: &Path) -> Vec<PathBuf> {
        let rel: Vec<String> = match self {
            Platform::Windows => Vec::new(),
            Platform::MacOS => vec![
                "usr/local/include".into(),
                "opt/homebrew/include".into(),
                "usr/include".into(),
            ],
            Platform::Unix => vec![
                "usr/local/include".into(),
                format!("usr/include/{}", multiarch_triple()),
                "usr/include".into(),
            ],
        };
        rel.iter().map(|dir| root.join(dir)).collect()
    }

    /// System library directories relative to a filesystem root.
    ///
    /// Debian-style hosts keep most libraries in the multiarch directory
    /// (`usr/lib/x86_64-linux-gnu`).
    pub fn lib_dirs_under(&self, root: &Path) -> Vec<PathBuf> {
        let rel: Vec<String> = match self {
            Platform::Windows => Vec::new(),
            Platform::MacOS => vec![
                "usr/local/lib".into(),
                "opt/homebrew/lib".into(),
                "usr/lib".into(),
            ],
            Platform::Unix => {
                let triple = multiarch_triple();
                vec![
                    "usr/local/lib".into(),
                    format!("usr/lib/{}", triple),
                    "usr/lib".into(),
                    "usr/lib64".into(),
                    format!("lib/{}", triple),
                    "lib".into(),
                ]
            }
        };
        rel.iter().map(|dir| root.join(dir)).collect()
    }

    pub fn base_defines(&self) -> Vec<String> {
        match self {
            Platform::Windows => vec![
                "WIN32".to_string(),
                "_WINDOWS".to_string(),
                "WIN32_LEAN_AND_MEAN".to_string(),
            ],
            _ => Vec::new(),
        }
    }

    pub fn base_cflags(&self) -> Vec<String> {
        match self {
            Platform::Windows => vec!["/EHsc".to_string(), "/nologo".to_string()],
            Platform::MacOS => Vec::new(),
            Platform::Unix => vec!["-pthread".to_string()],
        }
    }

    pub fn base_linkflags(&self) -> Vec<String> {
        match self {
            Platform::Unix => vec!["-pthread".to_string()],
            _ => Vec::new(),
        }
    }

    /// File names a library may be installed under, in search order.
    pub fn library_candidates(&self, library: &str) -> Vec<String> {
        match self {
            Platform::Windows => vec![format!("{}.lib", library), format!("lib{}.lib", library)],
            Platform::MacOS => vec![
                format!("lib{}.dylib", library),
                format!("lib{}.a", library),
                format!("lib{}.so", library),
            ],
            Platform::Unix => vec![format!("lib{}.so", library), format!("lib{}.a", library)],
        }
    }
}

/// Debian multiarch tuple for the host architecture.
pub fn multiarch_triple() -> String {
    match std::env::consts::ARCH {
        "x86" => "i386-linux-gnu".to_string(),
        "arm" => "arm-linux-gnueabihf".to_string(),
        "powerpc64" if cfg!(target_endian = "little") => "powerpc64le-linux-gnu".to_string(),
        arch => format!("{}-linux-gnu", arch),
    }
}

impl FromStr for Platform {
    type Err = ProbeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "win32" | "windows" | "cygwin" | "mingw" => Ok(Platform::Windows),
            "darwin" | "macos" | "osx" => Ok(Platform::MacOS),
            "linux" | "posix" | "unix" | "solaris" | "sunos" | "freebsd" => Ok(Platform::Unix),
            other => Err(ProbeError::InvalidOption {
                message: format!("unknown OS '{}'", other),
            }),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
