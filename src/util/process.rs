//! Subprocess execution utilities.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Output, Stdio};

use anyhow::{bail, Context, Result};

/// Name of the toolchain frontend executable.
pub const ZIG: &str = "zig";

/// Builder for subprocess execution.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Get the arguments.
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Execute the command and wait for completion.
    ///
    /// Stdout and stderr are captured; stdin is closed.
    pub fn exec(&self) -> std::io::Result<Output> {
        tracing::debug!("running `{}`", self.display_command());

        Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
    }

    /// Display the command for error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }
}

/// The signal that terminated a process, if any.
#[cfg(unix)]
pub fn terminating_signal(status: &ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
pub fn terminating_signal(_status: &ExitStatus) -> Option<i32> {
    None
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Locate the zig frontend.
///
/// A configured path is used as-is when it points at a file, and looked up
/// in PATH otherwise (so `--zig zig-0.13` works). Without one, `zig` is
/// searched for in PATH.
pub fn locate_frontend(configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = configured {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return which::which(path).with_context(|| {
            format!("configured zig executable not found: {}", path.display())
        });
    }

    match find_executable(ZIG) {
        Some(path) => Ok(path),
        None => bail!(
            "zig not found\n\
             \n\
             zigchain needs zig to discover the supported targets.\n\
             Install zig and ensure it's in your PATH, pass `--zig <path>`,\n\
             or set `frontend.path` in .zigchain/config.toml."
        ),
    }
}
