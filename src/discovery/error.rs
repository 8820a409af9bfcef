//! Discovery error types and diagnostics.

use std::path::PathBuf;

use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error while asking the frontend for its supported targets.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to spawn `{}`", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`zig targets` failed with exit code {code}\n{stderr}")]
    ExitCode { code: i32, stderr: String },

    #[error("`zig targets` failed with signal {signal}\n{stderr}")]
    Signal { signal: i32, stderr: String },

    #[error("unexpected `zig targets` output: {0}")]
    Format(String),
}

impl DiscoveryError {
    /// Whether the frontend ran but terminated abnormally.
    pub fn is_process_failure(&self) -> bool {
        matches!(
            self,
            DiscoveryError::ExitCode { .. } | DiscoveryError::Signal { .. }
        )
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            DiscoveryError::Spawn { program, source } => {
                Diagnostic::error(format!("failed to run `{} targets`", program.display()))
                    .with_context(source.to_string())
                    .with_suggestion(suggestions::ZIG_NOT_FOUND)
            }

            DiscoveryError::ExitCode { code, stderr } => {
                let mut diag =
                    Diagnostic::error(format!("`zig targets` failed with exit code {}", code));
                for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
                    diag = diag.with_context(line.to_string());
                }
                diag
            }

            DiscoveryError::Signal { signal, stderr } => {
                let mut diag =
                    Diagnostic::error(format!("`zig targets` was killed by signal {}", signal));
                for line in stderr.lines().filter(|l| !l.trim().is_empty()) {
                    diag = diag.with_context(line.to_string());
                }
                diag
            }

            DiscoveryError::Format(reason) => {
                Diagnostic::error("could not read the target list from `zig targets`")
                    .with_context(reason.clone())
                    .with_suggestion(suggestions::UNSUPPORTED_ZIG)
            }
        }
    }
}
