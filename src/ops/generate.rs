//! Toolchain generation: resolve the requested targets and write one
//! toolchain file per target.

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;

use miette::Diagnostic as MietteDiagnostic;
use rayon::prelude::*;
use thiserror::Error;

use crate::core::{TargetTriple, TargetUniverse};
use crate::ops::write::{FilesystemError, ToolchainSink};
use crate::toolchain::map_target;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Which targets the user asked for.
#[derive(Debug, Clone, Default)]
pub struct TargetRequest {
    /// Explicit target identifiers, possibly repeated
    pub targets: Vec<String>,

    /// Generate every discovered target, ignoring `targets`
    pub all: bool,
}

impl TargetRequest {
    pub fn all() -> Self {
        TargetRequest {
            targets: Vec::new(),
            all: true,
        }
    }

    pub fn targets<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TargetRequest {
            targets: targets.into_iter().map(Into::into).collect(),
            all: false,
        }
    }
}

/// Options for [`generate`].
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Number of worker threads (None = rayon's default)
    pub jobs: Option<usize>,
}

/// Outcome of target resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Nothing requested: the caller should show the universe instead.
    ListOnly,
    /// Generate these targets.
    Targets(Vec<TargetTriple>),
}

/// Outcome of a successful [`generate`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Generation {
    /// Nothing requested; nothing was written.
    Listed,
    /// Paths written, in resolution order.
    Written(Vec<PathBuf>),
}

/// One or more requested targets are not supported by the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
#[error("invalid targets:\n{}", .invalid.join("\n"))]
#[diagnostic(
    code(zigchain::validate::invalid_target),
    help("Run `zigchain` without arguments to list available targets")
)]
pub struct ValidationError {
    /// Every rejected identifier, in request order.
    pub invalid: Vec<String>,
}

impl ValidationError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut diag = Diagnostic::error(if self.invalid.len() == 1 {
            "invalid target".to_string()
        } else {
            format!("{} invalid targets", self.invalid.len())
        });

        for target in &self.invalid {
            diag = diag.with_context(target.clone());
        }

        diag.with_suggestion(suggestions::LIST_TARGETS)
    }
}

/// Error from [`generate`].
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Prepare(FilesystemError),

    #[error("failed to write {} of {} toolchain files", .failures.len(), .failures.len() + .written.len())]
    Write {
        failures: Vec<FilesystemError>,
        written: Vec<PathBuf>,
    },

    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl GenerateError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            GenerateError::Validation(e) => e.to_diagnostic(),
            GenerateError::Prepare(e) => e.to_diagnostic(),
            GenerateError::Write { failures, .. } => {
                let mut diag = Diagnostic::error(self.to_string());
                for failure in failures {
                    let cause = match failure {
                        FilesystemError::CreateDir { source, .. }
                        | FilesystemError::Write { source, .. } => source,
                    };
                    diag = diag.with_context(format!("{}: {}", failure.path().display(), cause));
                }
                diag.with_suggestion(suggestions::CHECK_OUTPUT_DIR)
            }
            GenerateError::ThreadPool(_) => Diagnostic::error(self.to_string()),
        }
    }
}

/// Resolve a request against the discovered universe.
///
/// Explicit targets are deduplicated (first occurrence wins) and all of
/// them are checked before failing, so the error names every bad entry.
pub fn resolve_targets(
    universe: &TargetUniverse,
    request: &TargetRequest,
) -> Result<Resolution, ValidationError> {
    if request.all {
        return Ok(Resolution::Targets(universe.iter().cloned().collect()));
    }

    if request.targets.is_empty() {
        return Ok(Resolution::ListOnly);
    }

    let mut seen = HashSet::new();
    let mut resolved = Vec::new();
    let mut invalid = Vec::new();

    for name in &request.targets {
        if !seen.insert(name.as_str()) {
            continue;
        }
        match universe.get(name) {
            Some(triple) => resolved.push(triple.clone()),
            None => invalid.push(name.clone()),
        }
    }

    if !invalid.is_empty() {
        return Err(ValidationError { invalid });
    }

    Ok(Resolution::Targets(resolved))
}

/// Resolve the request and write one toolchain file per target.
///
/// Targets are mapped and written in parallel. A failed write does not stop
/// its siblings; every failure is collected and reported together.
pub fn generate(
    universe: &TargetUniverse,
    request: &TargetRequest,
    sink: &dyn ToolchainSink,
    opts: &GenerateOptions,
) -> Result<Generation, GenerateError> {
    let targets = match resolve_targets(universe, request)? {
        Resolution::ListOnly => return Ok(Generation::Listed),
        Resolution::Targets(targets) => targets,
    };

    sink.prepare().map_err(GenerateError::Prepare)?;

    let start = Instant::now();
    tracing::info!("Generating {} toolchain file(s)", targets.len());

    let mut pool = rayon::ThreadPoolBuilder::new();
    if let Some(jobs) = opts.jobs {
        pool = pool.num_threads(jobs);
    }
    let pool = pool.build()?;

    let results: Vec<Result<PathBuf, FilesystemError>> = pool.install(|| {
        targets
            .par_iter()
            .map(|target| sink.write(&map_target(target)))
            .collect()
    });

    let mut written = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(path) => written.push(path),
            Err(e) => failures.push(e),
        }
    }

    if !failures.is_empty() {
        return Err(GenerateError::Write { failures, written });
    }

    tracing::debug!(
        "wrote {} file(s) in {:.2}s",
        written.len(),
        start.elapsed().as_secs_f64()
    );

    Ok(Generation::Written(written))
}
