//! Target discovery.
//!
//! `zig targets` prints a ZON document describing everything the installed
//! compiler can target. The `.libc` group of that document lists every
//! `arch-os-libc` triple zig ships a libc for, which is exactly the set of
//! targets `zig cc` can build hosted C/C++ for:
//!
//! ```text
//! .{
//!  .arch = .{ ... },
//!  .os = .{ ... },
//!  .libc = .{
//!   "aarch64-linux-gnu",
//!   "x86_64-windows-gnu",
//!  },
//!  .native = .{ ... },
//! }
//! ```
//!
//! The format is not documented upstream, so parsing is kept in
//! [`parse_targets`] and fails loudly on anything unexpected.

pub mod error;

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::{TargetTriple, TargetUniverse};
use crate::util::process::{terminating_signal, ProcessBuilder};

pub use error::DiscoveryError;

/// Subcommand that prints the frontend's self-description.
pub const TARGETS_SUBCOMMAND: &str = "targets";

static LIBC_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.libc\s*=\s*\.(\{[^}]*\})").expect("valid regex"));

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]*)""#).expect("valid regex"));

/// Run `<frontend> targets` and return the supported triples in the order
/// zig reports them.
pub fn discover_targets(frontend: &Path) -> Result<Vec<TargetTriple>, DiscoveryError> {
    let cmd = ProcessBuilder::new(frontend).arg(TARGETS_SUBCOMMAND);

    let output = cmd.exec().map_err(|source| DiscoveryError::Spawn {
        program: frontend.to_path_buf(),
        source,
    })?;

    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if let Some(signal) = terminating_signal(&output.status) {
        return Err(DiscoveryError::Signal { signal, stderr });
    }

    if !output.status.success() {
        return Err(DiscoveryError::ExitCode {
            code: output.status.code().unwrap_or(-1),
            stderr,
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let targets = parse_targets(&stdout)?;

    tracing::debug!(
        "`{}` reported {} targets",
        cmd.display_command(),
        targets.len()
    );

    Ok(targets)
}

/// Run discovery and collect the result into a [`TargetUniverse`].
pub fn discover_universe(frontend: &Path) -> Result<TargetUniverse, DiscoveryError> {
    discover_targets(frontend).map(TargetUniverse::new)
}

/// Extract the triples listed in the `.libc` group of `zig targets` output.
pub fn parse_targets(output: &str) -> Result<Vec<TargetTriple>, DiscoveryError> {
    let block = LIBC_BLOCK
        .captures(output)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| DiscoveryError::Format("no `.libc = .{ ... }` block found".to_string()))?
        .as_str();

    let targets = QUOTED
        .captures_iter(block)
        .filter_map(|caps| caps.get(1))
        .map(|m| {
            TargetTriple::parse(m.as_str()).map_err(|e| DiscoveryError::Format(e.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if targets.is_empty() {
        return Err(DiscoveryError::Format(
            "the `.libc` block lists no targets".to_string(),
        ));
    }

    Ok(targets)
}
