//! zigchain - CMake toolchain files for cross-compiling with `zig cc`
//!
//! This crate discovers the targets a zig installation supports, maps each
//! `arch-os-libc` triple to CMake's naming conventions, and renders one
//! toolchain file per target.

pub mod core;
pub mod discovery;
pub mod ops;
pub mod toolchain;
pub mod util;

pub use crate::core::{TargetTriple, TargetUniverse};
pub use discovery::{discover_targets, discover_universe, parse_targets, DiscoveryError};
pub use ops::{generate, resolve_targets, FsSink, TargetRequest, ToolchainSink};
pub use toolchain::{map_target, ToolchainDocument};
pub use util::config::Config;
