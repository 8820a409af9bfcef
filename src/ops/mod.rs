//! High-level operations.
//!
//! This module contains the implementation of zigchain commands.

pub mod generate;
pub mod write;

pub use generate::{
    generate, resolve_targets, GenerateError, GenerateOptions, Generation, Resolution,
    TargetRequest, ValidationError,
};
pub use write::{FilesystemError, FsSink, ToolchainSink};
