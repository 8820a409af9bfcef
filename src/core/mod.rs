//! Core data structures for zigchain.
//!
//! - Target triples (`arch-os-libc`)
//! - The universe of targets a zig installation supports

pub mod triple;
pub mod universe;

pub use triple::{TargetTriple, TripleParseError};
pub use universe::TargetUniverse;
