//! Target triple model.
//!
//! Zig names its cross-compilation targets `arch-os-libc`, for example
//! `x86_64-linux-gnu` or `aarch64-macos-none`. Unlike LLVM triples there is
//! no vendor component, and the libc component is always present.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error returned when a string is not a well-formed `arch-os-libc` triple.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid target triple `{input}`: expected `arch-os-libc`")]
pub struct TripleParseError {
    pub input: String,
}

/// Target triple components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetTriple {
    /// CPU architecture (x86_64, aarch64, riscv64, etc.)
    pub arch: String,
    /// Operating system (linux, macos, windows, wasi, etc.)
    pub os: String,
    /// C library / ABI variant (gnu, musl, none, etc.)
    pub libc: String,
}

impl TargetTriple {
    /// Create a new target triple.
    pub fn new(arch: &str, os: &str, libc: &str) -> Self {
        TargetTriple {
            arch: arch.to_string(),
            os: os.to_string(),
            libc: libc.to_string(),
        }
    }

    /// Parse a target triple string.
    ///
    /// Exactly three non-empty, dash-separated components are required.
    pub fn parse(s: &str) -> Result<Self, TripleParseError> {
        let err = || TripleParseError {
            input: s.to_string(),
        };

        let mut parts = s.split('-');
        let (Some(arch), Some(os), Some(libc), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(err());
        };

        if arch.is_empty() || os.is_empty() || libc.is_empty() {
            return Err(err());
        }

        Ok(TargetTriple::new(arch, os, libc))
    }
}

impl FromStr for TargetTriple {
    type Err = TripleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TargetTriple::parse(s)
    }
}

impl fmt::Display for TargetTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.arch, self.os, self.libc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_triple_parse() {
        let triple = TargetTriple::parse("x86_64-linux-gnu").unwrap();
        assert_eq!(triple.arch, "x86_64");
        assert_eq!(triple.os, "linux");
        assert_eq!(triple.libc, "gnu");
    }

    #[test]
    fn test_target_triple_display_roundtrip() {
        let triple: TargetTriple = "aarch64-macos-none".parse().unwrap();
        assert_eq!(triple.to_string(), "aarch64-macos-none");
    }

    #[test]
    fn test_target_triple_rejects_malformed() {
        for input in ["", "x86_64", "x86_64-linux", "x86_64-unknown-linux-gnu", "a--c", "-b-c", "a-b-"] {
            let err = TargetTriple::parse(input).unwrap_err();
            assert_eq!(err.input, input);
        }
    }

    #[test]
    fn test_target_triple_keeps_underscores() {
        let triple = TargetTriple::parse("powerpc64le-linux-musl").unwrap();
        assert_eq!(triple.arch, "powerpc64le");

        let triple = TargetTriple::parse("x86_64-linux-gnux32").unwrap();
        assert_eq!(triple.libc, "gnux32");
    }
}
