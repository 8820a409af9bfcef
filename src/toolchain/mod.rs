//! CMake toolchain file generation.
//!
//! A toolchain file points CMake's C/C++ compilers, archiver and ranlib at
//! the zig executable, passing the zig subcommand (`cc`, `c++`, `ar`,
//! `ranlib`) as the first argument. The selected target is exposed as
//! `ZIG_ARCH`/`ZIG_OS`/`ZIG_LIBC` and the reassembled `ZIG_TARGET`, so a
//! project can forward it to `zig cc -target`.
//!
//! Only the Ninja generator is supported; the file stops configuration with
//! a fatal error under any other generator.

pub mod naming;

use std::fmt::Write as _;

use crate::core::TargetTriple;

pub use naming::{system_name, system_processor};

/// File extension of generated toolchain files.
pub const TOOLCHAIN_EXTENSION: &str = "cmake";

/// CMake tool variable and the zig subcommand it is invoked with.
const ZIG_TOOLS: &[(&str, &str)] = &[
    ("CMAKE_C_COMPILER", "cc"),
    ("CMAKE_CXX_COMPILER", "c++"),
    ("CMAKE_AR", "ar"),
    ("CMAKE_RANLIB", "ranlib"),
];

/// A rendered toolchain file for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainDocument {
    target: TargetTriple,
    contents: String,
}

impl ToolchainDocument {
    /// The target this document configures.
    pub fn target(&self) -> &TargetTriple {
        &self.target
    }

    /// File name the document is written under: `<triple>.cmake`.
    pub fn file_name(&self) -> String {
        toolchain_file_name(&self.target)
    }

    pub fn as_str(&self) -> &str {
        &self.contents
    }

    pub fn into_string(self) -> String {
        self.contents
    }
}

impl std::fmt::Display for ToolchainDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.contents)
    }
}

/// File name for a target's toolchain file.
pub fn toolchain_file_name(target: &TargetTriple) -> String {
    format!("{}.{}", target, TOOLCHAIN_EXTENSION)
}

/// Render the toolchain file for a target.
pub fn map_target(target: &TargetTriple) -> ToolchainDocument {
    ToolchainDocument {
        target: target.clone(),
        contents: render(target),
    }
}

fn render(target: &TargetTriple) -> String {
    let mut out = String::new();

    out.push_str(concat!(
        "if ( NOT CMAKE_GENERATOR STREQUAL \"Ninja\" )\n",
        "  message ( FATAL_ERROR \"Unsupported generator\" )\n",
        "endif ()\n",
        "\n",
        "find_program ( ZIG_EXECUTABLE zig REQUIRED )\n",
        "\n",
    ));

    // Writing into a String cannot fail.
    for (var, subcommand) in ZIG_TOOLS {
        let _ = writeln!(out, "set ( {var} ${{ZIG_EXECUTABLE}} )");
        let _ = writeln!(out, "set ( {var}_ARG1 \"{subcommand}\" )");
        out.push('\n');
    }

    let _ = writeln!(out, "set ( ZIG_ARCH \"{}\" )", target.arch);
    let _ = writeln!(out, "set ( ZIG_OS \"{}\" )", target.os);
    let _ = writeln!(out, "set ( ZIG_LIBC \"{}\" )", target.libc);
    out.push('\n');

    out.push_str("set ( ZIG_TARGET \"${ZIG_ARCH}-${ZIG_OS}-${ZIG_LIBC}\")\n");
    let _ = writeln!(
        out,
        "set ( CMAKE_SYSTEM_NAME \"{}\" )",
        system_name(&target.os)
    );
    let _ = write!(
        out,
        "set ( CMAKE_SYSTEM_PROCESSOR \"{}\" )",
        system_processor(&target.arch)
    );

    out
}
