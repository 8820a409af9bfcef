//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// zigchain - CMake toolchain files for cross-compiling with zig cc
///
/// Without `--target` or `--all`, lists the targets zig supports.
#[derive(Parser)]
#[command(name = "zigchain")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub generate: GenerateArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Target to generate a toolchain file for (repeatable)
    #[arg(short, long = "target", value_name = "TARGET")]
    pub targets: Vec<String>,

    /// Generate toolchain files for every supported target
    #[arg(short, long)]
    pub all: bool,

    /// Directory to write toolchain files to [default: .]
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// zig executable used to discover targets
    #[arg(long, value_name = "PATH", env = "ZIG")]
    pub zig: Option<PathBuf>,

    /// Number of parallel jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Print the target list as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
