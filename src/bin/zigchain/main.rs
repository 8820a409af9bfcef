//! zigchain CLI - CMake toolchain files for cross-compiling with zig cc

use std::io::IsTerminal;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use zigchain::discovery::DiscoveryError;
use zigchain::ops::GenerateError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let color = !cli.no_color && std::io::stderr().is_terminal();

    if let Err(e) = run(cli, color) {
        report(&e, color);
        std::process::exit(1);
    }
}

fn run(cli: Cli, color: bool) -> Result<()> {
    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("zigchain=debug")
    } else {
        EnvFilter::new("zigchain=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_ansi(color)
        .init();

    // Execute command
    match cli.command {
        Some(Commands::Completions(args)) => commands::completions::execute(args),
        None => commands::generate::execute(cli.generate),
    }
}

/// Print an error, with suggestions when the library provides them.
fn report(e: &anyhow::Error, color: bool) {
    let diagnostic = if let Some(err) = e.downcast_ref::<DiscoveryError>() {
        Some(err.to_diagnostic())
    } else {
        e.downcast_ref::<GenerateError>().map(GenerateError::to_diagnostic)
    };

    match diagnostic {
        Some(diag) => eprint!("{}", diag.format(color)),
        None => eprintln!("error: {:#}", e),
    }
}
