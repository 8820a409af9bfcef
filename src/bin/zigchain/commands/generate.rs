//! `zigchain [--target <TARGET>...] [--all]`
//!
//! Lists the targets zig supports, or writes toolchain files for the
//! requested ones.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli::GenerateArgs;
use zigchain::core::TargetUniverse;
use zigchain::discovery::discover_universe;
use zigchain::ops::{generate, FsSink, GenerateOptions, Generation, TargetRequest};
use zigchain::util::config::{global_config_path, load_config, project_config_path};
use zigchain::util::process::locate_frontend;

pub fn execute(args: GenerateArgs) -> Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;

    // Load configuration (global + project)
    let global = global_config_path();
    let config = load_config(global.as_deref(), &project_config_path(&cwd));

    // Frontend: CLI/env > config > PATH
    let zig = locate_frontend(args.zig.as_deref().or(config.frontend.path.as_deref()))?;
    tracing::debug!("using zig at {}", zig.display());

    let universe = discover_universe(&zig)?;

    let request = TargetRequest {
        targets: args.targets,
        all: args.all,
    };

    // Output and jobs: CLI > config > defaults
    let output = args.output.unwrap_or_else(|| config.output_dir());
    let sink = FsSink::new(&output);
    let opts = GenerateOptions {
        jobs: args.jobs.or(config.output.jobs),
    };

    match generate(&universe, &request, &sink, &opts)? {
        Generation::Listed => list_targets(&universe, args.json),
        Generation::Written(paths) => {
            report_written(&paths, &output);
            Ok(())
        }
    }
}

fn list_targets(universe: &TargetUniverse, json: bool) -> Result<()> {
    if json {
        let names = universe.names();
        println!("{}", serde_json::to_string_pretty(&names)?);
        return Ok(());
    }

    println!("Available targets:");
    for target in universe {
        println!("{}", target);
    }

    Ok(())
}

fn report_written(paths: &[PathBuf], output: &Path) {
    for path in paths {
        eprintln!("     Created {}", path.display());
    }
    eprintln!(
        "    Finished {} toolchain file(s) in {}",
        paths.len(),
        output.display()
    );
}
