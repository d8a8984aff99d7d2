//! pcopy CLI entry point.
//!
//! Seeds one TREEWALK per source and drains the queue as a single participant.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod args;
mod output;
mod progress;
mod runtime;

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use args::Args;
use pcopy_config::{OptionsBuilder, load_file_config};
use pcopy_operation::encode;
use pcopy_treewalk::{LocalQueue, WorkQueue, seed_operation};
use progress::ProgressManager;
use runtime::run_participant;

fn main() {
    let args = Args::parse();

    // Set up logging
    if args.verbose {
        // SAFETY: We're setting this before any other threads are spawned
        unsafe {
            env::set_var("RUST_LOG", "debug");
        }
    }
    pretty_env_logger::init();

    if let Err(e) = run(&args) {
        log::error!("{e}");
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Main application logic.
fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let (sources, dest) = args
        .sources_and_destination()
        .ok_or("expected at least one source and a destination")?;

    let cwd = env::current_dir()?;
    let sources: Vec<PathBuf> = sources.iter().map(|s| absolute(&cwd, s)).collect();

    let file_config = load_file_config(args.config.as_deref())?;
    let mut builder = OptionsBuilder::from_file(file_config).dest_root(absolute(&cwd, dest));
    if let Some(reliable) = args.reliable_override() {
        builder = builder.reliable_filesystem(reliable);
    }
    if let Some(chunk_size) = args.chunk_size {
        builder = builder.chunk_size(chunk_size);
    }
    if let Some(appendix) = &args.appendix {
        builder = builder.dest_base_appendix(appendix);
    }
    let options = builder.build()?;

    // Several sources each keep their own name under the destination.
    if sources.len() > 1 {
        fs::create_dir_all(options.dest_root())?;
    }

    output::print_header("pcopy");
    output::print_run_info(&sources, &options);

    let mut queue = LocalQueue::new();
    for source in &sources {
        let op = seed_operation(source, &options)?;
        queue.enqueue(encode(&op));
    }

    let progress = ProgressManager::new(args.should_show_progress());
    let result = run_participant(&mut queue, &options, |summary, pending| {
        progress.update(summary, pending);
    });
    progress.clear();

    let summary = result?;
    log::info!("Run finished: {summary:?}");
    output::print_summary(&summary);

    Ok(())
}

/// Make `path` absolute against `cwd` and normalize it.
fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    path_clean::clean(path)
}
