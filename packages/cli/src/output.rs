//! Terminal output formatting.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use colored::Colorize;
use indicatif::HumanBytes;
use pcopy_config::Options;

use crate::runtime::RunSummary;

/// Print a header message.
pub fn print_header(message: &str) {
    println!("\n{}\n", message.bold());
}

/// Print the sources and the options in effect.
pub fn print_run_info(sources: &[PathBuf], options: &Options) {
    for source in sources {
        println!("Source:      {}", source.display().to_string().cyan());
    }
    println!(
        "Destination: {}",
        options.dest_root().display().to_string().cyan()
    );
    if let Some(appendix) = options.dest_base_appendix() {
        println!("Appendix:    {}", appendix.cyan());
    }
    println!(
        "Chunk size:  {}  Filesystem: {}",
        HumanBytes(options.chunk_size()),
        if options.reliable_filesystem() {
            "reliable".green()
        } else {
            "unreliable (retrying)".yellow()
        }
    );
    println!();
}

/// Print the totals of a finished run.
pub fn print_summary(summary: &RunSummary) {
    println!(
        "{} {} directories, {} files ({}) in {} chunks",
        "✓".green(),
        summary.directories,
        summary.files,
        HumanBytes(summary.bytes),
        summary.chunks
    );
    if summary.retries > 0 {
        println!(
            "{} {} operations retried",
            "•".dimmed(),
            summary.retries.to_string().yellow()
        );
    }
}

/// Print error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}
