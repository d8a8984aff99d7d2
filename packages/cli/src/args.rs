//! CLI argument definitions.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use clap::Parser;

/// CLI arguments for pcopy.
#[derive(Debug, Parser)]
#[command(
    name = "pcopy",
    about = "Walk source trees and schedule chunked copy work",
    version
)]
pub struct Args {
    /// Source paths followed by the destination path.
    #[arg(required = true, num_args = 2.., value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Configuration file (defaults to $PCOPY_CONFIG or the platform config dir).
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Abort on any filesystem error (overrides config).
    #[arg(long, conflicts_with = "unreliable")]
    pub reliable: bool,

    /// Retry operations that hit filesystem errors (overrides config).
    #[arg(long, short = 'U')]
    pub unreliable: bool,

    /// Chunk size in bytes.
    #[arg(long, value_name = "BYTES")]
    pub chunk_size: Option<u64>,

    /// Extra path segment to insert under the destination.
    #[arg(long, value_name = "SEGMENT")]
    pub appendix: Option<String>,

    /// Disable progress display (useful for CI environments).
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Enable verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Args {
    /// Sources and destination, in that order.
    #[must_use]
    pub fn sources_and_destination(&self) -> Option<(&[PathBuf], &Path)> {
        self.paths
            .split_last()
            .filter(|(_, sources)| !sources.is_empty())
            .map(|(dest, sources)| (sources, dest.as_path()))
    }

    /// Returns `Some(true)` for `--reliable`, `Some(false)` for `--unreliable`,
    /// or `None` to use the config value.
    #[must_use]
    pub const fn reliable_override(&self) -> Option<bool> {
        if self.unreliable {
            Some(false)
        } else if self.reliable {
            Some(true)
        } else {
            None
        }
    }

    /// Determine if we should show progress.
    #[must_use]
    pub const fn should_show_progress(&self) -> bool {
        !self.no_progress
    }
}
