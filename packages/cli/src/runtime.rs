//! Single-participant driver over a local queue.
//!
//! Pulls tokens until the queue is empty and dispatches them by opcode.
//! TREEWALK goes to the treewalk stage; COPY and CLEANUP are handed to the
//! downstream stages, which here only tally what they would do.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use pcopy_config::Options;
use pcopy_operation::{Opcode, Operation, decode};
use pcopy_treewalk::{LocalQueue, Outcome, TreewalkError, treewalk};

/// How often (in processed tokens) progress is reported.
const PROGRESS_INTERVAL: u64 = 1_000;

/// Totals for a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Tokens taken off the queue.
    pub processed: u64,
    /// Directories mirrored.
    pub directories: u64,
    /// Regular files chunked.
    pub files: u64,
    /// Bytes in all chunked files.
    pub bytes: u64,
    /// COPY operations handed downstream.
    pub chunks: u64,
    /// CLEANUP operations handed downstream.
    pub cleanups: u64,
    /// Operations re-enqueued after a filesystem error.
    pub retries: u64,
}

/// Drain `queue`, reporting progress through `on_progress`.
///
/// # Errors
///
/// * On the first fatal error; the queue is left as it was at that point
pub fn run_participant<F>(
    queue: &mut LocalQueue,
    options: &Options,
    on_progress: F,
) -> Result<RunSummary, TreewalkError>
where
    F: Fn(&RunSummary, usize),
{
    let mut summary = RunSummary::default();

    while let Some(token) = queue.dequeue() {
        let op = decode(&token)?;
        summary.processed += 1;

        match op.opcode {
            Opcode::Treewalk => match treewalk(&op, options, queue)? {
                Outcome::Expanded { .. } => summary.directories += 1,
                Outcome::Chunked { file_size, .. } => {
                    summary.files += 1;
                    summary.bytes += file_size;
                }
                Outcome::Retried(_) => summary.retries += 1,
            },
            Opcode::Copy => {
                hand_off_copy(&op, options);
                summary.chunks += 1;
            }
            Opcode::Cleanup => {
                log::trace!("Cleanup of {}", op.operand.display());
                summary.cleanups += 1;
            }
        }

        if summary.processed % PROGRESS_INTERVAL == 0 {
            on_progress(&summary, queue.len());
        }
    }

    on_progress(&summary, 0);

    Ok(summary)
}

fn hand_off_copy(op: &Operation, options: &Options) {
    let range = op.chunk_range(options.chunk_size());
    log::trace!(
        "Copy {} [{}..{}) -> {}",
        op.operand.display(),
        range.start,
        range.end,
        op.destination_path(options.dest_root()).display()
    );
}
