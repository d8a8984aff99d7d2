//! Directory expansion.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::ffi::OsString;
use std::fs;
use std::path::Path;

use pcopy_config::Options;
use pcopy_operation::{Operation, encode};

use crate::Outcome;
use crate::error::TreewalkError;
use crate::policy::handle_failure;
use crate::queue::WorkQueue;

/// Create the destination directory for `op` and enqueue a TREEWALK per child.
///
/// The destination (and any missing ancestors) exists before any child is
/// enqueued. The listing is read in full before enqueueing, so a failure part
/// way through never leaves a partial set of children behind a retry.
///
/// # Errors
///
/// * If the destination cannot be created or the source cannot be listed
///   and the filesystem is reliable
pub fn expand_directory(
    op: &Operation,
    options: &Options,
    queue: &mut dyn WorkQueue,
) -> Result<Outcome, TreewalkError> {
    let dest = op.destination_path(options.dest_root());

    log::debug!("Creating directory {}", dest.display());

    if let Err(e) = fs::create_dir_all(&dest) {
        let error = TreewalkError::DirectoryCreationFailed {
            path: dest,
            source: e,
        };
        return handle_failure(op, error, options, queue);
    }

    let names = match list_children(&op.operand) {
        Ok(names) => names,
        Err(error) => return handle_failure(op, error, options, queue),
    };

    log::debug!(
        "Enqueueing {} entries of {} using base {:?}",
        names.len(),
        op.operand.display(),
        op.relative_path()
    );

    for name in &names {
        let child = op.child(name);
        log::trace!("Enqueueing treewalk of {}", child.operand.display());
        queue.enqueue(encode(&child));
    }

    Ok(Outcome::Expanded {
        children: names.len(),
    })
}

/// Names of the direct children of `dir`.
fn list_children(dir: &Path) -> Result<Vec<OsString>, TreewalkError> {
    let listing_failed = |e| TreewalkError::DirectoryListingFailed {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut names = Vec::new();

    for entry in fs::read_dir(dir).map_err(listing_failed)? {
        names.push(entry.map_err(listing_failed)?.file_name());
    }

    Ok(names)
}
