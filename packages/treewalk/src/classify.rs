//! Entry point of the TREEWALK stage.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs::{self, FileType};

use pcopy_config::Options;
use pcopy_operation::{Opcode, Operation};

use crate::Outcome;
use crate::chunk::chunk_file;
use crate::error::TreewalkError;
use crate::expand::expand_directory;
use crate::policy::handle_failure;
use crate::queue::WorkQueue;

/// Classify the operand of `op` and expand or chunk it.
///
/// Symbolic links are never followed: a link is an unsupported object, like
/// a device, socket or FIFO.
///
/// # Errors
///
/// * If `op` is not a TREEWALK operation
///
/// Any returned error is fatal for the whole run: the caller must stop. With
/// an unreliable filesystem, filesystem errors are retried by re-enqueueing
/// `op` and reported as [`Outcome::Retried`] instead.
pub fn treewalk(
    op: &Operation,
    options: &Options,
    queue: &mut dyn WorkQueue,
) -> Result<Outcome, TreewalkError> {
    if op.opcode != Opcode::Treewalk {
        return Err(TreewalkError::UnexpectedOpcode(op.opcode));
    }

    let metadata = match fs::symlink_metadata(&op.operand) {
        Ok(metadata) => metadata,
        Err(e) => {
            let error = TreewalkError::MetadataQueryFailed {
                path: op.operand.clone(),
                source: e,
            };
            return handle_failure(op, error, options, queue);
        }
    };

    let file_type = metadata.file_type();

    if file_type.is_dir() {
        log::debug!("Found a directory at {}", op.operand.display());
        expand_directory(op, options, queue)
    } else if file_type.is_file() {
        log::debug!("Found a file at {}", op.operand.display());
        match chunk_file(op, metadata.len(), options, queue) {
            Ok(chunks) => Ok(Outcome::Chunked {
                file_size: metadata.len(),
                chunks,
            }),
            Err(error) => handle_failure(op, error, options, queue),
        }
    } else {
        let error = TreewalkError::UnsupportedObjectType {
            path: op.operand.clone(),
            kind: describe(file_type),
        };
        handle_failure(op, error, options, queue)
    }
}

#[cfg(unix)]
fn describe(file_type: FileType) -> &'static str {
    use std::os::unix::fs::FileTypeExt;

    if file_type.is_symlink() {
        "symlink"
    } else if file_type.is_fifo() {
        "fifo"
    } else if file_type.is_socket() {
        "socket"
    } else if file_type.is_block_device() {
        "block device"
    } else if file_type.is_char_device() {
        "character device"
    } else {
        "unknown"
    }
}

#[cfg(not(unix))]
fn describe(file_type: FileType) -> &'static str {
    if file_type.is_symlink() {
        "symlink"
    } else {
        "unknown"
    }
}
