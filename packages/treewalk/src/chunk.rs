//! Splitting regular files into COPY operations.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use pcopy_config::Options;
use pcopy_operation::{Operation, encode};

use crate::error::TreewalkError;
use crate::queue::WorkQueue;

/// Number of chunks needed to cover `file_size` bytes.
///
/// A zero-length file has no chunks.
///
/// # Panics
///
/// * If `chunk_size` is zero
#[must_use]
pub const fn chunk_count(file_size: u64, chunk_size: u64) -> u64 {
    file_size.div_ceil(chunk_size)
}

/// Enqueue one COPY operation per chunk of the file `op` refers to.
///
/// Chunks `0..file_size / chunk_size` are full; a trailing partial chunk is
/// added when the size is not a multiple of the chunk size. No I/O is done
/// here; each COPY carries its index and the file size, which is enough to
/// derive its byte range.
///
/// Returns the number of chunks enqueued.
///
/// # Errors
///
/// * If the file needs more chunks than a `u32` index can address
pub fn chunk_file(
    op: &Operation,
    file_size: u64,
    options: &Options,
    queue: &mut dyn WorkQueue,
) -> Result<u32, TreewalkError> {
    let chunk_size = options.chunk_size();
    let full_chunks = file_size / chunk_size;
    let total = chunk_count(file_size, chunk_size);

    let total = u32::try_from(total).map_err(|_| TreewalkError::TooManyChunks {
        path: op.operand.clone(),
        file_size,
        chunk_size,
    })?;

    log::debug!(
        "File {} size is {file_size} with {full_chunks} full chunks (total {total})",
        op.operand.display()
    );

    for index in 0..total {
        let chunk = op.copy_chunk(index, file_size);
        log::trace!("Enqueueing chunk {index} of {}", op.operand.display());
        queue.enqueue(encode(&chunk));
    }

    Ok(total)
}
