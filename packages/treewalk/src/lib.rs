//! Queue-driven traversal of a source tree.
//!
//! This crate turns TREEWALK operations into more work:
//!
//! * A directory creates its mirrored destination directory and yields one
//!   TREEWALK per child
//! * A regular file yields one COPY per chunk
//! * Anything else, or any filesystem error, is fatal or retried according
//!   to [`Options::reliable_filesystem`](pcopy_config::Options::reliable_filesystem)
//!
//! Nothing here holds the tree in memory; each call handles one operation and
//! hands everything it produces to a [`WorkQueue`].
//!
//! # Example
//!
//! ```rust,ignore
//! use pcopy_operation::{decode, encode};
//! use pcopy_treewalk::{LocalQueue, WorkQueue, seed_operation, treewalk};
//!
//! let mut queue = LocalQueue::new();
//! queue.enqueue(encode(&seed_operation(source, &options)?));
//!
//! while let Some(token) = queue.dequeue() {
//!     treewalk(&decode(&token)?, &options, &mut queue)?;
//! }
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod chunk;
mod classify;
mod error;
mod expand;
mod policy;
mod queue;
mod seed;

pub use chunk::{chunk_count, chunk_file};
pub use classify::treewalk;
pub use error::TreewalkError;
pub use expand::expand_directory;
pub use policy::{Decision, decide};
pub use queue::{LocalQueue, WorkQueue};
pub use seed::seed_operation;

/// What processing one TREEWALK operation did.
#[derive(Debug)]
pub enum Outcome {
    /// A directory was mirrored and its children enqueued.
    Expanded {
        /// Number of TREEWALK operations enqueued.
        children: usize,
    },
    /// A regular file was split into COPY operations.
    Chunked {
        /// Size of the file in bytes.
        file_size: u64,
        /// Number of COPY operations enqueued.
        chunks: u32,
    },
    /// The operation failed and was put back on the queue unchanged.
    Retried(TreewalkError),
}
