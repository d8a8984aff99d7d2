//! Retry/failure policy shared by every treewalk step.
//!
//! Filesystem errors are fatal when the filesystem is declared reliable and
//! are retried by re-enqueueing the unchanged operation otherwise. There is
//! no retry ceiling and no backoff.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use pcopy_config::Options;
use pcopy_operation::{Operation, encode};

use crate::Outcome;
use crate::error::TreewalkError;
use crate::queue::WorkQueue;

/// What to do about a failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Stop the whole run.
    Fatal,
    /// Put the identical operation back on the queue.
    RetrySame,
}

/// Decide how to handle `error`.
///
/// Only filesystem errors are ever retried; anything else would fail the
/// same way every time.
#[must_use]
pub const fn decide(error: &TreewalkError, reliable_filesystem: bool) -> Decision {
    if error.is_filesystem_error() && !reliable_filesystem {
        Decision::RetrySame
    } else {
        Decision::Fatal
    }
}

/// Apply the policy to a failure of `op`.
///
/// Returns the error for [`Decision::Fatal`] without touching the queue.
pub(crate) fn handle_failure(
    op: &Operation,
    error: TreewalkError,
    options: &Options,
    queue: &mut dyn WorkQueue,
) -> Result<Outcome, TreewalkError> {
    match decide(&error, options.reliable_filesystem()) {
        Decision::Fatal => {
            log::debug!("Fatal failure for {}: {error}", op.operand.display());
            Err(error)
        }
        Decision::RetrySame => {
            log::warn!(
                "{error}; unreliable filesystem, retrying {}",
                op.operand.display()
            );
            queue.enqueue(encode(op));
            Ok(Outcome::Retried(error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pcopy_config::OptionsBuilder;
    use pcopy_operation::decode;
    use std::path::PathBuf;

    fn metadata_error() -> TreewalkError {
        TreewalkError::MetadataQueryFailed {
            path: PathBuf::from("/src/gone"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        }
    }

    #[test]
    fn test_decide_filesystem_errors() {
        assert_eq!(decide(&metadata_error(), true), Decision::Fatal);
        assert_eq!(decide(&metadata_error(), false), Decision::RetrySame);

        let unsupported = TreewalkError::UnsupportedObjectType {
            path: PathBuf::from("/src/fifo"),
            kind: "fifo",
        };
        assert_eq!(decide(&unsupported, false), Decision::RetrySame);
    }

    #[test]
    fn test_decide_never_retries_non_filesystem_errors() {
        let errors = [
            TreewalkError::RelativeSource(PathBuf::from("src")),
            TreewalkError::TooManyChunks {
                path: PathBuf::from("/src/huge"),
                file_size: u64::MAX,
                chunk_size: 1,
            },
        ];

        for error in &errors {
            assert_eq!(decide(error, false), Decision::Fatal, "{error}");
        }
    }

    #[test]
    fn test_handle_failure_retry_enqueues_identical_operation() {
        let options = OptionsBuilder::new()
            .dest_root("/dest")
            .reliable_filesystem(false)
            .build()
            .unwrap();
        let op = Operation::treewalk("/src/gone", 4, Some("x".to_string()));
        let mut queue: Vec<String> = Vec::new();

        let outcome = handle_failure(&op, metadata_error(), &options, &mut queue).unwrap();

        assert!(matches!(outcome, Outcome::Retried(_)));
        assert_eq!(queue.len(), 1);
        assert_eq!(decode(&queue[0]).unwrap(), op);
    }

    #[test]
    fn test_handle_failure_fatal_leaves_queue_untouched() {
        let options = OptionsBuilder::new().dest_root("/dest").build().unwrap();
        let op = Operation::treewalk("/src/gone", 4, None);
        let mut queue: Vec<String> = Vec::new();

        let err = handle_failure(&op, metadata_error(), &options, &mut queue).unwrap_err();

        assert!(matches!(err, TreewalkError::MetadataQueryFailed { .. }));
        assert!(queue.is_empty());
    }
}
