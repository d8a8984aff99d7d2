//! Error types for the treewalk stage.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use pcopy_operation::{CodecError, Opcode};
use thiserror::Error;

/// Errors that can occur while walking a source tree.
#[derive(Debug, Error)]
pub enum TreewalkError {
    /// Failed to get metadata for a source path.
    #[error("Could not get info for {}: {source}", path.display())]
    MetadataQueryFailed {
        /// The source path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The source path is neither a directory nor a regular file.
    #[error("Unsupported file type ({kind}) at {}", path.display())]
    UnsupportedObjectType {
        /// The source path.
        path: PathBuf,
        /// What was found instead.
        kind: &'static str,
    },

    /// Failed to open or read a source directory.
    #[error("Unable to read directory {}: {source}", path.display())]
    DirectoryListingFailed {
        /// The source directory.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a destination directory.
    #[error("Failed to create directory {}: {source}", path.display())]
    DirectoryCreationFailed {
        /// The destination directory.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A token could not be decoded.
    #[error(transparent)]
    MalformedToken(#[from] CodecError),

    /// A token reached the treewalk stage with another opcode.
    #[error("Treewalk stage received a {0} operation")]
    UnexpectedOpcode(Opcode),

    /// A source root was given as a relative path.
    #[error("Source path must be absolute: {}", .0.display())]
    RelativeSource(PathBuf),

    /// A file has more chunks than a chunk index can address.
    #[error(
        "File {} of {file_size} bytes needs more than {} chunks of {chunk_size} bytes",
        path.display(),
        u32::MAX
    )]
    TooManyChunks {
        /// The source file.
        path: PathBuf,
        /// Size of the file in bytes.
        file_size: u64,
        /// Configured chunk size in bytes.
        chunk_size: u64,
    },
}

impl TreewalkError {
    /// Whether the error comes from the filesystem and may go away on its own.
    #[must_use]
    pub const fn is_filesystem_error(&self) -> bool {
        matches!(
            self,
            Self::MetadataQueryFailed { .. }
                | Self::UnsupportedObjectType { .. }
                | Self::DirectoryListingFailed { .. }
                | Self::DirectoryCreationFailed { .. }
        )
    }
}
