//! Error types for configuration loading.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or building run options.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file {}: {source}", path.display())]
    ReadError {
        /// Path to the file that couldn't be read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("Failed to parse TOML config {}: {source}", path.display())]
    TomlParseError {
        /// Path to the file that couldn't be parsed.
        path: PathBuf,
        /// The underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// No destination root was given.
    #[error("No destination path configured")]
    MissingDestination,

    /// Chunk size must be at least one byte.
    #[error("Invalid chunk size {0}: must be greater than zero")]
    InvalidChunkSize(u64),

    /// Destination appendix is not a plain relative segment.
    #[error("Invalid destination appendix {0:?}: must be a non-empty relative path without '..'")]
    InvalidAppendix(String),
}
