//! Assembling [`Options`] from file settings and command-line overrides.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Component, Path, PathBuf};

use pcopy_operation::DEFAULT_CHUNK_SIZE;

use crate::error::ConfigError;
use crate::types::{FileConfig, Options};

/// Builder for [`Options`].
///
/// Start from a [`FileConfig`] (or empty), apply overrides, then
/// [`build`](Self::build). Later setters win over earlier values.
#[derive(Debug, Clone, Default)]
pub struct OptionsBuilder {
    dest_root: Option<PathBuf>,
    reliable_filesystem: Option<bool>,
    chunk_size: Option<u64>,
    dest_base_appendix: Option<String>,
}

impl OptionsBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder seeded with values from a configuration file.
    #[must_use]
    pub fn from_file(file: FileConfig) -> Self {
        Self {
            dest_root: file.dest_root,
            reliable_filesystem: file.reliable_filesystem,
            chunk_size: file.chunk_size,
            dest_base_appendix: file.dest_base_appendix,
        }
    }

    /// Set the destination root.
    #[must_use]
    pub fn dest_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.dest_root = Some(path.into());
        self
    }

    /// Set whether the filesystem is reliable.
    #[must_use]
    pub const fn reliable_filesystem(mut self, reliable: bool) -> Self {
        self.reliable_filesystem = Some(reliable);
        self
    }

    /// Set the chunk size in bytes.
    #[must_use]
    pub const fn chunk_size(mut self, bytes: u64) -> Self {
        self.chunk_size = Some(bytes);
        self
    }

    /// Set the destination appendix.
    #[must_use]
    pub fn dest_base_appendix(mut self, appendix: impl Into<String>) -> Self {
        self.dest_base_appendix = Some(appendix.into());
        self
    }

    /// Validate and build the options.
    ///
    /// Defaults: reliable filesystem, 1 MiB chunks, no appendix.
    ///
    /// # Errors
    ///
    /// * If no destination root was set
    /// * If the chunk size is zero
    /// * If the appendix is empty, absolute, or climbs out with `..`
    pub fn build(self) -> Result<Options, ConfigError> {
        let dest_root = self.dest_root.ok_or(ConfigError::MissingDestination)?;

        let chunk_size = self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE);
        if chunk_size == 0 {
            return Err(ConfigError::InvalidChunkSize(chunk_size));
        }

        if let Some(appendix) = &self.dest_base_appendix {
            validate_appendix(appendix)?;
        }

        let options = Options {
            dest_root,
            reliable_filesystem: self.reliable_filesystem.unwrap_or(true),
            chunk_size,
            dest_base_appendix: self.dest_base_appendix,
        };

        log::debug!("Built options: {options:?}");

        Ok(options)
    }
}

fn validate_appendix(appendix: &str) -> Result<(), ConfigError> {
    let path = Path::new(appendix);
    let plain = !appendix.is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

    if plain {
        Ok(())
    } else {
        Err(ConfigError::InvalidAppendix(appendix.to_string()))
    }
}
