//! Configuration types for pcopy.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Settings read from a configuration file.
///
/// Every field is optional; unset fields fall back to command-line values or
/// built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FileConfig {
    /// Root directory that sources are mirrored into.
    #[serde(default)]
    pub dest_root: Option<PathBuf>,

    /// Abort the run on any filesystem error instead of retrying.
    #[serde(default)]
    pub reliable_filesystem: Option<bool>,

    /// Chunk size in bytes.
    #[serde(default)]
    pub chunk_size: Option<u64>,

    /// Extra path segment inserted under the destination root.
    #[serde(default)]
    pub dest_base_appendix: Option<String>,
}

/// Validated, read-only options for a run.
///
/// Built once through [`crate::OptionsBuilder`] and shared by reference with
/// every component afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub(crate) dest_root: PathBuf,
    pub(crate) reliable_filesystem: bool,
    pub(crate) chunk_size: u64,
    pub(crate) dest_base_appendix: Option<String>,
}

impl Options {
    /// Root directory that sources are mirrored into.
    #[must_use]
    pub fn dest_root(&self) -> &Path {
        &self.dest_root
    }

    /// Whether filesystem errors are fatal (`true`) or retried (`false`).
    #[must_use]
    pub const fn reliable_filesystem(&self) -> bool {
        self.reliable_filesystem
    }

    /// Size of a full chunk in bytes. Always greater than zero.
    #[must_use]
    pub const fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Extra path segment inserted under the destination root.
    #[must_use]
    pub fn dest_base_appendix(&self) -> Option<&str> {
        self.dest_base_appendix.as_deref()
    }
}
