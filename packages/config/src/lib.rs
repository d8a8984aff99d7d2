//! Run options for pcopy.
//!
//! This crate provides the read-only [`Options`] value that every stage of a
//! run consults, and the loading of optional TOML configuration files.
//!
//! # Example
//!
//! ```rust,ignore
//! use pcopy_config::{OptionsBuilder, load_file_config};
//!
//! let file = load_file_config(None)?;
//! let options = OptionsBuilder::from_file(file)
//!     .dest_root("/scratch/dest")
//!     .build()?;
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

mod builder;
mod discovery;
mod error;
mod toml_loader;
mod types;

pub use builder::OptionsBuilder;
pub use discovery::{CONFIG_ENV_VAR, default_config_path};
pub use error::ConfigError;
pub use toml_loader::load_toml_config;
pub use types::{FileConfig, Options};

use std::path::Path;

/// Load file settings from `path`, or from the default location if `None`.
///
/// Returns empty settings when no path is given and no default file exists.
///
/// # Errors
///
/// * If the file cannot be read
/// * If the file cannot be parsed
pub fn load_file_config(path: Option<&Path>) -> Result<FileConfig, ConfigError> {
    match path {
        Some(path) => load_toml_config(path),
        None => default_config_path().map_or_else(
            || {
                log::debug!("No config file found, using defaults");
                Ok(FileConfig::default())
            },
            |path| load_toml_config(&path),
        ),
    }
}
