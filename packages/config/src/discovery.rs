//! Configuration file discovery.
//!
//! A config file is looked up in `$PCOPY_CONFIG` first and then in the
//! platform configuration directory (`~/.config/pcopy/config.toml` on Linux).

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "PCOPY_CONFIG";

/// Find the configuration file to use when none was given on the command line.
///
/// An explicit `$PCOPY_CONFIG` is returned even if it does not exist, so that
/// a typo surfaces as a read error. The platform default is only returned if
/// it is an existing file.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    resolve_config_path(std::env::var_os(CONFIG_ENV_VAR), dirs::config_dir())
}

fn resolve_config_path(
    env_value: Option<OsString>,
    config_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(value) = env_value.filter(|v| !v.is_empty()) {
        log::debug!("Using config from ${CONFIG_ENV_VAR}");
        return Some(PathBuf::from(value));
    }

    let candidate = config_dir?.join("pcopy").join("config.toml");
    if candidate.is_file() {
        log::debug!("Found config at {}", candidate.display());
        Some(candidate)
    } else {
        None
    }
}
