//! TOML configuration file loader.

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::types::FileConfig;

/// Load a TOML configuration file.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// * If the file cannot be read
/// * If the file cannot be parsed as TOML or has unknown keys
pub fn load_toml_config(path: &Path) -> Result<FileConfig, ConfigError> {
    log::debug!("Loading TOML config from {}", path.display());

    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: FileConfig = toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    log::debug!("Loaded config: {config:?}");

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_toml_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
destRoot = "/scratch/copy"
reliableFilesystem = false
chunkSize = 4194304
destBaseAppendix = "2024"
"#
        )
        .unwrap();

        let config = load_toml_config(file.path()).unwrap();

        assert_eq!(config.dest_root, Some(PathBuf::from("/scratch/copy")));
        assert_eq!(config.reliable_filesystem, Some(false));
        assert_eq!(config.chunk_size, Some(4_194_304));
        assert_eq!(config.dest_base_appendix.as_deref(), Some("2024"));
    }

    #[test]
    fn test_load_minimal_toml_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "reliableFilesystem = true").unwrap();

        let config = load_toml_config(file.path()).unwrap();

        assert_eq!(config.reliable_filesystem, Some(true));
        assert!(config.dest_root.is_none());
        assert!(config.chunk_size.is_none());
    }

    #[test]
    fn test_load_toml_config_unknown_key() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "chunk_size = 10").unwrap();

        let err = load_toml_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::TomlParseError { .. }));
    }

    #[test]
    fn test_load_toml_config_missing_file() {
        let err = load_toml_config(Path::new("/nonexistent/pcopy.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
